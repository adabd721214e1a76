use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::client_controller::ClientController;
use crate::dto::client_dto::{ClientResponse, UpdateClientRequest};
use crate::middleware::auth::Caller;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients))
        .route("/:id", get(get_client).put(update_client).delete(delete_client))
}

async fn list_clients(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    let controller = ClientController::new(&state);
    Ok(Json(controller.list(&caller).await?))
}

async fn get_client(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<ClientResponse>, AppError> {
    let controller = ClientController::new(&state);
    Ok(Json(controller.get_by_id(&caller, id).await?))
}

async fn update_client(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, AppError> {
    let controller = ClientController::new(&state);
    Ok(Json(controller.update(&caller, id, request).await?))
}

async fn delete_client(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = ClientController::new(&state);
    controller.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
