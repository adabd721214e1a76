use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::truck_controller::TruckController;
use crate::dto::truck_dto::{TruckRequest, TruckResponse};
use crate::middleware::auth::Caller;
use crate::models::truck::TruckFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppQuery, ValidatedJson};

pub fn create_truck_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trucks).post(create_truck))
        .route("/:id", get(get_truck).put(update_truck).delete(delete_truck))
}

async fn create_truck(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(request): ValidatedJson<TruckRequest>,
) -> Result<(StatusCode, Json<TruckResponse>), AppError> {
    let controller = TruckController::new(&state);
    let truck = controller.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(truck)))
}

async fn list_trucks(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    AppQuery(filter): AppQuery<TruckFilter>,
) -> Result<Json<Vec<TruckResponse>>, AppError> {
    let controller = TruckController::new(&state);
    Ok(Json(controller.list(&caller, &filter).await?))
}

async fn get_truck(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<TruckResponse>, AppError> {
    let controller = TruckController::new(&state);
    Ok(Json(controller.get_by_id(&caller, id).await?))
}

async fn update_truck(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<TruckRequest>,
) -> Result<Json<TruckResponse>, AppError> {
    let controller = TruckController::new(&state);
    Ok(Json(controller.update(&caller, id, request).await?))
}

async fn delete_truck(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = TruckController::new(&state);
    controller.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
