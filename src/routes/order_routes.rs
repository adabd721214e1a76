use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;

use crate::controllers::order_controller::OrderController;
use crate::middleware::auth::Caller;
use crate::models::order::OrderFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppQuery};

/// Pedidos propios del cliente autenticado
pub fn create_client_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_orders).post(create_my_order))
        .route("/:id", get(get_my_order))
}

/// Gestión de pedidos para administradores
pub fn create_admin_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/:id", get(get_order).patch(update_order))
}

// El payload llega como JSON crudo: la máscara de campos se aplica antes
// de deserializar
async fn create_my_order(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    AppJson(payload): AppJson<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = OrderController::new(&state);
    let order = controller.create_for_client(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_my_orders(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Value>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.list_for_client(&caller).await?))
}

async fn get_my_order(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.get_for_client(&caller, id).await?))
}

async fn list_orders(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    AppQuery(filter): AppQuery<OrderFilter>,
) -> Result<Json<Vec<Value>>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.list_admin(&caller, &filter).await?))
}

async fn get_order(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.get_admin(&caller, id).await?))
}

async fn update_order(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<Value>, AppError> {
    let controller = OrderController::new(&state);
    Ok(Json(controller.update_admin(&caller, id, payload).await?))
}
