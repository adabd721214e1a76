use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::controllers::branch_controller::BranchController;
use crate::controllers::employee_controller::EmployeeController;
use crate::controllers::truck_controller::TruckController;
use crate::dto::branch_dto::BranchOption;
use crate::dto::employee_dto::DriverOption;
use crate::dto::truck_dto::{TruckLookupQuery, TruckOption};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppQuery;

/// Datos para selectores, abiertos a cualquier usuario autenticado
pub fn create_lookup_router() -> Router<AppState> {
    Router::new()
        .route("/branches", get(list_branch_options))
        .route("/branches/:id", get(get_branch_option))
        .route("/drivers", get(list_driver_options))
        .route("/trucks", get(list_truck_options))
}

#[derive(Debug, Default, Deserialize)]
struct BranchQuery {
    branch_id: Option<i64>,
}

async fn list_branch_options(State(state): State<AppState>) -> Result<Json<Vec<BranchOption>>, AppError> {
    let controller = BranchController::new(&state);
    Ok(Json(controller.options().await?))
}

async fn get_branch_option(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BranchOption>, AppError> {
    let controller = BranchController::new(&state);
    Ok(Json(controller.option(id).await?))
}

async fn list_driver_options(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BranchQuery>,
) -> Result<Json<Vec<DriverOption>>, AppError> {
    let controller = EmployeeController::new(&state);
    Ok(Json(controller.driver_options(query.branch_id).await?))
}

async fn list_truck_options(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TruckLookupQuery>,
) -> Result<Json<Vec<TruckOption>>, AppError> {
    let controller = TruckController::new(&state);
    Ok(Json(controller.options(&query).await?))
}
