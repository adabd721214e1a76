use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::employee_controller::EmployeeController;
use crate::dto::employee_dto::{CreateEmployeeRequest, EmployeeResponse, UpdateEmployeeRequest};
use crate::middleware::auth::Caller;
use crate::models::employee::EmployeeFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppQuery, ValidatedJson};

pub fn create_employee_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/:id", get(get_employee).put(update_employee).delete(delete_employee))
}

async fn create_employee(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    let controller = EmployeeController::new(&state);
    let employee = controller.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn list_employees(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    AppQuery(filter): AppQuery<EmployeeFilter>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let controller = EmployeeController::new(&state);
    Ok(Json(controller.list(&caller, &filter).await?))
}

async fn get_employee(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let controller = EmployeeController::new(&state);
    Ok(Json(controller.get_by_id(&caller, id).await?))
}

async fn update_employee(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let controller = EmployeeController::new(&state);
    Ok(Json(controller.update(&caller, id, request).await?))
}

async fn delete_employee(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = EmployeeController::new(&state);
    controller.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
