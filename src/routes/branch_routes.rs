use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::branch_controller::BranchController;
use crate::dto::branch_dto::BranchRequest;
use crate::middleware::auth::Caller;
use crate::models::branch::Branch;
use crate::models::dashboard::DashboardSnapshot;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

pub fn create_branch_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_branches).post(create_branch))
        .route("/:id", get(get_branch).put(update_branch).delete(delete_branch))
        .route("/:id/dashboard", get(get_dashboard))
}

async fn create_branch(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(request): ValidatedJson<BranchRequest>,
) -> Result<(StatusCode, Json<Branch>), AppError> {
    let controller = BranchController::new(&state);
    let branch = controller.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

async fn list_branches(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Branch>>, AppError> {
    let controller = BranchController::new(&state);
    Ok(Json(controller.list(&caller).await?))
}

async fn get_branch(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Branch>, AppError> {
    let controller = BranchController::new(&state);
    Ok(Json(controller.get_by_id(&caller, id).await?))
}

async fn update_branch(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<BranchRequest>,
) -> Result<Json<Branch>, AppError> {
    let controller = BranchController::new(&state);
    Ok(Json(controller.update(&caller, id, request).await?))
}

async fn delete_branch(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = BranchController::new(&state);
    controller.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let controller = BranchController::new(&state);
    Ok(Json(controller.dashboard(&caller, id).await?))
}
