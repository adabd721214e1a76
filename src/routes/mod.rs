//! Rutas HTTP de la API
//!
//! Las rutas de administración pasan por dos capas: autenticación y
//! verificación de superusuario. Las de clientes y selectores solo
//! requieren un token de acceso válido.

pub mod auth_routes;
pub mod branch_routes;
pub mod client_routes;
pub mod employee_routes;
pub mod lookup_routes;
pub mod order_routes;
pub mod truck_routes;

use axum::{middleware::from_fn, middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::{admin_only_middleware, auth_middleware, cors_middleware};
use crate::state::AppState;

/// Construye el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .nest("/api/admin/branches", branch_routes::create_branch_router())
        .nest("/api/admin/clients", client_routes::create_client_router())
        .nest("/api/admin/employees", employee_routes::create_employee_router())
        .nest("/api/admin/trucks", truck_routes::create_truck_router())
        .nest("/api/admin/orders", order_routes::create_admin_order_router())
        .route_layer(from_fn(admin_only_middleware));

    let protected = Router::new()
        .merge(admin)
        .nest("/api/my-orders", order_routes::create_client_order_router())
        .nest("/api/data", lookup_routes::create_lookup_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
