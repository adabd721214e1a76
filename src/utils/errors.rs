//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Referential integrity: {0}")]
    ReferentialIntegrity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
            code: code.to_string(),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Código HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReferentialIntegrity(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) | AppError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ErrorResponse::new(
                    "Database Error",
                    "Ocurrió un error al procesar los datos",
                    "DB_ERROR",
                )
            }
            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                ErrorResponse::new("Validation Error", "Los datos enviados no son válidos", "VALIDATION_ERROR")
                    .with_details(json!(e))
            }
            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED")
            }
            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden access: {}", msg);
                ErrorResponse::new("Forbidden", msg, "FORBIDDEN")
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                ErrorResponse::new("Not Found", msg, "NOT_FOUND")
            }
            AppError::ReferentialIntegrity(msg) => {
                tracing::info!("Referential integrity: {}", msg);
                ErrorResponse::new("Referential Integrity", msg, "REFERENTIAL_INTEGRITY")
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                ErrorResponse::new("Conflict", msg, "CONFLICT")
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "Ocurrió un error al procesar los datos",
                    "INTERNAL_ERROR",
                )
            }
            AppError::Jwt(msg) => {
                tracing::warn!("JWT error: {}", msg);
                ErrorResponse::new("JWT Error", msg, "JWT_ERROR")
            }
            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                ErrorResponse::new(
                    "Hash Error",
                    "Ocurrió un error al procesar las credenciales",
                    "HASH_ERROR",
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Clasificación de errores de sqlx.
///
/// Las violaciones de unicidad se reportan como error de validación sobre el
/// campo correspondiente; las de clave foránea como recurso inexistente.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    let field = db_err
                        .constraint()
                        .map(field_for_constraint)
                        .unwrap_or("non_field_errors");
                    return validation_error(field, "Ya existe un registro con este valor");
                }
                ErrorKind::ForeignKeyViolation => {
                    return AppError::NotFound("El recurso referenciado no existe".to_string());
                }
                _ => {}
            }
        }
        AppError::Database(e)
    }
}

fn field_for_constraint(constraint: &str) -> &'static str {
    match constraint {
        "accounts_username_key" => "username",
        "branches_name_key" => "name",
        "trucks_plate_key" => "plate",
        "clients_account_id_key" | "employees_account_id_key" => "account",
        _ => "non_field_errors",
    }
}

/// Mapear un error de borrado: una clave foránea RESTRICT significa que el
/// registro sigue referenciado.
pub fn delete_error(e: sqlx::Error, resource: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation) {
            return referenced_error(resource);
        }
    }
    AppError::from(e)
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación sobre un campo
pub fn validation_error(field: &'static str, message: impl Into<String>) -> AppError {
    AppError::Validation(field_errors(&[(field, message.into())]))
}

/// Construir `ValidationErrors` a partir de pares (campo, mensaje)
pub fn field_errors(pairs: &[(&'static str, String)]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (field, message) in pairs {
        let mut error = ValidationError::new("invalid");
        error.message = Some(Cow::Owned(message.clone()));
        errors.add(*field, error);
    }
    errors
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("No se puede {}: {}", operation, reason))
}

/// Función helper para errores de integridad referencial
pub fn referenced_error(resource: &str) -> AppError {
    AppError::ReferentialIntegrity(format!(
        "No se puede eliminar {}: todavía está referenciado por otros registros",
        resource
    ))
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_taxonomy() {
        assert_eq!(validation_error("plate", "x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden_error("ver", "no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(not_found_error("Sucursal", 9).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(referenced_error("la sucursal").status_code(), StatusCode::CONFLICT);
        assert_eq!(internal_error("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_is_distinguishable_from_internal() {
        let not_found = not_found_error("Sucursal", 42);
        let internal = internal_error("aggregation failed");
        assert_ne!(not_found.status_code(), internal.status_code());
        assert!(not_found.to_string().contains("42"));
    }

    #[test]
    fn test_field_errors_are_keyed_by_field() {
        let errors = field_errors(&[
            ("status", "no editable".to_string()),
            ("created_at", "no editable".to_string()),
        ]);
        let fields = errors.field_errors();
        assert!(fields.contains_key("status"));
        assert!(fields.contains_key("created_at"));
    }

    #[test]
    fn test_constraint_field_mapping() {
        assert_eq!(field_for_constraint("trucks_plate_key"), "plate");
        assert_eq!(field_for_constraint("accounts_username_key"), "username");
        assert_eq!(field_for_constraint("whatever"), "non_field_errors");
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_cause() {
        let response = internal_error("secret sql detail").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("secret sql detail"));
    }
}
