//! Extractores JSON y query string con errores estructurados
//!
//! `AppJson` y `AppQuery` reemplazan los rechazos en texto plano de
//! `axum::Json` y `axum::extract::Query` por un `AppError`; `ValidatedJson`
//! además ejecuta `Validate`. Los errores de datos se asocian al campo que
//! falló.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::utils::errors::{validation_error, AppError, AppResult};

/// Campos de entrada conocidos; un error en otro campo queda en
/// `non_field_errors`
const REQUEST_FIELDS: &[&str] = &[
    "username",
    "email",
    "password",
    "refresh",
    "first_name",
    "last_name",
    "company_name",
    "tax_id",
    "phone",
    "name",
    "address",
    "city",
    "role",
    "status",
    "branch_id",
    "plate",
    "capacity",
    "driver_id",
    "available",
    "client_id",
    "origin_branch_id",
    "destination",
    "cargo_type",
    "weight_kg",
    "volume_m3",
    "details",
    "desired_date",
    "estimated_cost",
    "quoted_price",
    "truck_id",
    "version",
];

/// JSON deserializado sin validación adicional
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // JSON mal formado o sin content-type es una petición incorrecta
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(from_json_value(value)?))
    }
}

/// JSON deserializado y validado con `validator`
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Filtros de la query string
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let deserializer = serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));
        let value = serde_path_to_error::deserialize(deserializer)
            .map_err(|e| field_error(&e.path().to_string(), &e.inner().to_string()))?;
        Ok(Self(value))
    }
}

/// Deserializar un valor JSON; un campo faltante, un enum ilegal o un tipo
/// incorrecto es un error de validación sobre ese campo
pub fn from_json_value<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_path_to_error::deserialize(value).map_err(|e| field_error(&e.path().to_string(), &e.inner().to_string()))
}

fn field_error(path: &str, message: &str) -> AppError {
    validation_error(field_key(path, message), message.to_string())
}

/// Nombre del campo a partir de la ruta de serde. En la raíz (".") el único
/// error posible con campo es "missing field `x`".
fn field_key(path: &str, message: &str) -> &'static str {
    let name = if path == "." {
        message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
            .unwrap_or_default()
    } else {
        path.split(|c| c == '.' || c == '[').next().unwrap_or_default()
    };

    REQUEST_FIELDS
        .iter()
        .copied()
        .find(|field| *field == name)
        .unwrap_or("non_field_errors")
}
