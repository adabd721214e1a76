//! Middleware de autenticación JWT
//!
//! Verifica el token de acceso, comprueba que la cuenta siga existiendo e
//! inyecta un `Caller` en las extensions de la request. Los handlers lo
//! reciben con `Extension<Caller>` y lo pasan a los controladores.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    models::account::Account,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError, AppResult},
        jwt::{extract_token_from_header, verify_token, TokenType},
    },
};

/// Identidad autenticada de quien hace la request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub account_id: i64,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Caller {
    /// Permiso de administrador: solo superusuarios
    pub fn require_admin(&self) -> AppResult<()> {
        if !self.is_superuser {
            return Err(forbidden_error(
                "acceder a la administración",
                "se requieren permisos de superusuario",
            ));
        }
        Ok(())
    }
}

impl From<&Account> for Caller {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            username: account.username.clone(),
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;
    let token = extract_token_from_header(auth_header)?;

    let claims = verify_token(token, TokenType::Access, &state.jwt_config())?;

    // Los flags del token pueden estar desactualizados: se leen de la cuenta
    let account = state
        .repos
        .accounts
        .find_by_id(claims.account_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Cuenta no encontrada".to_string()))?;

    request.extensions_mut().insert(Caller::from(&account));

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn admin_only_middleware(
    Extension(caller): Extension<Caller>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    caller.require_admin()?;
    Ok(next.run(request).await)
}
