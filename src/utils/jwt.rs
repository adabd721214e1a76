//! Utilidades JWT
//!
//! Emisión y verificación de tokens de acceso y de refresco (HS256).
//! Los claims llevan la identidad y los flags `is_staff` / `is_superuser`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::environment::EnvironmentConfig, models::account::Account, utils::errors::AppError};

/// Tipo de token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims del JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // account_id
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    pub fn account_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::Jwt("Identificador de cuenta inválido".to_string()))
    }
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_expiration: u64,
    pub refresh_expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            access_expiration: config.jwt_expiration,
            refresh_expiration: config.jwt_refresh_expiration,
        }
    }
}

/// Generar un token del tipo indicado para una cuenta
pub fn generate_token(
    account: &Account,
    token_type: TokenType,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let lifetime = match token_type {
        TokenType::Access => config.access_expiration,
        TokenType::Refresh => config.refresh_expiration,
    };
    let expires_at = now + chrono::Duration::seconds(lifetime as i64);

    let claims = JwtClaims {
        sub: account.id.to_string(),
        username: account.username.clone(),
        is_staff: account.is_staff,
        is_superuser: account.is_superuser,
        token_type,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar un token, exigiendo el tipo esperado
pub fn verify_token(token: &str, expected: TokenType, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::new(Algorithm::HS256))
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    if token_data.claims.token_type != expected {
        return Err(AppError::Jwt("Tipo de token incorrecto".to_string()));
    }

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Header Authorization debe comenzar con 'Bearer '".to_string()))?;

    if token.trim().is_empty() {
        return Err(AppError::Unauthorized("Token no puede estar vacío".to_string()));
    }

    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account() -> Account {
        Account {
            id: 7,
            username: "admin".to_string(),
            email: "admin@acmetrans.cl".to_string(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: true,
            is_superuser: true,
            created_at: Utc::now(),
        }
    }

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_expiration: 3600,
            refresh_expiration: 7200,
        }
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let token = generate_token(&account(), TokenType::Access, &config()).unwrap();
        let claims = verify_token(&token, TokenType::Access, &config()).unwrap();
        assert_eq!(claims.account_id().unwrap(), 7);
        assert_eq!(claims.username, "admin");
        assert!(claims.is_superuser);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token = generate_token(&account(), TokenType::Refresh, &config()).unwrap();
        assert!(verify_token(&token, TokenType::Access, &config()).is_err());
        assert!(verify_token(&token, TokenType::Refresh, &config()).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = generate_token(&account(), TokenType::Access, &config()).unwrap();
        let other = JwtConfig { secret: "other".to_string(), ..config() };
        assert!(verify_token(&token, TokenType::Access, &other).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Token abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
