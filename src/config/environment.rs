//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Secreto usado solo en desarrollo y tests
const DEV_JWT_SECRET: &str = "acme-trans-dev-secret-change-in-production";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Duración del token de acceso en segundos
    pub jwt_expiration: u64,
    /// Duración del token de refresco en segundos
    pub jwt_refresh_expiration: u64,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
    /// Al completar o cancelar un pedido despachado, devolver camión y
    /// conductor a `available`
    pub release_fleet_on_close: bool,
    /// Permitir asignar a un pedido un camión de otra sucursal
    pub allow_cross_branch_assignment: bool,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 3600,
            jwt_refresh_expiration: 7 * 24 * 3600,
            cors_origins: vec!["http://localhost:5173".to_string()],
            bcrypt_cost: bcrypt::DEFAULT_COST,
            release_fleet_on_close: true,
            allow_cross_branch_assignment: false,
            log_level: "debug".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno, con valores por
    /// defecto de desarrollo para las opcionales
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "development" || environment == "test" => defaults.jwt_secret,
            _ => bail!("JWT_SECRET must be set outside development"),
        };

        let log_default = if environment == "development" { "debug" } else { "info" };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            jwt_refresh_expiration: parse_var("JWT_REFRESH_EXPIRATION", defaults.jwt_refresh_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            release_fleet_on_close: parse_var("RELEASE_FLEET_ON_CLOSE", defaults.release_fleet_on_close)?,
            allow_cross_branch_assignment: parse_var(
                "ALLOW_CROSS_BRANCH_ASSIGNMENT",
                defaults.allow_cross_branch_assignment,
            )?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| log_default.to_string()),
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
