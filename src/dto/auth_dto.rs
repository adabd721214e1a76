use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{account::Account, client::ClientRecord};
use crate::utils::validation::{validate_not_blank, validate_phone, validate_tax_id};

// Registro público de un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150), custom = "validate_not_blank")]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
    #[validate(custom = "validate_tax_id")]
    pub tax_id: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
}

// Cliente recién registrado (sin password)
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub client_id: i64,
    pub username: String,
    pub email: String,
    pub company_name: Option<String>,
}

impl RegisterResponse {
    pub fn new(account: &Account, client: &ClientRecord) -> Self {
        Self {
            id: account.id,
            client_id: client.client.id,
            username: account.username.clone(),
            email: account.email.clone(),
            company_name: client.client.company_name.clone(),
        }
    }
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Par de tokens más los flags que el frontend usa para elegir la vista
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(tax_id: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: "transportes_sur".to_string(),
            email: "contacto@tsur.cl".to_string(),
            password: "cargapesada".to_string(),
            company_name: Some("Transportes del Sur".to_string()),
            tax_id: tax_id.map(str::to_string),
            phone: None,
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register(Some("76.123.456-K")).validate().is_ok());
        assert!(register(None).validate().is_ok());

        let errors = register(Some("abc")).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tax_id"));
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let request = RegisterRequest {
            email: "no-es-correo".to_string(),
            ..register(None)
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
