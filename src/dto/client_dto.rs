use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::client::{ClientProfile, ClientRecord};
use crate::utils::validation::{validate_phone, validate_tax_id};

// Request para actualizar el perfil de un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
    #[validate(custom = "validate_tax_id")]
    pub tax_id: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
}

impl From<UpdateClientRequest> for ClientProfile {
    fn from(request: UpdateClientRequest) -> Self {
        Self {
            company_name: request.company_name,
            tax_id: request.tax_id,
            phone: request.phone,
        }
    }
}

// Response de cliente para administración
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: i64,
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
}

impl From<ClientRecord> for ClientResponse {
    fn from(record: ClientRecord) -> Self {
        Self {
            id: record.client.id,
            account_id: record.client.account_id,
            username: record.username,
            email: record.email,
            company_name: record.client.company_name,
            tax_id: record.client.tax_id,
            phone: record.client.phone,
        }
    }
}
