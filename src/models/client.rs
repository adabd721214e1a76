//! Modelo de Client
//!
//! Perfil de cliente: uno a uno con una cuenta, dueño de cero o más pedidos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cliente - mapea exactamente a la tabla clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub account_id: i64,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
}

/// Cliente junto con los datos de su cuenta
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientRecord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub client: Client,
    pub username: String,
    pub email: String,
}

/// Datos del perfil de cliente
#[derive(Debug, Clone, Default)]
pub struct ClientProfile {
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
}
