//! Modelo de Branch (sucursal)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sucursal - mapea exactamente a la tabla branches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
}

/// Valores para insertar o reemplazar una sucursal
#[derive(Debug, Clone)]
pub struct BranchData {
    pub name: String,
    pub address: String,
    pub city: String,
}
