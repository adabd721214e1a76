use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::branch::{Branch, BranchData};
use crate::utils::validation::validate_not_blank;

// Request para crear o reemplazar una sucursal
#[derive(Debug, Deserialize, Validate)]
pub struct BranchRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
}

impl From<BranchRequest> for BranchData {
    fn from(request: BranchRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            address: request.address.trim().to_string(),
            city: request.city.trim().to_string(),
        }
    }
}

// Opción de sucursal para selectores
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchOption {
    pub id: i64,
    pub name: String,
    pub city: String,
}

impl From<Branch> for BranchOption {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            name: branch.name,
            city: branch.city,
        }
    }
}
