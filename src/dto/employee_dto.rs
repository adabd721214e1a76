use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::employee::{EmployeeData, EmployeeRecord, EmployeeRole, EmployeeStatus};
use crate::utils::validation::validate_not_blank;

// Request para crear un empleado junto con su cuenta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 3, max = 150), custom = "validate_not_blank")]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    pub role: EmployeeRole,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub branch_id: i64,
}

impl CreateEmployeeRequest {
    pub fn data(&self) -> EmployeeData {
        EmployeeData {
            role: self.role,
            status: self.status,
            branch_id: self.branch_id,
        }
    }
}

// Request para reemplazar cargo, estado y sucursal
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    pub branch_id: i64,
}

impl From<UpdateEmployeeRequest> for EmployeeData {
    fn from(request: UpdateEmployeeRequest) -> Self {
        Self {
            role: request.role,
            status: request.status,
            branch_id: request.branch_id,
        }
    }
}

// Response de empleado para administración
#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: EmployeeRole,
    pub role_display: String,
    pub status: EmployeeStatus,
    pub status_display: String,
    pub branch_id: i64,
    pub branch_name: String,
}

impl From<EmployeeRecord> for EmployeeResponse {
    fn from(record: EmployeeRecord) -> Self {
        let employee = record.employee;
        Self {
            id: employee.id,
            account_id: employee.account_id,
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            role: employee.role,
            role_display: employee.role.label().to_string(),
            status: employee.status,
            status_display: employee.status.label().to_string(),
            branch_id: employee.branch_id,
            branch_name: record.branch_name,
        }
    }
}

// Opción de conductor para selectores
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverOption {
    pub id: i64,
    pub username: String,
}

impl From<EmployeeRecord> for DriverOption {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record.employee.id,
            username: record.username,
        }
    }
}
