//! Modelo de Employee
//!
//! Empleado interno con cargo y estado de disponibilidad. Pertenece a una
//! sucursal; solo los de cargo `driver` pueden conducir un camión.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Cargo del empleado - mapea al ENUM employee_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type)]
#[sqlx(type_name = "employee_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Admin,
    Driver,
    Mechanic,
    Auxiliary,
    Manager,
}

impl EmployeeRole {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeRole::Admin => "Administrador",
            EmployeeRole::Driver => "Conductor",
            EmployeeRole::Mechanic => "Mecánico",
            EmployeeRole::Auxiliary => "Auxiliar",
            EmployeeRole::Manager => "Gerente",
        }
    }
}

/// Estado del empleado - mapea al ENUM employee_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "employee_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Available,
    EnRoute,
    OnLeave,
    OnVacation,
    OnPermit,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 5] = [
        EmployeeStatus::Available,
        EmployeeStatus::EnRoute,
        EmployeeStatus::OnLeave,
        EmployeeStatus::OnVacation,
        EmployeeStatus::OnPermit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Available => "Disponible",
            EmployeeStatus::EnRoute => "En Ruta",
            EmployeeStatus::OnLeave => "Licencia",
            EmployeeStatus::OnVacation => "Vacaciones",
            EmployeeStatus::OnPermit => "Permiso",
        }
    }
}

/// Empleado - mapea exactamente a la tabla employees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub account_id: i64,
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    pub branch_id: i64,
}

/// Empleado con datos de cuenta y nombre de sucursal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRecord {
    #[sqlx(flatten)]
    pub employee: Employee,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub branch_name: String,
}

/// Valores del empleado para insertar o reemplazar
#[derive(Debug, Clone)]
pub struct EmployeeData {
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    pub branch_id: i64,
}

/// Filtros para listar empleados
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFilter {
    pub branch_id: Option<i64>,
    pub role: Option<EmployeeRole>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    /// Conductores disponibles, opcionalmente de una sucursal
    pub fn available_drivers(branch_id: Option<i64>) -> Self {
        Self {
            branch_id,
            role: Some(EmployeeRole::Driver),
            status: Some(EmployeeStatus::Available),
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.branch_id.map_or(true, |id| employee.branch_id == id)
            && self.role.map_or(true, |role| employee.role == role)
            && self.status.map_or(true, |status| employee.status == status)
    }
}
