use bcrypt::hash;

use crate::dto::employee_dto::{CreateEmployeeRequest, DriverOption, EmployeeResponse, UpdateEmployeeRequest};
use crate::middleware::auth::Caller;
use crate::models::account::NewAccount;
use crate::models::employee::{EmployeeData, EmployeeFilter, EmployeeRole, EmployeeStatus};
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub struct EmployeeController {
    repos: Repositories,
    bcrypt_cost: u32,
}

impl EmployeeController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    /// Crear un empleado junto con su cuenta de staff
    pub async fn create(&self, caller: &Caller, request: CreateEmployeeRequest) -> AppResult<EmployeeResponse> {
        caller.require_admin()?;
        self.ensure_branch(request.branch_id).await?;

        let username = request.username.trim().to_string();
        if self.repos.accounts.find_by_username(&username).await?.is_some() {
            return Err(validation_error("username", "Ya existe un usuario con este nombre"));
        }

        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let account = NewAccount {
            username,
            email: request.email.trim().to_string(),
            password_hash,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            is_staff: true,
            is_superuser: false,
        };

        let record = self.repos.employees.create(&account, &request.data()).await?;
        tracing::info!(
            "Empleado creado: {} ({}) en sucursal {}",
            record.username,
            record.employee.role.label(),
            record.branch_name
        );
        Ok(EmployeeResponse::from(record))
    }

    pub async fn get_by_id(&self, caller: &Caller, id: i64) -> AppResult<EmployeeResponse> {
        caller.require_admin()?;
        self.repos
            .employees
            .find_by_id(id)
            .await?
            .map(EmployeeResponse::from)
            .ok_or_else(|| not_found_error("Empleado", id))
    }

    pub async fn list(&self, caller: &Caller, filter: &EmployeeFilter) -> AppResult<Vec<EmployeeResponse>> {
        caller.require_admin()?;
        let records = self.repos.employees.list(filter).await?;
        Ok(records.into_iter().map(EmployeeResponse::from).collect())
    }

    pub async fn update(&self, caller: &Caller, id: i64, request: UpdateEmployeeRequest) -> AppResult<EmployeeResponse> {
        caller.require_admin()?;
        let current = self
            .repos
            .employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Empleado", id))?;
        let data = EmployeeData::from(request);
        self.ensure_branch(data.branch_id).await?;

        // Un conductor asignado a un camión no puede dejar de serlo
        if current.employee.role == EmployeeRole::Driver && data.role != EmployeeRole::Driver {
            if let Some(truck) = self.repos.trucks.find_by_driver(id).await? {
                return Err(validation_error(
                    "role",
                    format!("El empleado conduce el camión {}; desasígnelo primero", truck.plate),
                ));
            }
        }

        self.repos
            .employees
            .update(id, &data)
            .await?
            .map(EmployeeResponse::from)
            .ok_or_else(|| not_found_error("Empleado", id))
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> AppResult<()> {
        caller.require_admin()?;
        let current = self
            .repos
            .employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Empleado", id))?;

        if current.employee.status == EmployeeStatus::EnRoute {
            return Err(AppError::ReferentialIntegrity(
                "No se puede eliminar el empleado: está en ruta".to_string(),
            ));
        }

        if !self.repos.employees.delete(id).await? {
            return Err(not_found_error("Empleado", id));
        }
        tracing::info!("Empleado {} eliminado", id);
        Ok(())
    }

    /// Conductores disponibles, opcionalmente de una sucursal
    pub async fn driver_options(&self, branch_id: Option<i64>) -> AppResult<Vec<DriverOption>> {
        let records = self
            .repos
            .employees
            .list(&EmployeeFilter::available_drivers(branch_id))
            .await?;
        Ok(records.into_iter().map(DriverOption::from).collect())
    }

    async fn ensure_branch(&self, branch_id: i64) -> AppResult<()> {
        match self.repos.branches.find_by_id(branch_id).await? {
            Some(_) => Ok(()),
            None => Err(not_found_error("Sucursal", branch_id)),
        }
    }
}
