use crate::dto::truck_dto::{TruckLookupQuery, TruckOption, TruckRequest, TruckResponse};
use crate::middleware::auth::Caller;
use crate::models::employee::EmployeeRole;
use crate::models::truck::{TruckData, TruckFilter, TruckStatus};
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub struct TruckController {
    repos: Repositories,
}

impl TruckController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    pub async fn create(&self, caller: &Caller, request: TruckRequest) -> AppResult<TruckResponse> {
        caller.require_admin()?;
        let data = TruckData::from(request);
        self.check_references(&data).await?;

        let record = self.repos.trucks.create(&data).await?;
        tracing::info!("Camión creado: {} en {}", record.truck.plate, record.branch_name);
        Ok(TruckResponse::from(record))
    }

    pub async fn get_by_id(&self, caller: &Caller, id: i64) -> AppResult<TruckResponse> {
        caller.require_admin()?;
        self.repos
            .trucks
            .find_by_id(id)
            .await?
            .map(TruckResponse::from)
            .ok_or_else(|| not_found_error("Camión", id))
    }

    pub async fn list(&self, caller: &Caller, filter: &TruckFilter) -> AppResult<Vec<TruckResponse>> {
        caller.require_admin()?;
        let records = self.repos.trucks.list(filter).await?;
        Ok(records.into_iter().map(TruckResponse::from).collect())
    }

    pub async fn update(&self, caller: &Caller, id: i64, request: TruckRequest) -> AppResult<TruckResponse> {
        caller.require_admin()?;
        let data = TruckData::from(request);
        self.check_references(&data).await?;

        let current = self
            .repos
            .trucks
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Camión", id))?;
        // El conductor de un camión despachado también está en ruta
        if current.truck.driver_id != data.driver_id && self.repos.orders.has_dispatched_for_truck(id, None).await? {
            return Err(validation_error(
                "driver_id",
                format!("El camión {} está despachado; no se puede cambiar su conductor", current.truck.plate),
            ));
        }

        self.repos
            .trucks
            .update(id, &data)
            .await?
            .map(TruckResponse::from)
            .ok_or_else(|| not_found_error("Camión", id))
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> AppResult<()> {
        caller.require_admin()?;
        if self.repos.orders.has_dispatched_for_truck(id, None).await? {
            return Err(AppError::ReferentialIntegrity(
                "No se puede eliminar el camión: tiene pedidos confirmados o en ruta".to_string(),
            ));
        }
        if !self.repos.trucks.delete(id).await? {
            return Err(not_found_error("Camión", id));
        }
        tracing::info!("Camión {} eliminado", id);
        Ok(())
    }

    /// Selector de camiones: "MATRÍCULA (conductor)"
    pub async fn options(&self, query: &TruckLookupQuery) -> AppResult<Vec<TruckOption>> {
        let filter = TruckFilter {
            branch_id: query.branch_id,
            status: query.available.then_some(TruckStatus::Available),
        };
        let records = self.repos.trucks.list(&filter).await?;
        Ok(records.into_iter().map(TruckOption::from).collect())
    }

    /// La sucursal debe existir y el conductor, si hay, debe tener cargo
    /// de conductor
    async fn check_references(&self, data: &TruckData) -> AppResult<()> {
        if self.repos.branches.find_by_id(data.branch_id).await?.is_none() {
            return Err(not_found_error("Sucursal", data.branch_id));
        }

        if let Some(driver_id) = data.driver_id {
            let driver = self
                .repos
                .employees
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| not_found_error("Empleado", driver_id))?;
            if driver.employee.role != EmployeeRole::Driver {
                return Err(validation_error(
                    "driver_id",
                    format!("{} no tiene cargo de conductor", driver.username),
                ));
            }
        }
        Ok(())
    }
}
