use crate::dto::branch_dto::{BranchOption, BranchRequest};
use crate::middleware::auth::Caller;
use crate::models::branch::{Branch, BranchData};
use crate::models::dashboard::DashboardSnapshot;
use crate::repositories::Repositories;
use crate::services::dashboard::build_snapshot;
use crate::state::AppState;
use crate::utils::errors::{internal_error, not_found_error, AppResult};

pub struct BranchController {
    repos: Repositories,
}

impl BranchController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    pub async fn create(&self, caller: &Caller, request: BranchRequest) -> AppResult<Branch> {
        caller.require_admin()?;
        let branch = self.repos.branches.create(&BranchData::from(request)).await?;
        tracing::info!("Sucursal creada: {} ({})", branch.name, branch.id);
        Ok(branch)
    }

    pub async fn get_by_id(&self, caller: &Caller, id: i64) -> AppResult<Branch> {
        caller.require_admin()?;
        self.find(id).await
    }

    pub async fn list(&self, caller: &Caller) -> AppResult<Vec<Branch>> {
        caller.require_admin()?;
        self.repos.branches.list().await
    }

    pub async fn update(&self, caller: &Caller, id: i64, request: BranchRequest) -> AppResult<Branch> {
        caller.require_admin()?;
        self.repos
            .branches
            .update(id, &BranchData::from(request))
            .await?
            .ok_or_else(|| not_found_error("Sucursal", id))
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> AppResult<()> {
        caller.require_admin()?;
        if !self.repos.branches.delete(id).await? {
            return Err(not_found_error("Sucursal", id));
        }
        tracing::info!("Sucursal {} eliminada", id);
        Ok(())
    }

    /// Dashboard de una sucursal, recalculado en cada llamada
    pub async fn dashboard(&self, caller: &Caller, id: i64) -> AppResult<DashboardSnapshot> {
        caller.require_admin()?;
        let branch = self.find(id).await?;

        let counts = self.repos.branches.dashboard_counts(id).await.map_err(|e| {
            tracing::error!("Error en dashboard de sucursal {}: {}", id, e);
            internal_error("Ocurrió un error al procesar los datos")
        })?;

        Ok(build_snapshot(&branch, &counts))
    }

    /// Selector de sucursales, disponible para cualquier usuario autenticado
    pub async fn options(&self) -> AppResult<Vec<BranchOption>> {
        let branches = self.repos.branches.list().await?;
        Ok(branches.into_iter().map(BranchOption::from).collect())
    }

    pub async fn option(&self, id: i64) -> AppResult<BranchOption> {
        self.find(id).await.map(BranchOption::from)
    }

    async fn find(&self, id: i64) -> AppResult<Branch> {
        self.repos
            .branches
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Sucursal", id))
    }
}
