use crate::dto::client_dto::{ClientResponse, UpdateClientRequest};
use crate::middleware::auth::Caller;
use crate::models::client::ClientProfile;
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ClientController {
    repos: Repositories,
}

impl ClientController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    pub async fn get_by_id(&self, caller: &Caller, id: i64) -> AppResult<ClientResponse> {
        caller.require_admin()?;
        self.repos
            .clients
            .find_by_id(id)
            .await?
            .map(ClientResponse::from)
            .ok_or_else(|| not_found_error("Cliente", id))
    }

    pub async fn list(&self, caller: &Caller) -> AppResult<Vec<ClientResponse>> {
        caller.require_admin()?;
        let records = self.repos.clients.list().await?;
        Ok(records.into_iter().map(ClientResponse::from).collect())
    }

    pub async fn update(&self, caller: &Caller, id: i64, request: UpdateClientRequest) -> AppResult<ClientResponse> {
        caller.require_admin()?;
        self.repos
            .clients
            .update(id, &ClientProfile::from(request))
            .await?
            .map(ClientResponse::from)
            .ok_or_else(|| not_found_error("Cliente", id))
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> AppResult<()> {
        caller.require_admin()?;
        if !self.repos.clients.delete(id).await? {
            return Err(not_found_error("Cliente", id));
        }
        tracing::info!("Cliente {} eliminado", id);
        Ok(())
    }
}
