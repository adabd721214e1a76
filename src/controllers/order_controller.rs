use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::dto::order_dto::{CreateOrderRequest, OrderView, UpdateOrderRequest};
use crate::middleware::auth::Caller;
use crate::models::client::Client;
use crate::models::order::{OrderFilter, OrderRecord, OrderUpdate};
use crate::models::truck::Truck;
use crate::repositories::Repositories;
use crate::services::order_lifecycle::{plan_update, LifecyclePolicy};
use crate::services::projection::{check_writable, project_order, Operation, Role};
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppError, AppResult};
use crate::utils::extract::from_json_value;

pub struct OrderController {
    repos: Repositories,
    policy: LifecyclePolicy,
}

/// Deserializar un payload ya filtrado por la máscara de escritura
fn parse_payload<T: DeserializeOwned + Validate>(payload: Value) -> AppResult<T> {
    let request: T = from_json_value(payload)?;
    request.validate()?;
    Ok(request)
}

fn project_all(records: Vec<OrderRecord>, role: Role) -> AppResult<Vec<Value>> {
    records
        .into_iter()
        .map(|record| project_order(&OrderView::from(record), role))
        .collect()
}

impl OrderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            policy: state.lifecycle_policy(),
        }
    }

    async fn client_of(&self, caller: &Caller) -> AppResult<Client> {
        self.repos
            .clients
            .find_by_account(caller.account_id)
            .await?
            .ok_or_else(|| forbidden_error("acceder a pedidos", "la cuenta no tiene perfil de cliente"))
    }

    /// Pedido nuevo del cliente que llama; estado `requested`
    pub async fn create_for_client(&self, caller: &Caller, payload: Value) -> AppResult<Value> {
        let client = self.client_of(caller).await?;
        check_writable(Operation::Create, Role::Client, &payload)?;
        let request: CreateOrderRequest = parse_payload(payload)?;

        if self.repos.branches.find_by_id(request.origin_branch_id).await?.is_none() {
            return Err(validation_error("origin_branch_id", "La sucursal de origen no existe"));
        }

        let record = self.repos.orders.create(&request.into_new_order(client.id)).await?;
        tracing::info!("Pedido {} creado por {}", record.order.id, caller.username);
        project_order(&OrderView::from(record), Role::Client)
    }

    pub async fn list_for_client(&self, caller: &Caller) -> AppResult<Vec<Value>> {
        let client = self.client_of(caller).await?;
        let records = self.repos.orders.list(&OrderFilter::for_client(client.id)).await?;
        project_all(records, Role::Client)
    }

    /// Un pedido de otro cliente es indistinguible de uno inexistente
    pub async fn get_for_client(&self, caller: &Caller, id: i64) -> AppResult<Value> {
        let client = self.client_of(caller).await?;
        let record = self
            .repos
            .orders
            .find_by_id(id)
            .await?
            .filter(|record| record.order.client_id == client.id)
            .ok_or_else(|| not_found_error("Pedido", id))?;
        project_order(&OrderView::from(record), Role::Client)
    }

    pub async fn list_admin(&self, caller: &Caller, filter: &OrderFilter) -> AppResult<Vec<Value>> {
        caller.require_admin()?;
        let records = self.repos.orders.list(filter).await?;
        project_all(records, Role::Admin)
    }

    pub async fn get_admin(&self, caller: &Caller, id: i64) -> AppResult<Value> {
        caller.require_admin()?;
        let record = self.find(id).await?;
        project_order(&OrderView::from(record), Role::Admin)
    }

    /// Actualización administrativa: estado, costo, precio y camión
    pub async fn update_admin(&self, caller: &Caller, id: i64, payload: Value) -> AppResult<Value> {
        caller.require_admin()?;
        check_writable(Operation::Update, Role::Admin, &payload)?;
        let request: UpdateOrderRequest = parse_payload(payload)?;

        let record = self.find(id).await?;
        let order = &record.order;

        if let Some(version) = request.version {
            if version != order.version {
                return Err(AppError::Conflict(format!(
                    "El pedido {} está en la versión {}, no en la {}",
                    id, order.version, version
                )));
            }
        }

        let target = OrderUpdate {
            status: request.status.unwrap_or(order.status),
            estimated_cost: request.estimated_cost.unwrap_or(order.estimated_cost),
            quoted_price: request.quoted_price.unwrap_or(order.quoted_price),
            truck_id: request.truck_id.unwrap_or(order.truck_id),
        };

        let current_truck = match order.truck_id {
            Some(truck_id) => self.repos.trucks.find_by_id(truck_id).await?.map(|r| r.truck),
            None => None,
        };
        let target_truck = match target.truck_id {
            Some(truck_id) if Some(truck_id) == order.truck_id => current_truck.clone(),
            Some(truck_id) => Some(self.find_truck(truck_id).await?),
            None => None,
        };

        if let Some(truck) = target_truck.as_ref() {
            if target.status.is_dispatching() && self.repos.orders.has_dispatched_for_truck(truck.id, Some(id)).await? {
                return Err(validation_error(
                    "truck_id",
                    format!("El camión {} ya está despachado en otro pedido", truck.plate),
                ));
            }
        }

        let effects = plan_update(
            order,
            &target,
            current_truck.as_ref(),
            target_truck.as_ref(),
            &self.policy,
        )?;

        let updated = self
            .repos
            .orders
            .apply_admin_update(id, &target, order.version, &effects)
            .await?;
        project_order(&OrderView::from(updated), Role::Admin)
    }

    async fn find(&self, id: i64) -> AppResult<OrderRecord> {
        self.repos
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Pedido", id))
    }

    async fn find_truck(&self, id: i64) -> AppResult<Truck> {
        self.repos
            .trucks
            .find_by_id(id)
            .await?
            .map(|record| record.truck)
            .ok_or_else(|| not_found_error("Camión", id))
    }
}
