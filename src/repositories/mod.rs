//! Repositorios de acceso a datos
//!
//! Cada entidad expone un trait async; la implementación PostgreSQL vive en
//! el archivo `*_repository.rs` correspondiente. Los tests de integración
//! inyectan implementaciones en memoria a través de `Repositories`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::account::{Account, NewAccount};
use crate::models::branch::{Branch, BranchData};
use crate::models::client::{Client, ClientProfile, ClientRecord};
use crate::models::dashboard::DashboardCounts;
use crate::models::employee::{EmployeeData, EmployeeFilter, EmployeeRecord};
use crate::models::order::{NewOrder, OrderFilter, OrderRecord, OrderUpdate};
use crate::models::truck::{Truck, TruckData, TruckFilter, TruckRecord};
use crate::services::order_lifecycle::FleetEffect;
use crate::utils::errors::AppResult;

pub mod account_repository;
pub mod branch_repository;
pub mod client_repository;
pub mod employee_repository;
pub mod order_repository;
pub mod truck_repository;

pub use account_repository::PgAccountRepository;
pub use branch_repository::PgBranchRepository;
pub use client_repository::PgClientRepository;
pub use employee_repository::PgEmployeeRepository;
pub use order_repository::PgOrderRepository;
pub use truck_repository::PgTruckRepository;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;
}

#[async_trait]
pub trait BranchRepository: Send + Sync {
    async fn create(&self, data: &BranchData) -> AppResult<Branch>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Branch>>;

    /// Todas las sucursales ordenadas por id
    async fn list(&self) -> AppResult<Vec<Branch>>;

    async fn update(&self, id: i64, data: &BranchData) -> AppResult<Option<Branch>>;

    /// `Ok(false)` si no existía; `ReferentialIntegrity` si sigue referenciada
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Conteos por estado de pedidos, camiones y conductores de la sucursal
    async fn dashboard_counts(&self, branch_id: i64) -> AppResult<DashboardCounts>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Crear cuenta y perfil de cliente en una sola transacción
    async fn register(&self, account: &NewAccount, profile: &ClientProfile) -> AppResult<(Account, ClientRecord)>;

    async fn find_by_account(&self, account_id: i64) -> AppResult<Option<Client>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ClientRecord>>;

    async fn list(&self) -> AppResult<Vec<ClientRecord>>;

    async fn update(&self, id: i64, profile: &ClientProfile) -> AppResult<Option<ClientRecord>>;

    /// Elimina el cliente y su cuenta
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Crear cuenta y empleado en una sola transacción
    async fn create(&self, account: &NewAccount, data: &EmployeeData) -> AppResult<EmployeeRecord>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<EmployeeRecord>>;

    async fn list(&self, filter: &EmployeeFilter) -> AppResult<Vec<EmployeeRecord>>;

    async fn update(&self, id: i64, data: &EmployeeData) -> AppResult<Option<EmployeeRecord>>;

    /// Elimina el empleado y su cuenta; los camiones que conducía quedan
    /// sin conductor
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait TruckRepository: Send + Sync {
    async fn create(&self, data: &TruckData) -> AppResult<TruckRecord>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TruckRecord>>;

    /// Camiones filtrados, ordenados por id
    async fn list(&self, filter: &TruckFilter) -> AppResult<Vec<TruckRecord>>;

    async fn update(&self, id: i64, data: &TruckData) -> AppResult<Option<TruckRecord>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Camión que tiene asignado a este conductor, si hay
    async fn find_by_driver(&self, employee_id: i64) -> AppResult<Option<Truck>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &NewOrder) -> AppResult<OrderRecord>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<OrderRecord>>;

    /// Pedidos filtrados, más recientes primero
    async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<OrderRecord>>;

    /// Escribir la actualización y aplicar los efectos de flota en una sola
    /// transacción. Si la versión almacenada ya no es `read_version`
    /// devuelve `Conflict` sin escribir nada.
    async fn apply_admin_update(
        &self,
        id: i64,
        update: &OrderUpdate,
        read_version: i32,
        effects: &[FleetEffect],
    ) -> AppResult<OrderRecord>;

    /// ¿Hay pedidos confirmados o en ruta con este camión, sin contar
    /// `excluding_order`?
    async fn has_dispatched_for_truck(&self, truck_id: i64, excluding_order: Option<i64>) -> AppResult<bool>;
}

/// Conjunto de repositorios compartido por los controladores
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub branches: Arc<dyn BranchRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub trucks: Arc<dyn TruckRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            branches: Arc::new(PgBranchRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            employees: Arc::new(PgEmployeeRepository::new(pool.clone())),
            trucks: Arc::new(PgTruckRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool)),
        }
    }
}
