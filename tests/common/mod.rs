//! Soporte para los tests de integración
//!
//! `MemoryStore` implementa todos los repositorios sobre vectores protegidos
//! por un mutex. Reproduce las restricciones del esquema que la API
//! observa: unicidad, claves foráneas RESTRICT, CASCADE y SET NULL, y el
//! control de versión de pedidos.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use acme_trans_backend::config::environment::EnvironmentConfig;
use acme_trans_backend::models::account::{Account, NewAccount};
use acme_trans_backend::models::branch::{Branch, BranchData};
use acme_trans_backend::models::client::{Client, ClientProfile, ClientRecord};
use acme_trans_backend::models::dashboard::DashboardCounts;
use acme_trans_backend::models::employee::{
    Employee, EmployeeData, EmployeeFilter, EmployeeRecord, EmployeeRole, EmployeeStatus,
};
use acme_trans_backend::models::order::{NewOrder, Order, OrderFilter, OrderRecord, OrderStatus, OrderUpdate};
use acme_trans_backend::models::truck::{Truck, TruckCapacity, TruckData, TruckFilter, TruckRecord, TruckStatus};
use acme_trans_backend::repositories::{
    AccountRepository, BranchRepository, ClientRepository, EmployeeRepository, OrderRepository, Repositories,
    TruckRepository,
};
use acme_trans_backend::routes::create_router;
use acme_trans_backend::services::order_lifecycle::FleetEffect;
use acme_trans_backend::state::AppState;
use acme_trans_backend::utils::errors::{not_found_error, referenced_error, validation_error, AppError, AppResult};
use acme_trans_backend::utils::jwt::{generate_token, TokenType};

pub const PASSWORD: &str = "pass12345";

#[derive(Default)]
struct Tables {
    next_id: i64,
    accounts: Vec<Account>,
    branches: Vec<Branch>,
    clients: Vec<Client>,
    employees: Vec<Employee>,
    trucks: Vec<Truck>,
    orders: Vec<Order>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn branch(&self, id: i64) -> AppResult<&Branch> {
        self.branches
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("El recurso referenciado no existe".to_string()))
    }

    fn insert_account(&mut self, account: &NewAccount) -> AppResult<Account> {
        if self.accounts.iter().any(|a| a.username == account.username) {
            return Err(validation_error("username", "Ya existe un registro con este valor"));
        }
        let account = Account {
            id: self.next_id(),
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
            created_at: Utc::now(),
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    fn client_record(&self, client: &Client) -> ClientRecord {
        let account = self.account(client.account_id);
        ClientRecord {
            client: client.clone(),
            username: account.map(|a| a.username.clone()).unwrap_or_default(),
            email: account.map(|a| a.email.clone()).unwrap_or_default(),
        }
    }

    fn employee_record(&self, employee: &Employee) -> EmployeeRecord {
        let account = self.account(employee.account_id);
        EmployeeRecord {
            employee: employee.clone(),
            username: account.map(|a| a.username.clone()).unwrap_or_default(),
            email: account.map(|a| a.email.clone()).unwrap_or_default(),
            first_name: account.map(|a| a.first_name.clone()).unwrap_or_default(),
            last_name: account.map(|a| a.last_name.clone()).unwrap_or_default(),
            branch_name: self.branch(employee.branch_id).map(|b| b.name.clone()).unwrap_or_default(),
        }
    }

    fn driver_username(&self, employee_id: i64) -> Option<String> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id)
            .and_then(|e| self.account(e.account_id))
            .map(|a| a.username.clone())
    }

    fn truck_record(&self, truck: &Truck) -> TruckRecord {
        TruckRecord {
            truck: truck.clone(),
            branch_name: self.branch(truck.branch_id).map(|b| b.name.clone()).unwrap_or_default(),
            driver_username: truck.driver_id.and_then(|id| self.driver_username(id)),
        }
    }

    fn order_record(&self, order: &Order) -> OrderRecord {
        let client_username = self
            .clients
            .iter()
            .find(|c| c.id == order.client_id)
            .and_then(|c| self.account(c.account_id))
            .map(|a| a.username.clone())
            .unwrap_or_default();
        let truck = order.truck_id.and_then(|id| self.trucks.iter().find(|t| t.id == id));
        OrderRecord {
            order: order.clone(),
            client_username,
            origin_branch_name: self.branch(order.origin_branch_id).map(|b| b.name.clone()).unwrap_or_default(),
            truck_plate: truck.map(|t| t.plate.clone()),
            truck_status: truck.map(|t| t.status),
        }
    }

    fn check_branch_name(&self, name: &str, except: Option<i64>) -> AppResult<()> {
        if self.branches.iter().any(|b| b.name == name && Some(b.id) != except) {
            return Err(validation_error("name", "Ya existe un registro con este valor"));
        }
        Ok(())
    }

    fn check_truck(&self, data: &TruckData, except: Option<i64>) -> AppResult<()> {
        if self.trucks.iter().any(|t| t.plate == data.plate && Some(t.id) != except) {
            return Err(validation_error("plate", "Ya existe un registro con este valor"));
        }
        self.branch(data.branch_id)?;
        if let Some(driver_id) = data.driver_id {
            if !self.employees.iter().any(|e| e.id == driver_id) {
                return Err(AppError::NotFound("El recurso referenciado no existe".to_string()));
            }
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: &FleetEffect) {
        match *effect {
            FleetEffect::Dispatch { truck_id, driver_id } => {
                self.set_fleet_status(truck_id, driver_id, TruckStatus::EnRoute, EmployeeStatus::EnRoute, false)
            }
            FleetEffect::Release { truck_id, driver_id } => {
                self.set_fleet_status(truck_id, driver_id, TruckStatus::Available, EmployeeStatus::Available, true)
            }
        }
    }

    /// Con `only_en_route` solo se tocan los que siguen en ruta
    fn set_fleet_status(
        &mut self,
        truck_id: i64,
        driver_id: Option<i64>,
        truck_status: TruckStatus,
        driver_status: EmployeeStatus,
        only_en_route: bool,
    ) {
        if let Some(truck) = self.trucks.iter_mut().find(|t| t.id == truck_id) {
            if !only_en_route || truck.status == TruckStatus::EnRoute {
                truck.status = truck_status;
            }
        }
        if let Some(driver) = driver_id.and_then(|id| self.employees.iter_mut().find(|e| e.id == id)) {
            if !only_en_route || driver.status == EmployeeStatus::EnRoute {
                driver.status = driver_status;
            }
        }
    }
}

/// Almacenamiento en memoria con la semántica del esquema PostgreSQL
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            accounts: self.clone(),
            branches: self.clone(),
            clients: self.clone(),
            employees: self.clone(),
            trucks: self.clone(),
            orders: self.clone(),
        }
    }

    // Carga directa de datos, sin pasar por la API

    pub fn seed_account(&self, username: &str, is_staff: bool, is_superuser: bool) -> Account {
        let password_hash = bcrypt::hash(PASSWORD, 4).unwrap();
        self.tables
            .lock()
            .insert_account(&NewAccount {
                username: username.to_string(),
                email: format!("{}@acmetrans.cl", username),
                password_hash,
                first_name: String::new(),
                last_name: String::new(),
                is_staff,
                is_superuser,
            })
            .unwrap()
    }

    pub fn seed_admin(&self) -> Account {
        self.seed_account("admin", true, true)
    }

    pub fn seed_branch(&self, name: &str) -> Branch {
        let mut tables = self.tables.lock();
        let branch = Branch {
            id: tables.next_id(),
            name: name.to_string(),
            address: format!("Av. Principal 100, {}", name),
            city: name.to_string(),
        };
        tables.branches.push(branch.clone());
        branch
    }

    pub fn seed_client(&self, username: &str) -> (Account, Client) {
        let account = self.seed_account(username, false, false);
        let mut tables = self.tables.lock();
        let client = Client {
            id: tables.next_id(),
            account_id: account.id,
            company_name: Some(format!("Empresa {}", username)),
            tax_id: None,
            phone: None,
        };
        tables.clients.push(client.clone());
        (account, client)
    }

    pub fn seed_employee(&self, username: &str, branch_id: i64, role: EmployeeRole, status: EmployeeStatus) -> Employee {
        let account = self.seed_account(username, true, false);
        let mut tables = self.tables.lock();
        let employee = Employee {
            id: tables.next_id(),
            account_id: account.id,
            role,
            status,
            branch_id,
        };
        tables.employees.push(employee.clone());
        employee
    }

    pub fn seed_truck(&self, plate: &str, branch_id: i64, status: TruckStatus, driver_id: Option<i64>) -> Truck {
        let mut tables = self.tables.lock();
        let truck = Truck {
            id: tables.next_id(),
            plate: plate.to_string(),
            capacity: TruckCapacity::Large,
            status,
            branch_id,
            driver_id,
        };
        tables.trucks.push(truck.clone());
        truck
    }

    pub fn seed_order(&self, client_id: i64, branch_id: i64, status: OrderStatus, truck_id: Option<i64>) -> Order {
        let mut tables = self.tables.lock();
        let order = Order {
            id: tables.next_id(),
            client_id,
            origin_branch_id: branch_id,
            destination: "Puerto Montt".to_string(),
            cargo_type: "Carga Seca".to_string(),
            weight_kg: Decimal::new(1500, 0),
            volume_m3: Decimal::new(12, 0),
            details: None,
            desired_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            created_at: Utc::now(),
            status,
            estimated_cost: None,
            quoted_price: None,
            truck_id,
            version: 1,
        };
        tables.orders.push(order.clone());
        order
    }

    pub fn truck(&self, id: i64) -> Truck {
        self.tables.lock().trucks.iter().find(|t| t.id == id).cloned().unwrap()
    }

    pub fn employee(&self, id: i64) -> Employee {
        self.tables.lock().employees.iter().find(|e| e.id == id).cloned().unwrap()
    }

    pub fn order(&self, id: i64) -> Order {
        self.tables.lock().orders.iter().find(|o| o.id == id).cloned().unwrap()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        Ok(self.tables.lock().account(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self.tables.lock().accounts.iter().find(|a| a.username == username).cloned())
    }
}

#[async_trait]
impl BranchRepository for MemoryStore {
    async fn create(&self, data: &BranchData) -> AppResult<Branch> {
        let mut tables = self.tables.lock();
        tables.check_branch_name(&data.name, None)?;
        let branch = Branch {
            id: tables.next_id(),
            name: data.name.clone(),
            address: data.address.clone(),
            city: data.city.clone(),
        };
        tables.branches.push(branch.clone());
        Ok(branch)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Branch>> {
        Ok(self.tables.lock().branches.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Branch>> {
        let mut branches = self.tables.lock().branches.clone();
        branches.sort_by_key(|b| b.id);
        Ok(branches)
    }

    async fn update(&self, id: i64, data: &BranchData) -> AppResult<Option<Branch>> {
        let mut tables = self.tables.lock();
        tables.check_branch_name(&data.name, Some(id))?;
        Ok(tables.branches.iter_mut().find(|b| b.id == id).map(|branch| {
            branch.name = data.name.clone();
            branch.address = data.address.clone();
            branch.city = data.city.clone();
            branch.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock();
        if !tables.branches.iter().any(|b| b.id == id) {
            return Ok(false);
        }
        let referenced = tables.employees.iter().any(|e| e.branch_id == id)
            || tables.trucks.iter().any(|t| t.branch_id == id)
            || tables.orders.iter().any(|o| o.origin_branch_id == id);
        if referenced {
            return Err(referenced_error("la sucursal"));
        }
        tables.branches.retain(|b| b.id != id);
        Ok(true)
    }

    async fn dashboard_counts(&self, branch_id: i64) -> AppResult<DashboardCounts> {
        let tables = self.tables.lock();
        let mut counts = DashboardCounts::default();

        for status in OrderStatus::ALL {
            let n = tables
                .orders
                .iter()
                .filter(|o| o.origin_branch_id == branch_id && o.status == status)
                .count() as i64;
            if n > 0 {
                counts.orders.push((status, n));
            }
        }
        for status in TruckStatus::ALL {
            let n = tables
                .trucks
                .iter()
                .filter(|t| t.branch_id == branch_id && t.status == status)
                .count() as i64;
            if n > 0 {
                counts.trucks.push((status, n));
            }
        }
        for status in EmployeeStatus::ALL {
            let n = tables
                .employees
                .iter()
                .filter(|e| e.branch_id == branch_id && e.role == EmployeeRole::Driver && e.status == status)
                .count() as i64;
            if n > 0 {
                counts.drivers.push((status, n));
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn register(&self, account: &NewAccount, profile: &ClientProfile) -> AppResult<(Account, ClientRecord)> {
        let mut tables = self.tables.lock();
        let account = tables.insert_account(account)?;
        let client = Client {
            id: tables.next_id(),
            account_id: account.id,
            company_name: profile.company_name.clone(),
            tax_id: profile.tax_id.clone(),
            phone: profile.phone.clone(),
        };
        tables.clients.push(client.clone());
        let record = tables.client_record(&client);
        Ok((account, record))
    }

    async fn find_by_account(&self, account_id: i64) -> AppResult<Option<Client>> {
        Ok(self.tables.lock().clients.iter().find(|c| c.account_id == account_id).cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ClientRecord>> {
        let tables = self.tables.lock();
        Ok(tables.clients.iter().find(|c| c.id == id).map(|c| tables.client_record(c)))
    }

    async fn list(&self) -> AppResult<Vec<ClientRecord>> {
        let tables = self.tables.lock();
        let mut records: Vec<ClientRecord> = tables.clients.iter().map(|c| tables.client_record(c)).collect();
        records.sort_by_key(|r| r.client.id);
        Ok(records)
    }

    async fn update(&self, id: i64, profile: &ClientProfile) -> AppResult<Option<ClientRecord>> {
        let mut tables = self.tables.lock();
        let updated = tables.clients.iter_mut().find(|c| c.id == id).map(|client| {
            client.company_name = profile.company_name.clone();
            client.tax_id = profile.tax_id.clone();
            client.phone = profile.phone.clone();
            client.clone()
        });
        Ok(updated.map(|c| tables.client_record(&c)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock();
        let Some(account_id) = tables.clients.iter().find(|c| c.id == id).map(|c| c.account_id) else {
            return Ok(false);
        };
        if tables.orders.iter().any(|o| o.client_id == id) {
            return Err(referenced_error("el cliente"));
        }
        tables.clients.retain(|c| c.id != id);
        tables.accounts.retain(|a| a.id != account_id);
        Ok(true)
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn create(&self, account: &NewAccount, data: &EmployeeData) -> AppResult<EmployeeRecord> {
        let mut tables = self.tables.lock();
        tables.branch(data.branch_id)?;
        let account = tables.insert_account(account)?;
        let employee = Employee {
            id: tables.next_id(),
            account_id: account.id,
            role: data.role,
            status: data.status,
            branch_id: data.branch_id,
        };
        tables.employees.push(employee.clone());
        Ok(tables.employee_record(&employee))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<EmployeeRecord>> {
        let tables = self.tables.lock();
        Ok(tables.employees.iter().find(|e| e.id == id).map(|e| tables.employee_record(e)))
    }

    async fn list(&self, filter: &EmployeeFilter) -> AppResult<Vec<EmployeeRecord>> {
        let tables = self.tables.lock();
        let mut records: Vec<EmployeeRecord> = tables
            .employees
            .iter()
            .filter(|e| filter.matches(e))
            .map(|e| tables.employee_record(e))
            .collect();
        records.sort_by_key(|r| r.employee.id);
        Ok(records)
    }

    async fn update(&self, id: i64, data: &EmployeeData) -> AppResult<Option<EmployeeRecord>> {
        let mut tables = self.tables.lock();
        tables.branch(data.branch_id)?;
        let updated = tables.employees.iter_mut().find(|e| e.id == id).map(|employee| {
            employee.role = data.role;
            employee.status = data.status;
            employee.branch_id = data.branch_id;
            employee.clone()
        });
        Ok(updated.map(|e| tables.employee_record(&e)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock();
        let Some(account_id) = tables.employees.iter().find(|e| e.id == id).map(|e| e.account_id) else {
            return Ok(false);
        };
        tables.employees.retain(|e| e.id != id);
        tables.accounts.retain(|a| a.id != account_id);
        for truck in tables.trucks.iter_mut().filter(|t| t.driver_id == Some(id)) {
            truck.driver_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl TruckRepository for MemoryStore {
    async fn create(&self, data: &TruckData) -> AppResult<TruckRecord> {
        let mut tables = self.tables.lock();
        tables.check_truck(data, None)?;
        let truck = Truck {
            id: tables.next_id(),
            plate: data.plate.clone(),
            capacity: data.capacity,
            status: data.status,
            branch_id: data.branch_id,
            driver_id: data.driver_id,
        };
        tables.trucks.push(truck.clone());
        Ok(tables.truck_record(&truck))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TruckRecord>> {
        let tables = self.tables.lock();
        Ok(tables.trucks.iter().find(|t| t.id == id).map(|t| tables.truck_record(t)))
    }

    async fn list(&self, filter: &TruckFilter) -> AppResult<Vec<TruckRecord>> {
        let tables = self.tables.lock();
        let mut records: Vec<TruckRecord> = tables
            .trucks
            .iter()
            .filter(|t| filter.matches(t))
            .map(|t| tables.truck_record(t))
            .collect();
        records.sort_by_key(|r| r.truck.id);
        Ok(records)
    }

    async fn update(&self, id: i64, data: &TruckData) -> AppResult<Option<TruckRecord>> {
        let mut tables = self.tables.lock();
        tables.check_truck(data, Some(id))?;
        let updated = tables.trucks.iter_mut().find(|t| t.id == id).map(|truck| {
            truck.plate = data.plate.clone();
            truck.capacity = data.capacity;
            truck.status = data.status;
            truck.branch_id = data.branch_id;
            truck.driver_id = data.driver_id;
            truck.clone()
        });
        Ok(updated.map(|t| tables.truck_record(&t)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock();
        if !tables.trucks.iter().any(|t| t.id == id) {
            return Ok(false);
        }
        tables.trucks.retain(|t| t.id != id);
        for order in tables.orders.iter_mut().filter(|o| o.truck_id == Some(id)) {
            order.truck_id = None;
        }
        Ok(true)
    }

    async fn find_by_driver(&self, employee_id: i64) -> AppResult<Option<Truck>> {
        Ok(self
            .tables
            .lock()
            .trucks
            .iter()
            .find(|t| t.driver_id == Some(employee_id))
            .cloned())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: &NewOrder) -> AppResult<OrderRecord> {
        let mut tables = self.tables.lock();
        tables.branch(order.origin_branch_id)?;
        if !tables.clients.iter().any(|c| c.id == order.client_id) {
            return Err(AppError::NotFound("El recurso referenciado no existe".to_string()));
        }
        let order = Order {
            id: tables.next_id(),
            client_id: order.client_id,
            origin_branch_id: order.origin_branch_id,
            destination: order.destination.clone(),
            cargo_type: order.cargo_type.clone(),
            weight_kg: order.weight_kg,
            volume_m3: order.volume_m3,
            details: order.details.clone(),
            desired_date: order.desired_date,
            created_at: Utc::now(),
            status: OrderStatus::Requested,
            estimated_cost: None,
            quoted_price: None,
            truck_id: None,
            version: 1,
        };
        tables.orders.push(order.clone());
        Ok(tables.order_record(&order))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<OrderRecord>> {
        let tables = self.tables.lock();
        Ok(tables.orders.iter().find(|o| o.id == id).map(|o| tables.order_record(o)))
    }

    async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<OrderRecord>> {
        let tables = self.tables.lock();
        let mut orders: Vec<&Order> = tables.orders.iter().filter(|o| filter.matches(o)).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders.into_iter().map(|o| tables.order_record(o)).collect())
    }

    async fn apply_admin_update(
        &self,
        id: i64,
        update: &OrderUpdate,
        read_version: i32,
        effects: &[FleetEffect],
    ) -> AppResult<OrderRecord> {
        let mut tables = self.tables.lock();
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found_error("Pedido", id))?;
        if order.version != read_version {
            return Err(AppError::Conflict(format!("El pedido {} fue modificado por otra operación", id)));
        }
        order.status = update.status;
        order.estimated_cost = update.estimated_cost;
        order.quoted_price = update.quoted_price;
        order.truck_id = update.truck_id;
        order.version += 1;
        let order = order.clone();

        for effect in effects {
            tables.apply_effect(effect);
        }
        Ok(tables.order_record(&order))
    }

    async fn has_dispatched_for_truck(&self, truck_id: i64, excluding_order: Option<i64>) -> AppResult<bool> {
        Ok(self.tables.lock().orders.iter().any(|o| {
            o.truck_id == Some(truck_id) && o.status.is_dispatching() && Some(o.id) != excluding_order
        }))
    }
}

/// Estado de la aplicación sobre un `MemoryStore` vacío
pub fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    };
    (AppState::new(config, store.repositories()), store)
}

/// Cliente HTTP en proceso sobre el router completo
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let (state, store) = test_state();
        let router = create_router(state.clone());
        Self { state, store, router }
    }

    pub fn token_for(&self, account: &Account) -> String {
        generate_token(account, TokenType::Access, &self.state.jwt_config()).unwrap()
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}
