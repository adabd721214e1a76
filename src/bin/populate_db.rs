//! Carga datos de ejemplo en la base de datos
//!
//! Borra todo el contenido y crea sucursales, clientes, empleados, flota y
//! pedidos. Uso: `cargo run --bin populate_db`

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use dotenvy::dotenv;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, warn};

use acme_trans_backend::database::DatabaseConnection;
use acme_trans_backend::models::employee::{EmployeeRole, EmployeeStatus};
use acme_trans_backend::models::order::OrderStatus;
use acme_trans_backend::models::truck::{TruckCapacity, TruckStatus};

const ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_PASSWORD: &str = "pass123";
const NUM_CLIENTS: usize = 5;
const NUM_ORDERS: usize = 50;

/// (nombre, dirección, empleados, camiones grandes, camiones medianos)
const BRANCHES: [(&str, &str, usize, usize, usize); 3] = [
    ("Osorno", "Av. Los Héroes 123", 15, 3, 6),
    ("Santiago", "Panamericana Norte 456", 25, 5, 8),
    ("Coquimbo", "Ruta 5 Norte 789", 10, 3, 4),
];

const FIRST_NAMES: [&str; 12] = [
    "Camila", "Felipe", "Valentina", "Matías", "Javiera", "Sebastián", "Catalina", "Diego", "Fernanda",
    "Tomás", "Constanza", "Ignacio",
];
const LAST_NAMES: [&str; 12] = [
    "González", "Muñoz", "Rojas", "Díaz", "Pérez", "Soto", "Contreras", "Silva", "Martínez", "Sepúlveda",
    "Morales", "Fuentes",
];
const COMPANIES: [&str; 6] = [
    "Agrícola del Sur", "Comercial Andes", "Maderas Biobío", "Distribuidora Pacífico", "Lácteos Llanquihue",
    "Ferretería Norte",
];
const CARGO_TYPES: [&str; 5] = [
    "Alimentos Perecibles", "Retail", "Maquinaria Agrícola", "Carga Seca", "Materiales de Construcción",
];
const DESTINATIONS: [&str; 8] = [
    "Valparaíso", "Rancagua", "Talca", "Concepción", "Temuco", "Puerto Montt", "La Serena", "Antofagasta",
];

struct SeedBranch {
    id: i64,
    name: &'static str,
}

struct SeedTruck {
    id: i64,
    branch_id: i64,
    driver_id: Option<i64>,
    status: TruckStatus,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🌱 Iniciando población de la base de datos...");

    let db_connection = DatabaseConnection::new_default().await?;
    populate(db_connection.pool()).await?;

    info!("✅ Población completada");
    info!("   Superusuario: admin / {}", ADMIN_PASSWORD);
    info!("   Cliente: cliente / {}", DEFAULT_PASSWORD);
    Ok(())
}

async fn populate(pool: &PgPool) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    // Un solo hash para todas las cuentas de ejemplo
    let default_hash = bcrypt::hash(DEFAULT_PASSWORD, 4).context("Error hasheando contraseña")?;
    let admin_hash = bcrypt::hash(ADMIN_PASSWORD, bcrypt::DEFAULT_COST).context("Error hasheando contraseña")?;

    let mut tx = pool.begin().await?;

    info!("🧹 Limpiando datos antiguos...");
    sqlx::query("TRUNCATE orders, trucks, employees, clients, branches, accounts RESTART IDENTITY CASCADE")
        .execute(&mut *tx)
        .await?;

    insert_account(&mut tx, "admin", "admin@acmetrans.cl", &admin_hash, ("Admin", "ACME"), true, true).await?;

    let branches = create_branches(&mut tx).await?;
    let clients = create_clients(&mut tx, &mut rng, &default_hash).await?;
    let drivers = create_employees(&mut tx, &mut rng, &branches, &default_hash).await?;
    let mut trucks = create_trucks(&mut tx, &mut rng, &branches, &drivers).await?;
    create_orders(&mut tx, &mut rng, &branches, &clients, &mut trucks).await?;

    tx.commit().await?;
    Ok(())
}

async fn insert_account(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    email: &str,
    password_hash: &str,
    (first_name, last_name): (&str, &str),
    is_staff: bool,
    is_superuser: bool,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO accounts (username, email, password_hash, first_name, last_name, is_staff, is_superuser)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(is_staff)
    .bind(is_superuser)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

async fn create_branches(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<SeedBranch>> {
    let mut branches = Vec::with_capacity(BRANCHES.len());
    for (name, address, ..) in BRANCHES {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO branches (name, address, city) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(address)
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;
        info!("  🏢 Sucursal {} creada", name);
        branches.push(SeedBranch { id, name });
    }
    Ok(branches)
}

async fn create_clients(tx: &mut Transaction<'_, Postgres>, rng: &mut StdRng, password_hash: &str) -> Result<Vec<i64>> {
    let mut clients = Vec::with_capacity(NUM_CLIENTS);

    let account_id = insert_account(tx, "cliente", "cliente@empresa.com", password_hash, ("Juan", "Pérez"), false, false).await?;
    clients.push(insert_client(tx, account_id, "Empresa XYZ", "76.123.456-K", "+56912345678").await?);

    for i in 1..NUM_CLIENTS {
        let (first_name, last_name) = random_name(rng);
        let username = format!("{}{}{}", first_name[..1].to_lowercase(), ascii_slug(last_name), i);
        let email = format!("{}@correo.cl", username);
        let account_id = insert_account(tx, &username, &email, password_hash, (first_name, last_name), false, false).await?;

        let company = COMPANIES.choose(rng).copied().unwrap_or("Empresa");
        let tax_id = format!(
            "{}.{}.{}-{}",
            rng.gen_range(70..100),
            rng.gen_range(100..1000),
            rng.gen_range(100..1000),
            rng.gen_range(0..10)
        );
        let phone = format!("+569{}", rng.gen_range(10_000_000..100_000_000));
        clients.push(insert_client(tx, account_id, company, &tax_id, &phone).await?);
    }

    info!("  👤 {} clientes creados", clients.len());
    Ok(clients)
}

async fn insert_client(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
    company_name: &str,
    tax_id: &str,
    phone: &str,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO clients (account_id, company_name, tax_id, phone) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(account_id)
    .bind(company_name)
    .bind(tax_id)
    .bind(phone)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Devuelve los conductores creados como (employee_id, branch_id)
async fn create_employees(
    tx: &mut Transaction<'_, Postgres>,
    rng: &mut StdRng,
    branches: &[SeedBranch],
    password_hash: &str,
) -> Result<Vec<(i64, i64)>> {
    let mut drivers = Vec::new();
    let mut total = 0;

    // Jefe de operaciones fijo en Santiago
    if let Some(santiago) = branches.iter().find(|b| b.name == "Santiago") {
        let account_id = insert_account(tx, "p.rojas", "pedro.rojas@acmetrans.cl", password_hash, ("Pedro", "Rojas"), true, false).await?;
        insert_employee(tx, account_id, EmployeeRole::Mechanic, santiago.id).await?;
        total += 1;
    }

    for (branch, (_, _, count, ..)) in branches.iter().zip(BRANCHES) {
        for i in 0..count {
            let (first_name, last_name) = random_name(rng);
            let username = format!("{}.{}{}{}", first_name[..1].to_lowercase(), ascii_slug(last_name), branch.id, i);
            let email = format!("{}@acmetrans.cl", username);
            let account_id = insert_account(tx, &username, &email, password_hash, (first_name, last_name), true, false).await?;

            // 60% conductores, 20% mecánicos y el resto administrativos
            let role = if i * 10 < count * 6 {
                EmployeeRole::Driver
            } else if i * 10 < count * 8 {
                EmployeeRole::Mechanic
            } else if rng.gen_bool(0.5) {
                EmployeeRole::Admin
            } else {
                EmployeeRole::Auxiliary
            };

            let employee_id = insert_employee(tx, account_id, role, branch.id).await?;
            if role == EmployeeRole::Driver {
                drivers.push((employee_id, branch.id));
            }
            total += 1;
        }
    }

    info!("  🧑‍🔧 {} empleados creados ({} conductores)", total, drivers.len());
    Ok(drivers)
}

async fn insert_employee(tx: &mut Transaction<'_, Postgres>, account_id: i64, role: EmployeeRole, branch_id: i64) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employees (account_id, role, status, branch_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(account_id)
    .bind(role)
    .bind(EmployeeStatus::Available)
    .bind(branch_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

async fn create_trucks(
    tx: &mut Transaction<'_, Postgres>,
    rng: &mut StdRng,
    branches: &[SeedBranch],
    drivers: &[(i64, i64)],
) -> Result<Vec<SeedTruck>> {
    let mut trucks = Vec::new();
    let mut plates = HashSet::new();

    for (branch, (_, _, _, large, medium)) in branches.iter().zip(BRANCHES) {
        let mut branch_drivers = drivers.iter().filter(|(_, b)| *b == branch.id).map(|(id, _)| *id);
        let capacities = std::iter::repeat(TruckCapacity::Large)
            .take(large)
            .chain(std::iter::repeat(TruckCapacity::Medium).take(medium));

        for capacity in capacities {
            let driver_id = branch_drivers.next();
            let mut plate = random_plate(rng);
            while !plates.insert(plate.clone()) {
                plate = random_plate(rng);
            }
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO trucks (plate, capacity, status, branch_id, driver_id) VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(plate)
            .bind(capacity)
            .bind(TruckStatus::Available)
            .bind(branch.id)
            .bind(driver_id)
            .fetch_one(&mut **tx)
            .await?;
            trucks.push(SeedTruck { id, branch_id: branch.id, driver_id, status: TruckStatus::Available });
        }
    }

    info!("  🚛 {} camiones creados", trucks.len());
    Ok(trucks)
}

async fn create_orders(
    tx: &mut Transaction<'_, Postgres>,
    rng: &mut StdRng,
    branches: &[SeedBranch],
    clients: &[i64],
    trucks: &mut [SeedTruck],
) -> Result<()> {
    let today = Utc::now().date_naive();

    for i in 0..NUM_ORDERS {
        let Some(branch) = branches.choose(rng) else {
            warn!("No hay sucursales para crear pedidos");
            return Ok(());
        };
        let Some(&client_id) = clients.choose(rng) else {
            warn!("No hay clientes para crear pedidos");
            return Ok(());
        };

        let status = match i * 10 / NUM_ORDERS {
            0..=3 => OrderStatus::Completed,
            4..=6 => OrderStatus::Requested,
            7 => OrderStatus::Quoted,
            8 => OrderStatus::EnRoute,
            _ => OrderStatus::Confirmed,
        };

        let mut truck_id = None;
        let mut quoted_price = None;
        let mut estimated_cost = None;

        let needs_truck = status.is_dispatching() || status == OrderStatus::Completed;
        if needs_truck {
            let candidate = trucks
                .iter_mut()
                .find(|t| t.branch_id == branch.id && t.status == TruckStatus::Available && t.driver_id.is_some());

            if let Some(truck) = candidate {
                let price = Decimal::from(rng.gen_range(500_000..3_000_000i64));
                let margin = Decimal::new(rng.gen_range(60..=80), 2);
                truck_id = Some(truck.id);
                quoted_price = Some(price);
                estimated_cost = Some((price * margin).round_dp(2));

                if status.is_dispatching() {
                    dispatch(tx, truck).await?;
                }
            }
        }

        let weight = Decimal::new(rng.gen_range(10_000..2_500_000i64), 2);
        let volume = Decimal::new(rng.gen_range(100..9_000i64), 2);
        let destination = format!(
            "Calle {} {}, {}",
            LAST_NAMES.choose(rng).copied().unwrap_or("Principal"),
            rng.gen_range(100..3000),
            DESTINATIONS.choose(rng).copied().unwrap_or("Santiago")
        );

        sqlx::query(
            r#"
            INSERT INTO orders (client_id, origin_branch_id, destination, cargo_type, weight_kg, volume_m3,
                                details, desired_date, status, estimated_cost, quoted_price, truck_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(client_id)
        .bind(branch.id)
        .bind(destination)
        .bind(CARGO_TYPES.choose(rng).copied().unwrap_or("Carga Seca"))
        .bind(weight)
        .bind(volume)
        .bind(format!("{} pallets.", rng.gen_range(1..=20)))
        .bind(today + Duration::days(rng.gen_range(1..=30)))
        .bind(status)
        .bind(estimated_cost)
        .bind(quoted_price)
        .bind(truck_id)
        .execute(&mut **tx)
        .await?;
    }

    info!("  📦 {} pedidos creados", NUM_ORDERS);
    Ok(())
}

/// Camión y conductor pasan a en ruta
async fn dispatch(tx: &mut Transaction<'_, Postgres>, truck: &mut SeedTruck) -> Result<()> {
    sqlx::query("UPDATE trucks SET status = $1 WHERE id = $2")
        .bind(TruckStatus::EnRoute)
        .bind(truck.id)
        .execute(&mut **tx)
        .await?;
    if let Some(driver_id) = truck.driver_id {
        sqlx::query("UPDATE employees SET status = $1 WHERE id = $2")
            .bind(EmployeeStatus::EnRoute)
            .bind(driver_id)
            .execute(&mut **tx)
            .await?;
    }
    truck.status = TruckStatus::EnRoute;
    Ok(())
}

fn random_name(rng: &mut StdRng) -> (&'static str, &'static str) {
    (
        FIRST_NAMES.choose(rng).copied().unwrap_or("Juan"),
        LAST_NAMES.choose(rng).copied().unwrap_or("Pérez"),
    )
}

/// Matrícula chilena de cuatro letras y dos dígitos
fn random_plate(rng: &mut StdRng) -> String {
    const LETTERS: &[u8] = b"BCDFGHJKLPRSTVWXYZ";
    let mut plate: String = (0..4)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect();
    plate.push_str(&format!("{:02}", rng.gen_range(10..100)));
    plate
}

fn ascii_slug(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
