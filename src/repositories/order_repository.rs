use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::order::{NewOrder, OrderFilter, OrderRecord, OrderUpdate};
use crate::repositories::OrderRepository;
use crate::services::order_lifecycle::FleetEffect;
use crate::utils::errors::{internal_error, AppError, AppResult};

const ORDER_RECORD_SELECT: &str = r#"
    SELECT o.id, o.client_id, o.origin_branch_id, o.destination, o.cargo_type,
           o.weight_kg, o.volume_m3, o.details, o.desired_date, o.created_at,
           o.status, o.estimated_cost, o.quoted_price, o.truck_id, o.version,
           a.username AS client_username,
           b.name AS origin_branch_name,
           t.plate AS truck_plate,
           t.status AS truck_status
    FROM orders o
    JOIN clients c ON c.id = o.client_id
    JOIN accounts a ON a.id = c.account_id
    JOIN branches b ON b.id = o.origin_branch_id
    LEFT JOIN trucks t ON t.id = o.truck_id
"#;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn apply_effect(tx: &mut Transaction<'_, Postgres>, effect: &FleetEffect) -> AppResult<()> {
    match *effect {
        FleetEffect::Dispatch { truck_id, driver_id } => {
            sqlx::query("UPDATE trucks SET status = 'en_route' WHERE id = $1")
                .bind(truck_id)
                .execute(&mut **tx)
                .await?;
            if let Some(driver_id) = driver_id {
                sqlx::query("UPDATE employees SET status = 'en_route' WHERE id = $1")
                    .bind(driver_id)
                    .execute(&mut **tx)
                    .await?;
            }
        }
        FleetEffect::Release { truck_id, driver_id } => {
            sqlx::query("UPDATE trucks SET status = 'available' WHERE id = $1 AND status = 'en_route'")
                .bind(truck_id)
                .execute(&mut **tx)
                .await?;
            if let Some(driver_id) = driver_id {
                sqlx::query("UPDATE employees SET status = 'available' WHERE id = $1 AND status = 'en_route'")
                    .bind(driver_id)
                    .execute(&mut **tx)
                    .await?;
            }
        }
    }
    Ok(())
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &NewOrder) -> AppResult<OrderRecord> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO orders (client_id, origin_branch_id, destination, cargo_type,
                                weight_kg, volume_m3, details, desired_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(order.client_id)
        .bind(order.origin_branch_id)
        .bind(&order.destination)
        .bind(&order.cargo_type)
        .bind(order.weight_kg)
        .bind(order.volume_m3)
        .bind(&order.details)
        .bind(order.desired_date)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| internal_error("pedido recién creado no encontrado"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<OrderRecord>> {
        let query = format!("{} WHERE o.id = $1", ORDER_RECORD_SELECT);
        let record = sqlx::query_as::<_, OrderRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<OrderRecord>> {
        let query = format!(
            r#"{}
            WHERE ($1::BIGINT IS NULL OR o.client_id = $1)
              AND ($2::BIGINT IS NULL OR o.origin_branch_id = $2)
              AND ($3::order_status IS NULL OR o.status = $3)
            ORDER BY o.created_at DESC, o.id DESC"#,
            ORDER_RECORD_SELECT
        );
        let records = sqlx::query_as::<_, OrderRecord>(&query)
            .bind(filter.client_id)
            .bind(filter.branch_id)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn apply_admin_update(
        &self,
        id: i64,
        update: &OrderUpdate,
        read_version: i32,
        effects: &[FleetEffect],
    ) -> AppResult<OrderRecord> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, estimated_cost = $3, quoted_price = $4, truck_id = $5,
                version = version + 1
            WHERE id = $1 AND version = $6
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(update.estimated_cost)
        .bind(update.quoted_price)
        .bind(update.truck_id)
        .bind(read_version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Sin commit: la transacción se descarta al salir
            return Err(AppError::Conflict(format!(
                "El pedido {} fue modificado por otra operación",
                id
            )));
        }

        for effect in effects {
            apply_effect(&mut tx, effect).await?;
        }

        tx.commit().await?;

        tracing::info!("Pedido {} actualizado ({} efectos de flota)", id, effects.len());

        self.find_by_id(id)
            .await?
            .ok_or_else(|| internal_error("pedido actualizado no encontrado"))
    }

    async fn has_dispatched_for_truck(&self, truck_id: i64, excluding_order: Option<i64>) -> AppResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM orders
                WHERE truck_id = $1
                  AND status IN ('confirmed', 'en_route')
                  AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(truck_id)
        .bind(excluding_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
