use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::truck::{Truck, TruckData, TruckFilter, TruckRecord};
use crate::repositories::TruckRepository;
use crate::utils::errors::{delete_error, internal_error, AppResult};

const TRUCK_RECORD_SELECT: &str = r#"
    SELECT t.id, t.plate, t.capacity, t.status, t.branch_id, t.driver_id,
           b.name AS branch_name,
           a.username AS driver_username
    FROM trucks t
    JOIN branches b ON b.id = t.branch_id
    LEFT JOIN employees e ON e.id = t.driver_id
    LEFT JOIN accounts a ON a.id = e.account_id
"#;

pub struct PgTruckRepository {
    pool: PgPool,
}

impl PgTruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TruckRepository for PgTruckRepository {
    async fn create(&self, data: &TruckData) -> AppResult<TruckRecord> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO trucks (plate, capacity, status, branch_id, driver_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.plate)
        .bind(data.capacity)
        .bind(data.status)
        .bind(data.branch_id)
        .bind(data.driver_id)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| internal_error("camión recién creado no encontrado"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TruckRecord>> {
        let query = format!("{} WHERE t.id = $1", TRUCK_RECORD_SELECT);
        let record = sqlx::query_as::<_, TruckRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self, filter: &TruckFilter) -> AppResult<Vec<TruckRecord>> {
        let query = format!(
            r#"{}
            WHERE ($1::BIGINT IS NULL OR t.branch_id = $1)
              AND ($2::truck_status IS NULL OR t.status = $2)
            ORDER BY t.id"#,
            TRUCK_RECORD_SELECT
        );
        let records = sqlx::query_as::<_, TruckRecord>(&query)
            .bind(filter.branch_id)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn update(&self, id: i64, data: &TruckData) -> AppResult<Option<TruckRecord>> {
        let result = sqlx::query(
            r#"
            UPDATE trucks
            SET plate = $2, capacity = $3, status = $4, branch_id = $5, driver_id = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&data.plate)
        .bind(data.capacity)
        .bind(data.status)
        .bind(data.branch_id)
        .bind(data.driver_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, "el camión"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_driver(&self, employee_id: i64) -> AppResult<Option<Truck>> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE driver_id = $1 LIMIT 1")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(truck)
    }
}
