use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::branch::{Branch, BranchData};
use crate::models::dashboard::DashboardCounts;
use crate::models::employee::EmployeeStatus;
use crate::models::order::OrderStatus;
use crate::models::truck::TruckStatus;
use crate::repositories::BranchRepository;
use crate::utils::errors::{delete_error, AppResult};

pub struct PgBranchRepository {
    pool: PgPool,
}

impl PgBranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BranchRepository for PgBranchRepository {
    async fn create(&self, data: &BranchData) -> AppResult<Branch> {
        let branch = sqlx::query_as::<_, Branch>(
            "INSERT INTO branches (name, address, city) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.city)
        .fetch_one(&self.pool)
        .await?;

        Ok(branch)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(branch)
    }

    async fn list(&self) -> AppResult<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>("SELECT * FROM branches ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(branches)
    }

    async fn update(&self, id: i64, data: &BranchData) -> AppResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(
            "UPDATE branches SET name = $2, address = $3, city = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.city)
        .fetch_optional(&self.pool)
        .await?;

        Ok(branch)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, "la sucursal"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn dashboard_counts(&self, branch_id: i64) -> AppResult<DashboardCounts> {
        let orders = sqlx::query_as::<_, (OrderStatus, i64)>(
            "SELECT status, COUNT(*) FROM orders WHERE origin_branch_id = $1 GROUP BY status",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        let trucks = sqlx::query_as::<_, (TruckStatus, i64)>(
            "SELECT status, COUNT(*) FROM trucks WHERE branch_id = $1 GROUP BY status",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        let drivers = sqlx::query_as::<_, (EmployeeStatus, i64)>(
            "SELECT status, COUNT(*) FROM employees WHERE branch_id = $1 AND role = 'driver' GROUP BY status",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardCounts { orders, trucks, drivers })
    }
}
