use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::account::NewAccount;
use crate::models::employee::{EmployeeData, EmployeeFilter, EmployeeRecord};
use crate::repositories::account_repository::insert_account;
use crate::repositories::EmployeeRepository;
use crate::utils::errors::{delete_error, internal_error, AppResult};

const EMPLOYEE_RECORD_SELECT: &str = r#"
    SELECT e.id, e.account_id, e.role, e.status, e.branch_id,
           a.username, a.email, a.first_name, a.last_name,
           b.name AS branch_name
    FROM employees e
    JOIN accounts a ON a.id = e.account_id
    JOIN branches b ON b.id = e.branch_id
"#;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, account: &NewAccount, data: &EmployeeData) -> AppResult<EmployeeRecord> {
        let mut tx = self.pool.begin().await?;

        let account = insert_account(&mut tx, account).await?;
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO employees (account_id, role, status, branch_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(account.id)
        .bind(data.role)
        .bind(data.status)
        .bind(data.branch_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| internal_error("empleado recién creado no encontrado"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<EmployeeRecord>> {
        let query = format!("{} WHERE e.id = $1", EMPLOYEE_RECORD_SELECT);
        let record = sqlx::query_as::<_, EmployeeRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self, filter: &EmployeeFilter) -> AppResult<Vec<EmployeeRecord>> {
        let query = format!(
            r#"{}
            WHERE ($1::BIGINT IS NULL OR e.branch_id = $1)
              AND ($2::employee_role IS NULL OR e.role = $2)
              AND ($3::employee_status IS NULL OR e.status = $3)
            ORDER BY e.id"#,
            EMPLOYEE_RECORD_SELECT
        );
        let records = sqlx::query_as::<_, EmployeeRecord>(&query)
            .bind(filter.branch_id)
            .bind(filter.role)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn update(&self, id: i64, data: &EmployeeData) -> AppResult<Option<EmployeeRecord>> {
        let result = sqlx::query(
            "UPDATE employees SET role = $2, status = $3, branch_id = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(data.role)
        .bind(data.status)
        .bind(data.branch_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM accounts WHERE id = (SELECT account_id FROM employees WHERE id = $1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| delete_error(e, "el empleado"))?;

        Ok(result.rows_affected() > 0)
    }
}
