use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::account::{Account, NewAccount};
use crate::repositories::AccountRepository;
use crate::utils::errors::AppResult;

pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insertar una cuenta dentro de una transacción ya abierta; la usan el
/// registro de clientes y el alta de empleados
pub(crate) async fn insert_account(
    tx: &mut Transaction<'_, Postgres>,
    account: &NewAccount,
) -> AppResult<Account> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (username, email, password_hash, first_name, last_name, is_staff, is_superuser)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&account.username)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(&account.first_name)
    .bind(&account.last_name)
    .bind(account.is_staff)
    .bind(account.is_superuser)
    .fetch_one(&mut **tx)
    .await?;

    Ok(account)
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }
}
