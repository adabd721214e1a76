use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::account::{Account, NewAccount};
use crate::models::client::{Client, ClientProfile, ClientRecord};
use crate::repositories::account_repository::insert_account;
use crate::repositories::ClientRepository;
use crate::utils::errors::{delete_error, AppResult};

const CLIENT_RECORD_SELECT: &str = r#"
    SELECT c.id, c.account_id, c.company_name, c.tax_id, c.phone, a.username, a.email
    FROM clients c
    JOIN accounts a ON a.id = c.account_id
"#;

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn register(&self, account: &NewAccount, profile: &ClientProfile) -> AppResult<(Account, ClientRecord)> {
        let mut tx = self.pool.begin().await?;

        let account = insert_account(&mut tx, account).await?;
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (account_id, company_name, tax_id, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(account.id)
        .bind(&profile.company_name)
        .bind(&profile.tax_id)
        .bind(&profile.phone)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let record = ClientRecord {
            client,
            username: account.username.clone(),
            email: account.email.clone(),
        };
        Ok((account, record))
    }

    async fn find_by_account(&self, account_id: i64) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ClientRecord>> {
        let query = format!("{} WHERE c.id = $1", CLIENT_RECORD_SELECT);
        let record = sqlx::query_as::<_, ClientRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self) -> AppResult<Vec<ClientRecord>> {
        let query = format!("{} ORDER BY c.id", CLIENT_RECORD_SELECT);
        let records = sqlx::query_as::<_, ClientRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn update(&self, id: i64, profile: &ClientProfile) -> AppResult<Option<ClientRecord>> {
        let result = sqlx::query(
            "UPDATE clients SET company_name = $2, tax_id = $3, phone = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&profile.company_name)
        .bind(&profile.tax_id)
        .bind(&profile.phone)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        // La cuenta arrastra al perfil por ON DELETE CASCADE; los pedidos
        // del cliente lo bloquean por RESTRICT
        let result = sqlx::query(
            "DELETE FROM accounts WHERE id = (SELECT account_id FROM clients WHERE id = $1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| delete_error(e, "el cliente"))?;

        Ok(result.rows_affected() > 0)
    }
}
