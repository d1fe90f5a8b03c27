use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountStore;

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; converted back into domain types through the value
/// object constructors so invalid stored data surfaces as an error
/// instead of leaking through.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    plan: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn try_into_account(self) -> Result<Account, AccountError> {
        Ok(Account {
            id: AccountId(self.id),
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            plan: self.plan.parse()?,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

const SELECT_ACCOUNT: &str = r#"
    SELECT id, username, email, password_hash, display_name, avatar_url,
           plan, is_active, created_at
    FROM accounts
"#;

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts
                (id, username, email, password_hash, display_name,
                 avatar_url, plan, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.display_name)
        .bind(&account.avatar_url)
        .bind(account.plan.as_str())
        .bind(account.is_active)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The register duplicate probe and this insert are two
            // independent calls; losing that race lands here as a
            // uniqueness violation and maps to the same conflict.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("accounts_username_key") {
                        return AccountError::UsernameTaken(
                            account.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("accounts_email_key") {
                        return AccountError::EmailTaken(account.email.as_str().to_string());
                    }
                }
            }
            AccountError::Database(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(AccountRow::try_into_account).transpose()
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE username = $1 OR email = $1",
            SELECT_ACCOUNT
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(AccountRow::try_into_account).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE username = $1 OR email = $2 LIMIT 1",
            SELECT_ACCOUNT
        ))
        .bind(username.as_str())
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(AccountRow::try_into_account).transpose()
    }
}
