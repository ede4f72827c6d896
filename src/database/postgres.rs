//! Postgres-backed user store.
//!
//! Expects a `users` table shaped like:
//!
//! ```sql
//! CREATE TABLE users (
//!     username   TEXT PRIMARY KEY,
//!     password   TEXT NOT NULL,
//!     first_name TEXT NOT NULL,
//!     last_name  TEXT NOT NULL,
//!     email      TEXT NOT NULL,
//!     phone      TEXT NOT NULL,
//!     admin      BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use tracing::info;

use super::models::{NewUser, User, UserDetail, UserSummary};
use super::partial_update::PartialUpdate;
use super::store::UserStore;
use super::DatabaseError;
use crate::config::DatabaseConfig;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| DatabaseError::Unavailable(e.to_string()))?;

        info!(
            "Created database pool for: {}",
            config.redacted_url().unwrap_or_default()
        );
        Ok(Self { pool })
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn register(&self, user: NewUser) -> Result<User, DatabaseError> {
        let existing: Option<(String,)> = sqlx::query_as("SELECT username FROM users WHERE username = $1")
            .bind(&user.username)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(DatabaseError::DuplicateUser(user.username));
        }

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING username, password, first_name, last_name, email, phone, admin
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            // Lost a race with a concurrent registration of the same name
            Err(e) if is_unique_violation(&e) => Err(DatabaseError::DuplicateUser(user.username)),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password, first_name, last_name, email, phone, admin
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<UserSummary>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserSummary>(
            "SELECT username, first_name, last_name FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, username: &str) -> Result<Option<UserDetail>, DatabaseError> {
        let row = sqlx::query_as::<_, UserDetail>(
            r#"
            SELECT username, first_name, last_name, email, phone
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(&self, update: &PartialUpdate) -> Result<Option<User>, DatabaseError> {
        let mut q = sqlx::query_as::<_, User>(update.query());
        for (column, value) in update.assignments() {
            q = bind_column_value(q, column, value)?;
        }
        q = bind_column_value(q, update.key_column(), update.key_value())?;
        let row = q.fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete(&self, username: &str) -> Result<bool, DatabaseError> {
        let deleted: Option<(String,)> = sqlx::query_as("DELETE FROM users WHERE username = $1 RETURNING username")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }

    /// Pings the pool to ensure connectivity
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Bind one allow-listed value. The builder only admits text and boolean
/// columns, so anything else is refused rather than guessed at.
fn bind_column_value<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    column: &str,
    value: &'q Value,
) -> Result<QueryAs<'q, Postgres, O, PgArguments>, DatabaseError>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match value {
        Value::String(s) => Ok(q.bind(s.as_str())),
        Value::Bool(b) => Ok(q.bind(*b)),
        other => Err(DatabaseError::UnsupportedValue {
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_query<'q>() -> QueryAs<'q, Postgres, User, PgArguments> {
        sqlx::query_as::<_, User>("UPDATE \"users\" SET \"admin\" = $1 WHERE \"username\" = $2 RETURNING *")
    }

    #[test]
    fn binds_text_and_boolean_values() {
        let text = json!("u1");
        let flag = json!(true);
        assert!(bind_column_value(update_query(), "username", &text).is_ok());
        assert!(bind_column_value(update_query(), "admin", &flag).is_ok());
    }

    #[test]
    fn refuses_values_without_a_column_kind() {
        for value in [json!(null), json!(7), json!(["x"]), json!({"nested": true})] {
            let err = bind_column_value(update_query(), "first_name", &value).err().unwrap();
            assert!(matches!(err, DatabaseError::UnsupportedValue { ref column, .. } if column == "first_name"));
        }
    }

    #[tokio::test]
    async fn connect_requires_database_url() {
        let config = DatabaseConfig {
            url: None,
            max_connections: 1,
            connection_timeout: 1,
        };
        let err = PgUserStore::connect(&config).await.err().unwrap();
        assert!(matches!(err, DatabaseError::ConfigMissing("DATABASE_URL")));
    }
}
