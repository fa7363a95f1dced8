use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::userdb::errors::UserError;
use crate::userdb::types::{Authenticator, User, UserLookupResult};
use crate::username::UserName;

use super::{UserDirectory, normalize_user};
use super::config::{DB_TABLE_AUTHENTICATORS, DB_TABLE_USERS};

/// User directory stored in SQLite.
#[derive(Clone, Debug)]
pub struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    /// Connect to `url` and create the tables if they do not exist yet.
    pub async fn connect(url: &str) -> Result<Self, UserError> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // An in-memory database lives in a single connection
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        let directory = Self { pool };
        directory.create_tables().await?;
        Ok(directory)
    }

    async fn create_tables(&self) -> Result<(), UserError> {
        let users_table = DB_TABLE_USERS.as_str();
        let authenticators_table = DB_TABLE_AUTHENTICATORS.as_str();

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {users_table} (
                id TEXT PRIMARY KEY NOT NULL,
                user_name TEXT NOT NULL UNIQUE,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {authenticators_table} (
                sequence_number INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
                cred_id TEXT NOT NULL UNIQUE,
                type TEXT NOT NULL
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn find_by_user_name(&self, user_name: &UserName) -> Result<UserLookupResult, UserError> {
        let users_table = DB_TABLE_USERS.as_str();
        let authenticators_table = DB_TABLE_AUTHENTICATORS.as_str();

        let row: Option<(String, String)> = sqlx::query_as(&format!(
            r#"SELECT id, user_name FROM {users_table} WHERE user_name = ?"#
        ))
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, user_name)) = row else {
            return Ok(UserLookupResult::NotFound);
        };

        let authenticators: Vec<(String, String)> = sqlx::query_as(&format!(
            r#"
            SELECT cred_id, type FROM {authenticators_table}
            WHERE user_id = ? ORDER BY sequence_number ASC
            "#
        ))
        .bind(&id)
        .fetch_all(&self.pool)
        .await?;

        let authenticators = authenticators
            .into_iter()
            .map(|(cred_id, type_)| Authenticator { cred_id, type_ })
            .collect();

        Ok(UserLookupResult::Found(
            User::new(id, user_name).with_authenticators(authenticators),
        ))
    }

    async fn upsert_user(&self, user: User) -> Result<User, UserError> {
        let user = normalize_user(user)?;
        let users_table = DB_TABLE_USERS.as_str();
        let authenticators_table = DB_TABLE_AUTHENTICATORS.as_str();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            r#"
            INSERT INTO {users_table} (id, user_name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                user_name = excluded.user_name,
                updated_at = excluded.updated_at
            "#
        ))
        .bind(&user.id)
        .bind(&user.user_name)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            r#"DELETE FROM {authenticators_table} WHERE user_id = ?"#
        ))
        .bind(&user.id)
        .execute(&mut *tx)
        .await?;

        for authenticator in &user.authenticators {
            sqlx::query(&format!(
                r#"INSERT INTO {authenticators_table} (user_id, cred_id, type) VALUES (?, ?, ?)"#
            ))
            .bind(&user.id)
            .bind(&authenticator.cred_id)
            .bind(&authenticator.type_)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(user)
    }
}
