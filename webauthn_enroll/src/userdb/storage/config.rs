//! Data store selection and table configuration

use std::{env, sync::LazyLock};

use crate::userdb::errors::UserError;

use super::UserDirectory;
use super::memory::InMemoryUserDirectory;
use super::sqlite::SqliteUserDirectory;

static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

static GENERIC_DATA_STORE_URL: LazyLock<String> =
    LazyLock::new(|| env::var("GENERIC_DATA_STORE_URL").unwrap_or_default());

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "enroll_".to_string()));

/// Users table name
pub(crate) static DB_TABLE_USERS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_USERS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "users"))
});

/// Registered authenticators table name
pub(crate) static DB_TABLE_AUTHENTICATORS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_AUTHENTICATORS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "authenticators"))
});

/// Builds the user directory selected by `GENERIC_DATA_STORE_TYPE` (`memory` or `sqlite`).
pub async fn user_directory_from_env() -> Result<Box<dyn UserDirectory>, UserError> {
    build_user_directory(
        GENERIC_DATA_STORE_TYPE.as_str(),
        GENERIC_DATA_STORE_URL.as_str(),
    )
    .await
}

async fn build_user_directory(
    store_type: &str,
    store_url: &str,
) -> Result<Box<dyn UserDirectory>, UserError> {
    tracing::info!(
        "Initializing user directory with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Box<dyn UserDirectory> = match store_type {
        "memory" => Box::new(InMemoryUserDirectory::new()),
        "sqlite" => Box::new(SqliteUserDirectory::connect(store_url).await?),
        t => {
            return Err(UserError::Config(format!(
                "Unsupported store type: {t}. Supported types are 'memory' and 'sqlite'"
            )));
        }
    };

    Ok(store)
}
