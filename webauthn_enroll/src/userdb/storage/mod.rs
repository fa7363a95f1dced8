mod config;
mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::userdb::errors::UserError;
use crate::userdb::types::{User, UserLookupResult};
use crate::username::UserName;

pub use config::user_directory_from_env;
pub use memory::InMemoryUserDirectory;
pub use sqlite::SqliteUserDirectory;

/// Lookup of user records by normalized username.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_user_name(&self, user_name: &UserName) -> Result<UserLookupResult, UserError>;

    /// Insert or replace a user together with its authenticators.
    ///
    /// The username is stored normalized; one that fails normalization is rejected.
    async fn upsert_user(&self, user: User) -> Result<User, UserError>;
}

/// Replace `user.user_name` with its normalized form.
pub(super) fn normalize_user(mut user: User) -> Result<User, UserError> {
    let user_name = UserName::clean(&user.user_name).ok_or_else(|| {
        UserError::InvalidData(format!("Invalid username: {:?}", user.user_name))
    })?;
    user.user_name = user_name.as_str().to_string();
    Ok(user)
}
