mod errors;
mod storage;
mod types;

pub use errors::UserError;
pub use storage::{
    InMemoryUserDirectory, SqliteUserDirectory, UserDirectory, user_directory_from_env,
};
pub use types::{Authenticator, User, UserLookupResult};
