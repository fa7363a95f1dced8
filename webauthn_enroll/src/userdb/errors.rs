use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        UserError::Storage(err.to_string())
    }
}
