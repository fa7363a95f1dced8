use thiserror::Error;

use crate::utils::UtilError;

/// Errors raised while producing registration options.
#[derive(Debug, Error)]
pub enum PasskeyError {
    /// Error related to relying-party configuration (e.g., missing ORIGIN)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from utility operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
