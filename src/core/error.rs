use thiserror::Error;

use crate::shared::constants::GENERIC_ERROR_MESSAGE;

#[derive(Debug, Error)]
pub enum AppError {
    /// Fetching the record collection failed; the store was left unchanged.
    #[error("Load failure: {0}")]
    LoadFailure(String),

    /// A create or delete request was rejected; nothing was changed.
    #[error("Mutation failure: {0}")]
    MutationFailure(String),

    /// The admin code challenge was not passed.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown to the operator for this failure
    pub fn user_message(&self) -> String {
        match self {
            AppError::LoadFailure(msg)
            | AppError::MutationFailure(msg)
            | AppError::AccessDenied(msg)
            | AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Forbidden(msg)
            | AppError::Config(msg) => msg.clone(),
            AppError::Io(e) => e.to_string(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
