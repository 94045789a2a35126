use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::config::ConfigError;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dashboard runtime is not running")]
    RuntimeStopped,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl<T> From<mpsc::error::SendError<T>> for AppError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        AppError::RuntimeStopped
    }
}

impl From<oneshot::error::RecvError> for AppError {
    fn from(_: oneshot::error::RecvError) -> Self {
        AppError::RuntimeStopped
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
