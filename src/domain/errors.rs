use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No orders selected")]
    EmptySelection,
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order already exists: {0}")]
    DuplicateOrder(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
