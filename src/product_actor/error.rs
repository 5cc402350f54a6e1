//! Error types for the Product actor.

use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product and ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Ledger operations need a positive quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Releasing would push the stock counter past `u32::MAX`.
    #[error("Stock overflow: {current} on hand, releasing {released}")]
    StockOverflow { current: u32, released: u32 },

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .downcast_entity::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}
