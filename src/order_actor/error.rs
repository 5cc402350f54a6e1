//! Error types for the Order actor and the order service.
//!
//! [`OrderError`] is the taxonomy callers of the order lifecycle see. Ledger
//! and directory errors are folded into it by the `From` impls below.

use crate::model::{OrderEvent, OrderStatus};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Malformed request: bad quantity, unknown or wrong-role party, product
    /// not sold by the named seller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The requester is not allowed to trigger this transition.
    #[error("{requester} may not {event} order {order}")]
    Forbidden {
        order: String,
        requester: String,
        event: OrderEvent,
    },

    /// The order already left `OPEN`.
    #[error("Cannot {event} order {order}: it is {from}")]
    InvalidTransition {
        order: String,
        from: OrderStatus,
        event: OrderEvent,
    },

    /// An expire request reached an order that is not past its deadline.
    #[error("Order {0} is not past its expiry deadline")]
    NotYetExpired(String),

    /// A store could not be reached or did not answer.
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::StorageFailure(e.to_string())),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::InsufficientStock {
                requested,
                available,
            } => OrderError::InsufficientStock {
                requested,
                available,
            },
            ProductError::InvalidQuantity(_) | ProductError::ValidationError(_) => {
                OrderError::InvalidInput(e.to_string())
            }
            ProductError::StockOverflow { .. } | ProductError::ActorCommunicationError(_) => {
                OrderError::StorageFailure(e.to_string())
            }
        }
    }
}

impl From<UserError> for OrderError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) | UserError::ValidationError(_) => {
                OrderError::InvalidInput(e.to_string())
            }
            UserError::ActorCommunicationError(_) => OrderError::StorageFailure(e.to_string()),
        }
    }
}
