//! Lifecycle transitions for the Order actor.

use crate::model::{OrderEvent, UserId};
use chrono::{DateTime, Utc};

/// A conditional status change. The actor applies it only if the order is
/// still `OPEN` (and, for `Expire`, still past `cutoff`) when the message is
/// processed; the result is the order as stored afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Seller confirms delivery.
    Deliver { requester: UserId },
    /// Buyer or seller withdraws the order.
    Cancel { requester: UserId },
    /// System-only: the order was placed at or before `cutoff`.
    Expire { cutoff: DateTime<Utc> },
}

impl OrderAction {
    pub fn event(&self) -> OrderEvent {
        match self {
            OrderAction::Deliver { .. } => OrderEvent::Deliver,
            OrderAction::Cancel { .. } => OrderEvent::Cancel,
            OrderAction::Expire { .. } => OrderEvent::Expire,
        }
    }
}
