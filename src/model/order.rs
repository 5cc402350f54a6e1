//! Orders and their lifecycle.
//!
//! ```text
//!            deliver (seller)
//!   OPEN ─────────────────────▶ DELIVERED
//!    │
//!    ├── cancel (buyer/seller) ▶ CANCELLED   releases stock
//!    │
//!    └── expire (sweeper) ─────▶ EXPIRED     releases stock
//! ```
//!
//! Every state other than `OPEN` is terminal.

use super::{resource_id, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

resource_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Delivered,
    Cancelled,
    Expired,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Open)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Expired => "EXPIRED",
        };
        f.write_str(name)
    }
}

/// A lifecycle event that moves an `OPEN` order to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEvent {
    Deliver,
    Cancel,
    Expire,
}

impl OrderEvent {
    /// The status an `OPEN` order ends up in after this event.
    pub fn target(self) -> OrderStatus {
        match self {
            OrderEvent::Deliver => OrderStatus::Delivered,
            OrderEvent::Cancel => OrderStatus::Cancelled,
            OrderEvent::Expire => OrderStatus::Expired,
        }
    }

    /// Whether the reserved quantity goes back to the product.
    pub fn releases_stock(self) -> bool {
        !matches!(self, OrderEvent::Deliver)
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderEvent::Deliver => "deliver",
            OrderEvent::Cancel => "cancel",
            OrderEvent::Expire => "expire",
        };
        f.write_str(name)
    }
}

/// A buyer's order for some quantity of one seller's product.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
/// Status changes go through [`OrderAction`](crate::order_actor::OrderAction) only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for persisting a new order. Stock must already be reserved.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/orders`; the buyer comes from the caller identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub seller_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl Order {
    /// Builds a freshly placed order in the `OPEN` state.
    pub fn open(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            buyer_id: params.buyer_id,
            seller_id: params.seller_id,
            product_id: params.product_id,
            quantity: params.quantity,
            status: OrderStatus::Open,
            created_at: params.created_at,
            updated_at: params.created_at,
        }
    }

    /// The status `event` would move this order to, or `None` when the order
    /// has already left `OPEN`.
    pub fn next_status(&self, event: OrderEvent) -> Option<OrderStatus> {
        match self.status {
            OrderStatus::Open => Some(event.target()),
            _ => None,
        }
    }

    /// True when the order is still open and was placed at or before `cutoff`.
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.status == OrderStatus::Open && self.created_at <= cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn placed_at(at: DateTime<Utc>) -> Order {
        Order::open(
            OrderId(1),
            OrderCreate {
                buyer_id: UserId(1),
                seller_id: UserId(2),
                product_id: ProductId(1),
                quantity: 2,
                created_at: at,
            },
        )
    }

    #[test]
    fn only_open_orders_transition() {
        let mut order = placed_at(Utc::now());
        assert_eq!(
            order.next_status(OrderEvent::Deliver),
            Some(OrderStatus::Delivered)
        );

        for terminal in [
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Expired,
        ] {
            order.status = terminal;
            assert!(terminal.is_terminal());
            for event in [OrderEvent::Deliver, OrderEvent::Cancel, OrderEvent::Expire] {
                assert_eq!(order.next_status(event), None);
            }
        }
    }

    #[test]
    fn delivery_keeps_stock_consumed() {
        assert!(!OrderEvent::Deliver.releases_stock());
        assert!(OrderEvent::Cancel.releases_stock());
        assert!(OrderEvent::Expire.releases_stock());
    }

    #[test]
    fn staleness_is_inclusive_of_cutoff() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let order = placed_at(t0);
        assert!(order.is_stale(t0));
        assert!(order.is_stale(t0 + Duration::minutes(1)));
        assert!(!order.is_stale(t0 - Duration::seconds(1)));
    }

    #[test]
    fn json_shape() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(placed_at(t0)).unwrap();
        assert_eq!(json["id"], "order_1");
        assert_eq!(json["buyerId"], "user_1");
        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
    }
}
