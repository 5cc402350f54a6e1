//! [`ActorEntity`] implementation for [`Order`].
//!
//! All status changes are [`OrderAction`]s. The handler authorizes the
//! requester, checks the prior status is `OPEN`, then writes, inside a single
//! actor message: of several racing transitions exactly one succeeds and the
//! rest see [`OrderError::InvalidTransition`].

use super::{OrderAction, OrderError};
use crate::clock::SharedClock;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::info;

impl Order {
    fn authorize(&self, action: &OrderAction) -> Result<(), OrderError> {
        let allowed = match action {
            OrderAction::Deliver { requester } => *requester == self.seller_id,
            OrderAction::Cancel { requester } => {
                *requester == self.buyer_id || *requester == self.seller_id
            }
            OrderAction::Expire { .. } => true,
        };
        if allowed {
            return Ok(());
        }
        let requester = match action {
            OrderAction::Deliver { requester } | OrderAction::Cancel { requester } => {
                requester.to_string()
            }
            OrderAction::Expire { .. } => "system".to_string(),
        };
        Err(OrderError::Forbidden {
            order: self.id.to_string(),
            requester,
            event: action.event(),
        })
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = SharedClock;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(OrderError::InvalidInput("quantity must be positive".into()));
        }
        Ok(Order::open(id, params))
    }

    async fn on_update(&mut self, _update: (), _clock: &SharedClock) -> Result<(), Self::Error> {
        Err(OrderError::InvalidInput(
            "orders change only through lifecycle transitions".into(),
        ))
    }

    /// Orders are kept for their history and never removed.
    async fn on_delete(&self, _clock: &SharedClock) -> Result<(), Self::Error> {
        Err(OrderError::InvalidInput(format!(
            "{} cannot be deleted; cancel it instead",
            self.id
        )))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        clock: &SharedClock,
    ) -> Result<Order, Self::Error> {
        let event = action.event();
        self.authorize(&action)?;

        let Some(next) = self.next_status(event) else {
            return Err(OrderError::InvalidTransition {
                order: self.id.to_string(),
                from: self.status,
                event,
            });
        };
        if let OrderAction::Expire { cutoff } = action {
            if !self.is_stale(cutoff) {
                return Err(OrderError::NotYetExpired(self.id.to_string()));
            }
        }

        let from = self.status;
        self.status = next;
        self.updated_at = clock.now();
        info!(order_id = %self.id, %from, to = %next, "Order transitioned");
        Ok(self.clone())
    }
}
