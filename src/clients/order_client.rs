//! # Order Client
//!
//! Persistence and transitions for orders. Validation and stock handling
//! live in [`OrderService`](crate::service::OrderService); this client only
//! talks to the Order actor.
use crate::model::{Order, OrderCreate, OrderId, UserId};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(OrderError::from)
    }

    #[instrument(skip(self))]
    pub async fn deliver(&self, id: OrderId, requester: UserId) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Deliver { requester }).await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId, requester: UserId) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Cancel { requester }).await
    }

    /// Expires `id` if it is still open and was placed at or before `cutoff`.
    #[instrument(skip(self))]
    pub async fn expire(&self, id: OrderId, cutoff: DateTime<Utc>) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Expire { cutoff }).await
    }

    /// Open orders placed at or before `cutoff`, in id order.
    #[instrument(skip(self))]
    pub async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Order>, OrderError> {
        self.find(Filter::new(move |order: &Order| order.is_stale(cutoff)))
            .await
    }

    async fn transition(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
