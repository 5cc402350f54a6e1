//! # Product Client
//!
//! Catalogue operations plus the inventory ledger: [`ProductClient::reserve`],
//! [`ProductClient::release`] and [`ProductClient::check_stock`].
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    /// Edits name and price. Stock is not reachable from here.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        self.inner
            .update(id, update)
            .await
            .map_err(ProductError::from)
    }

    /// Atomically takes `quantity` units if that many remain. Returns the
    /// stock left afterwards.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving stock");
        self.ledger(id, ProductAction::Reserve(quantity)).await
    }

    /// Puts `quantity` units back. Returns the stock afterwards.
    #[instrument(skip(self))]
    pub async fn release(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing stock");
        self.ledger(id, ProductAction::Release(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        self.ledger(id, ProductAction::CheckStock).await
    }

    async fn ledger(&self, id: ProductId, action: ProductAction) -> Result<u32, ProductError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(ProductError::from)
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}
