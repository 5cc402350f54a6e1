//! # ActorClient Trait
//!
//! Resource-specific clients (`ProductClient`, `OrderClient`, ...) wrap a
//! [`ResourceClient`] and speak in their own error type. Implementing this
//! trait gives them `get`, `find` and `delete` for free.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Shelf { id: u32 }
/// #[derive(Debug)] struct ShelfCreate;
/// #[derive(Debug)] enum ShelfAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct ShelfError(String);
///
/// #[async_trait]
/// impl ActorEntity for Shelf {
///     type Id = u32;
///     type Create = ShelfCreate;
///     type Update = ();
///     type Action = ShelfAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = ShelfError;
///
///     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct ShelfClient { inner: ResourceClient<Shelf> }
///
/// #[async_trait]
/// impl ActorClient<Shelf> for ShelfClient {
///     type Error = ShelfError;
///
///     fn inner(&self) -> &ResourceClient<Shelf> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> Self::Error { ShelfError(e.to_string()) }
/// }
///
/// async fn usage(client: ShelfClient) {
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn find(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
