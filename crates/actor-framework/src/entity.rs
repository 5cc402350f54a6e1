//! # ActorEntity Trait
//!
//! The contract a resource (user, product, order) implements so a generic
//! [`ResourceActor`](crate::ResourceActor) can own and serve it.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// Associated types pin every payload to its resource: a `ProductCreate` can
/// only be sent to the product actor, an `OrderAction` only to the order actor.
///
/// # Async & Context
/// Hooks are async so they may call other actors. `Context` is handed to
/// `run()` rather than `new()`, which lets actors that depend on each other be
/// constructed first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier issued by the actor. Must be convertible from the actor's
    /// sequential `u32` counter.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload accepted by the generic update path.
    type Update: Send + Sync + Debug;

    /// Entity-specific commands (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// Result returned by [`ActorEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per actor, the union of what any hook may fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its freshly issued id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is stored. An error
    /// aborts the create and nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before removal. An error keeps the entity in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action.
    ///
    /// Implementations must leave `self` untouched when they return an error;
    /// the actor keeps whatever state the handler leaves behind.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
