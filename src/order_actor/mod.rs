//! # Order Actor
//!
//! Stores orders and applies their lifecycle transitions. The actor's
//! context is the [`SharedClock`](crate::clock::SharedClock) used to stamp
//! `updated_at`.
//!
//! - [`entity`]: [`ActorEntity`](actor_framework::ActorEntity) implementation
//!   for [`Order`](crate::model::Order), including authorization
//! - [`actions`]: [`OrderAction`] transitions
//! - [`error`]: [`OrderError`], shared with the order service

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
