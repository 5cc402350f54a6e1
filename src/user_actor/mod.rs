//! # User Actor
//!
//! Directory of buyers and sellers. Orders look users up here to check that
//! each party exists and holds the expected [`Role`](crate::model::Role).
//!
//! - [`entity`]: [`ActorEntity`](actor_framework::ActorEntity) implementation
//!   for [`User`](crate::model::User)
//! - [`error`]: [`UserError`]

pub mod entity;
pub mod error;

pub use entity::UserAction;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
