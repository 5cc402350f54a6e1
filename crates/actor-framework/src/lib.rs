//! # Actor Framework
//!
//! Building blocks for type-safe resource actors on top of tokio.
//!
//! Each resource type (users, products, orders) gets one [`ResourceActor`]
//! that exclusively owns its entities and processes requests one at a time.
//! Callers talk to it through a cloneable [`ResourceClient`]. Because every
//! request runs to completion before the next one is read, a single request
//! can check a condition and mutate on it without any lock: that is the
//! primitive the marketplace uses for stock reservation and order transitions.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): domain data plus its hooks and actions.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, Filter, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Bin {
//!     id: u32,
//!     units: u32,
//! }
//!
//! #[derive(Debug)] struct BinCreate { units: u32 }
//! #[derive(Debug)] enum BinAction { Take(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("only {available} units left")]
//! struct NotEnough { available: u32 }
//!
//! #[async_trait]
//! impl ActorEntity for Bin {
//!     type Id = u32;
//!     type Create = BinCreate;
//!     type Update = ();
//!     type Action = BinAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = NotEnough;
//!
//!     fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, units: params.units })
//!     }
//!
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!
//!     async fn handle_action(&mut self, action: BinAction, _: &()) -> Result<u32, Self::Error> {
//!         match action {
//!             BinAction::Take(n) if n <= self.units => {
//!                 self.units -= n;
//!                 Ok(self.units)
//!             }
//!             BinAction::Take(_) => Err(NotEnough { available: self.units }),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Bin>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(BinCreate { units: 3 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, BinAction::Take(2)).await.unwrap(), 1);
//!
//!     let err = client.perform_action(id, BinAction::Take(2)).await.unwrap_err();
//!     let typed = err.downcast_entity::<NotEnough>().unwrap();
//!     assert_eq!(typed.available, 1);
//!
//!     let low = client.find(Filter::new(|b: &Bin| b.units < 2)).await.unwrap();
//!     assert_eq!(low.len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to `new`, so
//! every actor can be created first and the clients wired in afterwards.
//!
//! ## Logging
//!
//! [`tracing::setup_tracing`] installs the env-filtered subscriber used by the
//! binaries. The actor loop logs with `entity_type` and `id` fields.
//!
//! ## Testing
//!
//! The [`mock`] module hands out real `ResourceClient`s answered from scripted
//! expectations, for tests of the code around a client.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
