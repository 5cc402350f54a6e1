//! # Product Actor
//!
//! Product catalogue plus the inventory ledger. The ledger is the
//! `stock_remaining` field of each product, mutated only by the
//! [`ProductAction`]s in [`actions`]:
//!
//! ```rust
//! use marketplace::model::{ProductCreate, UserId};
//! use marketplace::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate {
//!             seller_id: UserId(1),
//!             name: "Widget".into(),
//!             price: 29.99,
//!             stock_remaining: 10,
//!         })
//!         .await?;
//!
//!     assert_eq!(client.reserve(id, 4).await?, 6);
//!     assert_eq!(client.release(id, 4).await?, 10);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
