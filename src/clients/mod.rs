//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client speaks its resource's error type and turns framework errors
//! back into it, so callers match on `ProductError::InsufficientStock`
//! rather than on a boxed error.

pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
