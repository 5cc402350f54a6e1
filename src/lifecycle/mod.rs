//! # Lifecycle
//!
//! Starts and stops the marketplace: the three resource actors, the order
//! service on top of them, and the expiry sweeper.

pub mod order_system;

pub use order_system::*;
