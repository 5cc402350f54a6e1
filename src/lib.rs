//! # Marketplace
//!
//! Order lifecycle and inventory reservation for a buyer/seller marketplace,
//! built on resource actors from [`actor_framework`].
//!
//! - Placing an order reserves stock on the product.
//! - An order moves from `OPEN` to exactly one of `DELIVERED`, `CANCELLED`
//!   or `EXPIRED`.
//! - Cancelled and expired orders give their stock back, once.
//! - A background sweep expires orders left open past the deadline.
//!
//! ## Module Tour
//!
//! | Layer | Modules |
//! |---|---|
//! | Data | [`model`] |
//! | Actors | [`user_actor`], [`product_actor`] (inventory ledger), [`order_actor`] (state machine) |
//! | Clients | [`clients`] |
//! | Orchestration | [`service`], [`sweeper`] |
//! | Wiring | [`lifecycle`], [`config`], [`clock`] |
//! | HTTP | [`api`] |
//!
//! Every stock change and every status change is one message to the owning
//! actor, which handles messages one at a time. That makes each
//! check-then-write atomic without locks: two buyers racing for the last unit
//! cannot both win, and a cancel racing the sweeper releases stock once.
//!
//! ## Testing
//!
//! Time-dependent behavior takes a [`clock::ManualClock`]. Code around a
//! client is tested with [`actor_framework::mock::MockClient`].

pub mod api;
pub mod clients;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod service;
pub mod sweeper;
pub mod user_actor;
