//! # Tracing Setup
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! Verbosity is driven by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run                       # lifecycle, creates, sweeps
//! RUST_LOG=debug cargo run                      # every request with its payload
//! RUST_LOG=marketplace::sweeper=debug cargo run # one module only
//! ```
//!
//! The actor loop tags its events with `entity_type` instead of a module path,
//! so the target is hidden:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO sweep: Sweep finished scanned=3 expired=2 failed=0
//! ```

/// Initializes structured logging with an `EnvFilter` and compact output.
///
/// Call once per process. A second call panics, as `tracing_subscriber`'s
/// `init` does.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
