//! Inventory ledger actions for the Product actor.
//!
//! Each action is one actor message, so its check and its write happen
//! without any other request for the product in between.

/// Ledger operations on a product's `stock_remaining`.
///
/// Every action returns the stock level after it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes `n` units if at least `n` remain; otherwise changes nothing.
    Reserve(u32),
    /// Puts `n` units back. Not idempotent: callers release once per reservation.
    Release(u32),
}
