//! Core data types for matchbook
//!
//! Orders and actions implement SSZ serialization for deterministic encoding.
//!
//! ## Types
//!
//! - [`Order`]: a single order record (new or cancel)
//! - [`Side`]: Buy or Sell
//! - [`OrderKind`]: new buy/sell or cancel-buy/cancel-sell
//! - [`Action`]: one booking, execution or cancellation
//! - [`ActionReport`]: the ordered actions produced by one incoming order

mod order;
mod action;

pub use order::{Order, OrderKind, Side};
pub use action::{Action, ActionKind, ActionReport};
