//! # matchbook
//!
//! Single-instrument order matching engine with price/time priority.
//!
//! ## Architecture
//!
//! - **Types**: Order, Action, ActionReport
//! - **OrderBook**: one side of resting orders, two storage strategies
//! - **Engine**: the Exchange that matches, books and cancels
//! - **Record**: textual order records for the simulation driver
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **Integer Prices**: prices are whole units of the smallest currency fraction
//! 3. **Single Ownership**: every order lives in exactly one place at a time
//! 4. **Synchronous Execution**: No async, no shared state between instruments

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Action, ActionReport
pub mod types;

/// Order books: the OrderBook trait, LinkedBook and HeapBook
pub mod orderbook;

/// Matching engine: Exchange
pub mod engine;

/// Textual order record parsing
pub mod record;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{Action, ActionKind, ActionReport, Order, OrderKind, Side};
pub use orderbook::{HeapBook, LinkedBook, OrderBook};
pub use engine::{Exchange, Fill, FillOutcome};
pub use record::OrderRecord;
pub use error::{Error, RecordError};
