//! Matching engine module for matchbook.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input always produces same output
//! 2. **Synchronous Execution**: one order runs to completion before the next
//! 3. **Price-Time Priority**: Best price first, then earliest time
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against the sell book (lowest price first)
//! - **Sell orders** match against the buy book (highest price first)
//! - Trades execute at the **resting** order's price
//! - **Partial fills** are supported
//! - **Unfilled shares** rest on the book
//!
//! ## Example
//!
//! ```
//! use matchbook::engine::Exchange;
//! use matchbook::types::{ActionKind, Order, OrderKind, Side};
//!
//! let mut exchange = Exchange::new("UOCCS");
//! exchange.process_order(Order::new(1, OrderKind::Buy, 500, 10, 0));
//!
//! let report = exchange.process_order(Order::new(2, OrderKind::Sell, 500, 15, 1));
//! let kinds: Vec<_> = report.iter().map(|a| a.kind()).collect();
//!
//! assert_eq!(kinds, vec![ActionKind::Execute, ActionKind::BookedSell]);
//! assert_eq!(exchange.best_order(Side::Sell).map(|o| o.shares()), Some(5));
//! ```

pub mod exchange;
pub mod fill;

pub use exchange::{Exchange, DEFAULT_BOOK_CAPACITY};
pub use fill::{crosses, Fill, FillOutcome};
