//! Order books for the matchbook engine.
//!
//! ## Architecture
//!
//! An order book holds the resting orders of ONE side of one instrument and
//! always yields its highest-priority order first (see [`precedes`]).
//! The [`OrderBook`] trait is the contract; two storage strategies
//! implement it:
//!
//! - [`LinkedBook`]: sorted doubly-linked list of slab nodes
//! - [`HeapBook`]: binary heap over a growable array
//!
//! Both report the same best order and therefore drive the engine to the
//! same actions. They differ only in where equal-priority orders sit
//! internally.
//!
//! ## Performance
//!
//! | Operation | LinkedBook | HeapBook |
//! |-----------|------------|----------|
//! | Insert | O(n) | O(log n) |
//! | Best | O(1) | O(1) |
//! | Remove best | O(1) | O(log n) |
//! | Remove by reference | O(n) | O(n) |
//!
//! ## Example
//!
//! ```
//! use matchbook::orderbook::{LinkedBook, OrderBook};
//! use matchbook::types::{Order, OrderKind, Side};
//!
//! let mut book = LinkedBook::new(Side::Buy);
//! book.insert(Order::new(1, OrderKind::Buy, 500, 10, 0));
//! book.insert(Order::new(2, OrderKind::Buy, 510, 10, 1));
//!
//! assert_eq!(book.best().map(|o| o.oref()), Some(2));
//! ```

pub mod priority;
pub mod node;
pub mod linked;
pub mod heap;

pub use priority::{precedes, priority};
pub use node::OrderNode;
pub use linked::LinkedBook;
pub use heap::HeapBook;

use crate::types::{Order, Side};

/// One side of an instrument's resting orders, kept in price/time priority.
///
/// Orders handed out through `best_mut`/`find_mut` can only have their
/// share count reduced, which never changes their rank.
pub trait OrderBook {
    /// Create an empty book for `side` with room for `capacity` orders.
    /// Capacity is a hint; storage grows on demand.
    fn with_capacity(side: Side, capacity: usize) -> Self
    where
        Self: Sized;

    /// Create an empty book for `side`
    fn new(side: Side) -> Self
    where
        Self: Sized,
    {
        Self::with_capacity(side, 0)
    }

    fn side(&self) -> Side;

    /// Number of resting orders
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The highest-priority resting order, if any
    fn best(&self) -> Option<&Order>;

    fn best_mut(&mut self) -> Option<&mut Order>;

    /// Add a resting order, keeping priority order.
    ///
    /// # Panics
    ///
    /// Panics if `order` is a cancel or belongs to the other side.
    fn insert(&mut self, order: Order);

    /// Remove and return the highest-priority order.
    ///
    /// # Panics
    ///
    /// Panics if the book is empty.
    fn remove_best(&mut self) -> Order;

    /// Find a resting order by reference id
    fn find(&self, oref: u64) -> Option<&Order>;

    fn find_mut(&mut self, oref: u64) -> Option<&mut Order>;

    /// Remove and return the order with reference `oref`, leaving the book
    /// untouched if there is none.
    fn remove_by_reference(&mut self, oref: u64) -> Option<Order>;

    /// Copies of every resting order, best first. Diagnostics only.
    fn snapshot(&self) -> Vec<Order>;

    /// Drop every resting order
    fn clear(&mut self);
}

/// Guard shared by the book implementations' `insert`.
#[inline]
pub(crate) fn assert_insertable(side: Side, order: &Order) {
    assert!(
        !order.kind().is_cancel(),
        "cancel order {} cannot rest in a book",
        order.oref()
    );
    assert_eq!(
        order.side(),
        side,
        "order {} inserted into the {} book",
        order.oref(),
        side
    );
}
