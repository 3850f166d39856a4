//! Linked-list node of the [`LinkedBook`](crate::orderbook::LinkedBook).
//!
//! Links are slab keys. A key stays valid until its node is removed from the
//! slab, after which the slab may hand it out again, so a node must be
//! unlinked from both neighbours before it is removed.
//!
//! - `next`: the neighbour ranked directly below
//! - `prev`: the neighbour ranked directly above

use crate::types::Order;

/// A resting order plus its neighbours' slab keys.
#[derive(Debug, Clone)]
pub struct OrderNode {
    pub order: Order,

    /// None at the tail
    pub next: Option<usize>,

    /// None at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Wrap an order with no neighbours
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::orderbook::OrderNode;
    /// use matchbook::types::{Order, OrderKind};
    ///
    /// let node = OrderNode::new(Order::new(1, OrderKind::Buy, 500, 10, 0));
    ///
    /// assert!(node.next.is_none());
    /// assert!(node.prev.is_none());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub fn oref(&self) -> u64 {
        self.order.oref()
    }

    #[inline]
    pub fn into_order(self) -> Order {
        self.order
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
