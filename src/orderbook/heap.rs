//! Binary-heap order book.
//!
//! Orders sit in a growable array laid out as an implicit binary tree:
//! children of slot `i` are `2i + 1` and `2i + 2`. Every parent precedes
//! its children, so the root is always the best order. Equal-priority orders
//! may sit anywhere relative to each other; only the root is observable.

use tracing::trace;

use crate::orderbook::{assert_insertable, precedes, priority, OrderBook};
use crate::types::{Order, Side};

/// Order book backed by a binary heap.
#[derive(Debug, Clone)]
pub struct HeapBook {
    side: Side,
    orders: Vec<Order>,
}

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}

#[inline]
fn left_child(index: usize) -> usize {
    2 * index + 1
}

impl HeapBook {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Resting orders in heap (storage) order
    pub fn as_slice(&self) -> &[Order] {
        &self.orders
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let up = parent(index);
            if !precedes(&self.orders[index], &self.orders[up]) {
                return;
            }
            self.orders.swap(index, up);
            index = up;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.orders.len();
        loop {
            let mut best = index;
            let left = left_child(index);
            for child in [left, left + 1] {
                if child < len && precedes(&self.orders[child], &self.orders[best]) {
                    best = child;
                }
            }
            if best == index {
                return;
            }
            self.orders.swap(index, best);
            index = best;
        }
    }

    /// Take the order at `index` out, refilling the hole with the last slot
    fn remove_at(&mut self, index: usize) -> Order {
        let removed = self.orders.swap_remove(index);
        if index < self.orders.len() {
            if index > 0 && precedes(&self.orders[index], &self.orders[parent(index)]) {
                self.sift_up(index);
            } else {
                self.sift_down(index);
            }
        }
        removed
    }

    fn position(&self, oref: u64) -> Option<usize> {
        self.orders.iter().position(|o| o.oref() == oref)
    }
}

impl OrderBook for HeapBook {
    fn with_capacity(side: Side, capacity: usize) -> Self {
        Self {
            side,
            orders: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    #[inline]
    fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    fn best(&self) -> Option<&Order> {
        self.orders.first()
    }

    #[inline]
    fn best_mut(&mut self) -> Option<&mut Order> {
        self.orders.first_mut()
    }

    fn insert(&mut self, order: Order) {
        assert_insertable(self.side, &order);
        trace!("{} heap: inserting {}", self.side, order);

        self.orders.push(order);
        self.sift_up(self.orders.len() - 1);
    }

    fn remove_best(&mut self) -> Order {
        assert!(!self.orders.is_empty(), "remove_best on empty {} book", self.side);
        let order = self.remove_at(0);
        trace!("{} heap: removed best {}", self.side, order);
        order
    }

    fn find(&self, oref: u64) -> Option<&Order> {
        self.orders.iter().find(|o| o.oref() == oref)
    }

    fn find_mut(&mut self, oref: u64) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.oref() == oref)
    }

    fn remove_by_reference(&mut self, oref: u64) -> Option<Order> {
        let index = self.position(oref)?;
        let order = self.remove_at(index);
        trace!("{} heap: removed {}", self.side, order);
        Some(order)
    }

    fn snapshot(&self) -> Vec<Order> {
        let mut orders = self.orders.clone();
        orders.sort_by(priority);
        orders
    }

    fn clear(&mut self) {
        self.orders.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
