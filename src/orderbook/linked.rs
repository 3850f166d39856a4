//! Sorted linked-list order book.
//!
//! ## Queue Structure
//!
//! ```text
//! head (best) <-> order2 <-> order3 <-> tail (worst)
//! ```
//!
//! - New orders are linked in front of the first order they precede
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key
//!
//! Nodes live in a [`Slab`], so links are plain keys and every order has a
//! single owner: the slab.

use slab::Slab;
use tracing::trace;

use crate::orderbook::{assert_insertable, precedes, OrderBook, OrderNode};
use crate::types::{Order, Side};

/// Order book kept sorted at insertion time.
#[derive(Debug, Clone)]
pub struct LinkedBook {
    side: Side,

    /// Node storage
    nodes: Slab<OrderNode>,

    /// Highest-priority node (slab key)
    head: Option<usize>,

    /// Lowest-priority node (slab key)
    tail: Option<usize>,
}

impl LinkedBook {
    /// Get the current capacity (pre-allocated slots)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Iterate resting orders, best first
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    fn node(&self, key: usize) -> &OrderNode {
        self.nodes.get(key).expect("Invalid slab key")
    }

    fn node_mut(&mut self, key: usize) -> &mut OrderNode {
        self.nodes.get_mut(key).expect("Invalid slab key")
    }

    fn find_key(&self, oref: u64) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = self.node(key);
            if node.oref() == oref {
                return Some(key);
            }
            cursor = node.next;
        }
        None
    }

    /// Link `key` in front of `before`
    fn link_before(&mut self, key: usize, before: usize) {
        let prev = self.node(before).prev;

        let node = self.node_mut(key);
        node.prev = prev;
        node.next = Some(before);

        self.node_mut(before).prev = Some(key);
        match prev {
            Some(prev_key) => self.node_mut(prev_key).next = Some(key),
            None => self.head = Some(key),
        }
    }

    /// Link `key` after the tail
    fn push_back(&mut self, key: usize) {
        let tail = self.tail;

        let node = self.node_mut(key);
        node.prev = tail;
        node.next = None;

        match tail {
            Some(tail_key) => self.node_mut(tail_key).next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Unlink `key` and take its order out of the slab
    fn unlink(&mut self, key: usize) -> Order {
        let node = self.nodes.remove(key);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        node.into_order()
    }
}

impl OrderBook for LinkedBook {
    fn with_capacity(side: Side, capacity: usize) -> Self {
        Self {
            side,
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn best(&self) -> Option<&Order> {
        self.head.map(|key| &self.node(key).order)
    }

    fn best_mut(&mut self) -> Option<&mut Order> {
        let key = self.head?;
        Some(&mut self.node_mut(key).order)
    }

    fn insert(&mut self, order: Order) {
        assert_insertable(self.side, &order);
        trace!("{} book: inserting {}", self.side, order);

        let key = self.nodes.insert(OrderNode::new(order));

        // First node the new order ranks ahead of; ties stay behind.
        let mut cursor = self.head;
        while let Some(at) = cursor {
            if precedes(&self.node(key).order, &self.node(at).order) {
                break;
            }
            cursor = self.node(at).next;
        }

        match cursor {
            Some(before) => self.link_before(key, before),
            None => self.push_back(key),
        }
    }

    fn remove_best(&mut self) -> Order {
        let key = self
            .head
            .unwrap_or_else(|| panic!("remove_best on empty {} book", self.side));
        let order = self.unlink(key);
        trace!("{} book: removed best {}", self.side, order);
        order
    }

    fn find(&self, oref: u64) -> Option<&Order> {
        self.find_key(oref).map(|key| &self.node(key).order)
    }

    fn find_mut(&mut self, oref: u64) -> Option<&mut Order> {
        let key = self.find_key(oref)?;
        Some(&mut self.node_mut(key).order)
    }

    fn remove_by_reference(&mut self, oref: u64) -> Option<Order> {
        let key = self.find_key(oref)?;
        let order = self.unlink(key);
        trace!("{} book: removed {}", self.side, order);
        Some(order)
    }

    fn snapshot(&self) -> Vec<Order> {
        self.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }
}

/// Iterator over a [`LinkedBook`] in priority order.
pub struct Iter<'a> {
    nodes: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
