//! Order types for the matchbook engine.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so resting orders have a
//! deterministic byte encoding (used for state roots):
//! - Basic types (u64, u8): little-endian encoding
//! - Fixed-size composites: concatenated fields
//!
//! ## Units
//!
//! Prices are integers in the smallest currency fraction. Share counts are
//! whole shares and are always positive while an order is alive.

use std::fmt;

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Book side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

// ============================================================================
// OrderKind enum
// ============================================================================

/// What an order asks the exchange to do.
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0, Sell = 1, CancelBuy = 2, CancelSell = 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderKind {
    /// New buy order
    #[default]
    Buy,
    /// New sell order
    Sell,
    /// Cancel (part of) a resting buy order
    CancelBuy,
    /// Cancel (part of) a resting sell order
    CancelSell,
}

impl OrderKind {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderKind::Buy => 0,
            OrderKind::Sell => 1,
            OrderKind::CancelBuy => 2,
            OrderKind::CancelSell => 3,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderKind::Buy),
            1 => Some(OrderKind::Sell),
            2 => Some(OrderKind::CancelBuy),
            3 => Some(OrderKind::CancelSell),
            _ => None,
        }
    }

    /// The book side this kind refers to. A cancel targets its own side.
    pub fn side(self) -> Side {
        match self {
            OrderKind::Buy | OrderKind::CancelBuy => Side::Buy,
            OrderKind::Sell | OrderKind::CancelSell => Side::Sell,
        }
    }

    /// Whether this kind is a cancel request
    pub fn is_cancel(self) -> bool {
        matches!(self, OrderKind::CancelBuy | OrderKind::CancelSell)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A single order record.
///
/// Orders are entities: once created they are owned by exactly one holder at
/// a time (the engine while matching, or a book while resting). The only
/// field that ever changes is the remaining share count, through
/// [`Order::reduce`].
///
/// ## SSZ Layout
///
/// Fixed-size container: 8 + 1 + 8 + 8 + 8 = 33 bytes
///
/// ## Example
///
/// ```
/// use matchbook::types::{Order, OrderKind, Side};
///
/// let order = Order::new(1, OrderKind::Sell, 550_000, 100, 0);
/// assert_eq!(order.side(), Side::Sell);
/// assert_eq!(order.shares(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Reference id assigned by the submitter
    oref: u64,

    /// Order kind as u8 (see [`OrderKind::to_u8`])
    kind_raw: u8,

    /// Limit price in the smallest currency fraction
    price: u64,

    /// Remaining shares
    shares: u64,

    /// Submission time, breaks price ties
    time: u64,
}

impl Order {
    /// Create a new order
    ///
    /// # Arguments
    ///
    /// * `oref` - Reference id, unique per order
    /// * `kind` - New buy/sell or cancel-buy/cancel-sell
    /// * `price` - Limit price
    /// * `shares` - Share count (requested cancel amount for cancels)
    /// * `time` - Submission time
    pub fn new(oref: u64, kind: OrderKind, price: u64, shares: u64, time: u64) -> Self {
        Self {
            oref,
            kind_raw: kind.to_u8(),
            price,
            shares,
            time,
        }
    }

    #[inline]
    pub fn oref(&self) -> u64 {
        self.oref
    }

    /// Get the order kind
    #[inline]
    pub fn kind(&self) -> OrderKind {
        OrderKind::from_u8(self.kind_raw).expect("invalid order kind")
    }

    /// Get the side this order lives on (or targets, for cancels)
    #[inline]
    pub fn side(&self) -> Side {
        self.kind().side()
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    pub fn shares(&self) -> u64 {
        self.shares
    }

    #[inline]
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Take `shares` off this order's remaining count.
    ///
    /// Priority depends only on price and time, so a resting order can be
    /// reduced in place without reordering its book.
    ///
    /// # Panics
    ///
    /// Panics if `shares` is zero or not strictly less than the remaining
    /// count: an order that would reach zero must be removed instead.
    pub fn reduce(&mut self, shares: u64) {
        assert!(shares > 0, "order {}: reduce by zero shares", self.oref);
        assert!(
            shares < self.shares,
            "order {}: reduce by {} leaves no shares (has {})",
            self.oref,
            shares,
            self.shares
        );
        self.shares -= shares;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} shares @ {} (ref {}, t={})",
            self.side(),
            self.shares,
            self.price,
            self.oref,
            self.time
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
