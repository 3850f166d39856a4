//! Share splitting between an incoming order and the best resting order.

use crate::types::{Order, Side};

/// What is left after one fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Incoming order consumed; the resting order keeps `remaining` shares
    Filled { remaining: u64 },
    /// Both orders consumed exactly
    Consumed,
    /// Resting order consumed; the incoming order carries `remainder` shares
    /// on to the next resting order
    ConsumedWithCarry { remainder: u64 },
}

/// One fill: `shares` traded and what remains on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub shares: u64,
    pub outcome: FillOutcome,
}

impl Fill {
    /// Split shares between a resting and an incoming order.
    ///
    /// # Panics
    ///
    /// Panics if either side has no shares; live orders are always positive.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::engine::{Fill, FillOutcome};
    ///
    /// let fill = Fill::between(50, 30);
    /// assert_eq!(fill.shares, 30);
    /// assert_eq!(fill.outcome, FillOutcome::Filled { remaining: 20 });
    /// ```
    pub fn between(resting: u64, incoming: u64) -> Self {
        assert!(resting > 0 && incoming > 0, "fill against an empty order");

        let shares = resting.min(incoming);
        let outcome = if resting > incoming {
            FillOutcome::Filled {
                remaining: resting - shares,
            }
        } else if resting == incoming {
            FillOutcome::Consumed
        } else {
            FillOutcome::ConsumedWithCarry {
                remainder: incoming - shares,
            }
        };

        Self { shares, outcome }
    }
}

/// Whether `incoming` can trade against `resting` at the resting price.
///
/// A buy crosses a sell priced at or below it; a sell crosses a buy priced
/// at or above it.
#[inline]
pub fn crosses(incoming: &Order, resting: &Order) -> bool {
    match incoming.side() {
        Side::Buy => incoming.price() >= resting.price(),
        Side::Sell => incoming.price() <= resting.price(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
