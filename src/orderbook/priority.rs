//! Price/time priority.
//!
//! A buy order with a higher price precedes; a sell order with a lower price
//! precedes; at equal prices the earlier submission time precedes.

use std::cmp::Ordering;

use crate::types::{Order, Side};

/// Returns `true` if `a` ranks strictly ahead of `b` on their book.
///
/// # Panics
///
/// Panics if the two orders are not on the same side. Ranking a buy against
/// a sell has no meaning; reaching this is a bug in the caller.
///
/// # Example
///
/// ```
/// use matchbook::orderbook::precedes;
/// use matchbook::types::{Order, OrderKind};
///
/// let early = Order::new(1, OrderKind::Buy, 500, 10, 0);
/// let better = Order::new(2, OrderKind::Buy, 510, 10, 1);
///
/// assert!(precedes(&better, &early));
/// assert!(!precedes(&early, &better));
/// ```
#[inline]
pub fn precedes(a: &Order, b: &Order) -> bool {
    priority(a, b) == Ordering::Less
}

/// Total priority order between two same-side orders; `Less` ranks first.
pub fn priority(a: &Order, b: &Order) -> Ordering {
    assert_eq!(
        a.side(),
        b.side(),
        "priority compared across sides (refs {} and {})",
        a.oref(),
        b.oref()
    );

    let by_price = match a.side() {
        Side::Buy => b.price().cmp(&a.price()),
        Side::Sell => a.price().cmp(&b.price()),
    };
    by_price.then_with(|| a.time().cmp(&b.time()))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderKind;

    fn buy(oref: u64, price: u64, time: u64) -> Order {
        Order::new(oref, OrderKind::Buy, price, 10, time)
    }

    fn sell(oref: u64, price: u64, time: u64) -> Order {
        Order::new(oref, OrderKind::Sell, price, 10, time)
    }

    #[test]
    fn test_buy_higher_price_first() {
        assert!(precedes(&buy(1, 510, 5), &buy(2, 500, 0)));
        assert!(!precedes(&buy(2, 500, 0), &buy(1, 510, 5)));
    }

    #[test]
    fn test_sell_lower_price_first() {
        assert!(precedes(&sell(1, 490, 5), &sell(2, 500, 0)));
        assert!(!precedes(&sell(2, 500, 0), &sell(1, 490, 5)));
    }

    #[test]
    fn test_equal_price_earlier_time_first() {
        assert!(precedes(&buy(1, 500, 1), &buy(2, 500, 2)));
        assert!(precedes(&sell(1, 500, 1), &sell(2, 500, 2)));
        assert!(!precedes(&sell(2, 500, 2), &sell(1, 500, 1)));
    }

    #[test]
    fn test_identical_keys_do_not_precede() {
        assert!(!precedes(&buy(1, 500, 1), &buy(2, 500, 1)));
        assert_eq!(priority(&buy(1, 500, 1), &buy(2, 500, 1)), Ordering::Equal);
    }

    #[test]
    fn test_cancel_kind_ranks_on_its_side() {
        let cancel = Order::new(3, OrderKind::CancelBuy, 520, 1, 9);
        assert!(precedes(&cancel, &buy(1, 500, 0)));
    }

    #[test]
    #[should_panic(expected = "across sides")]
    fn test_cross_side_comparison_panics() {
        precedes(&buy(1, 500, 0), &sell(2, 500, 0));
    }
}
