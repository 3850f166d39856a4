//! Single-instrument exchange: one buy book, one sell book, one matching loop.
//!
//! ## Processing
//!
//! Each call to [`Exchange::process_order`] runs to completion before the
//! next order is accepted:
//!
//! - **Cancel**: the targeted book is searched by reference. A request for at
//!   least the resting shares removes the order; a smaller request trims it
//!   in place. A missing reference is silently ignored.
//! - **New order**: repeatedly fill against the best opposite order while the
//!   prices cross, always at the resting order's price. Whatever is left
//!   rests on the order's own book.

use std::fmt;

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::engine::fill::{crosses, Fill, FillOutcome};
use crate::error::{Error, RecordError};
use crate::orderbook::{LinkedBook, OrderBook};
use crate::record::OrderRecord;
use crate::types::{ActionKind, ActionReport, Order, OrderKind, Side};

/// Default pre-allocated slots per book
pub const DEFAULT_BOOK_CAPACITY: usize = 1024;

/// Matching engine for one instrument.
///
/// Generic over the book storage; defaults to [`LinkedBook`].
///
/// ## Example
///
/// ```
/// use matchbook::engine::Exchange;
/// use matchbook::types::{ActionKind, Order, OrderKind};
///
/// let mut exchange = Exchange::new("UOCCS");
/// exchange.process_order(Order::new(1, OrderKind::Sell, 500, 50, 0));
///
/// let report = exchange.process_order(Order::new(2, OrderKind::Buy, 510, 30, 1));
/// let execute = &report.actions()[0];
///
/// assert_eq!(execute.kind(), ActionKind::Execute);
/// assert_eq!((execute.oref(), execute.price(), execute.shares()), (1, 500, 30));
/// ```
#[derive(Debug, Clone)]
pub struct Exchange<B: OrderBook = LinkedBook> {
    ticker: String,
    buy: B,
    sell: B,
}

impl Exchange {
    /// Create an exchange backed by [`LinkedBook`]s
    pub fn new(ticker: impl Into<String>) -> Self {
        Self::with_capacity(ticker, DEFAULT_BOOK_CAPACITY)
    }

    /// Create an exchange backed by [`LinkedBook`]s pre-sized for
    /// `capacity` orders per side
    pub fn with_capacity(ticker: impl Into<String>, capacity: usize) -> Self {
        Self::with_storage(ticker, capacity)
    }
}

impl<B: OrderBook> Exchange<B> {
    /// Create an exchange with any book storage.
    ///
    /// ```
    /// use matchbook::engine::Exchange;
    /// use matchbook::orderbook::HeapBook;
    ///
    /// let exchange = Exchange::<HeapBook>::with_storage("UOCCS", 64);
    /// assert!(exchange.is_empty());
    /// ```
    pub fn with_storage(ticker: impl Into<String>, capacity: usize) -> Self {
        let ticker = ticker.into();
        debug!("Exchange {}: created", ticker);
        Self {
            ticker,
            buy: B::with_capacity(Side::Buy, capacity),
            sell: B::with_capacity(Side::Sell, capacity),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn buy_book(&self) -> &B {
        &self.buy
    }

    pub fn sell_book(&self) -> &B {
        &self.sell
    }

    /// Best resting order on `side`. Diagnostics only.
    pub fn best_order(&self, side: Side) -> Option<&Order> {
        self.book(side).best()
    }

    /// Total resting orders across both books
    pub fn order_count(&self) -> usize {
        self.buy.len() + self.sell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }

    fn book(&self, side: Side) -> &B {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    fn book_mut(&mut self, side: Side) -> &mut B {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    /// Process one order and report every action it caused.
    pub fn process_order(&mut self, order: Order) -> ActionReport {
        let mut report = ActionReport::new(self.ticker.as_str());

        match order.kind() {
            OrderKind::CancelBuy | OrderKind::CancelSell => self.cancel(order, &mut report),
            OrderKind::Buy | OrderKind::Sell => self.match_incoming(order, &mut report),
        }

        debug!(
            "Exchange {}: order processed with {} action(s)",
            self.ticker,
            report.len()
        );
        report
    }

    /// Parse a textual record submitted at `time` and process it.
    ///
    /// Records for another ticker are rejected without touching the books.
    pub fn process_record(&mut self, line: &str, time: u64) -> Result<ActionReport, Error> {
        let record = OrderRecord::parse(line, time)?;
        if record.ticker != self.ticker {
            return Err(RecordError::TickerMismatch {
                expected: self.ticker.clone(),
                found: record.ticker,
            }
            .into());
        }
        Ok(self.process_order(record.order))
    }

    fn cancel(&mut self, cancel: Order, report: &mut ActionReport) {
        let side = cancel.side();
        let kind = match side {
            Side::Buy => ActionKind::CancelBuy,
            Side::Sell => ActionKind::CancelSell,
        };
        let book = self.book_mut(side);

        let Some(resting) = book.find_mut(cancel.oref()) else {
            trace!("{} book: cancel for unknown ref {}", side, cancel.oref());
            return;
        };

        if cancel.shares() < resting.shares() {
            resting.reduce(cancel.shares());
            trace!("{} book: trimmed ref {} to {} shares", side, cancel.oref(), resting.shares());
            report.record(kind, cancel.oref(), cancel.price(), cancel.shares());
        } else if let Some(removed) = book.remove_by_reference(cancel.oref()) {
            // Reported shares are capped at what was resting
            report.record(kind, removed.oref(), removed.price(), removed.shares());
        }
    }

    fn match_incoming(&mut self, mut incoming: Order, report: &mut ActionReport) {
        let (own, opposite) = match incoming.side() {
            Side::Buy => (&mut self.buy, &mut self.sell),
            Side::Sell => (&mut self.sell, &mut self.buy),
        };

        loop {
            let Some(resting) = opposite.best_mut() else {
                break;
            };
            if !crosses(&incoming, resting) {
                break;
            }

            let fill = Fill::between(resting.shares(), incoming.shares());
            trace!(
                "Exchange {}: ref {} fills {} shares against ref {} @ {}",
                self.ticker,
                incoming.oref(),
                fill.shares,
                resting.oref(),
                resting.price()
            );
            report.record(ActionKind::Execute, resting.oref(), resting.price(), fill.shares);

            match fill.outcome {
                FillOutcome::Filled { .. } => {
                    resting.reduce(fill.shares);
                    return;
                }
                FillOutcome::Consumed => {
                    opposite.remove_best();
                    return;
                }
                FillOutcome::ConsumedWithCarry { .. } => {
                    opposite.remove_best();
                    incoming.reduce(fill.shares);
                }
            }
        }

        let kind = match incoming.side() {
            Side::Buy => ActionKind::BookedBuy,
            Side::Sell => ActionKind::BookedSell,
        };
        report.record(kind, incoming.oref(), incoming.price(), incoming.shares());
        own.insert(incoming);
    }

    /// SHA-256 over the SSZ encoding of every resting order: the buy book
    /// then the sell book, each in priority order.
    pub fn compute_state_root(&self) -> Result<[u8; 32], Error> {
        let mut hasher = Sha256::new();
        for order in self.buy.snapshot().iter().chain(self.sell.snapshot().iter()) {
            hasher.update(ssz_rs::serialize(order)?);
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Ok(hash)
    }

    /// Drop every resting order on both books
    pub fn clear(&mut self) {
        self.buy.clear();
        self.sell.clear();
    }
}

impl<B: OrderBook> fmt::Display for Exchange<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exchange {}", self.ticker)?;
        for (label, book) in [("Buy book", &self.buy), ("Sell book", &self.sell)] {
            writeln!(f, "{}:", label)?;
            for order in book.snapshot() {
                writeln!(f, "  {}", order)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
