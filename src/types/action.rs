//! Actions and the per-order action report.
//!
//! Processing one incoming order yields an [`ActionReport`]: an ordered,
//! append-only list of bookings, executions and cancellations. The report
//! owns its serialization; the engine only calls [`ActionReport::record`].

use std::fmt;
use std::io::{self, Write};

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::error::Error;

// ============================================================================
// ActionKind enum
// ============================================================================

/// Kind of action taken while processing an order.
///
/// Represented as u8 for SSZ compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionKind {
    /// Remaining buy shares were booked into the buy book
    #[default]
    BookedBuy,
    /// Remaining sell shares were booked into the sell book
    BookedSell,
    /// Shares traded against a resting order
    Execute,
    /// Shares of a resting buy order were cancelled
    CancelBuy,
    /// Shares of a resting sell order were cancelled
    CancelSell,
}

impl ActionKind {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            ActionKind::BookedBuy => 0,
            ActionKind::BookedSell => 1,
            ActionKind::Execute => 2,
            ActionKind::CancelBuy => 3,
            ActionKind::CancelSell => 4,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ActionKind::BookedBuy),
            1 => Some(ActionKind::BookedSell),
            2 => Some(ActionKind::Execute),
            3 => Some(ActionKind::CancelBuy),
            4 => Some(ActionKind::CancelSell),
            _ => None,
        }
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::BookedBuy => "BOOKED_BUY",
            ActionKind::BookedSell => "BOOKED_SELL",
            ActionKind::Execute => "EXECUTE",
            ActionKind::CancelBuy => "CANCEL_BUY",
            ActionKind::CancelSell => "CANCEL_SELL",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Action struct
// ============================================================================

/// A single action. Never mutated after creation.
///
/// ## SSZ Layout
///
/// Fixed-size container: 1 + 8 + 8 + 8 = 25 bytes
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Action {
    /// Action kind as u8 (see [`ActionKind::to_u8`])
    kind_raw: u8,

    /// Reference id the action reports on
    oref: u64,

    /// Price reported with the action
    price: u64,

    /// Shares affected
    shares: u64,
}

impl Action {
    pub fn new(kind: ActionKind, oref: u64, price: u64, shares: u64) -> Self {
        Self {
            kind_raw: kind.to_u8(),
            oref,
            price,
            shares,
        }
    }

    #[inline]
    pub fn kind(&self) -> ActionKind {
        ActionKind::from_u8(self.kind_raw).expect("invalid action kind")
    }

    #[inline]
    pub fn oref(&self) -> u64 {
        self.oref
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    pub fn shares(&self) -> u64 {
        self.shares
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.kind(),
            self.oref,
            self.price,
            self.shares
        )
    }
}

// ============================================================================
// ActionReport
// ============================================================================

/// Ordered log of the actions produced while processing one order.
///
/// ## Example
///
/// ```
/// use matchbook::types::{ActionKind, ActionReport};
///
/// let mut report = ActionReport::new("UOCCS");
/// report.record(ActionKind::Execute, 1000, 550_000, 100);
///
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.to_string(), "UOCCS,EXECUTE,1000,550000,100\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionReport {
    ticker: String,
    actions: Vec<Action>,
}

impl ActionReport {
    /// Create an empty report for `ticker`
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            actions: Vec::new(),
        }
    }

    /// Append one action
    pub fn record(&mut self, kind: ActionKind, oref: u64, price: u64, shares: u64) {
        self.actions.push(Action::new(kind, oref, price, shares));
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Total shares executed in this report
    pub fn executed_shares(&self) -> u64 {
        self.actions
            .iter()
            .filter(|a| a.kind() == ActionKind::Execute)
            .map(Action::shares)
            .sum()
    }

    /// Write one CSV line per action, prefixed with the processing time:
    /// `<time>,<ticker>,<KIND>,<reference>,<price>,<shares>`
    pub fn write_csv<W: Write>(&self, out: &mut W, time: u64) -> io::Result<()> {
        for action in &self.actions {
            writeln!(out, "{},{},{}", time, self.ticker, action)?;
        }
        Ok(())
    }

    /// SHA-256 over the SSZ encoding of every action, in order
    pub fn digest(&self) -> Result<[u8; 32], Error> {
        let mut hasher = Sha256::new();
        for action in &self.actions {
            hasher.update(ssz_rs::serialize(action)?);
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Ok(hash)
    }
}

impl<'a> IntoIterator for &'a ActionReport {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{},{}", self.ticker, action)?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_new() {
        let action = Action::new(ActionKind::CancelSell, 1010, 550_000, 5);

        assert_eq!(action.kind(), ActionKind::CancelSell);
        assert_eq!(action.oref(), 1010);
        assert_eq!(action.price(), 550_000);
        assert_eq!(action.shares(), 5);
    }

    #[test]
    fn test_action_kind_conversion() {
        for raw in 0..5u8 {
            let kind = ActionKind::from_u8(raw).expect("valid kind");
            assert_eq!(kind.to_u8(), raw);
        }
        assert_eq!(ActionKind::from_u8(5), None);
    }

    #[test]
    fn test_action_ssz_size() {
        let action = Action::new(ActionKind::Execute, 1, 500, 30);
        let bytes = ssz_rs::serialize(&action).expect("Failed to serialize");

        assert_eq!(bytes.len(), 25, "Action should serialize to 25 bytes");
    }

    #[test]
    #[should_panic(expected = "invalid action kind")]
    fn test_corrupt_kind_panics() {
        let action = Action {
            kind_raw: 5,
            ..Action::default()
        };
        action.kind();
    }

    #[test]
    fn test_report_keeps_order() {
        let mut report = ActionReport::new("UOCCS");
        report.record(ActionKind::Execute, 1, 500, 10);
        report.record(ActionKind::BookedSell, 2, 500, 5);

        let kinds: Vec<_> = report.iter().map(Action::kind).collect();
        assert_eq!(kinds, vec![ActionKind::Execute, ActionKind::BookedSell]);
        assert_eq!(report.executed_shares(), 10);
    }

    #[test]
    fn test_report_write_csv() {
        let mut report = ActionReport::new("UOCCS");
        report.record(ActionKind::Execute, 1000, 550_000, 100);
        report.record(ActionKind::BookedBuy, 1070, 558_000, 70);

        let mut out = Vec::new();
        report.write_csv(&mut out, 3).expect("write to vec");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "3,UOCCS,EXECUTE,1000,550000,100\n3,UOCCS,BOOKED_BUY,1070,558000,70\n"
        );
    }

    #[test]
    fn test_empty_report_writes_nothing() {
        let report = ActionReport::new("UOCCS");
        let mut out = Vec::new();
        report.write_csv(&mut out, 0).expect("write to vec");

        assert!(report.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_digest_determinism() {
        let mut a = ActionReport::new("UOCCS");
        a.record(ActionKind::Execute, 1, 500, 10);
        let mut b = a.clone();

        assert_eq!(a.digest().expect("digest"), b.digest().expect("digest"));

        b.record(ActionKind::BookedBuy, 2, 400, 1);
        assert_ne!(a.digest().expect("digest"), b.digest().expect("digest"));
    }
}
