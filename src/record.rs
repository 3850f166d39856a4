//! Textual order records.
//!
//! ## Format
//!
//! One order per line, seven comma-separated fields:
//!
//! ```text
//! I,<ticker>,<A|C>,<B|S>,<shares>,<price>,<reference>
//! ```
//!
//! - `A` adds a new order, `C` cancels shares of a resting one
//! - `B`/`S` selects the buy or sell side
//! - shares must be positive; price is in the smallest currency fraction
//!
//! The submission time is not part of the record; the caller supplies it.
//!
//! ## Example
//!
//! ```
//! use matchbook::record::OrderRecord;
//! use matchbook::types::OrderKind;
//!
//! let record = OrderRecord::parse("I,UOCCS,A,S,100,550000,1000", 0).unwrap();
//! assert_eq!(record.ticker, "UOCCS");
//! assert_eq!(record.order.kind(), OrderKind::Sell);
//! assert_eq!(record.order.oref(), 1000);
//! ```

use std::str::FromStr;

use crate::error::RecordError;
use crate::types::{Order, OrderKind};

/// Message marker for order records
pub const ORDER_MARKER: &str = "I";

const FIELD_COUNT: usize = 7;

/// A parsed record: the instrument it addresses and the order it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub ticker: String,
    pub order: Order,
}

impl OrderRecord {
    /// Parse one record line submitted at `time`
    pub fn parse(line: &str, time: u64) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        if fields[0] != ORDER_MARKER {
            return Err(RecordError::UnknownMarker(fields[0].to_string()));
        }

        let cancel = match fields[2] {
            "A" => false,
            "C" => true,
            other => return Err(RecordError::UnknownKind(other.to_string())),
        };
        let kind = match (fields[3], cancel) {
            ("B", false) => OrderKind::Buy,
            ("S", false) => OrderKind::Sell,
            ("B", true) => OrderKind::CancelBuy,
            ("S", true) => OrderKind::CancelSell,
            (other, _) => return Err(RecordError::UnknownSide(other.to_string())),
        };

        let shares = parse_number("shares", fields[4])?;
        if shares == 0 {
            return Err(RecordError::ZeroShares);
        }
        let price = parse_number("price", fields[5])?;
        let oref = parse_number("reference", fields[6])?;

        Ok(Self {
            ticker: fields[1].to_string(),
            order: Order::new(oref, kind, price, shares, time),
        })
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<u64, RecordError> {
    u64::from_str(value).map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
