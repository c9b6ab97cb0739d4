//! OHLCV bar representation.

use chrono::NaiveDateTime;

/// One price record for a fixed interval, stamped with the end of the period.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar with open = high = low = close.
    pub fn flat(timestamp: NaiveDateTime, price: f64, volume: i64) -> Self {
        Bar::new(timestamp, price, price, price, price, volume)
    }
}
