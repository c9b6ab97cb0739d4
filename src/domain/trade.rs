//! Orders and trades.
//!
//! A trade is an entry order plus an optional exit order in the opposite
//! direction. Trades move from new (no orders) to opened (entry only) to
//! closed (entry and exit) and never back.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Buy,
    Sell,
}

impl OrderDirection {
    pub fn opposite(self) -> Self {
        match self {
            OrderDirection::Buy => OrderDirection::Sell,
            OrderDirection::Sell => OrderDirection::Buy,
        }
    }

    /// Accepts `buy`/`long` and `sell`/`short`, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "buy" | "long" => Some(OrderDirection::Buy),
            "sell" | "short" => Some(OrderDirection::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Buy => write!(f, "BUY"),
            OrderDirection::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub direction: OrderDirection,
    pub index: usize,
    pub price: f64,
    pub amount: f64,
}

impl Order {
    pub fn value(&self) -> f64 {
        self.price * self.amount
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} index={} price={} amount={}",
            self.direction.to_string(),
            self.index,
            self.price,
            self.amount
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry: Order,
    pub exit: Option<Order>,
}

impl Trade {
    pub fn opened(entry: Order) -> Self {
        Trade { entry, exit: None }
    }

    pub fn is_closed(&self) -> bool {
        self.exit.is_some()
    }

    pub fn is_long(&self) -> bool {
        self.entry.direction == OrderDirection::Buy
    }

    /// Bars spent in the trade, entry and exit bars included. None while open.
    pub fn bar_count(&self) -> Option<usize> {
        self.exit
            .map(|exit| exit.index.saturating_sub(self.entry.index) + 1)
    }
}
