//! Trade record built by the simulation runner.
//!
//! Orders alternate between the starting direction (entry) and its opposite
//! (exit). Every exit closes the current trade and moves it to the list of
//! closed trades.

use std::fmt;

use super::trade::{Order, OrderDirection, Trade};

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    starting_direction: OrderDirection,
    orders: Vec<Order>,
    trades: Vec<Trade>,
    current: Option<Trade>,
}

impl TradeRecord {
    pub fn new(starting_direction: OrderDirection) -> Self {
        TradeRecord {
            starting_direction,
            orders: Vec::new(),
            trades: Vec::new(),
            current: None,
        }
    }

    pub fn starting_direction(&self) -> OrderDirection {
        self.starting_direction
    }

    /// Execute the next order: an entry when flat, otherwise the exit of the
    /// current trade.
    pub fn operate(&mut self, index: usize, price: f64, amount: f64) -> Order {
        match self.current.take() {
            None => {
                let entry = Order {
                    direction: self.starting_direction,
                    index,
                    price,
                    amount,
                };
                self.orders.push(entry);
                self.current = Some(Trade::opened(entry));
                entry
            }
            Some(mut trade) => {
                let exit = Order {
                    direction: self.starting_direction.opposite(),
                    index,
                    price,
                    amount,
                };
                self.orders.push(exit);
                trade.exit = Some(exit);
                self.trades.push(trade);
                exit
            }
        }
    }

    /// No trade is open.
    pub fn is_closed(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_trade(&self) -> Option<&Trade> {
        self.current.as_ref()
    }

    /// Closed trades, in execution order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn last_order(&self) -> Option<&Order> {
        self.orders.last()
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trade record (starts with {}): {} orders, {} closed trades",
            self.starting_direction,
            self.orders.len(),
            self.trades.len()
        )?;
        for (i, trade) in self.trades.iter().enumerate() {
            write!(f, "  #{} {}", i + 1, trade.entry)?;
            if let Some(exit) = &trade.exit {
                write!(f, " -> {}", exit)?;
            }
            writeln!(f)?;
        }
        if let Some(open) = &self.current {
            writeln!(f, "  open {}", open.entry)?;
        }
        Ok(())
    }
}
