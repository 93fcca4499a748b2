//! Order records.

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use folio_table::CellValue;
use folio_table::Column;
use folio_table::Columns;
use folio_table::TableError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// Whether an order buys or sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => f.write_str("BUY"),
            OrderSide::Sell => f.write_str("SELL"),
        }
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Filled,
    Pending,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Filled => f.write_str("Filled"),
            OrderStatus::Pending => f.write_str("Pending"),
            OrderStatus::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// A buy or sell order placed against one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order reference, e.g. `ORD-001`.
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub shares: u32,
    /// Limit price per share.
    pub price: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Order value, `shares * price`.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.shares) * self.price
    }

    /// Returns `true` while the order can still fill.
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Columns of the orders table.
    pub fn columns() -> Result<Columns<Order>, TableError> {
        Columns::new(vec![
            Column::new("id", "Order ID", |o: &Order| CellValue::from(o.id.as_str())),
            Column::new("symbol", "Symbol", |o: &Order| {
                CellValue::from(o.symbol.as_str())
            }),
            Column::new("side", "Type", |o: &Order| CellValue::from(o.side.to_string())),
            Column::new("shares", "Shares", |o: &Order| CellValue::from(o.shares)),
            Column::new("price", "Price", |o: &Order| CellValue::from(o.price)),
            Column::new("total", "Total", |o: &Order| CellValue::from(o.total())),
            Column::new("status", "Status", |o: &Order| {
                CellValue::from(o.status.to_string())
            }),
            Column::new("placed_at", "Date", |o: &Order| CellValue::from(o.placed_at)),
        ])
    }
}
