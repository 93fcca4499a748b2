//! Portfolio holdings.

use folio_table::CellValue;
use folio_table::Column;
use folio_table::Columns;
use folio_table::TableError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// A position held in one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    /// Company name.
    pub name: String,
    pub shares: u32,
    /// Average purchase price per share.
    pub avg_price: Decimal,
    /// Last traded price per share.
    pub current_price: Decimal,
}

impl Holding {
    /// Market value at the current price.
    pub fn total_value(&self) -> Decimal {
        Decimal::from(self.shares) * self.current_price
    }

    /// Amount paid for the position.
    pub fn cost_basis(&self) -> Decimal {
        Decimal::from(self.shares) * self.avg_price
    }

    /// Unrealised gain (negative for a loss).
    pub fn gain_loss(&self) -> Decimal {
        self.total_value() - self.cost_basis()
    }

    /// Unrealised gain as a percentage of cost basis, rounded to two places.
    ///
    /// Zero when the cost basis is zero.
    pub fn gain_loss_percent(&self) -> Decimal {
        let cost = self.cost_basis();
        if cost.is_zero() {
            return Decimal::ZERO;
        }
        (self.gain_loss() / cost * Decimal::ONE_HUNDRED).round_dp(2)
    }

    pub fn is_positive(&self) -> bool {
        self.gain_loss() >= Decimal::ZERO
    }

    /// Columns of the holdings table.
    pub fn columns() -> Result<Columns<Holding>, TableError> {
        Columns::new(vec![
            Column::new("symbol", "Symbol", |h: &Holding| {
                CellValue::from(h.symbol.as_str())
            }),
            Column::new("name", "Name", |h: &Holding| CellValue::from(h.name.as_str()))
                .sortable(false),
            Column::new("shares", "Shares", |h: &Holding| CellValue::from(h.shares)),
            Column::new("avg_price", "Avg. Price", |h: &Holding| {
                CellValue::from(h.avg_price)
            }),
            Column::new("current_price", "Price", |h: &Holding| {
                CellValue::from(h.current_price)
            }),
            Column::new("total_value", "Value", |h: &Holding| {
                CellValue::from(h.total_value())
            }),
            Column::new("gain_loss", "Gain/Loss", |h: &Holding| {
                CellValue::from(h.gain_loss())
            }),
            Column::new("gain_loss_percent", "Change %", |h: &Holding| {
                CellValue::from(h.gain_loss_percent())
            }),
        ])
    }
}
