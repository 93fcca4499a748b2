//! Dashboard aggregates.

use rust_decimal::Decimal;

use crate::model::Holding;
use crate::model::Order;
use crate::model::OrderStatus;
use crate::model::PortfolioStat;

/// Totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub cost_basis: Decimal,
    pub gain_loss: Decimal,
    /// Gain as a percentage of cost basis, two decimal places.
    pub gain_loss_percent: Decimal,
    pub asset_count: usize,
    /// Holdings currently showing a gain.
    pub gaining_assets: usize,
    pub pending_orders: usize,
    pub filled_orders: usize,
}

impl PortfolioSummary {
    pub fn compute(holdings: &[Holding], orders: &[Order]) -> Self {
        let total_value: Decimal = holdings.iter().map(Holding::total_value).sum();
        let cost_basis: Decimal = holdings.iter().map(Holding::cost_basis).sum();
        let gain_loss = total_value - cost_basis;
        let gain_loss_percent = if cost_basis.is_zero() {
            Decimal::ZERO
        } else {
            (gain_loss / cost_basis * Decimal::ONE_HUNDRED).round_dp(2)
        };

        Self {
            total_value,
            cost_basis,
            gain_loss,
            gain_loss_percent,
            asset_count: holdings.len(),
            gaining_assets: holdings.iter().filter(|h| h.is_positive()).count(),
            pending_orders: orders.iter().filter(|o| o.is_pending()).count(),
            filled_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Filled)
                .count(),
        }
    }

    /// The four dashboard cards.
    pub fn stats(&self) -> Vec<PortfolioStat> {
        let gaining = self.gain_loss >= Decimal::ZERO;
        vec![
            PortfolioStat::new(
                "Total Value",
                format_money(self.total_value),
                format_signed_percent(self.gain_loss_percent),
                gaining,
            ),
            PortfolioStat::new(
                "Total Gain",
                format_signed_money(self.gain_loss),
                format_signed_percent(self.gain_loss_percent),
                gaining,
            ),
            PortfolioStat::new(
                "Total Assets",
                self.asset_count.to_string(),
                format!("{} gaining", self.gaining_assets),
                self.gaining_assets * 2 >= self.asset_count,
            ),
            PortfolioStat::new(
                "Pending Orders",
                self.pending_orders.to_string(),
                format!("{} filled", self.filled_orders),
                self.pending_orders == 0,
            ),
        ]
    }
}

/// Formats an amount as dollars with thousands separators, e.g. `$90,572.00`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let magnitude = format!("{:.2}", rounded.abs());
    let (int, frac) = magnitude.split_once('.').unwrap_or((&magnitude, "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac)
}

/// Like [`format_money`] but always carries a sign: `+$252.50`, `-$142.50`.
pub fn format_signed_money(amount: Decimal) -> String {
    if amount.round_dp(2) < Decimal::ZERO {
        format_money(amount)
    } else {
        format!("+{}", format_money(amount))
    }
}

/// Signed percentage, e.g. `+3.48%`.
pub fn format_signed_percent(percent: Decimal) -> String {
    let rounded = percent.round_dp(2);
    if rounded < Decimal::ZERO {
        format!("{:.2}%", rounded)
    } else {
        format!("+{:.2}%", rounded)
    }
}
