//! Dashboard aggregates over the demo data.

use folio_lib::portfolio::PortfolioSummary;
use folio_lib::sample;
use rust_decimal::Decimal;

#[test]
fn test_summary_of_sample_portfolio() {
    let summary = PortfolioSummary::compute(&sample::holdings(), &sample::orders());

    assert_eq!(summary.total_value, Decimal::new(9057200, 2));
    assert_eq!(summary.cost_basis, Decimal::new(8772500, 2));
    assert_eq!(summary.gain_loss, Decimal::new(284700, 2));
    assert_eq!(summary.gain_loss_percent, Decimal::new(325, 2));
    assert_eq!(summary.asset_count, 4);
    assert_eq!(summary.gaining_assets, 3);
    assert_eq!(summary.pending_orders, 2);
    assert_eq!(summary.filled_orders, 2);
}

#[test]
fn test_dashboard_cards() {
    let stats = PortfolioSummary::compute(&sample::holdings(), &sample::orders()).stats();
    let labels: Vec<&str> = stats.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Total Value", "Total Gain", "Total Assets", "Pending Orders"]
    );

    assert_eq!(stats[0].value, "$90,572.00");
    assert_eq!(stats[0].change, "+3.25%");
    assert!(stats[0].positive);
    assert_eq!(stats[1].value, "+$2,847.00");
    assert_eq!(stats[3].value, "2");
    assert_eq!(stats[3].change, "2 filled");
    assert!(!stats[3].positive);
}

#[test]
fn test_empty_portfolio() {
    let summary = PortfolioSummary::compute(&[], &[]);
    assert_eq!(summary.gain_loss_percent, Decimal::ZERO);
    assert_eq!(summary.stats()[0].value, "$0.00");
}

#[test]
fn test_sample_holdings_match_reported_values() {
    let holdings = sample::holdings();
    let aapl = &holdings[0];
    assert_eq!(aapl.total_value(), Decimal::new(751250, 2));
    assert_eq!(aapl.gain_loss(), Decimal::new(25250, 2));
    assert_eq!(aapl.gain_loss_percent(), Decimal::new(348, 2));
    let tsla = &holdings[3];
    assert_eq!(tsla.gain_loss_percent(), Decimal::new(718, 2));
}
