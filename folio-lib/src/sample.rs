//! Demo data set for the dashboard screens.

use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::auth::StaticAuthenticator;
use crate::error::AuthError;
use crate::model::Holding;
use crate::model::Order;
use crate::model::OrderSide;
use crate::model::OrderStatus;

/// Username of the demo account.
pub const DEMO_USERNAME: &str = "demo";
/// Password of the demo account.
pub const DEMO_PASSWORD: &str = "folio";

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn order(
    id: &str,
    symbol: &str,
    side: OrderSide,
    shares: u32,
    price: Decimal,
    status: OrderStatus,
    placed_at: DateTime<Utc>,
) -> Order {
    Order {
        id: id.to_string(),
        symbol: symbol.to_string(),
        side,
        shares,
        price,
        status,
        placed_at,
    }
}

/// The five most recent orders.
pub fn orders() -> Vec<Order> {
    vec![
        order(
            "ORD-001",
            "AAPL",
            OrderSide::Buy,
            10,
            Decimal::new(15025, 2),
            OrderStatus::Filled,
            at(2024, 1, 15, 10, 30),
        ),
        order(
            "ORD-002",
            "GOOGL",
            OrderSide::Sell,
            5,
            Decimal::new(285000, 2),
            OrderStatus::Filled,
            at(2024, 1, 14, 14, 15),
        ),
        order(
            "ORD-003",
            "TSLA",
            OrderSide::Buy,
            15,
            Decimal::new(23580, 2),
            OrderStatus::Pending,
            at(2024, 1, 15, 9, 45),
        ),
        order(
            "ORD-004",
            "MSFT",
            OrderSide::Sell,
            20,
            Decimal::new(27575, 2),
            OrderStatus::Cancelled,
            at(2024, 1, 13, 11, 20),
        ),
        order(
            "ORD-005",
            "AMZN",
            OrderSide::Buy,
            8,
            Decimal::new(14560, 2),
            OrderStatus::Pending,
            at(2024, 1, 15, 8, 30),
        ),
    ]
}

/// The recent orders followed by `count` older, filled ones.
///
/// The older orders are generated deterministically, one per trading hour
/// going back from the first recent order.
pub fn order_history(count: usize) -> Vec<Order> {
    const SYMBOLS: [(&str, i64); 5] = [
        ("AAPL", 14800),
        ("GOOGL", 280000),
        ("MSFT", 27000),
        ("TSLA", 22000),
        ("AMZN", 14000),
    ];

    let mut all = orders();
    let start = at(2024, 1, 12, 16, 0);
    for i in 0..count {
        let (symbol, base) = SYMBOLS[i % SYMBOLS.len()];
        let step = (i % 7) as i64;
        let side = if i % 3 == 0 {
            OrderSide::Sell
        } else {
            OrderSide::Buy
        };
        all.push(order(
            &format!("ORD-{:03}", i + 6),
            symbol,
            side,
            (i % 9 + 1) as u32 * 5,
            Decimal::new(base + step * 125, 2),
            OrderStatus::Filled,
            start - Duration::hours(i as i64),
        ));
    }
    all
}

/// Current holdings.
pub fn holdings() -> Vec<Holding> {
    vec![
        holding("AAPL", "Apple Inc.", 50, 14520, 15025),
        holding("GOOGL", "Alphabet Inc.", 25, 275000, 285000),
        holding("MSFT", "Microsoft Corporation", 30, 28050, 27575),
        holding("TSLA", "Tesla, Inc.", 15, 22000, 23580),
    ]
}

fn holding(symbol: &str, name: &str, shares: u32, avg_cents: i64, current_cents: i64) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: name.to_string(),
        shares,
        avg_price: Decimal::new(avg_cents, 2),
        current_price: Decimal::new(current_cents, 2),
    }
}

/// An authenticator with the demo account registered.
pub fn demo_authenticator() -> Result<StaticAuthenticator, AuthError> {
    let authenticator = StaticAuthenticator::new();
    authenticator.register(
        DEMO_USERNAME,
        "Demo Investor",
        "demo@example.com",
        DEMO_PASSWORD,
    )?;
    Ok(authenticator)
}
