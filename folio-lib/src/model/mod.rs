//! Portfolio records and their table columns.

mod holding;
mod order;
mod stat;

pub use holding::Holding;
pub use order::Order;
pub use order::OrderSide;
pub use order::OrderStatus;
pub use stat::PortfolioStat;
