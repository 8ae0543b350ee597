// Market data collection and order execution module
pub mod executor;
pub mod price_feed;

pub use executor::{TradeExecutor, NO_TRADE_STATUS};
pub use price_feed::PriceFeed;
