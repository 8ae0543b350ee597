pub mod alpaca;

pub use alpaca::AlpacaClient;

use async_trait::async_trait;

use crate::error::{BrokerError, ServiceError};
use crate::models::{Order, OrderRequest, PriceBar, TimeFrame};

/// Source of historical price bars
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Gets the most recent `limit` bars for `symbol`, oldest first
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<PriceBar>, ServiceError>;
}

/// Order submission to a brokerage
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits an order and returns the brokerage's record of it
    async fn submit_order(&self, request: &OrderRequest) -> Result<Order, BrokerError>;
}
