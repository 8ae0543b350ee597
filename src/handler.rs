use std::sync::Arc;

use serde_json::Value;

use crate::api::{AlpacaClient, MarketDataSource, OrderGateway};
use crate::config::Settings;
use crate::error::InvocationError;
use crate::execution::{PriceFeed, TradeExecutor};
use crate::indicators::calculate_indicators;
use crate::models::InvocationResponse;
use crate::strategy::{RsiMacdStrategy, Strategy};

/// One-shot trading pipeline: fetch bars, compute indicators, decide, trade
pub struct Trader {
    feed: PriceFeed,
    strategy: Box<dyn Strategy>,
    executor: TradeExecutor,
}

impl Trader {
    pub fn new(feed: PriceFeed, strategy: Box<dyn Strategy>, executor: TradeExecutor) -> Self {
        Self {
            feed,
            strategy,
            executor,
        }
    }

    /// Wire the pipeline to explicit data and order clients
    pub fn with_clients(
        settings: &Settings,
        market_data: Arc<dyn MarketDataSource>,
        orders: Arc<dyn OrderGateway>,
    ) -> Self {
        let feed = PriceFeed::new(
            market_data,
            settings.symbol.clone(),
            settings.timeframe,
            settings.lookback as usize,
        );
        let executor = TradeExecutor::new(orders, settings.symbol.clone(), settings.quantity);

        Self::new(feed, Box::new(RsiMacdStrategy::default()), executor)
    }

    /// Wire the pipeline to Alpaca
    pub fn from_settings(settings: &Settings) -> Self {
        let client = Arc::new(AlpacaClient::from_settings(settings));
        Self::with_clients(settings, client.clone(), client)
    }

    /// Run one invocation
    ///
    /// The event carries no required fields. Any failure aborts the whole
    /// invocation; there is no partial result and no fallback action.
    pub async fn handle(&self, event: &Value) -> Result<InvocationResponse, InvocationError> {
        tracing::debug!(%event, "Invocation received");

        let bars = self.feed.fetch_bars(self.strategy.min_bars_required()).await?;
        let rows = calculate_indicators(&bars, self.strategy.indicator_config());

        let action = self.strategy.generate_signal(&rows);
        if let Some(latest) = rows.last() {
            tracing::info!(
                symbol = self.feed.symbol(),
                strategy = self.strategy.name(),
                rsi = ?latest.rsi,
                macd = ?latest.macd,
                action = %action,
                "Signal generated"
            );
        }

        let result = self.executor.place_trade(action).await?;

        Ok(InvocationResponse { action, result })
    }
}
