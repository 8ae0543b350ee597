use std::sync::Arc;

use crate::api::MarketDataSource;
use crate::error::ServiceError;
use crate::models::{PriceBar, TimeFrame};

/// Fetches the recent bar history for one symbol
pub struct PriceFeed {
    source: Arc<dyn MarketDataSource>,
    symbol: String,
    timeframe: TimeFrame,
    lookback: usize,
}

impl PriceFeed {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        symbol: impl Into<String>,
        timeframe: TimeFrame,
        lookback: usize,
    ) -> Self {
        Self {
            source,
            symbol: symbol.into(),
            timeframe,
            lookback,
        }
    }

    /// Fetch the latest `lookback` bars, oldest first
    ///
    /// Fails when fewer than `min_required` bars come back, since the
    /// indicators would be undefined on the latest bar.
    pub async fn fetch_bars(&self, min_required: usize) -> Result<Vec<PriceBar>, ServiceError> {
        let bars = self
            .source
            .get_bars(&self.symbol, self.timeframe, self.lookback)
            .await?;

        if bars.len() < min_required {
            return Err(ServiceError::InsufficientHistory {
                required: min_required,
                received: bars.len(),
            });
        }

        if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
            tracing::info!(
                symbol = %self.symbol,
                bars = bars.len(),
                from = %first.time,
                to = %last.time,
                close = last.close,
                "Fetched price history"
            );
        }

        Ok(bars)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}
