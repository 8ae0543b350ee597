// Trading strategy module
pub mod rsi_macd;

pub use rsi_macd::{RsiMacdStrategy, StrategyConfig};

use crate::indicators::IndicatorConfig;
use crate::models::{IndicatorRow, Signal};

/// Base trait for all trading strategies
pub trait Strategy: Send + Sync {
    /// Generate a trading signal from the indicator rows, oldest first
    fn generate_signal(&self, rows: &[IndicatorRow]) -> Signal;

    /// Get strategy name
    fn name(&self) -> &str;

    /// Indicator windows this strategy reads
    fn indicator_config(&self) -> &IndicatorConfig;

    /// Minimum bars required for this strategy
    fn min_bars_required(&self) -> usize {
        self.indicator_config().min_bars_required()
    }
}
