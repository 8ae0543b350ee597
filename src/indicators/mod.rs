// Technical indicators module
// Implements RSI, EMA and MACD over closing prices

pub mod macd;
pub mod moving_average;
pub mod rsi;

pub use macd::{calculate_macd, calculate_macd_series, MacdSeries};
pub use moving_average::{calculate_ema_series, calculate_exponential_mean};
pub use rsi::{calculate_rsi, calculate_rsi_series};

use crate::models::{IndicatorRow, PriceBar};

/// Indicator window configuration
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl IndicatorConfig {
    /// Bars needed before both RSI and MACD are defined on the last row
    pub fn min_bars_required(&self) -> usize {
        self.rsi_period.max(self.macd_slow)
    }
}

/// Compute RSI and MACD for every bar
///
/// Output has the same length and order as `bars`.
pub fn calculate_indicators(bars: &[PriceBar], config: &IndicatorConfig) -> Vec<IndicatorRow> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let rsi = calculate_rsi_series(&closes, config.rsi_period);
    let macd = calculate_macd_series(
        &closes,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
    );

    bars.iter()
        .zip(rsi)
        .zip(macd.macd)
        .map(|((bar, rsi), macd)| IndicatorRow {
            time: bar.time,
            close: bar.close,
            rsi,
            macd,
        })
        .collect()
}
