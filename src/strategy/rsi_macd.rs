use super::Strategy;
use crate::indicators::IndicatorConfig;
use crate::models::{IndicatorRow, Signal};

/// Configuration for signal generation
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub indicators: IndicatorConfig,
    pub rsi_threshold: f64,
    pub macd_threshold: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            rsi_threshold: 50.0,
            macd_threshold: 0.0,
        }
    }
}

/// RSI/MACD threshold strategy
///
/// Looks at the most recent row only:
/// - RSI above the threshold and MACD above zero: Buy
/// - RSI below the threshold and MACD below zero: Sell
/// - anything else (ties, mixed signs, undefined values): Hold
#[derive(Debug, Clone, Default)]
pub struct RsiMacdStrategy {
    config: StrategyConfig,
}

impl RsiMacdStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Map a single (RSI, MACD) pair to a signal
    pub fn evaluate(&self, rsi: f64, macd: f64) -> Signal {
        let rsi_threshold = self.config.rsi_threshold;
        let macd_threshold = self.config.macd_threshold;

        // NaN fails every comparison and falls through to Hold
        if rsi > rsi_threshold && macd > macd_threshold {
            Signal::Buy
        } else if rsi < rsi_threshold && macd < macd_threshold {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl Strategy for RsiMacdStrategy {
    fn generate_signal(&self, rows: &[IndicatorRow]) -> Signal {
        let Some(latest) = rows.last() else {
            tracing::warn!("No indicator rows, holding");
            return Signal::Hold;
        };

        match (latest.rsi, latest.macd) {
            (Some(rsi), Some(macd)) => {
                let signal = self.evaluate(rsi, macd);
                tracing::debug!(
                    time = %latest.time,
                    close = latest.close,
                    rsi,
                    macd,
                    signal = %signal,
                    "Evaluated latest bar"
                );
                signal
            }
            (rsi, macd) => {
                tracing::warn!(
                    time = %latest.time,
                    ?rsi,
                    ?macd,
                    "Indicators undefined on latest bar, holding"
                );
                Signal::Hold
            }
        }
    }

    fn name(&self) -> &str {
        "RsiMacdStrategy"
    }

    fn indicator_config(&self) -> &IndicatorConfig {
        &self.config.indicators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(rsi: Option<f64>, macd: Option<f64>) -> IndicatorRow {
        IndicatorRow {
            time: Utc::now(),
            close: 0.6,
            rsi,
            macd,
        }
    }

    fn signal_for(rsi: f64, macd: f64) -> Signal {
        RsiMacdStrategy::default().generate_signal(&[row(Some(rsi), Some(macd))])
    }

    #[test]
    fn test_buy_when_both_bullish() {
        assert_eq!(signal_for(65.0, 1.2), Signal::Buy);
    }

    #[test]
    fn test_sell_when_both_bearish() {
        assert_eq!(signal_for(35.0, -0.8), Signal::Sell);
    }

    #[test]
    fn test_hold_at_rsi_boundary() {
        assert_eq!(signal_for(50.0, 3.0), Signal::Hold);
        assert_eq!(signal_for(50.0, -3.0), Signal::Hold);
        assert_eq!(signal_for(50.0, 0.0), Signal::Hold);
    }

    #[test]
    fn test_hold_on_mixed_signs() {
        assert_eq!(signal_for(60.0, -0.1), Signal::Hold);
        assert_eq!(signal_for(40.0, 0.1), Signal::Hold);
    }

    #[test]
    fn test_hold_when_macd_is_zero() {
        assert_eq!(signal_for(70.0, 0.0), Signal::Hold);
        assert_eq!(signal_for(30.0, 0.0), Signal::Hold);
    }

    #[test]
    fn test_hold_on_undefined_indicators() {
        let strategy = RsiMacdStrategy::default();

        assert_eq!(strategy.generate_signal(&[row(None, Some(1.0))]), Signal::Hold);
        assert_eq!(strategy.generate_signal(&[row(Some(70.0), None)]), Signal::Hold);
        assert_eq!(signal_for(f64::NAN, 1.0), Signal::Hold);
        assert_eq!(strategy.generate_signal(&[]), Signal::Hold);
    }

    #[test]
    fn test_only_latest_row_matters() {
        let strategy = RsiMacdStrategy::default();
        let rows = vec![
            row(Some(10.0), Some(-5.0)),
            row(Some(20.0), Some(-4.0)),
            row(Some(70.0), Some(2.0)),
        ];

        assert_eq!(strategy.generate_signal(&rows), Signal::Buy);
    }

    #[test]
    fn test_total_over_grid() {
        let strategy = RsiMacdStrategy::default();
        for rsi in [0.0, 25.0, 49.99, 50.0, 50.01, 75.0, 100.0] {
            for macd in [-10.0, -0.001, 0.0, 0.001, 10.0] {
                let expected = if rsi > 50.0 && macd > 0.0 {
                    Signal::Buy
                } else if rsi < 50.0 && macd < 0.0 {
                    Signal::Sell
                } else {
                    Signal::Hold
                };
                assert_eq!(strategy.evaluate(rsi, macd), expected, "rsi={rsi} macd={macd}");
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let strategy = RsiMacdStrategy::new(StrategyConfig {
            rsi_threshold: 60.0,
            ..Default::default()
        });
        assert_eq!(strategy.evaluate(55.0, 1.0), Signal::Hold);
        assert_eq!(strategy.evaluate(61.0, 1.0), Signal::Buy);
        assert_eq!(strategy.evaluate(55.0, -1.0), Signal::Sell);
    }

    #[test]
    fn test_min_bars_required() {
        let strategy = RsiMacdStrategy::default();
        assert_eq!(strategy.min_bars_required(), 26);
        assert_eq!(strategy.name(), "RsiMacdStrategy");
    }
}
