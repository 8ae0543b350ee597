/// Moving Average Convergence Divergence (MACD)
///
/// MACD line = EMA(fast) - EMA(slow) of the closing price.
/// Signal line = EMA(signal) of the MACD line.
/// Histogram = MACD line - signal line.
use super::moving_average::{calculate_ema_of_defined, calculate_ema_series};

/// MACD output, each series aligned with the input prices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Calculate MACD for the given closing prices
///
/// The MACD line is undefined until the slow EMA has `slow` observations;
/// the signal line needs a further `signal - 1` MACD values on top of that.
pub fn calculate_macd_series(prices: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = calculate_ema_series(prices, fast);
    let ema_slow = calculate_ema_series(prices, slow);

    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal_line = calculate_ema_of_defined(&macd, signal);

    let histogram = macd
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    MacdSeries {
        macd,
        signal: signal_line,
        histogram,
    }
}

/// Latest MACD line value, or None if there isn't enough data
pub fn calculate_macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> Option<f64> {
    calculate_macd_series(prices, fast, slow, signal)
        .macd
        .last()
        .copied()
        .flatten()
}
