use super::moving_average::calculate_exponential_mean;

/// Calculate the Relative Strength Index (RSI) series
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Gains and losses are smoothed with Wilder's method, i.e. an
/// exponentially weighted mean with `alpha = 1 / period` seeded with the
/// first observation. The first bar has no predecessor and counts as an
/// unchanged move. The first `period - 1` entries are `None`.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
///
pub fn calculate_rsi_series(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if prices.is_empty() || period == 0 {
        return vec![None; prices.len()];
    }

    let mut gains = Vec::with_capacity(prices.len());
    let mut losses = Vec::with_capacity(prices.len());

    gains.push(0.0);
    losses.push(0.0);
    for window in prices.windows(2) {
        let change = window[1] - window[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    let alpha = 1.0 / period as f64;
    let avg_gains = calculate_exponential_mean(&gains, alpha, period);
    let avg_losses = calculate_exponential_mean(&losses, alpha, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(_), Some(loss)) if loss == 0.0 => Some(100.0),
            (Some(gain), Some(loss)) => {
                let rs = gain / loss;
                Some(100.0 - 100.0 / (1.0 + rs))
            }
            _ => None,
        })
        .collect()
}

/// Latest RSI value, or None if there isn't enough data
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    calculate_rsi_series(prices, period).last().copied().flatten()
}
