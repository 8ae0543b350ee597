/// Exponentially weighted mean over a series
///
/// Recursive form: `y[0] = x[0]`, `y[t] = (1 - alpha) * y[t-1] + alpha * x[t]`.
/// Positions before `min_periods` observations have been seen are `None`.
pub fn calculate_exponential_mean(values: &[f64], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut mean: Option<f64> = None;

    for (i, &value) in values.iter().enumerate() {
        let next = match mean {
            None => value,
            Some(prev) => (1.0 - alpha) * prev + alpha * value,
        };
        mean = Some(next);

        if i + 1 >= min_periods {
            out.push(Some(next));
        } else {
            out.push(None);
        }
    }

    out
}

/// Calculate the Exponential Moving Average (EMA) series
///
/// Uses `alpha = 2 / (span + 1)`, seeded with the first value.
/// The first `span - 1` entries are `None`.
pub fn calculate_ema_series(prices: &[f64], span: usize) -> Vec<Option<f64>> {
    let alpha = 2.0 / (span as f64 + 1.0);
    calculate_exponential_mean(prices, alpha, span)
}

/// EMA of a series that may start with undefined values
///
/// Leading `None`s are skipped; the average is seeded by the first defined
/// value and needs `span` defined values before it is reported.
pub fn calculate_ema_of_defined(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let offset = values.iter().position(Option::is_some).unwrap_or(values.len());
    let defined: Vec<f64> = values[offset..].iter().map(|v| v.unwrap_or(f64::NAN)).collect();

    let mut out = vec![None; offset];
    out.extend(calculate_ema_series(&defined, span));
    out
}
