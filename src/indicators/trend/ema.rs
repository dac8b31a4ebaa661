//! EMA (Exponential Moving Average) indicator

/// EMA values aligned index-for-index with the source prices. Entries before
/// the warm-up index are `None`.
pub type EmaSeries = Vec<Option<f64>>;

/// Fast EMA used for golden/death crosses.
pub const FAST_PERIOD: usize = 50;
/// Slow EMA used for price crosses and regimes.
pub const SLOW_PERIOD: usize = 200;

/// Calculate the EMA series for a specific period.
///
/// Returns an empty series when there are fewer prices than `period`. The
/// value at `period - 1` is the simple average of the first `period` closes;
/// every later value blends the close with the previous EMA using
/// `k = 2 / (period + 1)`.
pub fn compute_ema(prices: &[f64], period: usize) -> EmaSeries {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = prices[..period].iter().sum::<f64>() / period as f64;

    let mut series: EmaSeries = Vec::with_capacity(prices.len());
    series.resize(period - 1, None);
    series.push(Some(seed));

    let mut current = seed;
    for &price in &prices[period..] {
        current = price * k + current * (1.0 - k);
        series.push(Some(current));
    }

    series
}

/// Latest defined EMA value, if any.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}
