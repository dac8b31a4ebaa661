//! Crossover classification of the latest bar.

use crate::indicators::{ensure_aligned, IndicatorError};
use crate::models::Signal;

/// The last two aligned bars of closes, fast EMA and slow EMA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossWindow {
    pub prev_close: f64,
    pub last_close: f64,
    pub prev_fast: Option<f64>,
    pub last_fast: Option<f64>,
    pub prev_slow: f64,
    pub last_slow: f64,
}

impl CrossWindow {
    /// Build the window from aligned series. `None` when there are fewer than
    /// two bars or the slow EMA is still warming up at either bar.
    pub fn from_series(
        closes: &[f64],
        ema_fast: &[Option<f64>],
        ema_slow: &[Option<f64>],
    ) -> Result<Option<Self>, IndicatorError> {
        check_series("ema_fast", closes.len(), ema_fast)?;
        check_series("ema_slow", closes.len(), ema_slow)?;

        let n = closes.len();
        if n < 2 || ema_slow.is_empty() {
            return Ok(None);
        }

        let (Some(prev_slow), Some(last_slow)) = (ema_slow[n - 2], ema_slow[n - 1]) else {
            return Ok(None);
        };

        let (prev_fast, last_fast) = if ema_fast.is_empty() {
            (None, None)
        } else {
            (ema_fast[n - 2], ema_fast[n - 1])
        };

        Ok(Some(Self {
            prev_close: closes[n - 2],
            last_close: closes[n - 1],
            prev_fast,
            last_fast,
            prev_slow,
            last_slow,
        }))
    }
}

// An EMA shorter than its period comes back empty; anything else must line up.
fn check_series(
    name: &'static str,
    expected: usize,
    series: &[Option<f64>],
) -> Result<(), IndicatorError> {
    if series.is_empty() {
        return Ok(());
    }
    ensure_aligned(name, expected, series.len())
}

type RuleFn = fn(&CrossWindow) -> bool;

/// Detection rules in priority order. The first matching rule wins.
const RULES: [(Signal, RuleFn); 4] = [
    (Signal::PriceAboveEma200, price_crossed_above),
    (Signal::PriceBelowEma200, price_crossed_below),
    (Signal::GoldenCross, golden_cross),
    (Signal::DeathCross, death_cross),
];

fn price_crossed_above(w: &CrossWindow) -> bool {
    w.prev_close < w.prev_slow && w.last_close > w.last_slow
}

fn price_crossed_below(w: &CrossWindow) -> bool {
    w.prev_close > w.prev_slow && w.last_close < w.last_slow
}

fn golden_cross(w: &CrossWindow) -> bool {
    match (w.prev_fast, w.last_fast) {
        (Some(prev), Some(last)) => prev < w.prev_slow && last > w.last_slow,
        _ => false,
    }
}

fn death_cross(w: &CrossWindow) -> bool {
    match (w.prev_fast, w.last_fast) {
        (Some(prev), Some(last)) => prev > w.prev_slow && last < w.last_slow,
        _ => false,
    }
}

/// Classify a window. Strict inequalities only: touching the slow EMA is
/// not a cross.
pub fn classify_window(window: &CrossWindow) -> Option<Signal> {
    RULES
        .iter()
        .find(|(_, applies)| applies(window))
        .map(|(signal, _)| *signal)
}

/// Classify the latest bar of aligned close / EMA series.
pub fn detect(
    closes: &[f64],
    ema_fast: &[Option<f64>],
    ema_slow: &[Option<f64>],
) -> Result<Option<Signal>, IndicatorError> {
    Ok(CrossWindow::from_series(closes, ema_fast, ema_slow)?
        .as_ref()
        .and_then(classify_window))
}
