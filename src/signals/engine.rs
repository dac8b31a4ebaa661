//! Per-ticker signal evaluation: EMAs, crossover detection and regime start.

use chrono::NaiveDate;

use crate::indicators::trend::{compute_ema, EmaSeries, FAST_PERIOD, SLOW_PERIOD};
use crate::indicators::IndicatorError;
use crate::models::{split_history, Direction, PricePoint, Signal};
use crate::signals::detector::detect;
use crate::signals::regime::find_regime_start;

/// Slow EMA warm-up plus one prior bar.
pub const MIN_BARS: usize = SLOW_PERIOD + 1;

/// Everything derived from one ticker's history when a signal fires.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub signal: Signal,
    pub direction: Direction,
    pub regime_start: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub ema_fast: EmaSeries,
    pub ema_slow: EmaSeries,
}

impl Evaluation {
    pub fn last_close(&self) -> f64 {
        self.closes.last().copied().unwrap_or_default()
    }
}

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate a ticker's history.
    ///
    /// `Ok(None)` covers both "not enough history" and "no signal on the
    /// latest bar"; errors are reserved for misaligned series.
    pub fn evaluate(history: &[PricePoint]) -> Result<Option<Evaluation>, IndicatorError> {
        if history.len() < MIN_BARS {
            return Ok(None);
        }

        let (dates, closes) = split_history(history);
        let ema_fast = compute_ema(&closes, FAST_PERIOD);
        let ema_slow = compute_ema(&closes, SLOW_PERIOD);

        let Some(signal) = detect(&closes, &ema_fast, &ema_slow)? else {
            return Ok(None);
        };

        let direction = signal.direction();
        let Some(regime_start) = find_regime_start(&dates, &closes, &ema_slow, direction)? else {
            return Ok(None);
        };

        Ok(Some(Evaluation {
            signal,
            direction,
            regime_start,
            dates,
            closes,
            ema_fast,
            ema_slow,
        }))
    }
}
