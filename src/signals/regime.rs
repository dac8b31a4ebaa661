//! Locate the first bar of the current above/below run.

use chrono::NaiveDate;

use crate::indicators::{ensure_aligned, IndicatorError};
use crate::models::Direction;

/// Side of the slow EMA a close sits on. Ties count as below, matching the
/// strict `>` used by the detector.
pub fn classify(close: f64, ema: f64) -> Direction {
    if close > ema {
        Direction::Above
    } else {
        Direction::Below
    }
}

/// Date the current regime began.
///
/// Walks backward from the second-to-last bar. The first bar whose side
/// differs from `current` ends the walk and the regime starts on the bar
/// after it. Running into the EMA warm-up (or the start of data) without a
/// flip yields the earliest date. `None` only for an empty history.
pub fn find_regime_start(
    dates: &[NaiveDate],
    closes: &[f64],
    ema_slow: &[Option<f64>],
    current: Direction,
) -> Result<Option<NaiveDate>, IndicatorError> {
    ensure_aligned("dates", closes.len(), dates.len())?;
    if !ema_slow.is_empty() {
        ensure_aligned("ema_slow", closes.len(), ema_slow.len())?;
    }

    let Some(&earliest) = dates.first() else {
        return Ok(None);
    };

    let boundary = closes
        .iter()
        .zip(ema_slow)
        .enumerate()
        .rev()
        .skip(1)
        .map_while(|(i, (&close, &ema))| ema.map(|ema| (i, classify(close, ema))))
        .find(|&(_, side)| side != current)
        .map(|(i, _)| i + 1);

    Ok(Some(boundary.map_or(earliest, |i| dates[i])))
}
