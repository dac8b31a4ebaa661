use thiserror::Error;

/// Invariant violations inside the indicator core. These indicate a bug in
/// the caller and are never used for "not enough data" situations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("series '{series}' has {actual} entries, expected {expected}")]
    Misaligned {
        series: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Fail fast when a derived series does not line up with its source.
pub fn ensure_aligned(
    series: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), IndicatorError> {
    if expected == actual {
        Ok(())
    } else {
        Err(IndicatorError::Misaligned {
            series,
            expected,
            actual,
        })
    }
}
