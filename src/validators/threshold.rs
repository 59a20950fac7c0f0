//! Difference threshold validation.

use thiserror::Error;

/// Why a threshold value was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("threshold '{0}' is not a number")]
    NotANumber(String),

    #[error("threshold must be non-negative, got {0}")]
    Negative(f64),

    #[error("threshold must be finite, got {0}")]
    NonFinite(f64),
}

/// Parse a raw `--threshold` value into a non-negative, finite float.
///
/// Integers and floats are both accepted (`"50"` becomes `50.0`). Used as the
/// clap value parser, so a rejection surfaces as a usage error.
pub fn threshold_float(raw: &str) -> Result<f64, ThresholdError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ThresholdError::NotANumber(raw.to_string()))?;
    threshold_from_f64(value)
}

/// Range-check an already numeric threshold.
pub fn threshold_from_f64(value: f64) -> Result<f64, ThresholdError> {
    if !value.is_finite() {
        return Err(ThresholdError::NonFinite(value));
    }
    if value < 0.0 {
        return Err(ThresholdError::Negative(value));
    }
    // -0.0 normalizes to 0.0
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_accepts_integers_and_floats() {
        assert_eq!(threshold_float("0"), Ok(0.0));
        assert_eq!(threshold_float("50"), Ok(50.0));
        assert_eq!(threshold_float("100"), Ok(100.0));
        assert_eq!(threshold_float("30.5"), Ok(30.5));
        assert_eq!(threshold_float(" 7 "), Ok(7.0));
    }

    #[test]
    fn test_threshold_numeric_inputs() {
        for (input, expected) in [(0.0, 0.0), (50.0, 50.0), (100.0, 100.0)] {
            assert_eq!(threshold_from_f64(input), Ok(expected));
        }
    }

    #[test]
    fn test_threshold_rejections() {
        assert_eq!(threshold_float("-4"), Err(ThresholdError::Negative(-4.0)));
        assert!(matches!(threshold_float("nan"), Err(ThresholdError::NonFinite(_))));
        assert!(matches!(threshold_float("inf"), Err(ThresholdError::NonFinite(_))));
        assert!(matches!(threshold_float("-inf"), Err(ThresholdError::NonFinite(_))));
        assert_eq!(
            threshold_float("string"),
            Err(ThresholdError::NotANumber("string".to_string()))
        );
        assert!(matches!(threshold_float(""), Err(ThresholdError::NotANumber(_))));
        assert!(matches!(
            threshold_from_f64(f64::NAN),
            Err(ThresholdError::NonFinite(_))
        ));
        assert!(matches!(
            threshold_from_f64(f64::INFINITY),
            Err(ThresholdError::NonFinite(_))
        ));
    }

    #[test]
    fn test_negative_zero_normalizes() {
        let value = threshold_float("-0").unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }
}
