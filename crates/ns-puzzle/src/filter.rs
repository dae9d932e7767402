//! Acceptance filter for generated sequences

use crate::{PuzzleConfig, Value};
use num_bigint::{BigUint, Sign};
use thiserror::Error;

/// Longest run of equal consecutive values a puzzle may contain
pub const MAX_EQUAL_RUN: usize = 2;

/// Why a generated sequence was discarded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("negative value {value} at index {index}")]
    Negative { index: usize, value: Value },

    #[error("value {value} at index {index} exceeds limit {limit}")]
    ExceedsLimit { index: usize, value: Value, limit: u64 },

    #[error("{run} equal values ending at index {index}")]
    RepeatedRun { index: usize, run: usize },
}

/// Check a fully generated sequence, returning the first problem found
/// scanning left to right.
pub fn check_sequence(sequence: &[Value], config: &PuzzleConfig) -> Result<(), Rejection> {
    let allow_negative = config.allows_negative_sequence();
    let limit = config.sequence_value_limit;
    let bound = (limit != 0).then(|| BigUint::from(limit));

    let mut run = 0;
    let mut previous: Option<&Value> = None;

    for (index, value) in sequence.iter().enumerate() {
        if value.sign() == Sign::Minus && !allow_negative {
            return Err(Rejection::Negative {
                index,
                value: value.clone(),
            });
        }

        if bound.as_ref().is_some_and(|bound| value.magnitude() > bound) {
            return Err(Rejection::ExceedsLimit {
                index,
                value: value.clone(),
                limit,
            });
        }

        if previous == Some(value) {
            run += 1;
        } else {
            previous = Some(value);
            run = 1;
        }
        if run > MAX_EQUAL_RUN {
            return Err(Rejection::RepeatedRun { index, run });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(xs: &[i64]) -> Vec<Value> {
        xs.iter().copied().map(Value::from).collect()
    }

    fn accepted(xs: &[i64], config: &PuzzleConfig) -> bool {
        check_sequence(&values(xs), config).is_ok()
    }

    #[test]
    fn test_repeated_runs() {
        let config = PuzzleConfig::default();

        assert_eq!(
            check_sequence(&values(&[5, 5, 5, 7]), &config),
            Err(Rejection::RepeatedRun { index: 2, run: 3 })
        );
        assert!(accepted(&[5, 5, 7, 9], &config));
        assert!(accepted(&[5, 5, 7, 7], &config));
        assert!(!accepted(&[1, 2, 2, 2], &config));
        assert!(!accepted(&[0, 0, 0, 0], &config));
    }

    #[test]
    fn test_run_resets_on_change() {
        let config = PuzzleConfig::default();
        assert!(accepted(&[3, 3, 4, 3, 3, 4], &config));
        assert!(!accepted(&[3, 3, 4, 3, 3, 3], &config));
    }

    #[test]
    fn test_negative_values() {
        let config = PuzzleConfig::default();
        assert_eq!(
            check_sequence(&values(&[4, 1, -2, -5]), &config),
            Err(Rejection::Negative {
                index: 2,
                value: Value::from(-2)
            })
        );

        let config = PuzzleConfig::default().with_negative_sequence(true);
        assert!(accepted(&[4, 1, -2, -5], &config));

        let config = PuzzleConfig {
            allow_negative_params: true,
            ..Default::default()
        };
        assert!(accepted(&[4, 1, -2, -5], &config));
    }

    #[test]
    fn test_value_limit_is_symmetric() {
        let config = PuzzleConfig::default()
            .with_negative_sequence(true)
            .with_sequence_value_limit(50);

        assert!(accepted(&[10, 20, 40, 50], &config));
        assert!(accepted(&[-10, -20, -40, -50], &config));
        assert_eq!(
            check_sequence(&values(&[10, 20, 40, 80]), &config),
            Err(Rejection::ExceedsLimit {
                index: 3,
                value: Value::from(80),
                limit: 50
            })
        );
        assert!(matches!(
            check_sequence(&values(&[-10, -20, -40, -80]), &config),
            Err(Rejection::ExceedsLimit { index: 3, .. })
        ));
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let config = PuzzleConfig::default();
        let huge = Value::from(1u8) << 600usize;
        let sequence = vec![Value::from(1), Value::from(1_000_000), huge.clone(), &huge * &huge];
        assert!(check_sequence(&sequence, &config).is_ok());
    }

    #[test]
    fn test_limit_beyond_64_bits() {
        let config = PuzzleConfig::default()
            .with_negative_sequence(true)
            .with_sequence_value_limit(u64::MAX);
        assert!(accepted(&[i64::MIN, 0, i64::MAX, 1], &config));

        let past: Value = Value::from(u64::MAX) + 1;
        let sequence = vec![Value::from(1), -past.clone()];
        assert_eq!(
            check_sequence(&sequence, &config),
            Err(Rejection::ExceedsLimit {
                index: 1,
                value: -past,
                limit: u64::MAX
            })
        );
    }
}
