//! Puzzle generation configuration

use crate::{Param, PuzzleError, Result};
use serde::{Deserialize, Serialize};

/// Shortest sequence a puzzle may show
pub const MIN_SEQUENCE_LENGTH: usize = 4;

/// Longest sequence a puzzle may show
pub const MAX_SEQUENCE_LENGTH: usize = 10;

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Upper limit of the seed (first element)
    pub start_limit: Param,

    /// Upper limit of the first change value
    pub param1_limit: Param,

    /// Upper limit of the second change value
    pub param2_limit: Param,

    /// Number of values shown per puzzle (4-10)
    pub sequence_length: usize,

    /// Upper limit on the magnitude of any sequence value (0 = none)
    pub sequence_value_limit: u64,

    /// Allow rules combining two operations per step
    pub allow_two_step: bool,

    /// Allow rules involving the previous value in the sequence
    pub allow_previous: bool,

    /// Allow the change value to be subject to a change constant
    pub allow_adaptive: bool,

    /// Allow multiplication change values to be negative
    pub allow_negative_params: bool,

    /// Allow sequence values to be negative
    pub allow_negative_sequence: bool,

    /// Random seed for reproducibility (None = OS entropy)
    pub seed: Option<u64>,

    /// Give up after this many rejected attempts (None = retry forever)
    pub max_attempts: Option<usize>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            start_limit: 10,
            param1_limit: 10,
            param2_limit: 10,
            sequence_length: MIN_SEQUENCE_LENGTH,
            sequence_value_limit: 0,
            allow_two_step: false,
            allow_previous: false,
            allow_adaptive: false,
            allow_negative_params: false,
            allow_negative_sequence: false,
            seed: None,
            max_attempts: None,
        }
    }
}

impl PuzzleConfig {
    /// Enable every rule and every negative option
    pub fn complex() -> Self {
        Self::default().with_all_allowed()
    }

    /// Small, bounded, non-negative puzzles for younger solvers
    pub fn classroom() -> Self {
        Self {
            start_limit: 10,
            param1_limit: 5,
            param2_limit: 3,
            sequence_length: 5,
            sequence_value_limit: 100,
            ..Default::default()
        }
    }

    /// Negative parameters can always drive the sequence below zero,
    /// so they imply negative sequence values.
    pub fn allows_negative_sequence(&self) -> bool {
        self.allow_negative_sequence || self.allow_negative_params
    }

    /// Check that every range the sampler will draw from is non-empty
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH).contains(&self.sequence_length) {
            return Err(PuzzleError::InvalidConfig(format!(
                "sequence length {} outside {}-{}",
                self.sequence_length, MIN_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH
            )));
        }

        for (name, limit) in [
            ("start", self.start_limit),
            ("limit1", self.param1_limit),
            ("limit2", self.param2_limit),
        ] {
            if limit < 1 {
                return Err(PuzzleError::InvalidConfig(format!(
                    "{} must be at least 1, got {}",
                    name, limit
                )));
            }
        }

        // A positive-only multiplier needs at least 2 in range. `multiply` is
        // always eligible and draws from limit1; limit2 is only used as a
        // multiplier by the two-step rules.
        if !self.allow_negative_params {
            if self.param1_limit < 2 {
                return Err(PuzzleError::InvalidConfig(
                    "limit1 must be at least 2 unless negative multiplication is allowed".into(),
                ));
            }
            if self.allow_two_step && self.param2_limit < 2 {
                return Err(PuzzleError::InvalidConfig(
                    "limit2 must be at least 2 for two-step rules unless negative multiplication is allowed"
                        .into(),
                ));
            }
        }

        if self.max_attempts == Some(0) {
            return Err(PuzzleError::InvalidConfig(
                "max attempts must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Builder: set the seed upper limit
    pub fn with_start_limit(mut self, limit: Param) -> Self {
        self.start_limit = limit;
        self
    }

    /// Builder: set both change value limits
    pub fn with_param_limits(mut self, limit1: Param, limit2: Param) -> Self {
        self.param1_limit = limit1;
        self.param2_limit = limit2;
        self
    }

    /// Builder: set sequence length
    pub fn with_sequence_length(mut self, len: usize) -> Self {
        self.sequence_length = len;
        self
    }

    /// Builder: set sequence value limit (0 = none)
    pub fn with_sequence_value_limit(mut self, limit: u64) -> Self {
        self.sequence_value_limit = limit;
        self
    }

    pub fn with_two_step(mut self, allow: bool) -> Self {
        self.allow_two_step = allow;
        self
    }

    pub fn with_previous(mut self, allow: bool) -> Self {
        self.allow_previous = allow;
        self
    }

    pub fn with_adaptive(mut self, allow: bool) -> Self {
        self.allow_adaptive = allow;
        self
    }

    /// Builder: allow negative multipliers (also allows negative values)
    pub fn with_negative_params(mut self, allow: bool) -> Self {
        self.allow_negative_params = allow;
        if allow {
            self.allow_negative_sequence = true;
        }
        self
    }

    pub fn with_negative_sequence(mut self, allow: bool) -> Self {
        self.allow_negative_sequence = allow;
        self
    }

    /// Builder: enable every allow option
    pub fn with_all_allowed(self) -> Self {
        self.with_two_step(true)
            .with_previous(true)
            .with_adaptive(true)
            .with_negative_params(true)
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: cap the retry loop
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
}
