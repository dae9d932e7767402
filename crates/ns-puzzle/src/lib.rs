//! # ns-puzzle
//!
//! Number sequence puzzle generator.
//!
//! A puzzle is a short run of integers produced by applying one arithmetic
//! rule over and over to a random seed. The solver has to spot the rule and
//! continue the sequence.
//!
//! ## Features
//!
//! - **Rule Catalog**: Ten recurrences, from plain `add` to two-step and adaptive rules
//! - **Capability Gating**: Two-step, previous-value and adaptive rules are opt-in
//! - **Acceptance Filter**: Rejects negative, oversized and degenerate sequences
//! - **Reproducible Runs**: Seed-based deterministic generation
//!
//! ## Architecture
//!
//! ```text
//! PuzzleConfig
//!     │
//!     v
//! PuzzleGenerator ── eligible RuleKinds
//!     │
//!     ├── ParamSampler (ChaCha8, sampling policy)
//!     ├── RuleInstance (sampled params + sequence)
//!     └── check_sequence (accept / Rejection)
//!           │
//!           v
//!        Puzzle
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ns_puzzle::{PuzzleConfig, PuzzleGenerator};
//!
//! let config = PuzzleConfig::default().with_seed(7).with_sequence_length(5);
//! let mut generator = PuzzleGenerator::new(config).unwrap();
//!
//! let puzzle = generator.generate().unwrap();
//! assert_eq!(puzzle.sequence.len(), 5);
//! ```

pub mod config;
pub mod filter;
pub mod generator;
pub mod puzzle;
pub mod rules;
pub mod sampler;

pub use config::PuzzleConfig;
pub use filter::{Rejection, check_sequence};
pub use generator::{GenerationStats, PuzzleGenerator, eligible_rules};
pub use puzzle::Puzzle;
pub use rules::{Capability, RuleInstance, RuleKind};
pub use sampler::{ParamRole, ParamSampler, ParamSlot};

use thiserror::Error;

pub use num_bigint::BigInt;

/// Sequence element type. Rules such as `multiplyself` outgrow any fixed
/// width within ten steps, so values are arbitrary precision.
pub type Value = BigInt;

/// Sampling bound and parameter type
pub type Param = i64;

/// Errors that can occur while configuring or generating puzzles
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("No acceptable sequence after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Generate `count` puzzles with the given configuration
pub fn generate_puzzles(config: PuzzleConfig, count: usize) -> Result<Vec<Puzzle>> {
    let mut generator = PuzzleGenerator::new(config)?;
    (0..count).map(|_| generator.generate()).collect()
}
