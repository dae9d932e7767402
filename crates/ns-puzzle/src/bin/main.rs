//! Number sequence puzzle generator
//!
//! Usage:
//!   number-sequence-puzzles 5                              - five basic puzzles
//!   number-sequence-puzzles 10 --allow-twostep --debug     - with answer keys
//!   number-sequence-puzzles 3 --allow-complex --seed 42    - reproducible, all rules

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ns_puzzle::{Param, PuzzleConfig, PuzzleError, PuzzleGenerator, RuleKind};

#[derive(Parser, Debug)]
#[command(
    name = "number-sequence-puzzles",
    version,
    about = "Generate number sequence puzzles"
)]
struct Cli {
    /// How many sequences to generate
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Upper limit of start value
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
    start: Param,

    /// Upper limit of 1st change value
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
    limit1: Param,

    /// Upper limit of 2nd change value
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
    limit2: Param,

    /// How many values to show in sequence (range: 4-10)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(4..=10))]
    sequence_length: u64,

    /// Set upper limit on sequence values (0 = none)
    #[arg(long, default_value_t = 0)]
    sequence_limit: u64,

    /// Allow two-step operations
    #[arg(long)]
    allow_twostep: bool,

    /// Allow operations involving previous value in sequence
    #[arg(long)]
    allow_previous: bool,

    /// Allow change value to be subject to a change constant
    #[arg(long)]
    allow_adaptive: bool,

    /// Allow multiplication change values to be negative (also enables allow-negative-sequence)
    #[arg(long, visible_alias = "allow-negative-changes")]
    allow_negative_multiplication: bool,

    /// Allow sequence values to be negative
    #[arg(long)]
    allow_negative_sequence: bool,

    /// Enable all allow options for maximum complexity
    #[arg(long)]
    allow_complex: bool,

    /// Seed the random generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many rejected sequences per puzzle
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_attempts: Option<u64>,

    /// Print one JSON object per puzzle
    #[arg(long)]
    json: bool,

    /// Show next value in sequence, and pattern rule
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn config(&self) -> PuzzleConfig {
        let mut config = PuzzleConfig::default()
            .with_start_limit(self.start)
            .with_param_limits(self.limit1, self.limit2)
            .with_sequence_length(self.sequence_length as usize)
            .with_sequence_value_limit(self.sequence_limit)
            .with_two_step(self.allow_twostep)
            .with_previous(self.allow_previous)
            .with_adaptive(self.allow_adaptive)
            .with_negative_sequence(self.allow_negative_sequence)
            .with_negative_params(self.allow_negative_multiplication);

        if self.allow_complex {
            config = config.with_all_allowed();
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(max) = self.max_attempts {
            config = config.with_max_attempts(max as usize);
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut generator = match PuzzleGenerator::new(cli.config()) {
        Ok(generator) => generator,
        Err(PuzzleError::InvalidConfig(msg)) => {
            Cli::command().error(ErrorKind::ValueValidation, msg).exit()
        }
        Err(e) => return Err(e.into()),
    };

    let mut out = io::stdout().lock();

    if cli.debug {
        let options = serde_json::to_string(generator.config())
            .context("Failed to serialize options")?;
        let operations: Vec<&str> = generator.eligible().iter().map(RuleKind::name).collect();
        writeln!(out, "Options: {}", options)?;
        writeln!(out, "Configured for the following operations: {:?}", operations)?;
    }

    for _ in 0..cli.count {
        let puzzle = generator.generate()?;
        if cli.json {
            writeln!(out, "{}", puzzle.to_json()?)?;
        } else {
            writeln!(out, "{}", puzzle.render(cli.debug))?;
        }
    }
    out.flush().context("Failed to flush stdout")?;

    let stats = generator.stats();
    log::info!(
        "Generated {} puzzles from {} candidates ({} rejected)",
        stats.puzzles,
        stats.attempts,
        stats.rejections
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["number-sequence-puzzles", "3"]).unwrap();
        assert_eq!(cli.count, 3);
        assert_eq!(cli.config(), PuzzleConfig::default());
    }

    #[test]
    fn test_cli_rejects_bad_arguments() {
        for args in [
            vec!["nsp"],
            vec!["nsp", "0"],
            vec!["nsp", "1", "--sequence-length", "3"],
            vec!["nsp", "1", "--sequence-length", "11"],
            vec!["nsp", "1", "--start", "0"],
            vec!["nsp", "1", "--sequence-limit", "-5"],
        ] {
            assert!(Cli::try_parse_from(args.clone()).is_err(), "{:?} should fail", args);
        }
    }

    #[test]
    fn test_negative_multiplication_alias() {
        let cli = Cli::try_parse_from(["nsp", "1", "--allow-negative-changes"]).unwrap();
        let config = cli.config();
        assert!(config.allow_negative_params);
        assert!(config.allow_negative_sequence);
    }

    #[test]
    fn test_allow_complex() {
        let cli = Cli::try_parse_from(["nsp", "2", "--allow-complex", "--seed", "7"]).unwrap();
        assert_eq!(cli.config(), PuzzleConfig::complex().with_seed(7));
    }

    #[test]
    fn test_verify_command() {
        Cli::command().debug_assert();
    }
}
