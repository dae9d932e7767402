//! Puzzle generator: rule selection and the regenerate-on-reject loop

use crate::filter::{Rejection, check_sequence};
use crate::rules::{Capability, RuleInstance, RuleKind};
use crate::sampler::ParamSampler;
use crate::{Puzzle, PuzzleConfig, PuzzleError, Result};

/// Rules the configuration allows, in catalog order.
///
/// Basic rules are always present, so the list is never empty.
pub fn eligible_rules(config: &PuzzleConfig) -> Vec<RuleKind> {
    RuleKind::ALL
        .into_iter()
        .filter(|kind| match kind.capability() {
            Capability::Basic => true,
            Capability::TwoStep => config.allow_two_step,
            Capability::Previous => config.allow_previous,
            Capability::Adaptive => config.allow_adaptive,
        })
        .collect()
}

/// Running totals across every puzzle a generator produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Accepted puzzles
    pub puzzles: usize,
    /// Candidate sequences built, accepted or not
    pub attempts: usize,
    /// Candidates discarded by the filter
    pub rejections: usize,
}

/// Produces accepted puzzles from one RNG stream
pub struct PuzzleGenerator {
    config: PuzzleConfig,
    sampler: ParamSampler,
    eligible: Vec<RuleKind>,
    stats: GenerationStats,
}

impl PuzzleGenerator {
    /// Validate the configuration and seed the RNG
    pub fn new(config: PuzzleConfig) -> Result<Self> {
        config.validate()?;

        let eligible = eligible_rules(&config);
        let sampler = ParamSampler::new(&config);

        log::info!(
            "Puzzle generator ready: length {}, rules [{}]",
            config.sequence_length,
            eligible
                .iter()
                .map(RuleKind::name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            config,
            sampler,
            eligible,
            stats: GenerationStats::default(),
        })
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Rules this generator picks from
    pub fn eligible(&self) -> &[RuleKind] {
        &self.eligible
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Build one candidate: pick a rule, sample it, run it and filter it
    pub fn attempt(&mut self) -> Result<(RuleInstance, std::result::Result<(), Rejection>)> {
        let kind = self
            .sampler
            .choose(&self.eligible)
            .copied()
            .ok_or_else(|| PuzzleError::InvalidConfig("no eligible rules".into()))?;

        let mut instance = RuleInstance::sample(kind, &mut self.sampler);
        let verdict = check_sequence(
            instance.run(self.config.sequence_length),
            &self.config,
        );

        self.stats.attempts += 1;
        Ok((instance, verdict))
    }

    /// Generate one accepted puzzle.
    ///
    /// Each rejected candidate is dropped and a new rule is picked, so a
    /// rule that can never pass under this configuration does not trap the
    /// loop. Without `max_attempts` this retries until something passes.
    pub fn generate(&mut self) -> Result<Puzzle> {
        let mut attempts = 0;

        loop {
            let (instance, verdict) = self.attempt()?;
            attempts += 1;

            match verdict {
                Ok(()) => {
                    self.stats.puzzles += 1;
                    return Ok(Puzzle::from_instance(instance, attempts));
                }
                Err(rejection) => {
                    self.stats.rejections += 1;
                    log::debug!(
                        "Rejected {} {:?}: {}",
                        instance.kind(),
                        instance.sequence(),
                        rejection
                    );
                }
            }

            if let Some(max) = self.config.max_attempts {
                if attempts >= max {
                    return Err(PuzzleError::AttemptsExhausted { attempts });
                }
            }
        }
    }

    /// Generate `count` accepted puzzles
    pub fn generate_many(&mut self, count: usize) -> Result<Vec<Puzzle>> {
        (0..count).map(|_| self.generate()).collect()
    }
}
