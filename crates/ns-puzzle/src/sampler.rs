//! Parameter sampling for rule instances

use crate::{Param, PuzzleConfig};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Which configured limit a draw is bounded by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    /// Seed value, bounded by `start_limit`
    Start,
    /// First change value, bounded by `param1_limit`
    Param1,
    /// Second change value, bounded by `param2_limit`
    Param2,
}

/// How a sampled parameter is applied to the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// Added or subtracted
    Additive,
    /// Used as a multiplier, where 1 is a no-op
    Multiplicative,
}

/// Random source for seeds and change values
pub struct ParamSampler {
    rng: ChaCha8Rng,
    start_limit: Param,
    param1_limit: Param,
    param2_limit: Param,
    allow_negative: bool,
}

impl ParamSampler {
    /// Create a sampler from a configuration, seeded from `config.seed`
    /// or from OS entropy when no seed is set.
    pub fn new(config: &PuzzleConfig) -> Self {
        let rng = match config.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };

        Self {
            rng,
            start_limit: config.start_limit,
            param1_limit: config.param1_limit,
            param2_limit: config.param2_limit,
            allow_negative: config.allow_negative_params,
        }
    }

    /// Closed interval a draw for `slot` in `role` comes from
    pub fn range(&self, slot: ParamSlot, role: ParamRole) -> (Param, Param) {
        let upper = match slot {
            ParamSlot::Start => return (1, self.start_limit),
            ParamSlot::Param1 => self.param1_limit,
            ParamSlot::Param2 => self.param2_limit,
        };

        let lower = match role {
            ParamRole::Multiplicative if self.allow_negative => -upper,
            ParamRole::Multiplicative => 2,
            ParamRole::Additive => 1,
        };

        (lower, upper)
    }

    /// Draw a value for `slot`, never 0 and never 1 for a multiplier.
    ///
    /// # Panics
    ///
    /// Panics if the interval is empty. `PuzzleConfig::validate` rules this
    /// out for every slot the catalog uses.
    pub fn sample(&mut self, slot: ParamSlot, role: ParamRole) -> Param {
        let (lower, upper) = self.range(slot, role);
        loop {
            let x = self.rng.random_range(lower..=upper);
            // 0 is useless either for addition or multiplication
            if x == 0 {
                continue;
            }
            if x != 1 || role == ParamRole::Additive {
                return x;
            }
        }
    }

    /// Draw a seed value
    pub fn start(&mut self) -> Param {
        self.sample(ParamSlot::Start, ParamRole::Additive)
    }

    /// Pick one item uniformly
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(config: PuzzleConfig) -> ParamSampler {
        ParamSampler::new(&config.with_seed(42))
    }

    #[test]
    fn test_sampler_reproducibility() {
        let mut s1 = sampler(PuzzleConfig::default());
        let mut s2 = sampler(PuzzleConfig::default());

        for _ in 0..100 {
            assert_eq!(s1.start(), s2.start());
            assert_eq!(
                s1.sample(ParamSlot::Param1, ParamRole::Multiplicative),
                s2.sample(ParamSlot::Param1, ParamRole::Multiplicative)
            );
        }
    }

    #[test]
    fn test_ranges() {
        let s = sampler(PuzzleConfig::default().with_start_limit(20).with_param_limits(7, 5));
        assert_eq!(s.range(ParamSlot::Start, ParamRole::Additive), (1, 20));
        assert_eq!(s.range(ParamSlot::Start, ParamRole::Multiplicative), (1, 20));
        assert_eq!(s.range(ParamSlot::Param1, ParamRole::Additive), (1, 7));
        assert_eq!(s.range(ParamSlot::Param1, ParamRole::Multiplicative), (2, 7));
        assert_eq!(s.range(ParamSlot::Param2, ParamRole::Multiplicative), (2, 5));

        let s = sampler(PuzzleConfig::default().with_negative_params(true));
        assert_eq!(s.range(ParamSlot::Param2, ParamRole::Multiplicative), (-10, 10));
        // Additive values stay positive; subtraction covers the other direction
        assert_eq!(s.range(ParamSlot::Param1, ParamRole::Additive), (1, 10));
    }

    #[test]
    fn test_never_zero_or_unit_multiplier() {
        let mut s = sampler(PuzzleConfig::default().with_param_limits(3, 3).with_negative_params(true));

        for _ in 0..2000 {
            let add = s.sample(ParamSlot::Param1, ParamRole::Additive);
            assert!((1..=3).contains(&add), "additive {} out of range", add);

            let mul = s.sample(ParamSlot::Param2, ParamRole::Multiplicative);
            assert_ne!(mul, 0);
            assert_ne!(mul, 1);
            assert!((-3..=3).contains(&mul), "multiplier {} out of range", mul);
        }
    }

    #[test]
    fn test_negative_multipliers_appear() {
        let mut s = sampler(PuzzleConfig::default().with_negative_params(true));
        let saw_negative = (0..500)
            .map(|_| s.sample(ParamSlot::Param1, ParamRole::Multiplicative))
            .any(|x| x < 0);
        assert!(saw_negative);
    }

    #[test]
    fn test_tight_multiplier_range() {
        // Only 2 is left once 0 and 1 are excluded
        let mut s = sampler(PuzzleConfig::default().with_param_limits(2, 2));
        for _ in 0..50 {
            assert_eq!(s.sample(ParamSlot::Param1, ParamRole::Multiplicative), 2);
        }
    }

    #[test]
    fn test_choose() {
        let mut s = sampler(PuzzleConfig::default());
        let items = ["a", "b", "c"];
        for _ in 0..20 {
            assert!(items.contains(s.choose(&items).unwrap()));
        }
        let empty: [u8; 0] = [];
        assert!(s.choose(&empty).is_none());
    }
}
