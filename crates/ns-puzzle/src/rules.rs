//! Rule catalog and rule instances
//!
//! Every rule is a recurrence `s[i] -> s[i+1]` over the sequence built so far.
//! A [`RuleKind`] names the recurrence and its capability; a [`RuleInstance`]
//! is one activation of it with sampled parameters and the growing sequence.

use crate::config::MAX_SEQUENCE_LENGTH;
use crate::sampler::{ParamRole, ParamSampler, ParamSlot};
use crate::{Param, PuzzleError, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability a rule needs switched on before it may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Always eligible
    Basic,
    /// Combines two operations per step
    TwoStep,
    /// Reads the element before the current one
    Previous,
    /// Change value is itself changed every step
    Adaptive,
}

/// The closed set of sequence rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    /// next = current + p1
    #[serde(rename = "add")]
    Add,
    /// next = current - p1
    #[serde(rename = "subtract")]
    Subtract,
    /// next = current * p1
    #[serde(rename = "multiply")]
    Multiply,
    /// next = current + previous, seeded with two values
    #[serde(rename = "addprevious")]
    AddPrevious,
    /// next = current * current
    #[serde(rename = "multiplyself")]
    MultiplySelf,
    /// next = current + p1, then p1 += p2
    #[serde(rename = "add_xadd")]
    AddXAdd,
    /// next = (current + p1) * p2
    #[serde(rename = "add_multiply")]
    AddMultiply,
    /// next = (current - p1) * p2
    #[serde(rename = "subtract_multiply")]
    SubtractMultiply,
    /// next = (current * p1) + p2
    #[serde(rename = "multiply_add")]
    MultiplyAdd,
    /// next = (current * p1) - p2
    #[serde(rename = "multiply_subtract")]
    MultiplySubtract,
}

impl RuleKind {
    /// All rules, in the order eligibility lists are built
    pub const ALL: [RuleKind; 10] = [
        RuleKind::Add,
        RuleKind::Subtract,
        RuleKind::Multiply,
        RuleKind::AddPrevious,
        RuleKind::AddXAdd,
        RuleKind::AddMultiply,
        RuleKind::SubtractMultiply,
        RuleKind::MultiplyAdd,
        RuleKind::MultiplySubtract,
        RuleKind::MultiplySelf,
    ];

    /// Stable rule name
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Add => "add",
            RuleKind::Subtract => "subtract",
            RuleKind::Multiply => "multiply",
            RuleKind::AddPrevious => "addprevious",
            RuleKind::MultiplySelf => "multiplyself",
            RuleKind::AddXAdd => "add_xadd",
            RuleKind::AddMultiply => "add_multiply",
            RuleKind::SubtractMultiply => "subtract_multiply",
            RuleKind::MultiplyAdd => "multiply_add",
            RuleKind::MultiplySubtract => "multiply_subtract",
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            RuleKind::Add | RuleKind::Subtract | RuleKind::Multiply | RuleKind::MultiplySelf => {
                Capability::Basic
            }
            RuleKind::AddPrevious => Capability::Previous,
            RuleKind::AddXAdd => Capability::Adaptive,
            RuleKind::AddMultiply
            | RuleKind::SubtractMultiply
            | RuleKind::MultiplyAdd
            | RuleKind::MultiplySubtract => Capability::TwoStep,
        }
    }

    pub fn needs_two_step(&self) -> bool {
        self.capability() == Capability::TwoStep
    }

    pub fn needs_previous(&self) -> bool {
        self.capability() == Capability::Previous
    }

    pub fn needs_adaptive(&self) -> bool {
        self.capability() == Capability::Adaptive
    }

    /// How the first change value is used, if the rule has one
    pub fn param1_role(&self) -> Option<ParamRole> {
        match self {
            RuleKind::MultiplySelf => None,
            RuleKind::Multiply | RuleKind::MultiplyAdd | RuleKind::MultiplySubtract => {
                Some(ParamRole::Multiplicative)
            }
            _ => Some(ParamRole::Additive),
        }
    }

    /// How the second change value is used, if the rule has one
    pub fn param2_role(&self) -> Option<ParamRole> {
        match self {
            RuleKind::AddXAdd | RuleKind::MultiplyAdd | RuleKind::MultiplySubtract => {
                Some(ParamRole::Additive)
            }
            RuleKind::AddMultiply | RuleKind::SubtractMultiply => Some(ParamRole::Multiplicative),
            _ => None,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PuzzleError::UnknownRule(s.to_string()))
    }
}

/// One activation of a rule: sampled parameters plus the sequence so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInstance {
    kind: RuleKind,
    // Zero when the rule has no such parameter
    param1: Value,
    param2: Value,
    sequence: Vec<Value>,
}

impl RuleInstance {
    /// Sample a fresh instance of `kind`.
    ///
    /// Draw order is seed, then first change value, then second change value.
    pub fn sample(kind: RuleKind, sampler: &mut ParamSampler) -> Self {
        let seed = sampler.start();
        let param1 = kind
            .param1_role()
            .map(|role| sampler.sample(ParamSlot::Param1, role));
        let param2 = kind
            .param2_role()
            .map(|role| sampler.sample(ParamSlot::Param2, role));

        log::trace!(
            "sampled {} seed={} p1={:?} p2={:?}",
            kind,
            seed,
            param1,
            param2
        );
        Self::build(kind, seed, param1.unwrap_or(0), param2.unwrap_or(0))
    }

    /// Create an instance with chosen parameters. Parameters the rule does
    /// not use are ignored.
    pub fn with_params(kind: RuleKind, seed: Param, param1: Param, param2: Param) -> Self {
        Self::build(kind, seed, param1, param2)
    }

    fn build(kind: RuleKind, seed: Param, param1: Param, param2: Param) -> Self {
        let param1 = kind.param1_role().map_or(0, |_| param1);
        let param2 = kind.param2_role().map_or(0, |_| param2);

        let mut sequence = Vec::with_capacity(MAX_SEQUENCE_LENGTH + 1);
        sequence.push(Value::from(seed));
        if kind == RuleKind::AddPrevious {
            // The first change value is the second seed
            sequence.push(Value::from(param1));
        }

        Self {
            kind,
            param1: Value::from(param1),
            param2: Value::from(param2),
            sequence,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Current first change value (grows every step for `add_xadd`)
    pub fn param1(&self) -> Option<&Value> {
        self.kind.param1_role().map(|_| &self.param1)
    }

    pub fn param2(&self) -> Option<&Value> {
        self.kind.param2_role().map(|_| &self.param2)
    }

    pub fn sequence(&self) -> &[Value] {
        &self.sequence
    }

    pub fn into_sequence(self) -> Vec<Value> {
        self.sequence
    }

    /// Compute the element following `s[i]` with the current parameters.
    ///
    /// Returns `None` if `i` has no element (or, for `addprevious`, no
    /// predecessor).
    pub fn step(&self, i: usize) -> Option<Value> {
        let current = self.sequence.get(i)?;
        let (p1, p2) = (&self.param1, &self.param2);

        let next = match self.kind {
            RuleKind::Add | RuleKind::AddXAdd => current + p1,
            RuleKind::Subtract => current - p1,
            RuleKind::Multiply => current * p1,
            RuleKind::AddPrevious => current + self.sequence.get(i.checked_sub(1)?)?,
            RuleKind::MultiplySelf => current * current,
            RuleKind::AddMultiply => (current + p1) * p2,
            RuleKind::SubtractMultiply => (current - p1) * p2,
            RuleKind::MultiplyAdd => current * p1 + p2,
            RuleKind::MultiplySubtract => current * p1 - p2,
        };
        Some(next)
    }

    /// Extend the sequence until it holds exactly `length` elements
    pub fn run(&mut self, length: usize) -> &[Value] {
        // Construction leaves at least one element, two for `addprevious`,
        // so the last element always has a successor.
        while self.sequence.len() < length {
            let Some(next) = self.next_value() else {
                break;
            };
            self.sequence.push(next);

            // Must follow the push so `next_value` reads the updated change
            if self.kind == RuleKind::AddXAdd {
                self.param1 += &self.param2;
            }
        }
        &self.sequence
    }

    /// The element that would follow the last one
    pub fn next_value(&self) -> Option<Value> {
        self.step(self.sequence.len().checked_sub(1)?)
    }

    /// Human-readable rule text
    pub fn describe(&self) -> String {
        let (p1, p2) = (&self.param1, &self.param2);

        match self.kind {
            RuleKind::Add => format!("next = current + {}", p1),
            RuleKind::Subtract => format!("next = current - {}", p1),
            RuleKind::Multiply => format!("next = current * {}", p1),
            RuleKind::AddPrevious => "next = current + previous".to_string(),
            RuleKind::MultiplySelf => "next = current * current".to_string(),
            RuleKind::AddXAdd => format!(
                "change = {}, next = current + change, change = change + {}",
                p1, p2
            ),
            RuleKind::AddMultiply => format!("next = (current + {}) * {}", p1, p2),
            RuleKind::SubtractMultiply => format!("next = (current - {}) * {}", p1, p2),
            RuleKind::MultiplyAdd => format!("next = (current * {}) + {}", p1, p2),
            RuleKind::MultiplySubtract => format!("next = (current * {}) - {}", p1, p2),
        }
    }
}
