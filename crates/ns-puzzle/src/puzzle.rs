//! Accepted puzzles and their text/JSON rendering

use crate::rules::{RuleInstance, RuleKind};
use crate::{Result, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An accepted sequence together with its answer key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Rule that produced the sequence
    pub rule: RuleKind,

    /// Values shown to the solver
    #[serde(with = "exact::seq")]
    pub sequence: Vec<Value>,

    /// Value that continues the sequence
    #[serde(with = "exact::option")]
    pub next: Option<Value>,

    /// Rule text with the sampled parameters filled in
    pub description: String,

    /// Candidates generated before this one was accepted, itself included
    pub attempts: usize,
}

impl Puzzle {
    pub fn from_instance(instance: RuleInstance, attempts: usize) -> Self {
        let next = instance.next_value();
        let description = instance.describe();
        let rule = instance.kind();

        Self {
            rule,
            sequence: instance.into_sequence(),
            next,
            description,
            attempts,
        }
    }

    /// One output line, with the answer key appended when `debug` is set.
    ///
    /// ```text
    /// 5, 8, 11, 14, ...
    /// 5, 8, 11, 14, ... 17, next = current + 3
    /// ```
    pub fn render(&self, debug: bool) -> String {
        let mut line = self.to_string();
        if debug {
            line.push(' ');
            match &self.next {
                Some(next) => line.push_str(&next.to_string()),
                None => line.push('?'),
            }
            line.push_str(", ");
            line.push_str(&self.description);
        }
        line
    }

    /// Compact single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.sequence {
            write!(f, "{}, ", value)?;
        }
        f.write_str("...")
    }
}

/// Serde adapters writing values as plain JSON numbers of any size
mod exact {
    use crate::Value;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Number;

    struct Exact<'a>(&'a Value);

    impl Serialize for Exact<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let number: Number = self.0.to_string().parse().map_err(S::Error::custom)?;
            number.serialize(serializer)
        }
    }

    fn parse<E: serde::de::Error>(number: Number) -> Result<Value, E> {
        number.to_string().parse().map_err(E::custom)
    }

    pub mod seq {
        use super::*;

        pub fn serialize<S: Serializer>(values: &[Value], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(Exact))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
            Vec::<Number>::deserialize(deserializer)?
                .into_iter()
                .map(parse)
                .collect()
        }
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<Value>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            value.as_ref().map(Exact).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Value>, D::Error> {
            Option::<Number>::deserialize(deserializer)?
                .map(parse)
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_puzzle() -> Puzzle {
        let mut instance = RuleInstance::with_params(RuleKind::Add, 5, 3, 0);
        instance.run(4);
        Puzzle::from_instance(instance, 2)
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(add_puzzle().render(false), "5, 8, 11, 14, ...");
        assert_eq!(add_puzzle().to_string(), "5, 8, 11, 14, ...");
    }

    #[test]
    fn test_render_debug() {
        assert_eq!(
            add_puzzle().render(true),
            "5, 8, 11, 14, ... 17, next = current + 3"
        );

        let mut instance = RuleInstance::with_params(RuleKind::AddPrevious, 1, 1, 0);
        instance.run(4);
        let puzzle = Puzzle::from_instance(instance, 1);
        assert_eq!(
            puzzle.render(true),
            "1, 1, 2, 3, ... 5, next = current + previous"
        );
    }

    #[test]
    fn test_render_missing_next() {
        let mut puzzle = add_puzzle();
        puzzle.next = None;
        assert!(puzzle.render(true).contains("... ?, next"));
    }

    #[test]
    fn test_json() {
        let json = add_puzzle().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rule"], "add");
        assert_eq!(value["sequence"], serde_json::json!([5, 8, 11, 14]));
        assert_eq!(value["next"], 17);
        assert_eq!(value["attempts"], 2);

        let back: Puzzle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, add_puzzle());
    }

    #[test]
    fn test_json_large_values_are_exact() {
        let mut instance = RuleInstance::with_params(RuleKind::MultiplySelf, 3, 0, 0);
        instance.run(8);
        let puzzle = Puzzle::from_instance(instance, 1);
        let last = puzzle.sequence[7].clone();
        assert_eq!(last, Value::from(3u8).pow(128u32));

        let json = puzzle.to_json().unwrap();
        assert!(json.contains(&format!(",{}],", last)));
        assert!(json.contains(&format!("\"next\":{},", &last * &last)));

        let back: Puzzle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, puzzle);
    }
}
