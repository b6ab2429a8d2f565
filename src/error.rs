//! Error types.
//!
//! Construction errors are fatal: no partial `RewriteSystem` is returned.
//! `DidNotConverge` is recoverable: the system keeps its partial completion
//! state and a later call with a larger budget resumes from it.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Two different words rank equal under the word order, so no rule can
    /// be oriented between them.
    #[error("cannot orient {left} = {right}: the words differ but rank equal")]
    InvalidRule { left: String, right: String },

    /// A budget ran out before completion or enumeration finished.
    #[error("{stage} did not converge after {rounds} rounds ({size} {unit}): {reason}", unit = .stage.unit())]
    DidNotConverge { stage: Stage, rounds: usize, size: usize, reason: Exhausted },

    #[error("parse error at byte offset {position}: {message} in `{line}`")]
    Parse { line: String, position: usize, message: &'static str },

    #[error("zero exponent not allowed at byte offset {position} in `{line}`")]
    ZeroExponent { line: String, position: usize },

    #[error("failed to read presentation: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: &str, position: usize, message: &'static str) -> Self {
        Error::Parse { line: line.to_string(), position, message }
    }

    /// `true` for the recoverable "ran out of budget" case.
    pub fn is_budget(&self) -> bool {
        matches!(self, Error::DidNotConverge { .. })
    }
}

/// Which loop ran out of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Completion,
    Enumeration,
}

impl Stage {
    fn unit(&self) -> &'static str {
        match self {
            Stage::Completion => "rules",
            Stage::Enumeration => "normal forms",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Completion => f.write_str("completion"),
            Stage::Enumeration => f.write_str("enumeration"),
        }
    }
}

/// The budget limit that stopped a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhausted {
    Rounds(usize),
    Rules(usize),
    Elements(usize),
    Deadline,
}

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exhausted::Rounds(max) => write!(f, "round limit {max} reached"),
            Exhausted::Rules(max) => write!(f, "rule limit {max} exceeded"),
            Exhausted::Elements(max) => write!(f, "element limit {max} exceeded"),
            Exhausted::Deadline => f.write_str("deadline passed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_errors_render_stage_and_reason() {
        let err =
            Error::DidNotConverge { stage: Stage::Completion, rounds: 3, size: 40, reason: Exhausted::Rules(32) };
        assert!(err.is_budget());
        assert_eq!(err.to_string(), "completion did not converge after 3 rounds (40 rules): rule limit 32 exceeded");

        let err = Error::DidNotConverge { stage: Stage::Enumeration, rounds: 2, size: 9, reason: Exhausted::Deadline };
        assert_eq!(err.to_string(), "enumeration did not converge after 2 rounds (9 normal forms): deadline passed");
    }

    #[test]
    fn parse_errors_point_at_byte_offset() {
        let err = Error::parse("p^q", 2, "number expected");
        assert!(!err.is_budget());
        assert_eq!(err.to_string(), "parse error at byte offset 2: number expected in `p^q`");

        let err = Error::ZeroExponent { line: "ä^0".to_string(), position: 2 };
        assert_eq!(err.to_string(), "zero exponent not allowed at byte offset 2 in `ä^0`");
    }
}
