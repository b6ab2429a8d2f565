//! Run configuration: strategy flags and budgets.
//!
//! - [`Strategy`] toggles optional parts of completion and reduction.
//! - [`Budget`] bounds the completion and enumeration loops. Neither loop is
//!   guaranteed to terminate (some presentations have no finite complete
//!   system, infinite structures have infinitely many normal forms), so both
//!   check their budget at the top of every round.

use crate::error::Exhausted;
use std::time::{Duration, Instant};

bitflags::bitflags! {
    /// Optional behaviour of completion and reduction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Strategy: u8 {
        /// Drop rules whose pattern contains a newly added pattern.
        const SUBSUME         = 1 << 0;
        /// Reduce the critical pairs of a round on the rayon pool.
        const PARALLEL_REDUCE = 1 << 1;
        /// Restart from the first (shortest) rule after every firing instead
        /// of finishing the pass.
        const EAGER_RESTART   = 1 << 2;
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::SUBSUME | Strategy::PARALLEL_REDUCE
    }
}

/// Limits for the completion and enumeration loops. `None` means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Budget {
    /// Completion rounds allowed in total (resumed runs included).
    pub max_rounds: Option<usize>,
    /// Size the completed rule set may not exceed.
    pub max_rules: Option<usize>,
    /// Number of normal forms enumeration may not exceed.
    pub max_elements: Option<usize>,
    pub deadline: Option<Instant>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Budget::default()
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    pub fn with_max_rules(mut self, rules: usize) -> Self {
        self.max_rules = Some(rules);
        self
    }

    pub fn with_max_elements(mut self, elements: usize) -> Self {
        self.max_elements = Some(elements);
        self
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub(crate) fn check_completion(&self, rounds: usize, rules: usize) -> Option<Exhausted> {
        if let Some(max) = self.max_rounds.filter(|&max| rounds >= max) {
            return Some(Exhausted::Rounds(max));
        }
        if let Some(max) = self.max_rules.filter(|&max| rules > max) {
            return Some(Exhausted::Rules(max));
        }
        self.check_deadline()
    }

    pub(crate) fn check_enumeration(&self, elements: usize) -> Option<Exhausted> {
        if let Some(max) = self.max_elements.filter(|&max| elements > max) {
            return Some(Exhausted::Elements(max));
        }
        self.check_deadline()
    }

    fn check_deadline(&self) -> Option<Exhausted> {
        self.deadline.filter(|&deadline| Instant::now() >= deadline).map(|_| Exhausted::Deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_subsumes_in_parallel() {
        let strategy = Strategy::default();
        assert!(strategy.contains(Strategy::SUBSUME));
        assert!(strategy.contains(Strategy::PARALLEL_REDUCE));
        assert!(!strategy.contains(Strategy::EAGER_RESTART));
    }

    #[test]
    fn unlimited_budget_never_trips() {
        let budget = Budget::unlimited();
        assert_eq!(budget.check_completion(usize::MAX - 1, usize::MAX), None);
        assert_eq!(budget.check_enumeration(usize::MAX), None);
    }

    #[test]
    fn limits_trip_at_their_bounds() {
        let budget = Budget::unlimited().with_max_rounds(2).with_max_rules(10).with_max_elements(5);
        assert_eq!(budget.check_completion(1, 10), None);
        assert_eq!(budget.check_completion(2, 3), Some(Exhausted::Rounds(2)));
        assert_eq!(budget.check_completion(0, 11), Some(Exhausted::Rules(10)));
        assert_eq!(budget.check_enumeration(5), None);
        assert_eq!(budget.check_enumeration(6), Some(Exhausted::Elements(5)));
    }

    #[test]
    fn past_deadline_trips() {
        let budget = Budget::unlimited().with_timeout(Duration::ZERO);
        assert_eq!(budget.check_completion(0, 0), Some(Exhausted::Deadline));
        assert_eq!(budget.check_enumeration(0), Some(Exhausted::Deadline));
    }
}
