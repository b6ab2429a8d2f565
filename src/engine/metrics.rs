//! Engine run metrics.
//!
//! Completion and enumeration are both round-based loops. Each round records
//! a small struct so a run can be inspected after the fact (see the verbose
//! report in the `kbs` binary) without logging every rule:
//!
//! ```text
//! CompletionMetrics
//!   ├─ round 1: pairs=6  joined=2  added=4  removed=1  rules=6
//!   ├─ round 2: ...
//!   └─ total
//! EnumerationMetrics
//!   ├─ level 1: candidates=2  discovered=2
//!   └─ ...
//! ```
//!
//! Metrics survive an interrupted run: a resumed completion keeps appending
//! rounds to the same `CompletionMetrics`.

use std::time::Duration;

// --- Completion --------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct CompletionMetrics {
    /// Time spent inside completion, summed over resumed runs.
    pub total: Duration,
    /// Size of the oriented seed rule set.
    pub seed_rules: usize,
    /// One entry per finished round.
    pub rounds: Vec<RoundMetrics>,
}

impl CompletionMetrics {
    /// Rules added over all rounds.
    pub fn added(&self) -> usize {
        self.rounds.iter().map(|r| r.added).sum()
    }

    /// Rules removed by subsumption over all rounds.
    pub fn removed(&self) -> usize {
        self.rounds.iter().map(|r| r.removed).sum()
    }
}

/// A single completion round.
#[derive(Debug, Default, Clone)]
pub struct RoundMetrics {
    pub duration: Duration,
    /// Time spent reducing critical pairs against the round's snapshot.
    pub reduce: Duration,
    /// Distinct critical pairs considered (pending inclusion pairs included).
    pub pairs: usize,
    /// Pairs whose reducts met after reduction.
    pub joined: usize,
    pub added: usize,
    pub removed: usize,
    /// Size of the rule set at the end of the round.
    pub rules: usize,
}

// --- Enumeration -------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct EnumerationMetrics {
    pub total: Duration,
    pub levels: Vec<LevelMetrics>,
}

/// One breadth-first level: every frontier word extended by every letter.
#[derive(Debug, Default, Clone)]
pub struct LevelMetrics {
    pub duration: Duration,
    pub candidates: usize,
    /// New normal forms found on this level.
    pub discovered: usize,
}
