//! Rewrite systems and Knuth–Bendix completion.
//!
//! This module is the operational core of the engine:
//!
//! - Orient input relations into seed rules (larger side becomes the pattern).
//! - Reduce words to normal form by applying rules until none fires.
//! - Complete the seed rules into a confluent rule set by resolving every
//!   critical pair, pruning rules that new rules make redundant.
//!
//! ## Round structure
//!
//! Completion runs in rounds until a round finds no critical pairs:
//!
//! ```text
//! (0) budget check          -> DidNotConverge if a limit ran out
//! (1) collect pairs         -> rules × frontier, both directions, + pending
//! (2) reduce (parallel)     -> both reducts against the round's snapshot
//! (3) merge (sequential)    -> re-reduce against the live set, orient, insert
//! (4) subsume               -> drop rules containing a new pattern; their
//!                              equation goes back in as a pending pair
//! (5) sort                  -> shortest patterns first
//! ```
//!
//! Step (2) only reads the snapshot, so it can fan out over rayon. All
//! mutation happens in (3)–(5) on the calling thread.
//!
//! ## State
//!
//! ```text
//! seeded ──complete()──▶ completed          (memoised; later calls are free)
//!    │                      ▲
//!    └──budget ran out──▶ interrupted ──complete() again──┘
//! ```
//!
//! An interrupted completion keeps its rule set, frontier and pending pairs,
//! so calling again with a larger budget picks up where it stopped.

use super::critical::{CriticalPair, PairSet};
use super::metrics::{CompletionMetrics, RoundMetrics};
use super::order::WordOrder;
use super::rule::Rule;
use super::strategy::{Budget, Strategy};
use super::word::WordBuf;
use crate::Symbol;
use crate::error::{Error, Stage};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, trace};

/// Insertion-ordered rule set without duplicates.
pub type RuleSet<G> = IndexSet<Rule<G>, FxBuildHasher>;

/// A defining relation `left = right`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation<G> {
    pub left: Vec<G>,
    pub right: Vec<G>,
}

impl<G> Relation<G> {
    pub fn new(left: impl Into<Vec<G>>, right: impl Into<Vec<G>>) -> Self {
        Relation { left: left.into(), right: right.into() }
    }
}

impl<G> From<(Vec<G>, Vec<G>)> for Relation<G> {
    fn from((left, right): (Vec<G>, Vec<G>)) -> Self {
        Relation { left, right }
    }
}

/// Seed rules, word order and (once started) the completion state.
#[derive(Debug)]
pub struct RewriteSystem<G, O> {
    order: O,
    strategy: Strategy,
    alphabet: Vec<G>,
    seed: RuleSet<G>,
    completion: Option<Completion<G>>,
}

#[derive(Debug)]
struct Completion<G> {
    rules: RuleSet<G>,
    frontier: Vec<Rule<G>>,
    /// Inclusion pairs of pruned rules, resolved in the next round.
    pending: PairSet<G>,
    converged: bool,
    /// Sides of the equation that could not be oriented. Once set, the rule
    /// set is left half-merged and completion refuses to go on.
    failed: Option<(String, String)>,
    metrics: CompletionMetrics,
}

impl<G: Symbol> Completion<G> {
    fn seeded(seed: &RuleSet<G>) -> Self {
        Completion {
            rules: seed.clone(),
            frontier: seed.iter().cloned().collect(),
            pending: PairSet::default(),
            converged: false,
            failed: None,
            metrics: CompletionMetrics { seed_rules: seed.len(), ..CompletionMetrics::default() },
        }
    }
}

impl<G: Symbol, O: WordOrder<G>> RewriteSystem<G, O> {
    /// Orient `relations` under `order` into the seed rule set.
    ///
    /// Relations with syntactically equal sides are dropped. Fails with
    /// [`Error::InvalidRule`] if two different sides rank equal.
    pub fn new(relations: impl IntoIterator<Item = Relation<G>>, order: O) -> Result<Self, Error> {
        let mut alphabet: IndexSet<G, FxBuildHasher> = IndexSet::default();
        let mut seed = RuleSet::default();

        for relation in relations {
            alphabet.extend(relation.left.iter().chain(&relation.right).cloned());
            match orient(&order, relation.left, relation.right)? {
                Some(rule) => {
                    seed.insert(rule);
                }
                None => trace!("dropping trivial relation"),
            }
        }

        debug!(rules = seed.len(), alphabet = alphabet.len(), "rewrite system seeded");
        Ok(RewriteSystem {
            order,
            strategy: Strategy::default(),
            alphabet: alphabet.into_iter().collect(),
            seed,
            completion: None,
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    /// Generators occurring in the input relations, in first-seen order.
    pub fn alphabet(&self) -> &[G] {
        &self.alphabet
    }

    /// The oriented seed rules.
    pub fn rules(&self) -> &RuleSet<G> {
        &self.seed
    }

    pub fn is_complete(&self) -> bool {
        self.completion.as_ref().is_some_and(|c| c.converged)
    }

    /// The completed rule set, if completion has converged.
    pub fn completed_rules(&self) -> Option<&RuleSet<G>> {
        self.completion.as_ref().filter(|c| c.converged).map(|c| &c.rules)
    }

    /// Metrics of the completion so far (also after an interrupted run).
    pub fn completion_metrics(&self) -> Option<&CompletionMetrics> {
        self.completion.as_ref().map(|c| &c.metrics)
    }

    /// Reduce `word` with the seed rules only.
    ///
    /// The result is irreducible by the seed rules but not necessarily a
    /// canonical representative; use [`normal_form`](Self::normal_form) for that.
    pub fn rewrite(&self, word: &[G]) -> Vec<G> {
        let mut buf = WordBuf::from(word);
        reduce(&self.seed, &mut buf, self.strategy);
        buf.into_vec()
    }

    /// Run completion to convergence.
    pub fn complete(&mut self) -> Result<Normalizer<'_, G, O>, Error> {
        self.complete_within(&Budget::unlimited())
    }

    /// Run completion until it converges or `budget` runs out.
    ///
    /// Idempotent once converged. When the budget runs out the partial state
    /// is kept and [`Error::DidNotConverge`] is returned; calling again
    /// resumes from that state. An [`Error::InvalidRule`] met during a round
    /// is final: every later call returns it again.
    pub fn complete_within(&mut self, budget: &Budget) -> Result<Normalizer<'_, G, O>, Error> {
        let RewriteSystem { order, strategy, seed, completion, .. } = self;
        let strategy = *strategy;
        let state = completion.get_or_insert_with(|| Completion::seeded(seed));

        if let Some((left, right)) = &state.failed {
            return Err(Error::InvalidRule { left: left.clone(), right: right.clone() });
        }
        if !state.converged {
            let started = Instant::now();
            let outcome = run_rounds(state, order, strategy, budget);
            state.metrics.total += started.elapsed();
            if let Err(Error::InvalidRule { left, right }) = &outcome {
                debug!(%left, %right, "completion failed");
                state.failed = Some((left.clone(), right.clone()));
            }
            outcome?;
        }

        Ok(Normalizer { rules: &state.rules, order, strategy })
    }

    /// Canonical normal form of `word`, completing the system first if needed.
    pub fn normal_form(&mut self, word: &[G]) -> Result<Vec<G>, Error> {
        Ok(self.complete()?.normal_form(word))
    }
}

/// Read-only view of a completed system.
#[derive(Debug)]
pub struct Normalizer<'a, G, O> {
    rules: &'a RuleSet<G>,
    order: &'a O,
    strategy: Strategy,
}

impl<'a, G: Symbol, O: WordOrder<G>> Normalizer<'a, G, O> {
    pub fn normal_form(&self, word: &[G]) -> Vec<G> {
        let mut buf = WordBuf::from(word);
        reduce(self.rules, &mut buf, self.strategy);
        buf.into_vec()
    }

    pub fn rules(&self) -> &'a RuleSet<G> {
        self.rules
    }

    pub fn order(&self) -> &'a O {
        self.order
    }
}

/// Apply `rules` to `word` until none fires.
///
/// The default is to attempt every rule once per pass and repeat until a
/// pass changes nothing. With [`Strategy::EAGER_RESTART`] the scan restarts
/// at the first rule after every firing, which favours the short rules at
/// the front of a sorted set.
pub fn reduce<G: Symbol>(rules: &RuleSet<G>, word: &mut WordBuf<G>, strategy: Strategy) {
    if strategy.contains(Strategy::EAGER_RESTART) {
        while rules.iter().any(|rule| rule.apply(word)) {}
        return;
    }
    loop {
        let mut changed = false;
        for rule in rules {
            changed |= rule.apply(word);
        }
        if !changed {
            break;
        }
    }
}

/// Orient two words into a rule, bigger side first. `None` if they are equal.
fn orient<G: Symbol, O: WordOrder<G>>(order: &O, a: Vec<G>, b: Vec<G>) -> Result<Option<Rule<G>>, Error> {
    if a == b {
        return Ok(None);
    }
    match order.compare(&a, &b) {
        Ordering::Greater => Ok(Some(Rule::new(a, b))),
        Ordering::Less => Ok(Some(Rule::new(b, a))),
        Ordering::Equal => Err(Error::InvalidRule { left: format!("{a:?}"), right: format!("{b:?}") }),
    }
}

fn run_rounds<G: Symbol, O: WordOrder<G>>(
    state: &mut Completion<G>,
    order: &O,
    strategy: Strategy,
    budget: &Budget,
) -> Result<(), Error> {
    loop {
        let round = state.metrics.rounds.len();
        if let Some(reason) = budget.check_completion(round, state.rules.len()) {
            debug!(round, rules = state.rules.len(), %reason, "completion interrupted");
            return Err(Error::DidNotConverge {
                stage: Stage::Completion,
                rounds: round,
                size: state.rules.len(),
                reason,
            });
        }

        let round_start = Instant::now();
        let pairs = collect_pairs(state);
        if pairs.is_empty() {
            state.converged = true;
            debug!(rounds = round, rules = state.rules.len(), "completion converged");
            return Ok(());
        }

        let mut pairs: Vec<CriticalPair<G>> = pairs.into_iter().collect();
        let reduce_start = Instant::now();
        reduce_pairs(&state.rules, &mut pairs, strategy);
        let reduce_time = reduce_start.elapsed();

        let mut metrics = RoundMetrics { pairs: pairs.len(), reduce: reduce_time, ..RoundMetrics::default() };
        let mut inserted = Vec::new();
        for mut pair in pairs {
            // Rules inserted earlier in this round may reduce further.
            normalize_pair(&state.rules, &mut pair, strategy);
            match orient(order, pair.reduct1.into_vec(), pair.reduct2.into_vec())? {
                None => metrics.joined += 1,
                Some(rule) => {
                    if state.rules.insert(rule.clone()) {
                        trace!(?rule, "rule added");
                        inserted.push(rule);
                    }
                }
            }
        }
        metrics.added = inserted.len();

        if strategy.contains(Strategy::SUBSUME) {
            metrics.removed = subsume(state, &inserted);
        }
        inserted.retain(|rule| state.rules.contains(rule));
        state.frontier = inserted;

        state.rules.sort_by(|a, b| {
            order.compare(a.pattern(), b.pattern()).then_with(|| order.compare(a.replacement(), b.replacement()))
        });

        metrics.rules = state.rules.len();
        metrics.duration = round_start.elapsed();
        debug!(
            round = round + 1,
            pairs = metrics.pairs,
            joined = metrics.joined,
            added = metrics.added,
            removed = metrics.removed,
            rules = metrics.rules,
            "completion round"
        );
        state.metrics.rounds.push(metrics);
    }
}

/// Critical pairs between every rule and every frontier rule, in both
/// directions, plus the pending inclusion pairs. Clears both inputs.
fn collect_pairs<G: Symbol>(state: &mut Completion<G>) -> PairSet<G> {
    let mut pairs = std::mem::take(&mut state.pending);
    for rule in &state.rules {
        for fresh in &state.frontier {
            pairs.extend(rule.critical_pairs(fresh));
            pairs.extend(fresh.critical_pairs(rule));
        }
    }
    state.frontier.clear();
    pairs
}

fn normalize_pair<G: Symbol>(rules: &RuleSet<G>, pair: &mut CriticalPair<G>, strategy: Strategy) {
    reduce(rules, &mut pair.reduct1, strategy);
    reduce(rules, &mut pair.reduct2, strategy);
}

#[cfg(feature = "parallel")]
fn reduce_pairs<G: Symbol>(snapshot: &RuleSet<G>, pairs: &mut [CriticalPair<G>], strategy: Strategy) {
    if strategy.contains(Strategy::PARALLEL_REDUCE) {
        use rayon::prelude::*;
        pairs.par_iter_mut().for_each(|pair| normalize_pair(snapshot, pair, strategy));
    } else {
        pairs.iter_mut().for_each(|pair| normalize_pair(snapshot, pair, strategy));
    }
}

#[cfg(not(feature = "parallel"))]
fn reduce_pairs<G: Symbol>(snapshot: &RuleSet<G>, pairs: &mut [CriticalPair<G>], strategy: Strategy) {
    pairs.iter_mut().for_each(|pair| normalize_pair(snapshot, pair, strategy));
}

/// Remove every rule one of `inserted` can optimize; returns how many went.
///
/// A removed rule's equation is queued as a pending pair so completion still
/// accounts for it.
fn subsume<G: Symbol>(state: &mut Completion<G>, inserted: &[Rule<G>]) -> usize {
    let mut removed = 0;
    for fresh in inserted {
        if !state.rules.contains(fresh) {
            continue;
        }
        let pending = &mut state.pending;
        state.rules.retain(|other| {
            if !fresh.can_optimize(other) {
                return true;
            }
            trace!(rule = ?other, by = ?fresh, "rule subsumed");
            if let Some(pair) = fresh.inclusion_pair(other) {
                pending.insert(pair);
            }
            removed += 1;
            false
        });
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::order::{RankedShortLex, ShortLex};
    use pretty_assertions::assert_eq;

    fn w(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn rel(left: &str, right: &str) -> Relation<char> {
        Relation::new(w(left), w(right))
    }

    fn a4() -> RewriteSystem<char, ShortLex> {
        RewriteSystem::new([rel("RRR", ""), rel("SSS", ""), rel("RSRS", "")], ShortLex).unwrap()
    }

    #[test]
    fn construction_orients_bigger_side_first() {
        let system = RewriteSystem::new([rel("", "ab"), rel("ba", "ab")], ShortLex).unwrap();
        let rules: Vec<_> = system.rules().iter().map(|r| r.to_string()).collect();
        assert_eq!(rules, vec!["ab -> 1", "ba -> ab"]);
        assert_eq!(system.alphabet(), &['a', 'b']);
        assert!(!system.is_complete());
    }

    #[test]
    fn duplicate_orientations_collapse_and_trivial_relations_drop() {
        let system = RewriteSystem::new([rel("RRR", ""), rel("", "RRR"), rel("SS", "SS")], ShortLex).unwrap();
        assert_eq!(system.rules().len(), 1);
        // Generators of dropped relations still count towards the alphabet.
        assert_eq!(system.alphabet(), &['R', 'S']);
    }

    #[test]
    fn rank_equal_sides_are_rejected() {
        #[derive(Debug)]
        struct LengthOnly;
        impl WordOrder<char> for LengthOnly {
            fn compare(&self, a: &[char], b: &[char]) -> Ordering {
                a.len().cmp(&b.len())
            }
        }
        let err = RewriteSystem::new([rel("ab", "ba")], LengthOnly).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { .. }));
    }

    #[test]
    fn rewrite_uses_seed_rules() {
        let system = a4();
        assert_eq!(system.rewrite(&w("RRRSSSRSRS")), w(""));
        // The seed set is not confluent: this word equals the identity but
        // gets stuck once RRR fires first.
        assert_eq!(system.rewrite(&w("RRRSRSRSSS")), w("SRSR"));
        assert_eq!(system.rewrite(&w("LOL")), w("LOL"));
    }

    #[test]
    fn rewrite_leaves_irreducible_words_alone() {
        let system = a4();
        for word in ["", "R", "RS", "SRRS", "RRSS"] {
            assert_eq!(system.rewrite(&w(word)), w(word));
        }
    }

    #[test]
    fn complete_is_idempotent() {
        let mut system = a4();
        let first: Vec<_> = system.complete().unwrap().rules().iter().cloned().collect();
        let rounds = system.completion_metrics().unwrap().rounds.len();
        let second: Vec<_> = system.complete().unwrap().rules().iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(system.completion_metrics().unwrap().rounds.len(), rounds);
        assert!(system.is_complete());
    }

    #[test]
    fn completed_rules_are_oriented_and_sorted() {
        let mut system = a4();
        system.complete().unwrap();
        let rules = system.completed_rules().unwrap();
        for rule in rules {
            assert!(ShortLex.greater(rule.pattern(), rule.replacement()), "{rule} is not decreasing");
        }
        let patterns: Vec<_> = rules.iter().map(|r| r.pattern().to_vec()).collect();
        let mut sorted = patterns.clone();
        sorted.sort_by(|a, b| ShortLex.compare(a, b));
        assert_eq!(patterns, sorted);
    }

    #[test]
    fn subsumption_drops_rules_containing_a_new_pattern() {
        let mut state = Completion::seeded(&RuleSet::from_iter([
            Rule::new(w("xaby"), w("")),
            Rule::new(w("ab"), w("c")),
            Rule::new(w("zz"), w("")),
        ]));
        let fresh = [Rule::new(w("ab"), w("c"))];
        assert_eq!(subsume(&mut state, &fresh), 1);
        let left: Vec<_> = state.rules.iter().map(|r| r.to_string()).collect();
        assert_eq!(left, vec!["ab -> c", "zz -> 1"]);
        assert_eq!(state.pending.len(), 1);
        assert!(state.pending.contains(&CriticalPair::new(w("xaby"), w("xcy"), w(""))));
    }

    #[test]
    fn unorientable_pair_fails_completion_for_good() {
        // `x` and `y` are unranked, so `x = y` cannot be oriented.
        let order = RankedShortLex::new(['a']);
        let mut system = RewriteSystem::new([rel("aa", "x"), rel("aa", "y")], order).unwrap();

        for _ in 0..2 {
            match system.complete() {
                Err(Error::InvalidRule { left, right }) => {
                    let mut sides = [left, right];
                    sides.sort();
                    assert_eq!(sides, ["['x']".to_string(), "['y']".to_string()]);
                }
                other => panic!("expected InvalidRule, got {:?}", other.map(|n| n.rules().len())),
            }
        }
        assert!(!system.is_complete());
        assert!(system.completed_rules().is_none());
        assert!(system.normal_form(&w("aa")).is_err());
    }

    #[test]
    fn eager_restart_reaches_the_same_normal_forms() {
        let mut plain = a4();
        let mut eager = a4().with_strategy(Strategy::default() | Strategy::EAGER_RESTART);
        for word in ["RSRSRSRRS", "SSSSRRR", "RSSRSSRRS", "SRSRSR"] {
            assert_eq!(plain.normal_form(&w(word)).unwrap(), eager.normal_form(&w(word)).unwrap());
        }
    }
}
