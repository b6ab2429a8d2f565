//! Normal-form census by letter pasting.
//!
//! Once a system is complete, every element of the presented structure has
//! exactly one normal form, and every element is reachable from the identity
//! by appending generators one at a time. Enumeration is a breadth-first
//! search over normal forms:
//!
//! ```text
//! level 0:  { 1 }
//! level 1:  paste { 1 } × {R, S}      -> NF -> { R, S }
//! level 2:  paste { R, S } × {R, S}   -> NF -> { RR, RS, SR, SS } minus seen
//! ...       until a level discovers nothing new
//! ```
//!
//! The search only stops for finite structures; the [`Budget`] is the way
//! out for infinite ones.

use super::metrics::{EnumerationMetrics, LevelMetrics};
use super::order::WordOrder;
use super::strategy::Budget;
use super::system::RewriteSystem;
use crate::Symbol;
use crate::error::{Error, Stage};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::time::Instant;
use tracing::debug;

/// Breadth-first enumerator over a fixed alphabet.
#[derive(Debug, Clone)]
pub struct Enumerator<G> {
    alphabet: Vec<G>,
}

/// Result of a census: all normal forms, sorted by the system's word order.
#[derive(Debug, Clone)]
pub struct Census<G> {
    pub normal_forms: Vec<Vec<G>>,
    pub metrics: EnumerationMetrics,
}

impl<G> Census<G> {
    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.normal_forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normal_forms.is_empty()
    }
}

impl<G: Symbol> Enumerator<G> {
    /// Enumerator pasting the letters of `alphabet`; repeats are ignored.
    pub fn new(alphabet: impl IntoIterator<Item = G>) -> Self {
        let alphabet: IndexSet<G, FxBuildHasher> = alphabet.into_iter().collect();
        Enumerator { alphabet: alphabet.into_iter().collect() }
    }

    /// Enumerator over the generators occurring in `system`'s relations.
    pub fn for_system<O>(system: &RewriteSystem<G, O>) -> Self
    where
        O: WordOrder<G>,
    {
        Self::new(system.alphabet().iter().cloned())
    }

    pub fn alphabet(&self) -> &[G] {
        &self.alphabet
    }

    /// Every word of `words` extended by every letter of the alphabet.
    pub fn paste<'w>(&self, words: impl IntoIterator<Item = &'w Vec<G>>) -> Vec<Vec<G>>
    where
        G: 'w,
    {
        let mut out = Vec::new();
        for word in words {
            for letter in &self.alphabet {
                let mut next = Vec::with_capacity(word.len() + 1);
                next.extend_from_slice(word);
                next.push(letter.clone());
                out.push(next);
            }
        }
        out
    }

    /// Number of distinct elements, completing `system` first if needed.
    ///
    /// Does not return for infinite structures; see [`census`](Self::census).
    pub fn count<O: WordOrder<G>>(&self, system: &mut RewriteSystem<G, O>) -> Result<usize, Error> {
        Ok(self.census(system, &Budget::unlimited())?.len())
    }

    /// All normal forms reachable from the identity, within `budget`.
    ///
    /// The budget covers both completion and enumeration. The identity's own
    /// normal form is always part of the census.
    pub fn census<O: WordOrder<G>>(
        &self,
        system: &mut RewriteSystem<G, O>,
        budget: &Budget,
    ) -> Result<Census<G>, Error> {
        let normalizer = system.complete_within(budget)?;
        let started = Instant::now();
        let mut metrics = EnumerationMetrics::default();

        let identity = normalizer.normal_form(&[]);
        let mut discovered: FxHashSet<Vec<G>> = FxHashSet::default();
        discovered.insert(identity.clone());
        let mut frontier = vec![identity];

        while !frontier.is_empty() {
            let level = metrics.levels.len();
            if let Some(reason) = budget.check_enumeration(discovered.len()) {
                debug!(level, found = discovered.len(), %reason, "enumeration interrupted");
                return Err(Error::DidNotConverge {
                    stage: Stage::Enumeration,
                    rounds: level,
                    size: discovered.len(),
                    reason,
                });
            }

            let level_start = Instant::now();
            let candidates = self.paste(&frontier);
            let mut next = Vec::new();
            for candidate in &candidates {
                let normal = normalizer.normal_form(candidate);
                if !discovered.contains(&normal) {
                    discovered.insert(normal.clone());
                    next.push(normal);
                }
            }

            debug!(level = level + 1, candidates = candidates.len(), new = next.len(), "enumeration level");
            metrics.levels.push(LevelMetrics {
                duration: level_start.elapsed(),
                candidates: candidates.len(),
                discovered: next.len(),
            });
            frontier = next;
        }

        let order = normalizer.order();
        let mut normal_forms: Vec<Vec<G>> = discovered.into_iter().collect();
        normal_forms.sort_by(|a, b| order.compare(a, b));
        metrics.total = started.elapsed();
        debug!(elements = normal_forms.len(), levels = metrics.levels.len(), "enumeration finished");

        Ok(Census { normal_forms, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::order::ShortLex;
    use crate::engine::system::Relation;
    use pretty_assertions::assert_eq;

    fn w(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn paste_extends_every_word_by_every_letter() {
        let enumerator = Enumerator::new([1, 2, 3, 2]);
        assert_eq!(enumerator.alphabet(), &[1, 2, 3]);

        let words = vec![vec![7], vec![8], vec![9]];
        let mut pasted = enumerator.paste(&words);
        pasted.sort();
        let mut expected = Vec::new();
        for j in 7..=9 {
            for i in 1..=3 {
                expected.push(vec![j, i]);
            }
        }
        assert_eq!(pasted, expected);
    }

    #[test]
    fn census_of_klein_four_group() {
        let relations = [Relation::new(w("aa"), w("")), Relation::new(w("bb"), w("")), Relation::new(w("abab"), w(""))];
        let mut system = RewriteSystem::new(relations, ShortLex).unwrap();
        let enumerator = Enumerator::for_system(&system);
        let census = enumerator.census(&mut system, &Budget::unlimited()).unwrap();
        assert_eq!(census.normal_forms, vec![w(""), w("a"), w("b"), w("ab")]);
        assert_eq!(census.metrics.levels.len(), 3);
        assert_eq!(census.metrics.levels.last().unwrap().discovered, 0);
    }

    #[test]
    fn count_completes_the_system_on_demand() {
        let relations = [Relation::new(w("RRR"), w("")), Relation::new(w("SS"), w("")), Relation::new(w("RSRS"), w(""))];
        let mut system = RewriteSystem::new(relations, ShortLex).unwrap();
        assert!(!system.is_complete());
        assert_eq!(Enumerator::for_system(&system).count(&mut system).unwrap(), 6);
        assert!(system.is_complete());
    }

    #[test]
    fn infinite_structures_stop_at_the_element_budget() {
        // Free commutative monoid on two letters.
        let mut system = RewriteSystem::new([Relation::new(w("ba"), w("ab"))], ShortLex).unwrap();
        let enumerator = Enumerator::for_system(&system);
        let err = enumerator.census(&mut system, &Budget::unlimited().with_max_elements(50)).unwrap_err();
        match err {
            Error::DidNotConverge { stage, size, .. } => {
                assert_eq!(stage, Stage::Enumeration);
                assert!(size > 50);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
