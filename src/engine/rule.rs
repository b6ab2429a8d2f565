//! Rewrite rules.
//!
//! A `Rule` is an ordered pair `pattern -> replacement` over symbols of `G`.
//! Rules are immutable after construction. Construction also derives the
//! Knuth–Morris–Pratt failure table of the pattern, which every scan reuses:
//!
//! ```text
//! pattern:  A B A B C
//! failure:  0 0 1 2 0      (longest proper border of pattern[..=i])
//!
//! word:     A B A B A B C
//!                   ^ mismatch on 'C' vs 'A' with 4 matched
//!                     -> fall back to failure[3] = 2 matched, keep cursor
//! ```
//!
//! A scan never moves the cursor backwards, so finding the first match is
//! linear in the length of the word whatever the pattern's self-overlaps.
//!
//! A rule does not know the word order. Orientation (`pattern` ranked above
//! `replacement`) is the job of [`RewriteSystem`](super::RewriteSystem).

use super::critical::{CriticalPair, PairSet};
use super::word::{Spelled, WordBuf};
use std::fmt;
use std::hash::{Hash, Hasher};

pub struct Rule<G> {
    pattern: Box<[G]>,
    replacement: Box<[G]>,
    failure: Box<[usize]>,
}

impl<G: Eq> Rule<G> {
    pub fn new(pattern: impl Into<Box<[G]>>, replacement: impl Into<Box<[G]>>) -> Self {
        let pattern = pattern.into();
        let failure = failure_table(&pattern);
        Rule { pattern, replacement: replacement.into(), failure }
    }

    pub fn pattern(&self) -> &[G] {
        &self.pattern
    }

    pub fn replacement(&self) -> &[G] {
        &self.replacement
    }

    /// Start index of the first occurrence of the pattern in `word`.
    ///
    /// The empty pattern never matches.
    pub fn find_in(&self, word: &[G]) -> Option<usize> {
        let len = self.pattern.len();
        if len == 0 {
            return None;
        }
        let mut matched = 0;
        for (pos, symbol) in word.iter().enumerate() {
            while matched > 0 && self.pattern[matched] != *symbol {
                matched = self.failure[matched - 1];
            }
            if self.pattern[matched] == *symbol {
                matched += 1;
            }
            if matched == len {
                return Some(pos + 1 - len);
            }
        }
        None
    }

    /// `true` if this rule's pattern occurs inside `other`'s pattern.
    ///
    /// A rule never optimizes itself. When this holds, `other` can be dropped
    /// from a system that always has this rule: any word `other` fires on is
    /// also rewritten by this rule.
    pub fn can_optimize(&self, other: &Rule<G>) -> bool {
        self != other && self.find_in(&other.pattern).is_some()
    }
}

impl<G: Eq + Clone + Hash> Rule<G> {
    /// Rewrite the first occurrence of the pattern in `word`, in place.
    ///
    /// Returns `true` if a replacement happened. Only the first match is
    /// rewritten; callers loop until no rule fires.
    pub fn apply(&self, word: &mut WordBuf<G>) -> bool {
        match self.find_in(word) {
            Some(start) => {
                word.replace_span(start, self.pattern.len(), &self.replacement);
                true
            }
            None => false,
        }
    }

    /// Critical pairs from suffixes of this pattern overlapping prefixes of
    /// `other`'s pattern.
    ///
    /// ```text
    /// k = 2:   this.pattern   A B [X X]
    ///          other.pattern      [X X] E F
    ///          overlap        A B  X X  E F
    ///          reduct1        this.replacement ++ E F
    ///          reduct2        A B ++ other.replacement
    /// ```
    ///
    /// Overlap lengths run from the shorter pattern's length down to 1.
    /// Pairs whose reducts are already identical are skipped.
    pub fn critical_pairs(&self, other: &Rule<G>) -> PairSet<G> {
        let (p1, p2) = (&self.pattern, &other.pattern);
        let mut pairs = PairSet::default();

        for k in (1..=p1.len().min(p2.len())).rev() {
            if p1[p1.len() - k..] != p2[..k] {
                continue;
            }
            let tail = &p2[k..];
            let head = &p1[..p1.len() - k];

            let reduct1: WordBuf<G> = self.replacement.iter().chain(tail).cloned().collect();
            let reduct2: WordBuf<G> = head.iter().chain(other.replacement.iter()).cloned().collect();
            if reduct1 == reduct2 {
                continue;
            }
            let overlap: Vec<G> = p1.iter().chain(tail).cloned().collect();
            pairs.insert(CriticalPair::new(overlap, reduct1, reduct2));
        }
        pairs
    }

    /// The pair left behind when this rule makes `other` redundant.
    ///
    /// `other.pattern` rewritten once by this rule must still meet
    /// `other.replacement`; returning the two as a pair lets completion keep
    /// that equation after `other` is dropped.
    pub fn inclusion_pair(&self, other: &Rule<G>) -> Option<CriticalPair<G>> {
        if !self.can_optimize(other) {
            return None;
        }
        let mut reduced = WordBuf::from(&other.pattern[..]);
        self.apply(&mut reduced);
        let pair = CriticalPair::new(other.pattern.to_vec(), reduced, &other.replacement[..]);
        (!pair.is_trivial()).then_some(pair)
    }
}

/// KMP failure table: `table[i]` is the length of the longest proper prefix
/// of `pattern[..=i]` that is also its suffix.
fn failure_table<G: Eq>(pattern: &[G]) -> Box<[usize]> {
    let mut table = vec![0; pattern.len()];
    let mut border = 0;
    for i in 1..pattern.len() {
        while border > 0 && pattern[i] != pattern[border] {
            border = table[border - 1];
        }
        if pattern[i] == pattern[border] {
            border += 1;
        }
        table[i] = border;
    }
    table.into_boxed_slice()
}

impl<G: Clone> Clone for Rule<G> {
    fn clone(&self) -> Self {
        Rule { pattern: self.pattern.clone(), replacement: self.replacement.clone(), failure: self.failure.clone() }
    }
}

// The failure table is derived from the pattern, so it stays out of equality.
impl<G: PartialEq> PartialEq for Rule<G> {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.replacement == other.replacement
    }
}

impl<G: Eq> Eq for Rule<G> {}

impl<G: Hash> Hash for Rule<G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
        self.replacement.hash(state);
    }
}

impl<G: fmt::Debug> fmt::Debug for Rule<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("pattern", &self.pattern).field("replacement", &self.replacement).finish()
    }
}

impl<G: fmt::Display> fmt::Display for Rule<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", Spelled(&self.pattern), Spelled(&self.replacement))
    }
}
