//! Critical pairs and their deduplication.
//!
//! Two rules whose patterns overlap can rewrite the same word in two
//! different ways. The two one-step results form a *critical pair*:
//!
//! ```text
//! rule 1:  A B C D -> P
//! rule 2:      C D E F -> Q
//! overlap: A B C D E F
//!            ├─ rule 1 first: P E F
//!            └─ rule 2 first: A B Q
//! ```
//!
//! Completion collects the pairs of a round into a set so the same ambiguity
//! is resolved only once. A pair is the same pair regardless of which side
//! is called first, so equality and hashing are symmetric in the two reducts.
//! The overlap word is kept for diagnostics only and does not take part in
//! equality.

use super::word::{Spelled, WordBuf};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHasher};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Insertion-ordered set of critical pairs.
pub type PairSet<G> = IndexSet<CriticalPair<G>, FxBuildHasher>;

/// The two divergent one-step reducts of an overlap word.
#[derive(Debug, Clone)]
pub struct CriticalPair<G> {
    /// Word both rules could fire on.
    pub overlap: Vec<G>,
    pub reduct1: WordBuf<G>,
    pub reduct2: WordBuf<G>,
}

impl<G> CriticalPair<G> {
    pub fn new(overlap: Vec<G>, reduct1: impl Into<WordBuf<G>>, reduct2: impl Into<WordBuf<G>>) -> Self {
        CriticalPair { overlap, reduct1: reduct1.into(), reduct2: reduct2.into() }
    }
}

impl<G: PartialEq> CriticalPair<G> {
    /// `true` if both reducts are already the same word.
    pub fn is_trivial(&self) -> bool {
        self.reduct1 == self.reduct2
    }
}

impl<G: PartialEq> PartialEq for CriticalPair<G> {
    fn eq(&self, other: &Self) -> bool {
        (self.reduct1 == other.reduct1 && self.reduct2 == other.reduct2)
            || (self.reduct1 == other.reduct2 && self.reduct2 == other.reduct1)
    }
}

impl<G: Eq> Eq for CriticalPair<G> {}

impl<G: Hash> Hash for CriticalPair<G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent combination keeps swapped pairs in one bucket.
        state.write_u64(side_hash(&self.reduct1).wrapping_add(side_hash(&self.reduct2)));
    }
}

fn side_hash<G: Hash>(word: &[G]) -> u64 {
    let mut hasher = FxHasher::default();
    word.hash(&mut hasher);
    hasher.finish()
}

impl<G: fmt::Display> fmt::Display for CriticalPair<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {} -> {}", Spelled(&self.reduct1), Spelled(&self.overlap), Spelled(&self.reduct2))
    }
}
