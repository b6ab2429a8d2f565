//! Word orders.
//!
//! Completion only terminates on its own terms if every rule strictly
//! decreases the word it fires on. This module supplies the well-founded
//! orders used to orient rules:
//!
//! - [`ShortLex`]: shorter words first, equal lengths compared position by
//!   position with the symbol type's own `Ord`.
//! - [`RankedShortLex`]: the same shape, but symbols are compared through an
//!   explicit alphabet ranking instead of `Ord`.
//!
//! ```text
//! ""  <  "a"  <  "b"  <  "aa"  <  "ab"  <  "ba"  <  "bb"  <  "aaa" ...
//! ```
//!
//! The order must stay fixed for the whole lifetime of a `RewriteSystem`;
//! it is passed in once at construction and never re-derived.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// A total, strict order over words of `G`.
///
/// Implementations must be consistent for a whole run: `compare(a, b)` may
/// only return `Equal` for syntactically equal words, otherwise rules cannot
/// be oriented (see [`Error::InvalidRule`](crate::Error::InvalidRule)).
pub trait WordOrder<G>: Sync {
    fn compare(&self, a: &[G], b: &[G]) -> Ordering;

    /// `true` if `a` ranks strictly above `b`.
    fn greater(&self, a: &[G], b: &[G]) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

/// Shortlex over the symbol type's natural order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortLex;

impl<G: Ord> WordOrder<G> for ShortLex {
    fn compare(&self, a: &[G], b: &[G]) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

/// Shortlex over an explicit alphabet ranking.
///
/// Symbols rank in the order they were first supplied. Symbols missing from
/// the ranking sort after every ranked symbol and tie with each other, so
/// callers should rank every symbol that occurs in their relations.
#[derive(Debug, Clone)]
pub struct RankedShortLex<G: Eq + Hash> {
    ranks: FxHashMap<G, usize>,
}

impl<G: Eq + Hash + Clone> RankedShortLex<G> {
    /// Rank symbols by first occurrence in `alphabet`; repeats are ignored.
    pub fn new(alphabet: impl IntoIterator<Item = G>) -> Self {
        let mut ranks = FxHashMap::default();
        for symbol in alphabet {
            let next = ranks.len();
            ranks.entry(symbol).or_insert(next);
        }
        RankedShortLex { ranks }
    }

    pub fn rank(&self, symbol: &G) -> usize {
        self.ranks.get(symbol).copied().unwrap_or(usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl<G: Eq + Hash + Clone + Sync> WordOrder<G> for RankedShortLex<G> {
    fn compare(&self, a: &[G], b: &[G]) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| {
            a.iter()
                .zip(b)
                .map(|(x, y)| self.rank(x).cmp(&self.rank(y)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}
