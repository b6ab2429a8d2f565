use std::fmt;
use std::hash::Hash;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod presentation;

pub use api::{CompletionDetails, GroupOrder, GroupOrderVerbose, Options, group_order, group_order_verbose_with, group_order_with};
pub use engine::{
    Budget, Census, CompletionMetrics, CriticalPair, EnumerationMetrics, Enumerator, LevelMetrics, Normalizer,
    PairSet, RankedShortLex, Relation, RewriteSystem, RoundMetrics, Rule, RuleSet, ShortLex, Spelled, Strategy,
    WordBuf, WordOrder, reduce,
};
pub use error::{Error, Exhausted, Stage};
pub use presentation::{Generator, parse_line, parse_presentation};

// --- Symbols and words -------------------------------------------------------

/// Anything usable as a generator symbol.
///
/// The engine only needs equality and hashing on symbols; orders are supplied
/// separately through [`WordOrder`]. `Send + Sync` lets critical pairs be
/// reduced on the rayon pool.
pub trait Symbol: Clone + Eq + Hash + fmt::Debug + Send + Sync {}

impl<T> Symbol for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync {}

/// An immutable word, as stored in relations and returned as a normal form.
pub type Word<G> = Vec<G>;
