//! Rewriting and completion engine.
//!
//! The engine is generic over the symbol type `G` (see [`crate::Symbol`]) and
//! over the word order `O`. Nothing here knows about the presentation syntax;
//! the parser and the driver sit on top of it.
//!
//! ## How the parts work together
//!
//! ```text
//! relations ── RewriteSystem::new ──▶ seed rules          (system.rs)
//!              (orient with O)           │
//!                                        │ complete_within(budget)
//!                                        v
//!                 ┌──────────── completion round ─────────────┐
//!                 │ critical pairs        (rule.rs, critical.rs)│
//!                 │ reduce on snapshot    (rayon, optional)     │
//!                 │ merge + orient        (order.rs)            │
//!                 │ subsume + sort                              │
//!                 └─────────────────────────┬───────────────────┘
//!                                           v
//!                                      Normalizer ──▶ normal forms
//!                                           │
//!                               Enumerator::census     (enumerate.rs)
//!                                           v
//!                                  Census (element count)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `order.rs`: the [`WordOrder`] trait and the shortlex orders.
//! - `word.rs`: [`WordBuf`], the mutable buffer rules rewrite in place.
//! - `rule.rs`: KMP matching, in-place application, overlaps, subsumption.
//! - `critical.rs`: [`CriticalPair`] with order-insensitive identity.
//! - `strategy.rs`: [`Strategy`] flags and [`Budget`] limits.
//! - `system.rs`: construction, reduction and the completion loop.
//! - `enumerate.rs`: breadth-first normal-form census.
//! - `metrics.rs`: per-round and per-level run data.
//!
//! ## Debugging
//!
//! Completion rounds and enumeration levels emit `debug` events, individual
//! rule insertions and removals emit `trace` events (target `kbs`).

#[path = "engine/critical.rs"]
mod critical;
#[path = "engine/enumerate.rs"]
mod enumerate;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/order.rs"]
mod order;
#[path = "engine/rule.rs"]
mod rule;
#[path = "engine/strategy.rs"]
mod strategy;
#[path = "engine/system.rs"]
mod system;
#[path = "engine/word.rs"]
mod word;


pub use critical::{CriticalPair, PairSet};
pub use enumerate::{Census, Enumerator};
pub use metrics::{CompletionMetrics, EnumerationMetrics, LevelMetrics, RoundMetrics};
pub use order::{RankedShortLex, ShortLex, WordOrder};
pub use rule::Rule;
pub use strategy::{Budget, Strategy};
pub use system::{Normalizer, Relation, RewriteSystem, RuleSet, reduce};
pub use word::{Spelled, WordBuf};
