//! Group presentations in text form.
//!
//! One relation per line, written as products of generators:
//!
//! ```text
//! ab^4a
//! (ST^2)^-1SST'=1
//! ((A^2)B)^-1=((B^2)A)^-1
//! ```
//!
//! A letter followed by `'` is the inverse generator, `^n` repeats the
//! preceding factor, `^-n` inverts it first. Words are always freely
//! reduced: no generator ever stands next to its own inverse.

#[path = "presentation/generator.rs"]
mod generator;
#[path = "presentation/parser.rs"]
mod parser;

#[cfg(test)]
#[path = "presentation/tests.rs"]
mod tests;

pub use generator::Generator;
pub use parser::{parse_line, parse_presentation};
