//! Mutable words.
//!
//! Rules rewrite words in place. A match is replaced by splicing the
//! replacement over the matched span, which may grow or shrink the word.
//! `WordBuf` is a plain index-addressed buffer with the three splice
//! primitives the rewriting code needs:
//!
//! ```text
//! overwrite(at, src)      a b [c d] e   ->  a b [x y] e
//! remove_range(at, len)   a b [c d] e   ->  a b e
//! insert_at(at, src)      a b | e       ->  a b [x y] e
//! ```
//!
//! Stored words (rule sides, normal forms) use plain `Vec<G>` / `Box<[G]>`.

use std::fmt;
use std::ops::Deref;

/// Growable word buffer used during rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WordBuf<G> {
    symbols: Vec<G>,
}

impl<G> WordBuf<G> {
    pub fn new() -> Self {
        WordBuf { symbols: Vec::new() }
    }

    pub fn as_slice(&self) -> &[G] {
        &self.symbols
    }

    pub fn into_vec(self) -> Vec<G> {
        self.symbols
    }

    pub fn push(&mut self, symbol: G) {
        self.symbols.push(symbol);
    }

    /// Remove `len` symbols starting at `start`.
    pub fn remove_range(&mut self, start: usize, len: usize) {
        if len > 0 {
            self.symbols.drain(start..start + len);
        }
    }
}

impl<G: Clone> WordBuf<G> {
    /// Overwrite `src.len()` symbols starting at `at`.
    pub fn overwrite(&mut self, at: usize, src: &[G]) {
        self.symbols[at..at + src.len()].clone_from_slice(src);
    }

    /// Insert `src` so that its first symbol lands at index `at`.
    pub fn insert_at(&mut self, at: usize, src: &[G]) {
        if !src.is_empty() {
            self.symbols.splice(at..at, src.iter().cloned());
        }
    }

    /// Replace the `span` symbols starting at `start` with `replacement`.
    ///
    /// The replacement overwrites the tail of the span; a shorter replacement
    /// removes the leftover head, a longer one inserts its extra prefix.
    /// Everything outside the span is left untouched.
    pub fn replace_span(&mut self, start: usize, span: usize, replacement: &[G]) {
        let len = replacement.len();
        if len <= span {
            let excess = span - len;
            self.overwrite(start + excess, replacement);
            self.remove_range(start, excess);
        } else {
            let extra = len - span;
            self.overwrite(start, &replacement[extra..]);
            self.insert_at(start, &replacement[..extra]);
        }
    }
}

impl<G> Deref for WordBuf<G> {
    type Target = [G];

    fn deref(&self) -> &[G] {
        &self.symbols
    }
}

impl<G> From<Vec<G>> for WordBuf<G> {
    fn from(symbols: Vec<G>) -> Self {
        WordBuf { symbols }
    }
}

impl<G: Clone> From<&[G]> for WordBuf<G> {
    fn from(symbols: &[G]) -> Self {
        WordBuf { symbols: symbols.to_vec() }
    }
}

impl<G> FromIterator<G> for WordBuf<G> {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        WordBuf { symbols: iter.into_iter().collect() }
    }
}

/// Displays a word by concatenating its symbols; the empty word prints as `1`.
pub struct Spelled<'a, G>(pub &'a [G]);

impl<G: fmt::Display> fmt::Display for Spelled<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("1");
        }
        for symbol in self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> WordBuf<char> {
        s.chars().collect()
    }

    fn text(b: &WordBuf<char>) -> String {
        b.iter().collect()
    }

    #[test]
    fn shrinking_replacement_keeps_surroundings() {
        let mut b = buf("xxABCDyy");
        b.replace_span(2, 4, &['P']);
        assert_eq!(text(&b), "xxPyy");
    }

    #[test]
    fn growing_replacement_inserts_prefix() {
        let mut b = buf("ABCDEFGHIJK");
        b.replace_span(3, 3, &"-def-".chars().collect::<Vec<_>>());
        assert_eq!(text(&b), "ABC-def-GHIJK");
    }

    #[test]
    fn empty_replacement_deletes_span() {
        let mut b = buf("RRRS");
        b.replace_span(0, 3, &[]);
        assert_eq!(text(&b), "S");
    }

    #[test]
    fn spelled_uses_one_for_identity() {
        assert_eq!(Spelled::<char>(&[]).to_string(), "1");
        assert_eq!(Spelled(&['R', 'S']).to_string(), "RS");
    }
}
