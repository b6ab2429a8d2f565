use std::fmt;

/// A generator letter or its formal inverse.
///
/// The derived order (letter first, then the inversion flag) is what
/// [`ShortLex`](crate::ShortLex) uses, so `a < a' < b < b'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generator {
    pub letter: char,
    pub inverted: bool,
}

impl Generator {
    pub fn new(letter: char) -> Self {
        Generator { letter, inverted: false }
    }

    pub fn inverse(self) -> Self {
        Generator { letter: self.letter, inverted: !self.inverted }
    }

    pub fn is_inverse_of(&self, other: &Generator) -> bool {
        self.letter == other.letter && self.inverted != other.inverted
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted { write!(f, "{}'", self.letter) } else { write!(f, "{}", self.letter) }
    }
}

/// Formal inverse of a word: reversed, every generator inverted.
pub(crate) fn invert(word: &[Generator]) -> Vec<Generator> {
    word.iter().rev().map(|g| g.inverse()).collect()
}

/// Append `right` to `left`, cancelling inverse pairs at the seam.
///
/// Both inputs are freely reduced, so cancellation can only happen where
/// they meet.
pub(crate) fn concatenate(mut left: Vec<Generator>, right: &[Generator]) -> Vec<Generator> {
    let mut skip = 0;
    while let (Some(last), Some(next)) = (left.last(), right.get(skip)) {
        if !last.is_inverse_of(next) {
            break;
        }
        left.pop();
        skip += 1;
    }
    left.extend_from_slice(&right[skip..]);
    left
}
