use super::generator::{Generator, concatenate, invert};
use crate::engine::Relation;
use crate::error::Error;
use tracing::trace;

/// Parse one presentation line into a relation.
///
/// ```text
/// line       := expression ( '=' ( '1' | expression ) )?
/// expression := factor+
/// factor     := ( letter '\''? | '(' expression ')' ) ( '^' '-'? digits )?
/// ```
///
/// A missing right side and `=1` both mean the identity. Whitespace is not
/// allowed anywhere.
pub fn parse_line(line: &str) -> Result<Relation<Generator>, Error> {
    let mut parser = Parser { line, pos: 0 };
    let left = parser.expression()?;
    let mut right = Vec::new();

    if parser.peek() == Some('=') {
        parser.pos += 1;
        if parser.peek() == Some('1') {
            parser.pos += 1;
        } else {
            right = parser.expression()?;
        }
    }
    if parser.pos != line.len() {
        return Err(Error::parse(line, parser.pos, "premature end of line"));
    }
    Ok(Relation::new(left, right))
}

/// Parse a whole presentation, one relation per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_presentation(text: &str) -> Result<Vec<Relation<Generator>>, Error> {
    let mut relations = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        relations.push(parse_line(line)?);
    }
    trace!(relations = relations.len(), "presentation parsed");
    Ok(relations)
}

struct Parser<'a> {
    line: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn expression(&mut self) -> Result<Vec<Generator>, Error> {
        let mut result = self
            .factor()?
            .ok_or_else(|| Error::parse(self.line, self.pos, "start of expression expected"))?;
        while let Some(factor) = self.factor()? {
            result = concatenate(result, &factor);
        }
        Ok(result)
    }

    /// `None` at the end of the line, before `=` and before `)`.
    fn factor(&mut self) -> Result<Option<Vec<Generator>>, Error> {
        let base = match self.peek() {
            None | Some('=') | Some(')') => return Ok(None),
            Some('(') => {
                self.pos += 1;
                let inner = self.expression()?;
                if self.peek() != Some(')') {
                    return Err(Error::parse(self.line, self.pos, "')' expected"));
                }
                self.pos += 1;
                inner
            }
            Some(_) => vec![self.generator()?],
        };

        if self.peek() != Some('^') {
            return Ok(Some(base));
        }
        let caret = self.pos;
        self.pos += 1;
        let exponent = self.exponent()?;
        if exponent == 0 {
            return Err(Error::ZeroExponent { line: self.line.to_string(), position: caret });
        }

        let base = if exponent < 0 { invert(&base) } else { base };
        let mut power = base.clone();
        for _ in 1..exponent.unsigned_abs() {
            power = concatenate(power, &base);
        }
        Ok(Some(power))
    }

    fn generator(&mut self) -> Result<Generator, Error> {
        let caps = regex!(r"^(\p{Alphabetic})(')?")
            .captures(self.rest())
            .ok_or_else(|| Error::parse(self.line, self.pos, "letter expected"))?;
        let letter = caps[1].chars().next().ok_or_else(|| Error::parse(self.line, self.pos, "letter expected"))?;
        let inverted = caps.get(2).is_some();
        self.pos += caps[0].len();
        Ok(Generator { letter, inverted })
    }

    fn exponent(&mut self) -> Result<i64, Error> {
        let Some(caps) = regex!(r"^(-)?([0-9]+)").captures(self.rest()) else {
            let at = self.pos + usize::from(self.rest().starts_with('-'));
            return Err(Error::parse(self.line, at, "number expected"));
        };
        let magnitude: i64 =
            caps[2].parse().map_err(|_| Error::parse(self.line, self.pos, "exponent out of range"))?;
        let negative = caps.get(1).is_some();
        self.pos += caps[0].len();
        Ok(if negative { -magnitude } else { magnitude })
    }
}
