use super::{
    super::{Error as CrateError, Result},
    Group,
};
use std::fmt;

/// The error type for quantifier braces.
#[derive(Debug, Eq, thiserror::Error, PartialEq)]
pub enum Error {
    /// Braces as the first token, or after a token that cannot repeat.
    #[error("quantifier braces must follow a literal, dot, class, group or escape")]
    Misplaced,
    #[error("quantifier braces cannot be empty")]
    Empty,
    #[error("quantifier braces cannot start with a comma")]
    LeadingComma,
    #[error("quantifier braces cannot include multiple commas")]
    MultipleCommas,
    /// The lower bound is not strictly below the upper bound.
    #[error("quantifier range must be rising ({0} >= {1})")]
    NotRising(u32, u32),
    #[error("invalid symbol '{0}' in quantifier braces")]
    InvalidSymbol(char),
    #[error("quantifier bound is too large")]
    Overflow,
}

/// The bounds of a `{n}`, `{n,}` or `{n,m}` quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repetition {
    pub min: u32,
    /// `None` when unbounded.
    pub max: Option<u32>,
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{{{}}}", self.min),
            Some(max) => write!(f, "{{{},{max}}}", self.min),
            None => write!(f, "{{{},}}", self.min),
        }
    }
}

/// Scans the braces whose `{` sits at byte offset `start` of `input`.
/// Returns the bounds and the offset just past the closing `}`.
pub(crate) fn scan(input: &str, start: usize) -> Result<(Repetition, usize)> {
    let fail = |pos, err| CrateError::Quantifier { pos, err };

    let mut pos = start + 1;
    let mut lower = None;
    let mut upper = None;
    let mut comma = false;

    loop {
        let Some(c) = input[pos..].chars().next() else {
            return Err(CrateError::UnclosedGroup {
                pos: start,
                group: Group::Quantifier,
            });
        };

        match c {
            '}' => {
                if pos == start + 1 {
                    return Err(fail(start, Error::Empty));
                }
                pos += 1;
                break;
            }
            ',' => {
                if comma {
                    return Err(fail(pos, Error::MultipleCommas));
                }
                if lower.is_none() {
                    return Err(fail(pos, Error::LeadingComma));
                }
                comma = true;
                pos += 1;
            }
            '0'..='9' => {
                let digits = input[pos..]
                    .find(|c: char| !c.is_ascii_digit())
                    .map_or(&input[pos..], |end| &input[pos..pos + end]);
                let number: u32 = digits.parse().map_err(|_| fail(pos, Error::Overflow))?;

                if comma {
                    if let Some(low) = lower
                        && low >= number
                    {
                        return Err(fail(pos, Error::NotRising(low, number)));
                    }
                    upper = Some(number);
                } else {
                    lower = Some(number);
                }
                pos += digits.len();
            }
            c => return Err(fail(pos, Error::InvalidSymbol(c))),
        }
    }

    // `lower` is always set once the braces close without an error.
    let min = lower.unwrap_or_default();
    let max = if comma { upper } else { Some(min) };

    Ok((Repetition { min, max }, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(
            scan("{3}", 0),
            Ok((
                Repetition {
                    min: 3,
                    max: Some(3)
                },
                3
            ))
        );
        assert_eq!(
            scan("a{2,}", 1),
            Ok((Repetition { min: 2, max: None }, 5))
        );
        assert_eq!(
            scan("{1,10}", 0),
            Ok((
                Repetition {
                    min: 1,
                    max: Some(10)
                },
                6
            ))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Repetition { min: 4, max: Some(4) }.to_string(), "{4}");
        assert_eq!(Repetition { min: 1, max: None }.to_string(), "{1,}");
        assert_eq!(Repetition { min: 1, max: Some(2) }.to_string(), "{1,2}");
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            scan("{99999999999}", 0),
            Err(CrateError::Quantifier {
                pos: 1,
                err: Error::Overflow
            })
        );
    }
}
