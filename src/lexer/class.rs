use super::{
    super::{
        Error, Result,
        charset::{self, CharSet},
    },
    Group,
    escape::{self, Escape},
};

/// The categories a range may span. Both ends of a range must share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeKind {
    Lower,
    Upper,
    Digit,
}

impl RangeKind {
    fn of(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(RangeKind::Lower)
        } else if c.is_ascii_uppercase() {
            Some(RangeKind::Upper)
        } else if c.is_ascii_digit() {
            Some(RangeKind::Digit)
        } else {
            None
        }
    }
}

/// Scans the bracket class whose `[` sits at byte offset `start` of
/// `input`. Returns the parsed set and the offset just past the closing `]`.
pub(crate) fn scan(input: &str, start: usize) -> Result<(CharSet, usize)> {
    let unclosed = Error::UnclosedGroup {
        pos: start,
        group: Group::CharacterClass,
    };

    let mut set = CharSet::new();
    let mut pos = start + 1;
    let mut first = true;
    // The last plain character, and whether it already bounds a range.
    let mut previous: Option<(char, bool)> = None;

    loop {
        let Some(c) = input[pos..].chars().next() else {
            return Err(unclosed);
        };
        let at = pos;
        pos += c.len_utf8();

        match c {
            ']' => break,
            '\\' => {
                let (escape, end) = escape::scan(input, at)?;
                pos = end;
                match escape {
                    Escape::Char(c) => set.add_char(c),
                    Escape::CodePoint(value) => {
                        set.add_char(char::from_u32(value).ok_or_else(|| Error::InvalidEscape {
                            pos: at,
                            sequence: input[at..end].to_owned(),
                        })?);
                    }
                    Escape::Class { class, negated } => set.add_perl(class, negated),
                    // Inside a class `\b` is a backspace.
                    Escape::WordBoundary { negated: false } => set.add_char('\x08'),
                    Escape::WordBoundary { negated: true } => set.add_char('B'),
                    Escape::Backreference(digit) => set.add_char(char::from(b'0' + digit)),
                }
                previous = None;
            }
            '^' if first => {
                if input[pos..].starts_with(']') {
                    return Err(Error::Class {
                        pos: at,
                        err: charset::Error::EmptyNegation,
                    });
                }
                set.invert();
                previous = None;
            }
            '-' => {
                let Some(next) = input[pos..].chars().next() else {
                    return Err(unclosed);
                };

                if let Some((low, bound)) = previous
                    && next != ']'
                    && let Some(kind) = RangeKind::of(low)
                    && RangeKind::of(next) == Some(kind)
                {
                    let err = if low >= next {
                        Some(charset::Error::Range(low, next))
                    } else if bound {
                        Some(charset::Error::ReusedBound(low, next))
                    } else {
                        None
                    };
                    if let Some(err) = err {
                        return Err(Error::Class { pos: at, err });
                    }

                    // The low end was pushed as a plain character.
                    set.pop_char();
                    set.add_range(low, next)
                        .map_err(|err| Error::Class { pos: at, err })?;
                    pos += next.len_utf8();
                    previous = Some((next, true));
                } else {
                    set.add_char('-');
                    previous = None;
                }
            }
            c => {
                set.add_char(c);
                previous = Some((c, false));
            }
        }

        first = false;
    }

    Ok((set, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(pattern: &str) -> Result<CharSet> {
        scan(pattern, 0).map(|(set, _)| set)
    }

    #[test]
    fn test_range_membership() {
        let set = class("[a-cx]").unwrap();
        assert!(set.contains('b'));
        assert!(set.contains('x'));
        assert!(!set.contains('d'));
        assert!(!set.contains('-'));
    }

    #[test]
    fn test_literal_dashes() {
        assert!(class("[-a]").unwrap().contains('-'));
        assert!(class("[a-]").unwrap().contains('-'));
        assert!(class("[a-Z]").unwrap().contains('-'));
        assert!(!class("[a-Z]").unwrap().contains('b'));
    }

    #[test]
    fn test_negation_and_escapes() {
        let set = class("[^\\d_]").unwrap();
        assert!(!set.contains('4'));
        assert!(!set.contains('_'));
        assert!(set.contains('z'));
        assert!(class("[\\x41]").unwrap().contains('A'));
    }

    #[test]
    fn test_scan_end() {
        assert_eq!(scan("x[ab]y", 1).map(|(_, end)| end), Ok(5));
    }
}
