use super::{
    super::{Error, Result, charset::PerlClass},
    token::EscapeLength,
};

/// A decoded escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// A control escape like `\n`, or an escaped character like `\.`.
    Char(char),
    /// `\xHH`, `\uHHHH` or `\UHHHHHHHH`. Not yet checked to be a valid
    /// scalar value.
    CodePoint(u32),
    /// `\d`, `\w`, `\s` and their negated uppercase forms.
    Class { class: PerlClass, negated: bool },
    /// `\b`, or `\B` when negated.
    WordBoundary { negated: bool },
    /// `\1` to `\9`.
    Backreference(u8),
}

/// Scans the escape sequence whose backslash sits at byte offset `start`
/// of `input`. Returns the decoded escape and the offset just past it.
pub(crate) fn scan(input: &str, start: usize) -> Result<(Escape, usize)> {
    let mut chars = input[start..].char_indices().skip(1);
    let Some((offset, introducer)) = chars.next() else {
        return Err(Error::EndsWithBackslash { pos: start });
    };

    let length = EscapeLength::of(introducer);
    let payload_start = start + offset + introducer.len_utf8();

    if length == EscapeLength::Standard {
        return Ok((decode_standard(introducer), payload_start));
    }

    let rest = &input[payload_start..];
    let payload = &rest[..rest
        .char_indices()
        .nth(length.payload())
        .map_or(rest.len(), |(i, _)| i)];

    if !payload.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidEscape {
            pos: start,
            sequence: input[start..payload_start + payload.len()].to_owned(),
        });
    }

    // Only hex digits are left, so bytes and characters line up.
    match payload.len() {
        0 => Err(Error::EscapeSequenceEnd { pos: start }),
        n if n < length.payload() => Err(Error::EscapeSequenceLength {
            pos: start,
            expected: length.len(),
            actual: n + 2,
        }),
        _ => {
            let value = u32::from_str_radix(payload, 16).map_err(|_| Error::InvalidEscape {
                pos: start,
                sequence: input[start..payload_start + payload.len()].to_owned(),
            })?;
            Ok((Escape::CodePoint(value), payload_start + payload.len()))
        }
    }
}

fn decode_standard(c: char) -> Escape {
    if let Some((class, negated)) = PerlClass::from_escape(c) {
        return Escape::Class { class, negated };
    }

    match c {
        'n' => Escape::Char('\n'),
        't' => Escape::Char('\t'),
        'r' => Escape::Char('\r'),
        'f' => Escape::Char('\x0c'),
        'v' => Escape::Char('\x0b'),
        '0' => Escape::Char('\0'),
        'b' => Escape::WordBoundary { negated: false },
        'B' => Escape::WordBoundary { negated: true },
        // Clippy: the match arm guarantees a single ASCII digit
        #[allow(clippy::cast_possible_truncation)]
        d @ '1'..='9' => Escape::Backreference(d as u8 - b'0'),
        c => Escape::Char(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_escapes() {
        assert_eq!(scan("\\n", 0), Ok((Escape::Char('\n'), 2)));
        assert_eq!(scan("a\\.b", 1), Ok((Escape::Char('.'), 3)));
        assert_eq!(
            scan("\\D", 0),
            Ok((
                Escape::Class {
                    class: PerlClass::Digit,
                    negated: true
                },
                2
            ))
        );
        assert_eq!(scan("\\3", 0), Ok((Escape::Backreference(3), 2)));
        assert_eq!(scan("\\é", 0), Ok((Escape::Char('é'), 3)));
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(scan("\\x41", 0), Ok((Escape::CodePoint(0x41), 4)));
        assert_eq!(scan("\\u00A9z", 0), Ok((Escape::CodePoint(0xA9), 6)));
        assert_eq!(
            scan("\\U0001F600", 0),
            Ok((Escape::CodePoint(0x1F600), 10))
        );
    }

    #[test]
    fn test_malformed_escapes() {
        assert_eq!(scan("\\", 0), Err(Error::EndsWithBackslash { pos: 0 }));
        assert_eq!(scan("\\x", 0), Err(Error::EscapeSequenceEnd { pos: 0 }));
        assert_eq!(
            scan("\\x0", 0),
            Err(Error::EscapeSequenceLength {
                pos: 0,
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            scan("\\xZZ", 0),
            Err(Error::InvalidEscape {
                pos: 0,
                sequence: "\\xZZ".to_owned()
            })
        );
    }
}
