use super::{Error, Result};
use std::{fmt, ops::Range};

pub mod class;
pub mod escape;
pub mod quantifier;
pub mod token;

pub use token::{EscapeLength, Token, TokenKind};

/// The delimited constructs that can be left unclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    CharacterClass,
    Quantifier,
    CaptureGroup,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Group::CharacterClass => "character class",
            Group::Quantifier => "quantifier braces",
            Group::CaptureGroup => "capture group",
        })
    }
}

const SPECIAL: &[char] = &['$', '^', '+', '*', '?', '|'];

/// Splits a pattern string into [`Token`]s, validating each one.
///
/// # Errors
///
/// The first malformed construct is returned as an [`Error`]; no partial
/// token list is produced.
pub fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>> {
    Lexer::new(pattern).collect()
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    previous: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            previous: None,
        }
    }

    /// Creates a lexer over `span` of `input`. Token positions stay relative
    /// to the whole of `input`.
    pub(crate) fn within(input: &'a str, span: Range<usize>) -> Self {
        Lexer {
            input: &input[..span.end],
            pos: span.start,
            previous: None,
        }
    }

    /// Returns the current byte offset.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let start = self.pos;
        let (kind, end) = match c {
            '\\' => (
                TokenKind::EscapeSequence,
                escape::scan(self.input, start)?.1,
            ),
            '[' => (TokenKind::CharacterClass, class::scan(self.input, start)?.1),
            '{' => {
                if !self.previous.is_some_and(TokenKind::admits_quantifier) {
                    return Err(Error::Quantifier {
                        pos: start,
                        err: quantifier::Error::Misplaced,
                    });
                }
                (TokenKind::Quantifier, quantifier::scan(self.input, start)?.1)
            }
            '(' => (TokenKind::CaptureGroup, scan_group(self.input, start)?),
            '.' => (TokenKind::Dot, start + 1),
            c if c.is_ascii_alphanumeric() => (TokenKind::Literal, start + 1),
            c if SPECIAL.contains(&c) => (TokenKind::Special, start + 1),
            c => (TokenKind::Other, start + c.len_utf8()),
        };

        self.pos = end;
        self.previous = Some(kind);

        Ok(Some(Token {
            pos: start,
            text: &self.input[start..end],
            kind,
        }))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => {
                self.pos = self.input.len();
                Some(Err(e))
            }
        }
    }
}

/// Scans the group whose `(` sits at byte offset `start` of `input`,
/// nested groups and escapes included. Returns the offset just past the
/// matching `)`.
fn scan_group(input: &str, start: usize) -> Result<usize> {
    let mut pos = start + 1;

    while let Some(c) = input[pos..].chars().next() {
        match c {
            ')' => return Ok(pos + 1),
            '(' => pos = scan_group(input, pos)?,
            '\\' => pos = escape::scan(input, pos)?.1,
            c => pos += c.len_utf8(),
        }
    }

    Err(Error::UnclosedGroup {
        pos: start,
        group: Group::CaptureGroup,
    })
}
