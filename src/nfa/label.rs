use super::super::charset::{CharSet, PerlClass};
use std::fmt;

/// A zero-width assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Look {
    /// `^`
    Start,
    /// `$`
    End,
    /// `\b`
    WordBoundary,
    /// `\B`
    NotWordBoundary,
}

/// The characters on either side of the current text position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub prev: Option<char>,
    pub next: Option<char>,
}

impl Look {
    #[must_use]
    pub fn holds(self, at: Cursor) -> bool {
        let is_word = |c: Option<char>| c.is_some_and(|c| PerlClass::Word.matches(c));
        match self {
            Look::Start => at.prev.is_none(),
            Look::End => at.next.is_none(),
            Look::WordBoundary => is_word(at.prev) != is_word(at.next),
            Look::NotWordBoundary => is_word(at.prev) == is_word(at.next),
        }
    }
}

/// What a non-epsilon state tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Consumes exactly this character.
    Char(char),
    /// Consumes any character except `\n`.
    Any,
    /// Consumes any character of the set.
    Set(CharSet),
    /// Consumes nothing; passable only where the assertion holds.
    Look(Look),
}

impl Label {
    /// Returns `true` if this label consumes `c`.
    #[inline]
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        match self {
            Label::Char(label) => *label == c,
            Label::Any => c != '\n',
            Label::Set(set) => set.contains(c),
            Label::Look(_) => false,
        }
    }
}

impl From<char> for Label {
    fn from(c: char) -> Self {
        Label::Char(c)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Char(c) => write!(f, "{c}"),
            Label::Any => f.write_str("<any>"),
            Label::Set(_) => f.write_str("<class>"),
            Label::Look(look) => write!(f, "<{look:?}>"),
        }
    }
}
