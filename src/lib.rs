//! A small regular expression engine built from three stages: a tokenizer
//! that validates pattern syntax, a shunting-yard rewrite into postfix
//! order, and a Thompson NFA that is simulated over the input text.
//!
//! Two dialects are supported. The operator dialect used by [`r#match`]
//! works on single characters with an explicit `.` concatenation operator
//! (`a.(b|c)*`). The token dialect used by [`Regex`] and [`is_match`]
//! accepts everything the [`tokenize`] function accepts, with implicit
//! concatenation, classes, escapes and counted repetition.

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

pub mod charset;
pub mod engine;
pub mod lexer;
pub mod nfa;
pub mod postfix;
pub mod regex;
pub mod search;

pub use self::{
    charset::CharSet,
    lexer::{Group, Lexer, Token, TokenKind, tokenize},
    nfa::{Nfa, State, StateId, compile},
    postfix::{Operator, to_postfix},
    regex::{Config, Regex},
    search::{is_match, r#match},
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The pattern ends with a lone backslash.
    #[error("pattern cannot end with a backslash (at {pos})")]
    EndsWithBackslash { pos: usize },

    /// An escape sequence has fewer payload characters than its prefix
    /// requires.
    #[error(
        "incomplete escape sequence at {pos} (expected length {expected}, got {actual})"
    )]
    EscapeSequenceLength {
        pos: usize,
        expected: usize,
        actual: usize,
    },

    /// The pattern ends right after a `\x`, `\u` or `\U` prefix.
    #[error("escape sequence at {pos} ends before its payload")]
    EscapeSequenceEnd { pos: usize },

    /// A hexadecimal or Unicode escape has a malformed payload.
    #[error("invalid escape sequence '{sequence}' at {pos}")]
    InvalidEscape { pos: usize, sequence: String },

    /// A character class, quantifier or capture group is never closed.
    #[error("{group} opened at {pos} was not closed")]
    UnclosedGroup { pos: usize, group: Group },

    /// A character class contains an invalid range or negation.
    #[error("{err} at {pos}")]
    Class { pos: usize, err: charset::Error },

    /// Quantifier braces are misplaced or malformed.
    #[error("{err} at {pos}")]
    Quantifier {
        pos: usize,
        err: lexer::quantifier::Error,
    },

    /// Parentheses do not balance.
    #[error("mismatched parenthesis '{paren}' at {pos}")]
    MismatchedParentheses { pos: usize, paren: char },

    /// A character that is neither an operand nor an operator.
    #[error("invalid character '{ch}' at {pos}")]
    InvalidCharacter { pos: usize, ch: char },

    /// Postfix input cannot be assembled into a single automaton.
    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] nfa::Error),

    /// An empty regex was compiled, or matched against non-empty text.
    #[error("the regex is empty")]
    EmptyRegex,

    /// A construct that is recognised by the tokenizer but never executed.
    #[error("{construct} at {pos} is not supported")]
    Unsupported {
        pos: usize,
        construct: &'static str,
    },

    /// The compiled automaton grew past [`Config::size_limit`].
    #[error("compiled automaton exceeds the size limit of {limit} states")]
    SizeLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
