//! Thompson-construction automata.
//!
//! States live in a single arena and refer to each other by [`StateId`], so
//! the loops built by `*` and `+` need no shared ownership. An automaton is
//! dropped as a whole once its owner is done with it.

use super::{
    Result,
    postfix::{Operator, PosSymbol, Symbol},
};
use std::fmt;

mod compiler;
pub mod label;

pub(crate) use compiler::Compiler;
pub use label::{Cursor, Label, Look};

/// The error type for postfix input that does not form one automaton.
#[derive(Debug, Eq, thiserror::Error, PartialEq)]
pub enum Error {
    /// An operator found fewer fragments on the stack than it consumes.
    #[error("'{op}' at {pos} requires {required} operand(s), found {found}")]
    MissingOperand {
        pos: usize,
        op: Operator,
        required: usize,
        found: usize,
    },
    /// Parentheses never appear in postfix notation.
    #[error("parenthesis '{paren}' at {pos} cannot appear in postfix notation")]
    Parenthesis { pos: usize, paren: char },
    /// The postfix input left zero or several fragments behind.
    #[error("{0} fragments left on the stack, expected exactly 1")]
    Stack(usize),
}

/// An index into the state arena of an [`Nfa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the automaton. A state without a label is an epsilon state
/// and may follow both edges without consuming input; a labelled state
/// follows `edge1` only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub label: Option<Label>,
    pub edge1: Option<StateId>,
    pub edge2: Option<StateId>,
}

impl State {
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.label.is_none()
    }
}

/// A compiled automaton with one start and one accept state.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

#[allow(clippy::len_without_is_empty)]
impl Nfa {
    /// The automaton accepting only the empty string.
    #[must_use]
    pub(crate) fn empty() -> Self {
        Nfa {
            states: vec![
                State {
                    label: None,
                    edge1: Some(StateId(1)),
                    edge2: None,
                },
                State::default(),
            ],
            start: StateId(0),
            accept: StateId(1),
        }
    }

    #[must_use]
    pub fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// Number of states in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    #[must_use]
    pub fn states(&self) -> &[State] {
        &self.states
    }
}

/// Compiles an operator-dialect postfix string (as produced by
/// [`to_postfix`](crate::to_postfix)) into an automaton.
///
/// `.`, `|`, `*`, `+` and `?` are operators; every other character except
/// the parentheses is a literal.
///
/// # Errors
///
/// Fails with [`Error::EmptyRegex`](crate::Error::EmptyRegex) on empty input
/// and [`Error::InvalidRegex`](crate::Error::InvalidRegex) when the input
/// does not reduce to exactly one fragment.
pub fn compile(postfix: &str) -> Result<Nfa> {
    let symbols = postfix.char_indices().map(|(pos, c)| {
        let symbol = match (c, Operator::from_char(c)) {
            ('(', _) => Symbol::Open,
            (')', _) => Symbol::Close,
            (_, Some(operator)) => Symbol::Operator(operator),
            (c, None) => Symbol::Operand(Some(Label::Char(c))),
        };
        PosSymbol::new(pos, symbol)
    });

    Compiler::new(usize::MAX).compile(symbols)
}
