//! Operator-precedence (shunting-yard) rewriting of infix symbol streams
//! into postfix order.

use super::{Error, Result, lexer::quantifier::Repetition};
use std::fmt;

/// A regex operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `.` in the operator dialect; implicit in the token dialect.
    Concat,
    /// `|`
    Alternate,
    /// `{n}`, `{n,}` or `{n,m}`.
    Repeat(Repetition),
}

impl Operator {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(Operator::Star),
            '+' => Some(Operator::Plus),
            '?' => Some(Operator::Question),
            '.' => Some(Operator::Concat),
            '|' => Some(Operator::Alternate),
            _ => None,
        }
    }

    /// Higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Star | Operator::Repeat(_) => 60,
            Operator::Plus => 55,
            Operator::Question => 50,
            Operator::Concat => 40,
            Operator::Alternate => 20,
        }
    }

    /// Operators that pop stacked operators of equal precedence.
    const fn is_left_associative(self) -> bool {
        matches!(
            self,
            Operator::Star | Operator::Concat | Operator::Repeat(_)
        )
    }

    /// Number of fragments the operator consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Operator::Concat | Operator::Alternate => 2,
            _ => 1,
        }
    }

    /// Returns `true` if the stacked operator `top` must be emitted before
    /// `self` is pushed.
    const fn yields_to(self, top: Operator) -> bool {
        self.precedence() < top.precedence()
            || (self.precedence() == top.precedence() && self.is_left_associative())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Star => f.write_str("*"),
            Operator::Plus => f.write_str("+"),
            Operator::Question => f.write_str("?"),
            Operator::Concat => f.write_str("."),
            Operator::Alternate => f.write_str("|"),
            Operator::Repeat(repetition) => fmt::Display::fmt(repetition, f),
        }
    }
}

/// An element of an infix or postfix stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol<T> {
    Operand(T),
    Operator(Operator),
    /// `(`. Never present in postfix output.
    Open,
    /// `)`. Never present in postfix output.
    Close,
}

impl<T: fmt::Display> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Operand(operand) => fmt::Display::fmt(operand, f),
            Symbol::Operator(operator) => fmt::Display::fmt(operator, f),
            Symbol::Open => f.write_str("("),
            Symbol::Close => f.write_str(")"),
        }
    }
}

/// A [`Symbol`] with the byte offset it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PosSymbol<T> {
    pub pos: usize,
    pub symbol: Symbol<T>,
}

impl<T> PosSymbol<T> {
    #[must_use]
    pub const fn new(pos: usize, symbol: Symbol<T>) -> Self {
        PosSymbol { pos, symbol }
    }
}

/// Rewrites `infix` into postfix order.
///
/// Items are consumed lazily, so an error produced by the input iterator is
/// only reported once every symbol before it has been processed.
///
/// # Errors
///
/// Fails with [`Error::MismatchedParentheses`] if a `)` has no matching `(`
/// or a `(` is never closed, or with any error yielded by `infix`.
pub fn shunt<T, I>(infix: I) -> Result<Vec<PosSymbol<T>>>
where
    I: IntoIterator<Item = Result<PosSymbol<T>>>,
{
    let mut output = Vec::new();
    let mut stack: Vec<PosSymbol<T>> = Vec::new();

    for item in infix {
        let item = item?;
        match item.symbol {
            Symbol::Operand(_) => output.push(item),
            Symbol::Open => stack.push(item),
            Symbol::Close => loop {
                match stack.pop() {
                    Some(PosSymbol {
                        symbol: Symbol::Open,
                        ..
                    }) => break,
                    Some(operator) => output.push(operator),
                    None => {
                        return Err(Error::MismatchedParentheses {
                            pos: item.pos,
                            paren: ')',
                        });
                    }
                }
            },
            Symbol::Operator(operator) => {
                while let Some(PosSymbol {
                    symbol: Symbol::Operator(top),
                    ..
                }) = stack.last()
                    && operator.yields_to(*top)
                {
                    output.extend(stack.pop());
                }
                stack.push(item);
            }
        }
    }

    while let Some(item) = stack.pop() {
        if matches!(item.symbol, Symbol::Open) {
            return Err(Error::MismatchedParentheses {
                pos: item.pos,
                paren: '(',
            });
        }
        output.push(item);
    }

    Ok(output)
}

/// Converts an operator-dialect pattern such as `a.(b|c)*` to postfix
/// (`abc|*.`). Operands are single alphanumeric characters.
///
/// # Errors
///
/// Fails with [`Error::MismatchedParentheses`] on unbalanced parentheses and
/// [`Error::InvalidCharacter`] on anything that is not an operand, an
/// operator or a parenthesis.
pub fn to_postfix(infix: &str) -> Result<String> {
    let symbols = infix.char_indices().map(|(pos, c)| {
        let symbol = match (c, Operator::from_char(c)) {
            ('(', _) => Symbol::Open,
            (')', _) => Symbol::Close,
            (_, Some(operator)) => Symbol::Operator(operator),
            (c, None) if c.is_alphanumeric() => Symbol::Operand(c),
            (ch, None) => return Err(Error::InvalidCharacter { pos, ch }),
        };
        Ok(PosSymbol::new(pos, symbol))
    });

    Ok(shunt(symbols)?
        .into_iter()
        .map(|item| item.symbol.to_string())
        .collect())
}
