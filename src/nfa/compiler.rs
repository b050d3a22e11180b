use super::{
    super::{
        Error as CrateError, Result,
        lexer::quantifier::Repetition,
        postfix::{Operator, PosSymbol, Symbol},
    },
    Error, Label, Nfa, State, StateId,
};
use std::ops::Range;

/// A sub-automaton with one entry and one dangling exit. Every state it owns
/// lies in the contiguous arena range `span`, which lets it be copied.
#[derive(Debug, Clone)]
struct Fragment {
    start: StateId,
    accept: StateId,
    span: Range<usize>,
}

/// Builds an [`Nfa`] from postfix symbols, one fragment per symbol.
pub(crate) struct Compiler {
    states: Vec<State>,
    size_limit: usize,
}

impl Compiler {
    pub(crate) fn new(size_limit: usize) -> Self {
        Compiler {
            states: Vec::new(),
            size_limit,
        }
    }

    /// Consumes postfix `symbols` and returns the finished automaton. An
    /// operand of `None` matches the empty string.
    pub(crate) fn compile<I>(mut self, symbols: I) -> Result<Nfa>
    where
        I: IntoIterator<Item = PosSymbol<Option<Label>>>,
    {
        let mut stack: Vec<Fragment> = Vec::new();
        let mut consumed = 0_usize;

        for PosSymbol { pos, symbol } in symbols {
            consumed += 1;
            let fragment = match symbol {
                Symbol::Operand(label) => self.operand(label)?,
                Symbol::Operator(op) => self.apply(op, pos, &mut stack)?,
                Symbol::Open => Err(Error::Parenthesis { pos, paren: '(' })?,
                Symbol::Close => Err(Error::Parenthesis { pos, paren: ')' })?,
            };
            stack.push(fragment);
        }

        if consumed == 0 {
            return Err(CrateError::EmptyRegex);
        }

        if stack.len() != 1 {
            return Err(Error::Stack(stack.len()).into());
        }
        let Some(fragment) = stack.pop() else {
            return Err(Error::Stack(0).into());
        };

        log::debug!(
            "compiled {} postfix symbols into {} states (start {}, accept {})",
            consumed,
            self.states.len(),
            fragment.start,
            fragment.accept
        );

        Ok(Nfa {
            states: self.states,
            start: fragment.start,
            accept: fragment.accept,
        })
    }

    fn apply(&mut self, op: Operator, pos: usize, stack: &mut Vec<Fragment>) -> Result<Fragment> {
        let missing = Error::MissingOperand {
            pos,
            op,
            required: op.arity(),
            found: stack.len(),
        };
        log::trace!("applying '{op}' at {pos} to {} fragments", stack.len());

        let Some(last) = stack.pop() else {
            return Err(missing.into());
        };

        match op {
            Operator::Concat | Operator::Alternate => {
                let Some(first) = stack.pop() else {
                    return Err(missing.into());
                };
                if op == Operator::Concat {
                    Ok(self.concat(first, last))
                } else {
                    self.alternate(first, last)
                }
            }
            Operator::Star => self.star(last),
            Operator::Plus => self.plus(last),
            Operator::Question => self.question(last),
            Operator::Repeat(repetition) => self.repeat(last, repetition),
        }
    }

    fn add(&mut self, label: Option<Label>) -> Result<StateId> {
        if self.states.len() >= self.size_limit {
            return Err(CrateError::SizeLimit {
                limit: self.size_limit,
            });
        }
        let id = StateId(self.states.len());
        self.states.push(State {
            label,
            edge1: None,
            edge2: None,
        });
        Ok(id)
    }

    fn wire(&mut self, from: StateId, edge1: StateId, edge2: Option<StateId>) {
        let state = &mut self.states[from.index()];
        state.edge1 = Some(edge1);
        state.edge2 = edge2;
    }

    /// Closes a fragment whose first operand starts at `origin`.
    fn fragment(&self, start: StateId, accept: StateId, origin: usize) -> Fragment {
        Fragment {
            start,
            accept,
            span: origin..self.states.len(),
        }
    }

    fn operand(&mut self, label: Option<Label>) -> Result<Fragment> {
        let origin = self.states.len();
        let start = self.add(label)?;
        let accept = self.add(None)?;
        self.wire(start, accept, None);
        Ok(self.fragment(start, accept, origin))
    }

    fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
        self.wire(a.accept, b.start, None);
        self.fragment(a.start, b.accept, a.span.start)
    }

    fn alternate(&mut self, a: Fragment, b: Fragment) -> Result<Fragment> {
        let start = self.add(None)?;
        let accept = self.add(None)?;
        self.wire(start, a.start, Some(b.start));
        self.wire(a.accept, accept, None);
        self.wire(b.accept, accept, None);
        Ok(self.fragment(start, accept, a.span.start))
    }

    fn star(&mut self, a: Fragment) -> Result<Fragment> {
        let start = self.add(None)?;
        let accept = self.add(None)?;
        self.wire(start, a.start, Some(accept));
        self.wire(a.accept, a.start, Some(accept));
        Ok(self.fragment(start, accept, a.span.start))
    }

    fn plus(&mut self, a: Fragment) -> Result<Fragment> {
        let start = self.add(None)?;
        let accept = self.add(None)?;
        self.wire(start, a.start, None);
        self.wire(a.accept, a.start, Some(accept));
        Ok(self.fragment(start, accept, a.span.start))
    }

    fn question(&mut self, a: Fragment) -> Result<Fragment> {
        let start = self.add(None)?;
        let accept = self.add(None)?;
        self.wire(start, a.start, Some(accept));
        self.wire(a.accept, accept, None);
        Ok(self.fragment(start, accept, a.span.start))
    }

    /// Copies the states of `a` to the end of the arena. Edges inside the
    /// span are shifted; `a` must not be wired to anything yet.
    fn duplicate(&mut self, a: &Fragment) -> Result<Fragment> {
        let origin = self.states.len();
        if origin.saturating_add(a.span.len()) > self.size_limit {
            return Err(CrateError::SizeLimit {
                limit: self.size_limit,
            });
        }

        let shift = |id: StateId| StateId(id.index() - a.span.start + origin);
        for index in a.span.clone() {
            let State {
                label,
                edge1,
                edge2,
            } = self.states[index].clone();
            self.states.push(State {
                label,
                edge1: edge1.map(shift),
                edge2: edge2.map(shift),
            });
        }

        Ok(self.fragment(shift(a.start), shift(a.accept), origin))
    }

    /// `a{n}` is `n` copies of `a`; `a{n,}` adds a starred copy; `a{n,m}`
    /// adds `m - n` optional copies.
    fn repeat(&mut self, a: Fragment, repetition: Repetition) -> Result<Fragment> {
        let origin = a.span.start;
        let required = repetition.min as usize;
        let optional = repetition
            .max
            .map_or(1, |max| max.saturating_sub(repetition.min) as usize);
        let total = required.saturating_add(optional);

        if total == 0 {
            let empty = self.operand(None)?;
            return Ok(self.fragment(empty.start, empty.accept, origin));
        }

        if total.saturating_mul(a.span.len()) > self.size_limit {
            return Err(CrateError::SizeLimit {
                limit: self.size_limit,
            });
        }

        let mut copies = Vec::with_capacity(total);
        for _ in 1..total {
            copies.push(self.duplicate(&a)?);
        }
        copies.insert(0, a);

        let mut pieces = Vec::with_capacity(total);
        for (i, copy) in copies.into_iter().enumerate() {
            pieces.push(if i < required {
                copy
            } else if repetition.max.is_none() {
                self.star(copy)?
            } else {
                self.question(copy)?
            });
        }

        let mut pieces = pieces.into_iter();
        let mut result = pieces.next().ok_or(Error::Stack(0))?;
        for piece in pieces {
            result = self.concat(result, piece);
        }

        Ok(self.fragment(result.start, result.accept, origin))
    }
}
