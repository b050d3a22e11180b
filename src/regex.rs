//! The token dialect: patterns validated by the [`Lexer`] are lowered into
//! postfix symbols, with every multi-character token as one operand, and
//! compiled into a Thompson automaton.

use super::{
    Error, Result,
    charset::CharSet,
    lexer::{Lexer, Token, TokenKind, class, escape, escape::Escape, quantifier},
    nfa::{Compiler, Label, Look, Nfa},
    postfix::{Operator, PosSymbol, Symbol, shunt},
};

/// Compilation options for [`Regex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    size_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const DEFAULT_SIZE_LIMIT: usize = 10_000;

    #[must_use]
    pub const fn new() -> Self {
        Config {
            size_limit: Self::DEFAULT_SIZE_LIMIT,
        }
    }

    /// Sets the largest number of automaton states a pattern may compile
    /// into. Counted repetition copies its operand, so `(abc){1000}` alone
    /// needs several thousand states.
    #[must_use]
    pub const fn size_limit(mut self, limit: usize) -> Self {
        self.size_limit = limit;
        self
    }

    #[must_use]
    pub const fn get_size_limit(&self) -> usize {
        self.size_limit
    }
}

/// A compiled token-dialect pattern. Matches are whole-input matches.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    nfa: Nfa,
}

impl Regex {
    /// Compiles `pattern` with the default [`Config`].
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_config(pattern, &Config::default())
    }

    pub fn with_config(pattern: &str, config: &Config) -> Result<Self> {
        let mut infix = Vec::new();
        Lowering::new(pattern, &mut infix).lower(0..pattern.len())?;

        let postfix = shunt(infix.into_iter().map(Ok))?;
        let nfa = if postfix.is_empty() {
            Nfa::empty()
        } else {
            Compiler::new(config.size_limit).compile(postfix)?
        };

        Ok(Regex {
            pattern: pattern.to_owned(),
            nfa,
        })
    }

    /// Returns `true` if the whole of `text` matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.nfa.accepts(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }
}

type Infix = PosSymbol<Option<Label>>;

struct Lowering<'a, 'o> {
    pattern: &'a str,
    out: &'o mut Vec<Infix>,
}

impl<'a, 'o> Lowering<'a, 'o> {
    fn new(pattern: &'a str, out: &'o mut Vec<Infix>) -> Self {
        Lowering { pattern, out }
    }

    /// Lowers the tokens of `span`. Adjacent operands get an explicit
    /// concatenation between them.
    fn lower(&mut self, span: std::ops::Range<usize>) -> Result<()> {
        // Whether the last symbol ends an operand, so that a following
        // operand or group needs a concatenation first.
        let mut joinable = false;

        for token in Lexer::within(self.pattern, span) {
            let token = token?;
            let pos = token.pos;

            let label = match token.kind {
                TokenKind::Literal | TokenKind::Other => token.text.chars().next().map(Label::Char),
                TokenKind::Dot => Some(Label::Any),
                TokenKind::EscapeSequence => Some(self.escape(&token)?),
                TokenKind::CharacterClass => {
                    Some(Label::Set(class::scan(self.pattern, pos)?.0))
                }
                TokenKind::CaptureGroup => {
                    self.join(&mut joinable, pos);
                    self.group(&token)?;
                    joinable = true;
                    continue;
                }
                TokenKind::Quantifier => {
                    let (repetition, _) = quantifier::scan(self.pattern, pos)?;
                    self.push(pos, Symbol::Operator(Operator::Repeat(repetition)));
                    joinable = true;
                    continue;
                }
                TokenKind::Special => match token.text {
                    "^" => Some(Label::Look(Look::Start)),
                    "$" => Some(Label::Look(Look::End)),
                    "|" => {
                        self.push(pos, Symbol::Operator(Operator::Alternate));
                        joinable = false;
                        continue;
                    }
                    op => {
                        if let Some(op) = op.chars().next().and_then(Operator::from_char) {
                            self.push(pos, Symbol::Operator(op));
                        }
                        joinable = true;
                        continue;
                    }
                },
            };

            self.join(&mut joinable, pos);
            self.push(pos, Symbol::Operand(label));
            joinable = true;
        }

        Ok(())
    }

    fn push(&mut self, pos: usize, symbol: Symbol<Option<Label>>) {
        self.out.push(PosSymbol::new(pos, symbol));
    }

    fn join(&mut self, joinable: &mut bool, pos: usize) {
        if *joinable {
            self.push(pos, Symbol::Operator(Operator::Concat));
        }
        *joinable = false;
    }

    fn escape(&self, token: &Token<'_>) -> Result<Label> {
        let pos = token.pos;
        let (escape, _) = escape::scan(self.pattern, pos)?;

        Ok(match escape {
            Escape::Char(c) => Label::Char(c),
            Escape::CodePoint(value) => {
                Label::Char(char::from_u32(value).ok_or_else(|| Error::InvalidEscape {
                    pos,
                    sequence: token.text.to_owned(),
                })?)
            }
            Escape::Class { class, negated } => Label::Set(CharSet::perl(class, negated)),
            Escape::WordBoundary { negated: false } => Label::Look(Look::WordBoundary),
            Escape::WordBoundary { negated: true } => Label::Look(Look::NotWordBoundary),
            Escape::Backreference(_) => {
                return Err(Error::Unsupported {
                    pos,
                    construct: "backreference",
                });
            }
        })
    }

    /// Lowers a parenthesised group into `(` + its interior + `)`.
    fn group(&mut self, token: &Token<'_>) -> Result<()> {
        let pos = token.pos;
        let mut inner = pos + 1..token.end() - 1;
        let interior = &self.pattern[inner.clone()];

        if let Some(flags) = interior.strip_prefix('?') {
            if flags.starts_with(':') {
                inner.start += 2;
            } else {
                let construct = if ["=", "!", "<=", "<!"].iter().any(|p| flags.starts_with(p)) {
                    "lookaround"
                } else {
                    "group flag"
                };
                return Err(Error::Unsupported { pos, construct });
            }
        }

        self.push(pos, Symbol::Open);
        if self.pattern[inner.clone()].is_empty() {
            self.push(inner.start, Symbol::Operand(None));
        } else {
            self.lower(inner)?;
        }
        self.push(token.end() - 1, Symbol::Close);

        Ok(())
    }
}
