/// The classification of a pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An ASCII letter or digit.
    Literal,
    /// `.`
    Dot,
    /// `\` followed by its payload, e.g. `\n` or `\x41`.
    EscapeSequence,
    /// A bracketed set like `[a-z]` or `[^0-9]`.
    CharacterClass,
    /// A parenthesised group, nested groups included.
    CaptureGroup,
    /// A counted repetition like `{2}`, `{2,}` or `{2,5}`.
    Quantifier,
    /// One of `$ ^ + * ? |`.
    Special,
    /// Anything else. Accepted as a single character.
    Other,
}

impl TokenKind {
    /// Returns `true` if quantifier braces may directly follow a token of
    /// this kind.
    #[must_use]
    pub const fn admits_quantifier(self) -> bool {
        matches!(
            self,
            TokenKind::Literal
                | TokenKind::CharacterClass
                | TokenKind::CaptureGroup
                | TokenKind::Dot
                | TokenKind::EscapeSequence
        )
    }
}

/// A slice of the pattern string with its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The byte offset of the token in the pattern string.
    pub pos: usize,
    /// The token text, delimiters and leading backslash included.
    pub text: &'a str,
    pub kind: TokenKind,
}

impl Token<'_> {
    /// The byte offset one past the end of the token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.pos + self.text.len()
    }
}

/// The total length, in characters, of an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeLength {
    /// `\c`
    Standard = 2,
    /// `\xHH`
    Hex = 4,
    /// `\uHHHH`
    UnicodeShort = 6,
    /// `\UHHHHHHHH`
    UnicodeLong = 10,
}

impl EscapeLength {
    /// Picks the length from the character following the backslash.
    #[must_use]
    pub const fn of(introducer: char) -> Self {
        match introducer {
            'x' => EscapeLength::Hex,
            'u' => EscapeLength::UnicodeShort,
            'U' => EscapeLength::UnicodeLong,
            _ => EscapeLength::Standard,
        }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self as usize
    }

    /// Number of hex digits after the two-character prefix.
    #[must_use]
    pub const fn payload(self) -> usize {
        self.len() - 2
    }
}
