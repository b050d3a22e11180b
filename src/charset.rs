//! Character set types for bracket classes and class escapes.

/// The error type used by [`CharSet`] and the bracket class scanner.
#[derive(Debug, Eq, thiserror::Error, PartialEq)]
pub enum Error {
    /// The range end does not come after the range start.
    #[error("invalid range '{0}-{1}'")]
    Range(char, char),
    /// A range reuses a character that already bounds another range.
    #[error("range '{0}-{1}' reuses a character bounding another range")]
    ReusedBound(char, char),
    /// `[^]` has nothing to negate.
    #[error("'^' cannot be the only character in a character class")]
    EmptyNegation,
}

/// The `\d`, `\w` and `\s` families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerlClass {
    Digit,
    Word,
    Space,
}

impl PerlClass {
    #[must_use]
    pub fn from_escape(c: char) -> Option<(Self, bool)> {
        let class = match c.to_ascii_lowercase() {
            'd' => PerlClass::Digit,
            'w' => PerlClass::Word,
            's' => PerlClass::Space,
            _ => return None,
        };
        Some((class, c.is_ascii_uppercase()))
    }

    #[inline]
    #[must_use]
    pub fn matches(self, c: char) -> bool {
        match self {
            PerlClass::Digit => c.is_ascii_digit(),
            PerlClass::Word => c.is_ascii_alphanumeric() || c == '_',
            PerlClass::Space => c.is_whitespace(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    Char(char),
    Range(char, char),
    Perl { class: PerlClass, negated: bool },
}

impl ClassItem {
    #[inline]
    fn matches(&self, c: char) -> bool {
        match *self {
            ClassItem::Char(item) => item == c,
            ClassItem::Range(start, end) => (start..=end).contains(&c),
            ClassItem::Perl { class, negated } => class.matches(c) ^ negated,
        }
    }
}

/// A character class set.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CharSet {
    items: Vec<ClassItem>,
    negated: bool,
}

impl CharSet {
    /// Creates a new empty character set.
    #[must_use]
    pub const fn new() -> Self {
        CharSet {
            items: Vec::new(),
            negated: false,
        }
    }

    /// Creates a set holding a single `\d`, `\w` or `\s` family.
    #[must_use]
    pub fn perl(class: PerlClass, negated: bool) -> Self {
        let mut set = Self::new();
        set.add_perl(class, negated);
        set
    }

    /// Adds the given character to the character set.
    #[inline]
    pub fn add_char(&mut self, c: char) {
        self.items.push(ClassItem::Char(c));
    }

    /// Adds an inclusive range of characters to the character set.
    ///
    /// # Errors
    ///
    /// If `end` is before `start`, an [`Error`] is returned.
    pub fn add_range(&mut self, start: char, end: char) -> Result<(), Error> {
        if start <= end {
            self.items.push(ClassItem::Range(start, end));
            Ok(())
        } else {
            Err(Error::Range(start, end))
        }
    }

    /// Removes the last item if it is a single character.
    pub(crate) fn pop_char(&mut self) -> Option<char> {
        match self.items.last() {
            Some(&ClassItem::Char(c)) => {
                self.items.pop();
                Some(c)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn add_perl(&mut self, class: PerlClass, negated: bool) {
        self.items.push(ClassItem::Perl { class, negated });
    }

    /// Returns `true` if the character set contains the given character.
    #[inline]
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.items.iter().any(|item| item.matches(c)) ^ self.negated
    }

    /// Inverts the character set.
    #[inline]
    pub fn invert(&mut self) {
        self.negated = !self.negated;
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    #[must_use]
    pub fn items(&self) -> &[ClassItem] {
        &self.items
    }
}
