use super::{Error, Regex, Result, compile, to_postfix};

/// Matches the whole of `text` against an operator-dialect `pattern`.
///
/// The pattern is rewritten with [`to_postfix`], compiled and simulated. An
/// empty pattern matches only the empty text.
///
/// ```
/// assert!(thompson_re::r#match("a.(b|c)*", "abcb").unwrap());
/// assert!(!thompson_re::r#match("a.b", "abb").unwrap());
/// ```
///
/// # Errors
///
/// Any error from [`to_postfix`] or [`compile`], and
/// [`Error::EmptyRegex`] when an empty pattern meets non-empty text.
pub fn r#match(pattern: &str, text: &str) -> Result<bool> {
    let postfix = to_postfix(pattern)?;
    if postfix.is_empty() {
        return if text.is_empty() {
            Ok(true)
        } else {
            Err(Error::EmptyRegex)
        };
    }

    Ok(compile(&postfix)?.accepts(text))
}

/// Matches the whole of `text` against a token-dialect `pattern` with the
/// default configuration. Compile a [`Regex`] to match many texts.
///
/// ```
/// assert!(thompson_re::is_match(r"\d{3}-[a-z]+", "555-abc").unwrap());
/// ```
pub fn is_match(pattern: &str, text: &str) -> Result<bool> {
    Ok(Regex::new(pattern)?.is_match(text))
}
