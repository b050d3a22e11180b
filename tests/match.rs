use quickcheck::{Arbitrary, Gen, QuickCheck};
use thompson_re::{Error, Regex, Result, compile, r#match, to_postfix};

#[test]
fn test_single_character_match() -> Result<()> {
    for c in ['a', 'z', 'Q', '7', 'é'] {
        assert!(r#match(&c.to_string(), &c.to_string())?);
        assert!(!r#match(&c.to_string(), "b")?);
        assert!(!r#match(&c.to_string(), "")?);
    }
    Ok(())
}

#[test]
fn test_concat_match() -> Result<()> {
    assert!(r#match("a.b.c", "abc")?);
    assert!(!r#match("a.b.c", "ab")?);
    assert!(!r#match("a.b.c", "abcd")?);
    Ok(())
}

#[test]
fn test_star_match() -> Result<()> {
    assert!(r#match("a.b.c*", "ab")?);
    assert!(r#match("a.b.c*", "abc")?);
    assert!(r#match("a.b.c*", "abcccc")?);
    assert!(!r#match("a.b.c*", "ac")?);
    assert!(r#match("a*", "")?);
    Ok(())
}

#[test]
fn test_alternation_match() -> Result<()> {
    assert!(r#match("a.(b|d).c", "abc")?);
    assert!(r#match("a.(b|d).c", "adc")?);
    assert!(!r#match("a.(b|d).c", "aac")?);
    assert!(r#match("(a|b)*.c", "ababbc")?);
    Ok(())
}

#[test]
fn test_plus_and_optional_match() -> Result<()> {
    assert!(r#match("a.b+", "ab")?);
    assert!(r#match("a.b+", "abb")?);
    assert!(!r#match("a.b+", "a")?);
    assert!(r#match("a.b?", "a")?);
    assert!(r#match("a.b?", "ab")?);
    assert!(!r#match("a.b?", "abb")?);
    Ok(())
}

#[test]
fn test_nested_loops_match() -> Result<()> {
    assert!(r#match("(a*)*", "")?);
    assert!(r#match("(a*)*", "aaaa")?);
    assert!(r#match("(a+|b?)*.c", "aabbc")?);
    assert!(!r#match("(a+|b?)*.c", "aabb")?);
    Ok(())
}

#[test]
fn test_empty_pattern_match() {
    assert_eq!(r#match("", ""), Ok(true));
    assert_eq!(r#match("", "abc"), Err(Error::EmptyRegex));
}

#[test]
fn test_pattern_errors_match() {
    assert_eq!(
        r#match("a.b)", "ab"),
        Err(Error::MismatchedParentheses { pos: 3, paren: ')' })
    );
    assert_eq!(
        r#match("a-b", "ab"),
        Err(Error::InvalidCharacter { pos: 1, ch: '-' })
    );
    assert!(matches!(r#match("a.", "a"), Err(Error::InvalidRegex(_))));
    assert!(matches!(r#match("ab", "ab"), Err(Error::InvalidRegex(_))));
}

#[test]
fn test_match_is_deterministic() -> Result<()> {
    for _ in 0..3 {
        assert!(r#match("a.(b|c)*", "abcb")?);
        assert!(!r#match("a.(b|c)*", "abca")?);
    }
    Ok(())
}

#[test]
fn test_linear_time_match() -> Result<()> {
    // A backtracking matcher takes exponential time on this pair.
    let n = 30;
    let pattern = format!("{}{}", "a?.".repeat(n), vec!["a"; n].join("."));
    let text = "a".repeat(n);
    assert!(r#match(&pattern, &text)?);
    assert!(!r#match(&pattern, &"a".repeat(n - 1))?);
    Ok(())
}

/// A random expression together with the choices that resolve it into one
/// string it must match.
#[derive(Clone, Debug)]
enum Expr {
    Literal(char),
    Concat(Box<Expr>, Box<Expr>),
    /// Matched through the left branch when `true`.
    Alternate(Box<Expr>, Box<Expr>, bool),
    Star(Box<Expr>, u8),
    Plus(Box<Expr>, u8),
    Question(Box<Expr>, bool),
}

impl Expr {
    fn literal(g: &mut Gen) -> char {
        *g.choose(&['a', 'b', 'c', '0', 'é']).unwrap_or(&'a')
    }

    fn generate(g: &mut Gen, depth: usize) -> Self {
        if depth == 0 {
            return Expr::Literal(Expr::literal(g));
        }

        let sub = |g: &mut Gen| Box::new(Expr::generate(g, depth - 1));
        match u8::arbitrary(g) % 6 {
            0 => Expr::Literal(Expr::literal(g)),
            1 => Expr::Concat(sub(g), sub(g)),
            2 => Expr::Alternate(sub(g), sub(g), bool::arbitrary(g)),
            3 => Expr::Star(sub(g), u8::arbitrary(g) % 3),
            4 => Expr::Plus(sub(g), u8::arbitrary(g) % 3 + 1),
            _ => Expr::Question(sub(g), bool::arbitrary(g)),
        }
    }

    /// Renders the expression in the operator dialect.
    fn operators(&self) -> String {
        match self {
            Expr::Literal(c) => c.to_string(),
            Expr::Concat(a, b) => format!("({}.{})", a.operators(), b.operators()),
            Expr::Alternate(a, b, _) => format!("({}|{})", a.operators(), b.operators()),
            Expr::Star(a, _) => format!("({})*", a.operators()),
            Expr::Plus(a, _) => format!("({})+", a.operators()),
            Expr::Question(a, _) => format!("({})?", a.operators()),
        }
    }

    /// Renders the expression in the token dialect.
    fn tokens(&self) -> String {
        match self {
            Expr::Literal(c) => c.to_string(),
            Expr::Concat(a, b) => format!("({}{})", a.tokens(), b.tokens()),
            Expr::Alternate(a, b, _) => format!("({}|{})", a.tokens(), b.tokens()),
            Expr::Star(a, _) => format!("({})*", a.tokens()),
            Expr::Plus(a, _) => format!("({})+", a.tokens()),
            Expr::Question(a, _) => format!("({})?", a.tokens()),
        }
    }

    /// Resolves the expression into a string it matches.
    fn witness(&self) -> String {
        match self {
            Expr::Literal(c) => c.to_string(),
            Expr::Concat(a, b) => a.witness() + &b.witness(),
            Expr::Alternate(a, _, true) => a.witness(),
            Expr::Alternate(_, b, false) => b.witness(),
            Expr::Star(a, count) | Expr::Plus(a, count) => a.witness().repeat(usize::from(*count)),
            Expr::Question(a, take) => {
                if *take {
                    a.witness()
                } else {
                    String::new()
                }
            }
        }
    }
}

impl Arbitrary for Expr {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(5);
        Expr::generate(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Expr::Literal(_) => quickcheck::empty_shrinker(),
            Expr::Concat(a, b) | Expr::Alternate(a, b, _) => {
                Box::new([(**a).clone(), (**b).clone()].into_iter())
            }
            Expr::Star(a, _) | Expr::Plus(a, _) | Expr::Question(a, _) => {
                quickcheck::single_shrinker((**a).clone())
            }
        }
    }
}

#[test]
fn test_constructive_round_trip() {
    fn prop(expr: Expr) -> bool {
        r#match(&expr.operators(), &expr.witness()) == Ok(true)
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Expr) -> bool);
}

#[test]
fn test_constructive_round_trip_tokens() {
    fn prop(expr: Expr) -> bool {
        Regex::new(&expr.tokens()).is_ok_and(|regex| regex.is_match(&expr.witness()))
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Expr) -> bool);
}

#[test]
fn test_compiled_nfa_is_reusable() -> Result<()> {
    let nfa = compile(&to_postfix("(a|b)*.a.b.b")?)?;
    assert!(nfa.accepts("abb"));
    assert!(nfa.accepts("babaabb"));
    assert!(!nfa.accepts("abba"));
    assert!(nfa.accepts("aabb"));
    Ok(())
}
