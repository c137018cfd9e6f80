//! Lexical predicates for state names and alphabet symbols.

use crate::automaton::symbol::QUOTE;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9_]*[A-Za-z0-9])?$").expect("identifier pattern is valid")
});

/// Check whether `token` is a valid state name: ASCII alphanumerics and
/// underscores, neither starting nor ending with an underscore.
pub fn is_identifier(token: &str) -> bool {
    IDENTIFIER.is_match(token)
}

/// Decode the body of a quoted symbol literal.
///
/// Returns `Some(None)` for the empty body (epsilon), `Some(Some(c))` for a
/// single character or the doubled quote, and `None` for anything else.
pub fn decode_symbol(body: &str) -> Option<Option<char>> {
    let mut chars = body.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (None, _, _) => Some(None),
        (Some(QUOTE), Some(QUOTE), None) => Some(Some(QUOTE)),
        (Some(QUOTE), _, _) => None,
        (Some(c), None, _) => Some(Some(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        for ok in ["q", "q0", "Q_1", "0", "a_b_c", "state__2"] {
            assert!(is_identifier(ok), "{ok} should be valid");
        }
        for bad in ["", "_q", "q_", "q-1", "q 1", "ž", "q'"] {
            assert!(!is_identifier(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn test_decode_symbol() {
        assert_eq!(decode_symbol(""), Some(None));
        assert_eq!(decode_symbol("a"), Some(Some('a')));
        assert_eq!(decode_symbol(" "), Some(Some(' ')));
        assert_eq!(decode_symbol("#"), Some(Some('#')));
        assert_eq!(decode_symbol("č"), Some(Some('č')));
        assert_eq!(decode_symbol("''"), Some(Some('\'')));
        assert_eq!(decode_symbol("'"), None);
        assert_eq!(decode_symbol("ab"), None);
        assert_eq!(decode_symbol("'''"), None);
    }
}
