//! Symbol types for automaton rules.

/// Index of a symbol within an automaton's alphabet.
/// The special value `EPSILON` represents an empty rule.
pub type SymbolId = u32;

/// Symbol id of epsilon (empty) rules.
pub const EPSILON: SymbolId = u32::MAX;

/// Delimiter of symbol literals. Written twice inside a literal to stand for
/// itself.
pub const QUOTE: char = '\'';

#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Render a symbol as the body of a quoted literal (without the outer quotes).
/// `None` is epsilon and renders as nothing.
pub fn escape(symbol: Option<char>) -> String {
    match symbol {
        None => String::new(),
        Some(QUOTE) => "''".to_owned(),
        Some(c) => c.to_string(),
    }
}
