//! Grammar parser for textual automaton descriptions.
//!
//! A description looks like
//!
//! ```text
//! ({q0, q1}, {'a', ''''}, {q0 'a' -> q1, q1 '' -> q0}, q0, {q1})
//! ```
//!
//! Parsing happens in three passes over the characters: comments and
//! whitespace outside symbol literals are dropped, the compact text is cut
//! into its five sections, and every section is tokenized on its own. Every
//! pass knows where symbol literals start and end, so a `#`, `,`, `{` or
//! whitespace inside quotes is never mistaken for syntax.

use crate::automaton::error::{ParseError, Section};
use crate::automaton::identifier::{decode_symbol, is_identifier};
use crate::automaton::symbol::QUOTE;
use log::debug;

/// A rule as written in a description, before cross-reference checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    pub origin: String,
    /// `None` for an epsilon rule.
    pub symbol: Option<char>,
    pub target: String,
}

/// The five sections of a description, lexically valid but not yet checked
/// against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub rules: Vec<RawRule>,
    pub initial: String,
    pub finals: Vec<String>,
}

/// Parse description text into its five sections.
pub fn parse(text: &str) -> Result<Description, ParseError> {
    let compact = compact(text)?;
    let body = strip_envelope(&compact)?;
    let braced = brace_initial(body);
    let sections = split_top_level(&braced, &['}', ',', '{']);

    let [states, alphabet, rules, initial, finals] = sections.as_slice() else {
        return Err(ParseError::SectionCount(sections.len()));
    };

    let description = Description {
        states: parse_states(states)?,
        alphabet: parse_alphabet(alphabet)?,
        rules: parse_rules(rules)?,
        initial: parse_identifier(initial, Section::Initial)?,
        finals: parse_identifiers(finals, Section::Final)?,
    };

    debug!(
        "parsed description: {} states, {} symbols, {} rules, {} final states",
        description.states.len(),
        description.alphabet.len(),
        description.rules.len(),
        description.finals.len()
    );

    Ok(description)
}

/// Length of the symbol literal starting at `chars[start]`, quotes included.
///
/// Recognized forms are `''''` (the quote character), `''` (empty) and `'c'`.
fn literal_len(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&QUOTE) {
        return None;
    }
    match (chars.get(start + 1), chars.get(start + 2), chars.get(start + 3)) {
        (Some(&QUOTE), Some(&QUOTE), Some(&QUOTE)) => Some(4),
        (Some(&QUOTE), _, _) => Some(2),
        (Some(_), Some(&QUOTE), _) => Some(3),
        _ => None,
    }
}

/// Drop comments and whitespace that are not part of a symbol literal.
fn compact(text: &str) -> Result<Vec<char>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            QUOTE => {
                let len = literal_len(&chars, i).ok_or(ParseError::UnterminatedLiteral(i))?;
                out.extend_from_slice(&chars[i..i + len]);
                i += len;
            }
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            c if c.is_whitespace() => i += 1,
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    Ok(out)
}

fn strip_envelope(chars: &[char]) -> Result<&[char], ParseError> {
    chars
        .strip_prefix(&['(', '{'])
        .and_then(|rest| rest.strip_suffix(&['}', ')']))
        .ok_or(ParseError::MissingEnvelope)
}

/// Positions of `chars` that lie outside symbol literals.
fn top_level_positions(chars: &[char]) -> Vec<usize> {
    let mut positions = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        positions.push(i);
        i += literal_len(chars, i).unwrap_or(1);
    }
    positions
}

/// Split at every occurrence of `separator` that starts outside a literal.
fn split_top_level<'a>(chars: &'a [char], separator: &[char]) -> Vec<&'a [char]> {
    let mut parts = Vec::new();
    let mut start = 0;
    for i in top_level_positions(chars) {
        if i >= start && chars[i..].starts_with(separator) {
            parts.push(&chars[start..i]);
            start = i + separator.len();
        }
    }
    parts.push(&chars[start..]);
    parts
}

/// The initial state is written without braces; rewrite `},init,{` into
/// `},{init},{` so every section is delimited the same way.
fn brace_initial(body: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(body.len() + 4);
    let mut i = 0;

    while i < body.len() {
        if body[i..].starts_with(&['}', ',']) && body.get(i + 2) != Some(&'{') {
            if let Some(end) = unbraced_section_end(body, i + 2) {
                out.extend_from_slice(&['}', ',', '{']);
                out.extend_from_slice(&body[i + 2..end]);
                out.extend_from_slice(&['}', ',', '{']);
                i = end + 2;
                continue;
            }
        }
        let step = literal_len(body, i).unwrap_or(1);
        out.extend_from_slice(&body[i..i + step]);
        i += step;
    }

    out
}

/// Index of the `,{` closing an unbraced section that starts at `start`.
fn unbraced_section_end(body: &[char], start: usize) -> Option<usize> {
    (start..body.len())
        .take_while(|&j| !matches!(body[j], '{' | '}' | QUOTE))
        .find(|&j| body[j..].starts_with(&[',', '{']))
}

fn parse_identifier(token: &[char], section: Section) -> Result<String, ParseError> {
    let token: String = token.iter().collect();
    if is_identifier(&token) {
        Ok(token)
    } else {
        Err(ParseError::InvalidIdentifier { section, token })
    }
}

/// Comma-separated identifiers; an empty section is an empty list.
fn parse_identifiers(section: &[char], kind: Section) -> Result<Vec<String>, ParseError> {
    if section.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(section, &[','])
        .into_iter()
        .map(|token| parse_identifier(token, kind))
        .collect()
}

fn parse_states(section: &[char]) -> Result<Vec<String>, ParseError> {
    if section.is_empty() {
        return Err(ParseError::EmptyStates);
    }
    parse_identifiers(section, Section::States)
}

fn parse_alphabet(section: &[char]) -> Result<Vec<char>, ParseError> {
    if section.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(section, &[','])
        .into_iter()
        .map(|token| {
            let invalid = || ParseError::InvalidSymbol {
                section: Section::Alphabet,
                token: token.iter().collect(),
            };
            if literal_len(token, 0) != Some(token.len()) {
                return Err(invalid());
            }
            let body: String = token[1..token.len() - 1].iter().collect();
            match decode_symbol(&body) {
                Some(Some(symbol)) => Ok(symbol),
                _ => Err(invalid()),
            }
        })
        .collect()
}

fn parse_rules(section: &[char]) -> Result<Vec<RawRule>, ParseError> {
    if section.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(section, &[','])
        .into_iter()
        .map(parse_rule)
        .collect()
}

/// Parse a compact `origin'symbol'->target` clause.
fn parse_rule(rule: &[char]) -> Result<RawRule, ParseError> {
    let malformed = || ParseError::MalformedRule(rule.iter().collect());

    let quote = rule.iter().position(|&c| c == QUOTE).ok_or_else(malformed)?;
    let len = literal_len(rule, quote).ok_or_else(malformed)?;
    let body: String = rule[quote + 1..quote + len - 1].iter().collect();
    let symbol = decode_symbol(&body).ok_or_else(|| ParseError::InvalidSymbol {
        section: Section::Rules,
        token: body.clone(),
    })?;
    let target = rule[quote + len..]
        .strip_prefix(&['-', '>'])
        .ok_or_else(malformed)?;

    Ok(RawRule {
        origin: parse_identifier(&rule[..quote], Section::Rules)?,
        symbol,
        target: parse_identifier(target, Section::Rules)?,
    })
}
