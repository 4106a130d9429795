//! Path grammar: parsing, formatting and composition.
//!
//! ```text
//! path       := segment ("." segment)*
//! segment    := key ( "[" index "]" )*  |  ( "[" index "]" )+
//! index      := digits | ""            // "" = wildcard
//! key        := one or more characters excluding "." and "["
//! ```

use std::fmt::Write;

use crate::types::Token;

/// Parse a path expression into tokens.
///
/// Parsing never fails. Bracket groups that do not have the index or
/// wildcard shape stay in the key as literal characters.
///
/// # Example
///
/// ```
/// use nestform_path::{parse, Token};
///
/// assert_eq!(
///     parse("contacts[].phone"),
///     vec![Token::Key("contacts".into()), Token::Wildcard, Token::Key("phone".into())]
/// );
/// assert_eq!(parse("a[b]"), vec![Token::Key("a[b]".into())]);
/// ```
pub fn parse(path: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for segment in path.split('.') {
        parse_segment(segment, &mut tokens);
    }
    tokens
}

/// Parse one dot-separated segment, appending its tokens to `out`.
pub(crate) fn parse_segment(segment: &str, out: &mut Vec<Token>) {
    let mut key_end = segment.len();
    let mut groups = Vec::new();

    // Peel bracket groups off the right end for as long as they match.
    while segment[..key_end].ends_with(']') {
        let head = &segment[..key_end - 1];
        let Some(open) = head.rfind('[') else { break };
        let inner = &head[open + 1..];
        let token = if inner.is_empty() {
            Token::Wildcard
        } else if inner.bytes().all(|b| b.is_ascii_digit()) {
            match inner.parse::<usize>() {
                Ok(idx) => Token::Index(idx),
                Err(_) => break,
            }
        } else {
            break;
        };
        groups.push(token);
        key_end = open;
    }

    let key = &segment[..key_end];
    if !key.is_empty() || groups.is_empty() {
        out.push(Token::Key(key.to_string()));
    }
    out.extend(groups.into_iter().rev());
}

/// True if the segment carries at least one index or wildcard group.
pub(crate) fn segment_has_brackets(segment: &str) -> bool {
    let mut tokens = Vec::new();
    parse_segment(segment, &mut tokens);
    tokens.iter().any(Token::is_element)
}

/// Format tokens back into canonical dot/bracket notation.
///
/// # Example
///
/// ```
/// use nestform_path::{format, parse};
///
/// assert_eq!(format(&parse("user.phones[2].number")), "user.phones[2].number");
/// ```
pub fn format(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Key(key) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(key);
            }
            Token::Index(idx) => {
                let _ = write!(out, "[{idx}]");
            }
            Token::Wildcard => out.push_str("[]"),
        }
    }
    out
}

/// True if any token is a wildcard.
pub fn has_wildcard(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| matches!(t, Token::Wildcard))
}

/// Compose a path from an enclosing scope and a path relative to it.
///
/// A relative path starting with `[` addresses an element of the scope
/// itself and is appended without a separator.
///
/// # Example
///
/// ```
/// use nestform_path::join;
///
/// assert_eq!(join("person", "contact.phones"), "person.contact.phones");
/// assert_eq!(join("person.phones", "[2]"), "person.phones[2]");
/// assert_eq!(join("", "phones"), "phones");
/// ```
pub fn join(prefix: &str, relative: &str) -> String {
    if prefix.is_empty() {
        return relative.to_string();
    }
    if relative.is_empty() {
        return prefix.to_string();
    }
    if relative.starts_with('[') {
        format!("{prefix}{relative}")
    } else {
        format!("{prefix}.{relative}")
    }
}

/// Interpret a key as an array position.
///
/// Only canonical non-negative integers qualify: no sign, no leading zero.
pub fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    let bytes = key.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    if !bytes.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}
