use serde_json::Value;

use crate::parse::{array_index, has_wildcard, parse};
use crate::types::Token;

/// Get a value from a tree by path expression.
///
/// Returns `None` if the path doesn't exist. Wildcard paths are not
/// addressable and always return `None`.
pub fn get<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    get_tokens(tree, &parse(path))
}

/// Get a value from a tree by parsed tokens.
pub fn get_tokens<'a>(tree: &'a Value, tokens: &[Token]) -> Option<&'a Value> {
    if has_wildcard(tokens) {
        tracing::debug!(path = %crate::format(tokens), "wildcard paths cannot be read");
        return None;
    }

    let mut current = tree;
    for token in tokens {
        current = step(current, token)?;
    }
    Some(current)
}

/// Get a mutable reference to a value by parsed tokens.
///
/// Returns `None` if the path doesn't exist or contains a wildcard.
pub fn get_tokens_mut<'a>(tree: &'a mut Value, tokens: &[Token]) -> Option<&'a mut Value> {
    let mut current = tree;
    for token in tokens {
        current = step_mut(current, token)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, token: &Token) -> Option<&'a Value> {
    match (value, token) {
        (Value::Object(map), Token::Key(key)) => map.get(key),
        (Value::Object(map), Token::Index(idx)) => map.get(&idx.to_string()),
        (Value::Array(arr), Token::Index(idx)) => arr.get(*idx),
        (Value::Array(arr), Token::Key(key)) => arr.get(array_index(key)?),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, token: &Token) -> Option<&'a mut Value> {
    match (value, token) {
        (Value::Object(map), Token::Key(key)) => map.get_mut(key),
        (Value::Object(map), Token::Index(idx)) => map.get_mut(&idx.to_string()),
        (Value::Array(arr), Token::Index(idx)) => arr.get_mut(*idx),
        (Value::Array(arr), Token::Key(key)) => arr.get_mut(array_index(key)?),
        _ => None,
    }
}
