//! Path-addressed writes.
//!
//! Containers are created along the way: an index step creates an array, a
//! key step creates an object. Writing past the end of an array pads it with
//! `null` gaps up to the written position, at most [`MAX_PADDING`] of them
//! per array. A write that would need more gaps is dropped.

use serde_json::{Map, Value};

use crate::parse::{array_index, parse};
use crate::types::Token;

/// Most `null` gaps a single write may add past the end of one array.
pub const MAX_PADDING: usize = 10_000;

static NULL: Value = Value::Null;

/// Write `value` at `path` into a copy of `tree` and return the copy.
///
/// The input tree is left untouched.
///
/// # Example
///
/// ```
/// use nestform_path::{get, set};
/// use serde_json::json;
///
/// let before = json!({"contacts": []});
/// let after = set(&before, "contacts[1].phone", json!("555"));
/// assert_eq!(after, json!({"contacts": [null, {"phone": "555"}]}));
/// assert_eq!(before, json!({"contacts": []}));
/// ```
pub fn set(tree: &Value, path: &str, value: Value) -> Value {
    let tokens = parse(path);
    if !within_padding(Some(tree), &tokens) {
        tracing::debug!(path, "write past the padding limit is ignored");
        return tree.clone();
    }
    assign(tree.clone(), &tokens, value)
}

/// Write `value` at `path` in place.
pub fn set_mut(tree: &mut Value, path: &str, value: Value) {
    set_tokens_mut(tree, &parse(path), value);
}

/// Write `value` at the location denoted by `tokens` in place.
pub fn set_tokens_mut(tree: &mut Value, tokens: &[Token], value: Value) {
    if !within_padding(Some(tree), tokens) {
        tracing::debug!("write past the padding limit is ignored");
        return;
    }
    let current = std::mem::take(tree);
    *tree = assign(current, tokens, value);
}

/// Where a token lands inside the current value.
enum Slot {
    Element(usize),
    Property(String),
}

fn locate(tree: &Value, token: &Token) -> Option<Slot> {
    let slot = match (tree, token) {
        (_, Token::Wildcard) => return None,
        (Value::Array(_), Token::Index(idx)) => Slot::Element(*idx),
        (Value::Array(_), Token::Key(key)) => match array_index(key) {
            Some(idx) => Slot::Element(idx),
            None => Slot::Property(key.clone()),
        },
        (Value::Object(_), Token::Index(idx)) => Slot::Property(idx.to_string()),
        (_, Token::Index(idx)) => Slot::Element(*idx),
        (_, Token::Key(key)) => Slot::Property(key.clone()),
    };
    Some(slot)
}

/// Whether writing along `tokens` stays within [`MAX_PADDING`] everywhere.
///
/// `tree` is `None` where the write would create a fresh container.
fn within_padding(tree: Option<&Value>, tokens: &[Token]) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return true;
    };
    if let Token::Wildcard = token {
        return match tree {
            Some(Value::Array(items)) => items.iter().all(|item| within_padding(Some(item), rest)),
            _ => true,
        };
    }
    match locate(tree.unwrap_or(&NULL), token) {
        Some(Slot::Element(idx)) => {
            let (len, child) = match tree {
                Some(Value::Array(items)) => (items.len(), items.get(idx)),
                _ => (0, None),
            };
            idx <= len.saturating_add(MAX_PADDING) && within_padding(child, rest)
        }
        Some(Slot::Property(key)) => {
            let child = tree.and_then(Value::as_object).and_then(|map| map.get(&key));
            within_padding(child, rest)
        }
        None => true,
    }
}

fn assign(tree: Value, tokens: &[Token], value: Value) -> Value {
    let Some((token, rest)) = tokens.split_first() else {
        return value;
    };

    if let Token::Wildcard = token {
        return match tree {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| assign(item, rest, value.clone()))
                    .collect(),
            ),
            other => {
                tracing::debug!("wildcard write over a non-array is ignored");
                other
            }
        };
    }

    match locate(&tree, token) {
        Some(Slot::Element(idx)) => {
            let mut items = match tree {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            let Some(len) = idx.checked_add(1) else {
                return Value::Array(items);
            };
            if items.len() < len {
                items.resize(len, Value::Null);
            }
            let current = std::mem::take(&mut items[idx]);
            items[idx] = assign(current, rest, value);
            Value::Array(items)
        }
        Some(Slot::Property(key)) => {
            let mut map = match tree {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            let current = map.get_mut(&key).map(std::mem::take).unwrap_or(Value::Null);
            map.insert(key, assign(current, rest, value));
            Value::Object(map)
        }
        None => tree,
    }
}
