//! Compacting removal.
//!
//! Removing an array element splices it out, so later elements shift down.
//! Removing an object property below an array element also drops the `null`
//! gaps from every array the path passed through, so arrays stay compact.
//!
//! Wildcard expansion: the first `[]` is expanded over the array as it stood
//! before the removal began, in ascending index order, and each concrete
//! path is expanded recursively (depth first per element). Gap compaction
//! is deferred until every expanded removal has run, so it can never shift
//! an index that is still waiting to be processed.

use serde_json::Value;

use crate::get::get_tokens_mut;
use crate::parse::{array_index, parse};
use crate::types::Token;

/// Remove the value at `path` from a copy of `tree` and return the copy.
///
/// # Example
///
/// ```
/// use nestform_path::unset;
/// use serde_json::json;
///
/// let doc = json!({"phones": [{"number": "1"}, {"number": "2"}, {"number": "3"}]});
/// let out = unset(&doc, "phones[1]");
/// assert_eq!(out, json!({"phones": [{"number": "1"}, {"number": "3"}]}));
/// ```
pub fn unset(tree: &Value, path: &str) -> Value {
    let mut out = tree.clone();
    unset_mut(&mut out, path);
    out
}

/// Remove the value at `path` in place. Returns true if anything was removed.
pub fn unset_mut(tree: &mut Value, path: &str) -> bool {
    unset_tokens_mut(tree, &parse(path))
}

/// Remove the value(s) denoted by `tokens` in place.
///
/// Absent paths and wildcards over non-arrays are no-ops. A trailing
/// wildcard addresses whole elements rather than a key inside them and
/// leaves the tree unchanged.
pub fn unset_tokens_mut(tree: &mut Value, tokens: &[Token]) -> bool {
    let Some(last) = tokens.last() else {
        return false;
    };
    if let Token::Wildcard = last {
        tracing::debug!(path = %crate::format(tokens), "trailing wildcard unset ignored");
        return false;
    }

    let removed = remove_expanded(tree, tokens);
    if !removed {
        tracing::debug!(path = %crate::format(tokens), "nothing to unset");
        return false;
    }

    let ancestors = &tokens[..tokens.len() - 1];
    if let Token::Key(_) = last {
        if ancestors.iter().any(Token::is_element) {
            compact_gaps(tree, ancestors);
        }
    }
    true
}

fn remove_expanded(tree: &mut Value, tokens: &[Token]) -> bool {
    match tokens.iter().position(|t| matches!(t, Token::Wildcard)) {
        Some(at) => {
            let (prefix, rest) = (&tokens[..at], &tokens[at + 1..]);
            let Some(Value::Array(items)) = get_tokens_mut(tree, prefix) else {
                return false;
            };
            let mut removed = false;
            for item in items.iter_mut() {
                removed |= remove_expanded(item, rest);
            }
            removed
        }
        None => remove_at(tree, tokens),
    }
}

fn remove_at(tree: &mut Value, tokens: &[Token]) -> bool {
    let Some((last, parent_path)) = tokens.split_last() else {
        return false;
    };
    let Some(parent) = get_tokens_mut(tree, parent_path) else {
        return false;
    };

    match (parent, last) {
        (Value::Array(items), Token::Index(idx)) => splice(items, *idx),
        (Value::Array(items), Token::Key(key)) => match array_index(key) {
            Some(idx) => splice(items, idx),
            None => false,
        },
        (Value::Object(map), Token::Key(key)) => map.shift_remove(key).is_some(),
        (Value::Object(map), Token::Index(idx)) => map.shift_remove(&idx.to_string()).is_some(),
        _ => false,
    }
}

fn splice(items: &mut Vec<Value>, idx: usize) -> bool {
    if idx < items.len() {
        items.remove(idx);
        true
    } else {
        false
    }
}

/// Drop `null` gaps from every array that `tokens` steps into.
fn compact_gaps(tree: &mut Value, tokens: &[Token]) {
    let Some((token, rest)) = tokens.split_first() else {
        return;
    };

    match tree {
        Value::Array(items) => {
            match token {
                Token::Wildcard => {
                    for item in items.iter_mut() {
                        compact_gaps(item, rest);
                    }
                }
                Token::Index(idx) => {
                    if let Some(item) = items.get_mut(*idx) {
                        compact_gaps(item, rest);
                    }
                }
                Token::Key(key) => match array_index(key) {
                    Some(idx) => {
                        if let Some(item) = items.get_mut(idx) {
                            compact_gaps(item, rest);
                        }
                    }
                    None => return,
                },
            }
            items.retain(|item| !item.is_null());
        }
        Value::Object(map) => {
            let child = match token {
                Token::Key(key) => map.get_mut(key),
                Token::Index(idx) => map.get_mut(&idx.to_string()),
                Token::Wildcard => None,
            };
            if let Some(child) = child {
                compact_gaps(child, rest);
            }
        }
        _ => {}
    }
}
