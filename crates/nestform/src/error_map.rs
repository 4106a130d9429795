//! Validation messages keyed by path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Error map: path string to message(s), in insertion order.
///
/// Keys are independent strings; `"a.b"` and `"a"` have no relationship.
pub type ErrorMap = IndexMap<String, ErrorMessages>;

/// One message, or an ordered list of messages, for a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessages {
    /// The first message, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            ErrorMessages::One(message) => Some(message),
            ErrorMessages::Many(messages) => messages.first().map(String::as_str),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            ErrorMessages::One(message) => std::slice::from_ref(message),
            ErrorMessages::Many(messages) => messages,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for ErrorMessages {
    fn from(message: &str) -> Self {
        ErrorMessages::One(message.to_string())
    }
}

impl From<String> for ErrorMessages {
    fn from(message: String) -> Self {
        ErrorMessages::One(message)
    }
}

impl From<Vec<String>> for ErrorMessages {
    fn from(messages: Vec<String>) -> Self {
        ErrorMessages::Many(messages)
    }
}

impl From<Vec<&str>> for ErrorMessages {
    fn from(messages: Vec<&str>) -> Self {
        ErrorMessages::Many(messages.into_iter().map(str::to_string).collect())
    }
}

/// Build an [`ErrorMap`] from `(path, message)` pairs.
///
/// ```
/// use nestform::{error_map, ErrorMessages};
///
/// let errors = error_map([("person.name", "can't be blank")]);
/// assert_eq!(errors["person.name"], ErrorMessages::from("can't be blank"));
/// ```
pub fn error_map<K, V, I>(entries: I) -> ErrorMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ErrorMessages>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Name of the single top-level key whose value is an object, if the tree
/// has exactly one top-level key and it holds an object.
pub(crate) fn root_model_key(data: &serde_json::Value) -> Option<String> {
    let map = data.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    value.is_object().then(|| key.clone())
}

/// Prefix every key with `root.` so server errors line up with data paths.
///
/// Keys that already start with `root.` are kept as they are. A key naming a
/// child of the root that shares the root's name is therefore left unprefixed.
pub(crate) fn rewrite_error_keys(errors: ErrorMap, root: Option<&str>) -> ErrorMap {
    let Some(root) = root else {
        return errors;
    };
    let prefix = format!("{root}.");
    errors
        .into_iter()
        .map(|(key, value)| {
            if key.starts_with(&prefix) {
                (key, value)
            } else {
                (format!("{prefix}{key}"), value)
            }
        })
        .collect()
}
