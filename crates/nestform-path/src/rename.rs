//! Nested-attribute key renaming.
//!
//! Server frameworks that accept nested records expect interior keys to
//! carry a suffix (`person_attributes`, `phones_attributes`). These helpers
//! add the suffix to paths and trees before submission and strip it from
//! paths coming back.

use serde_json::Value;

use crate::parse::segment_has_brackets;

/// Suffix used when none is given.
pub const DEFAULT_SUFFIX: &str = "_attributes";

/// Append `suffix` to every interior segment key of a path.
///
/// The first and last segments are never renamed, and neither are segments
/// that address array elements (`[0]`, `phones[2]`, `phones[]`).
///
/// [`rename_tree`] does rename array-valued keys, so a renamed path that
/// steps through an array (`contact_attributes.phones[2]`) does not address
/// the renamed tree (`contact_attributes.phones_attributes[2]`). Paths are
/// renamed for field names, trees for request bodies.
///
/// # Example
///
/// ```
/// use nestform_path::{rename_path, DEFAULT_SUFFIX};
///
/// assert_eq!(rename_path("user.person.name", DEFAULT_SUFFIX), "user.person_attributes.name");
/// assert_eq!(
///     rename_path("user.contact.phones[2].number", DEFAULT_SUFFIX),
///     "user.contact_attributes.phones[2].number"
/// );
/// ```
pub fn rename_path(path: &str, suffix: &str) -> String {
    let segments: Vec<&str> = path.split('.').collect();
    let last = segments.len() - 1;
    let mut out = String::with_capacity(path.len() + suffix.len() * last);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(segment);
        if i != 0 && i != last && !segment_has_brackets(segment) {
            out.push_str(suffix);
        }
    }
    out
}

/// Remove `suffix` wherever it ends a segment that is followed by another.
///
/// # Example
///
/// ```
/// use nestform_path::{strip_path, DEFAULT_SUFFIX};
///
/// assert_eq!(strip_path("user.person_attributes.name", DEFAULT_SUFFIX), "user.person.name");
/// assert_eq!(strip_path("user.manager_attributes_sorted", DEFAULT_SUFFIX), "user.manager_attributes_sorted");
/// ```
pub fn strip_path(path: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return path.to_string();
    }
    path.replace(&format!("{suffix}."), ".")
}

/// Copy `tree`, appending `suffix` to every nested key whose value is an
/// object or an array.
///
/// Top-level keys keep their names. Renamed keys keep their position in
/// the object.
///
/// # Example
///
/// ```
/// use nestform_path::{rename_tree, DEFAULT_SUFFIX};
/// use serde_json::json;
///
/// let data = json!({"person": {"first_name": "S", "user": {"username": "u"}}});
/// assert_eq!(
///     rename_tree(&data, DEFAULT_SUFFIX),
///     json!({"person": {"first_name": "S", "user_attributes": {"username": "u"}}})
/// );
/// ```
pub fn rename_tree(tree: &Value, suffix: &str) -> Value {
    match tree {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), rename_below(value, suffix)))
                .collect(),
        ),
        other => rename_below(other, suffix),
    }
}

fn rename_below(value: &Value, suffix: &str) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    if child.is_object() || child.is_array() {
                        (format!("{key}{suffix}"), rename_below(child, suffix))
                    } else {
                        (key.clone(), child.clone())
                    }
                })
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| rename_below(item, suffix)).collect())
        }
        scalar => scalar.clone(),
    }
}
