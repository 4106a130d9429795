use serde_json::{Map, Value};

/// Replace `null` values with empty strings, recursively.
///
/// Form inputs bound to server data need a concrete value; this turns every
/// `null` leaf inside objects and arrays into `""`. A `null` root becomes an
/// empty object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use nestform_util::fill_empty_values;
///
/// let data = json!({"one": "one", "two": null, "nested": {"three": null}});
/// assert_eq!(
///     fill_empty_values(&data),
///     json!({"one": "one", "two": "", "nested": {"three": ""}})
/// );
/// ```
pub fn fill_empty_values(data: &Value) -> Value {
    match data {
        Value::Null => Value::Object(Map::new()),
        other => fill(other),
    }
}

fn fill(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), fill(child)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(fill).collect()),
        scalar => scalar.clone(),
    }
}
