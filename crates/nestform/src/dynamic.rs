//! Add/remove rows of an array-valued field.

use nestform_path::{get, join, set};
use serde_json::{Map, Value};

use crate::form::Form;

/// Fields merged over the empty template when a row is added.
pub enum InputOverride {
    Static(Map<String, Value>),
    /// Computed from the rows already present.
    Derived(Box<dyn FnOnce(&[Value]) -> Map<String, Value> + Send>),
}

impl InputOverride {
    pub fn derived<F>(f: F) -> Self
    where
        F: FnOnce(&[Value]) -> Map<String, Value> + Send + 'static,
    {
        InputOverride::Derived(Box::new(f))
    }

    fn resolve(self, rows: &[Value]) -> Map<String, Value> {
        match self {
            InputOverride::Static(fields) => fields,
            InputOverride::Derived(f) => f(rows),
        }
    }
}

impl From<Map<String, Value>> for InputOverride {
    fn from(fields: Map<String, Value>) -> Self {
        InputOverride::Static(fields)
    }
}

impl std::fmt::Debug for InputOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputOverride::Static(fields) => f.debug_tuple("Static").field(fields).finish(),
            InputOverride::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// A repeatable group of inputs stored as an array in the form data.
///
/// The array lives at `scope.model`; `scope` is the enclosing form or
/// nested-fields prefix, if there is one.
///
/// ```
/// use nestform::{DynamicInputs, Form};
/// use serde_json::json;
///
/// let form = Form::new(json!({"user": {"phones": []}}));
/// let phones = DynamicInputs::new(
///     Some("user"),
///     "phones",
///     json!({"number": ""}).as_object().cloned().unwrap_or_default(),
/// );
///
/// phones.add_input(&form, None);
/// assert_eq!(phones.paths(&form), ["phones[0]"]);
/// assert_eq!(form.get_data("user.phones"), Some(json!([{"number": ""}])));
/// ```
#[derive(Debug, Clone)]
pub struct DynamicInputs {
    model: String,
    target: String,
    empty: Map<String, Value>,
}

impl DynamicInputs {
    pub fn new(scope: Option<&str>, model: &str, empty: Map<String, Value>) -> Self {
        Self {
            model: model.to_string(),
            target: join(scope.unwrap_or(""), model),
            empty,
        }
    }

    /// Relative name of the array, as passed to [`new`](Self::new).
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full path of the array in the form data.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Append a copy of the empty template, with `input` merged over it.
    ///
    /// A missing or non-array target is replaced by an empty array first.
    pub fn add_input(&self, form: &Form, input: Option<InputOverride>) {
        form.update_data(|data| {
            let mut rows = match get(&data, &self.target) {
                Some(Value::Array(rows)) => rows.clone(),
                _ => Vec::new(),
            };
            let mut row = self.empty.clone();
            if let Some(input) = input {
                row.extend(input.resolve(&rows));
            }
            rows.push(Value::Object(row));
            set(&data, &self.target, Value::Array(rows))
        });
    }

    /// Remove row `index`, compacting the array. Returns the removed row.
    pub fn remove_input(&self, form: &Form, index: usize) -> Option<Value> {
        let path = format!("{}[{}]", self.target, index);
        let removed = form.get_data(&path)?;
        form.unset_data(&path);
        Some(removed)
    }

    /// `model[i]` for every current row, for binding per-row inputs.
    pub fn paths(&self, form: &Form) -> Vec<String> {
        match form.get_data(&self.target) {
            Some(Value::Array(rows)) => (0..rows.len())
                .map(|i| format!("{}[{}]", self.model, i))
                .collect(),
            _ => Vec::new(),
        }
    }
}
