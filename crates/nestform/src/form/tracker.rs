//! Defaults snapshot, dirty tracking and the validation error map.

use nestform_path::{get, set, unset_mut};
use nestform_util::{is_dirty, Fields};
use serde_json::Value;
use tracing::debug;

use super::{Form, FormState};
use crate::error_map::{ErrorMap, ErrorMessages};

impl FormState {
    fn refresh_has_errors(&mut self) {
        self.has_errors = !self.errors.is_empty();
    }
}

impl Form {
    /// True when the live tree differs structurally from the defaults.
    pub fn is_dirty(&self) -> bool {
        let state = self.shared.state.lock();
        is_dirty(&state.data, &state.defaults)
    }

    /// Deep copy of the defaults snapshot.
    pub fn defaults(&self) -> Value {
        self.shared.state.lock().defaults.clone()
    }

    /// Snapshot the current data as the new defaults.
    pub fn set_defaults(&self) {
        self.update(|state| state.defaults = state.data.clone());
    }

    /// Change the default at one path.
    pub fn set_default(&self, path: &str, value: Value) {
        self.update(|state| state.defaults = set(&state.defaults, path, value));
    }

    /// Merge the top-level keys of `partial` into the defaults.
    pub fn merge_defaults(&self, partial: Value) {
        let Value::Object(partial) = partial else {
            debug!("merge_defaults ignores non-object input");
            return;
        };
        self.update(|state| match &mut state.defaults {
            Value::Object(defaults) => defaults.extend(partial),
            other => *other = Value::Object(partial),
        });
    }

    /// Restore the defaults wholesale and clear every error.
    pub fn reset(&self) {
        let (data, previous) = self.update(|state| {
            let previous = std::mem::replace(&mut state.data, state.defaults.clone());
            state.errors.clear();
            state.refresh_has_errors();
            (state.data.clone(), previous)
        });
        self.notify_change(None, &data, &previous);
    }

    /// Restore only `fields` from the defaults and clear only their errors.
    ///
    /// A field the defaults lack is removed from the data.
    pub fn reset_fields(&self, fields: impl Into<Fields>) {
        let fields = fields.into();
        let (data, previous) = self.update(|state| {
            let previous = state.data.clone();
            let mut next = previous.clone();
            for field in &fields {
                match get(&state.defaults, field) {
                    Some(value) => next = set(&next, field, value.clone()),
                    None => {
                        unset_mut(&mut next, field);
                    }
                }
                state.errors.shift_remove(field.as_str());
            }
            state.data = next.clone();
            state.refresh_has_errors();
            (next, previous)
        });
        self.notify_change(None, &data, &previous);
    }

    // ------------------------------------------------------------------
    // Errors

    /// Deep copy of the error map.
    pub fn errors(&self) -> ErrorMap {
        self.shared.state.lock().errors.clone()
    }

    pub fn has_errors(&self) -> bool {
        self.shared.state.lock().has_errors
    }

    pub fn set_error(&self, path: &str, messages: impl Into<ErrorMessages>) {
        let messages = messages.into();
        self.update(|state| {
            state.errors.insert(path.to_string(), messages);
            state.refresh_has_errors();
        });
    }

    /// Merge `errors` into the map, overwriting entries with the same key.
    pub fn set_errors(&self, errors: ErrorMap) {
        self.update(|state| {
            state.errors.extend(errors);
            state.refresh_has_errors();
        });
    }

    /// Exact-key lookup; `"a"` does not see errors filed under `"a.b"`.
    pub fn get_error(&self, path: &str) -> Option<ErrorMessages> {
        self.shared.state.lock().errors.get(path).cloned()
    }

    pub fn clear_errors(&self) {
        self.update(|state| {
            state.errors.clear();
            state.refresh_has_errors();
        });
    }

    /// Remove the named keys, leaving every other entry in place.
    pub fn clear_errors_for(&self, fields: impl Into<Fields>) {
        let fields = fields.into();
        self.update(|state| {
            state.errors.retain(|key, _| !fields.contains(key));
            state.refresh_has_errors();
        });
    }
}
