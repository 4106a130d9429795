//! Form state: the live tree, its defaults snapshot, the error map and the
//! flags of the current submission.
//!
//! A [`Form`] is cheap to share by reference across tasks. All state sits
//! behind one `parking_lot` mutex; user callbacks (`on_change`, `transform`
//! and the submission hooks) always run after that lock is released, so a
//! callback may call back into the form.

mod tracker;

use std::sync::Arc;

use nestform_path::{get, set, unset_mut};
use nestform_util::fill_empty_values;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::error_map::ErrorMap;
use crate::remember::{Remember, RememberStore};
use crate::submit::{CancelHandle, HttpClient, Navigator, Progress};

/// Called after every data mutation with `(path, new, previous)`.
///
/// `path` is `None` when the whole tree changed; `new` and `previous` are
/// then whole trees. Removing a path reports `Value::Null` as the new value.
pub type ChangeCallback = Arc<dyn Fn(Option<&str>, &Value, &Value) + Send + Sync>;

/// Applied to a copy of the data right before it is sent.
pub type TransformCallback = Arc<dyn Fn(Value) -> Value + Send + Sync>;

#[derive(Debug)]
pub(crate) struct FormState {
    pub(crate) data: Value,
    pub(crate) defaults: Value,
    pub(crate) errors: ErrorMap,
    pub(crate) has_errors: bool,
    pub(crate) processing: bool,
    pub(crate) progress: Option<Progress>,
    pub(crate) was_successful: bool,
    pub(crate) recently_successful: bool,
    pub(crate) cancel: Option<CancelHandle>,
    /// Pending task that clears `recently_successful`.
    pub(crate) timer: Option<tokio::task::JoinHandle<()>>,
    /// Bumped whenever a new window opens or an old one is revoked.
    pub(crate) generation: u64,
}

impl FormState {
    pub(crate) fn revoke_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

pub(crate) struct Shared {
    pub(crate) state: Mutex<FormState>,
    pub(crate) config: FormConfig,
    pub(crate) navigator: Option<Arc<dyn Navigator>>,
    pub(crate) http_client: Option<Arc<dyn HttpClient>>,
    remember: Option<Remember>,
    on_change: Mutex<Option<ChangeCallback>>,
    transform: Mutex<Option<TransformCallback>>,
}

impl Shared {
    fn persist(&self, state: &FormState) {
        let Some(remember) = &self.remember else {
            return;
        };
        remember.store.remember(&remember.data_key(), state.data.clone());
        match serde_json::to_value(&state.errors) {
            Ok(errors) => remember.store.remember(&remember.errors_key(), errors),
            Err(e) => warn!(key = %remember.key, error = %e, "failed to remember errors"),
        }
    }
}

/// Path-addressed form state.
///
/// ```
/// use nestform::Form;
/// use serde_json::json;
///
/// let form = Form::new(json!({"user": {"name": "", "phones": [{"number": "1"}]}}));
/// assert!(!form.is_dirty());
///
/// form.set_data("user.name", json!("Ada"));
/// assert_eq!(form.get_data("user.name"), Some(json!("Ada")));
/// assert!(form.is_dirty());
///
/// form.unset_data("user.phones[0]");
/// assert_eq!(form.get_data("user.phones"), Some(json!([])));
/// ```
pub struct Form {
    pub(crate) shared: Arc<Shared>,
}

impl Form {
    /// A form over `initial` with default configuration and no transport.
    pub fn new(initial: Value) -> Self {
        FormBuilder::new(initial).build()
    }

    pub fn builder(initial: Value) -> FormBuilder {
        FormBuilder::new(initial)
    }

    pub fn config(&self) -> &FormConfig {
        &self.shared.config
    }

    // ------------------------------------------------------------------
    // State snapshots

    /// Deep copy of the live tree.
    pub fn data(&self) -> Value {
        self.shared.state.lock().data.clone()
    }

    pub fn processing(&self) -> bool {
        self.shared.state.lock().processing
    }

    pub fn progress(&self) -> Option<Progress> {
        self.shared.state.lock().progress
    }

    pub fn was_successful(&self) -> bool {
        self.shared.state.lock().was_successful
    }

    /// True for `recently_successful_ms` after the last success.
    pub fn recently_successful(&self) -> bool {
        self.shared.state.lock().recently_successful
    }

    // ------------------------------------------------------------------
    // Data

    /// Value at `path`, or `None` if absent. Wildcard paths always yield `None`.
    pub fn get_data(&self, path: &str) -> Option<Value> {
        get(&self.shared.state.lock().data, path).cloned()
    }

    /// Write `value` at `path`, creating intermediate containers.
    pub fn set_data(&self, path: &str, value: Value) {
        let previous = self.update(|state| {
            let previous = get(&state.data, path).cloned().unwrap_or(Value::Null);
            state.data = set(&state.data, path, value.clone());
            previous
        });
        self.notify_change(Some(path), &value, &previous);
    }

    /// Replace the whole tree.
    pub fn replace_data(&self, data: Value) {
        let previous = self.update(|state| std::mem::replace(&mut state.data, data.clone()));
        self.notify_change(None, &data, &previous);
    }

    /// Replace the tree with `f(copy of the tree)`.
    ///
    /// `f` runs without the form lock held.
    pub fn update_data<F>(&self, f: F)
    where
        F: FnOnce(Value) -> Value,
    {
        let next = f(self.data());
        self.replace_data(next);
    }

    /// Remove `path`, compacting arrays. Absent paths are ignored.
    pub fn unset_data(&self, path: &str) {
        let previous = self.update(|state| {
            let previous = get(&state.data, path).cloned();
            let mut next = state.data.clone();
            if !unset_mut(&mut next, path) {
                return None;
            }
            state.data = next;
            Some(previous.unwrap_or(Value::Null))
        });
        match previous {
            Some(previous) => self.notify_change(Some(path), &Value::Null, &previous),
            None => debug!(path, "unset_data left the tree unchanged"),
        }
    }

    /// Register the change listener, replacing any previous one.
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(Option<&str>, &Value, &Value) + Send + Sync + 'static,
    {
        *self.shared.on_change.lock() = Some(Arc::new(callback));
    }

    /// Register the outgoing-data transform, replacing any previous one.
    pub fn transform<F>(&self, callback: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        *self.shared.transform.lock() = Some(Arc::new(callback));
    }

    // ------------------------------------------------------------------
    // Internals

    /// Run `f` under the state lock, then persist to the remember store.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        let mut state = self.shared.state.lock();
        let out = f(&mut state);
        self.shared.persist(&state);
        out
    }

    pub(crate) fn notify_change(&self, path: Option<&str>, new: &Value, previous: &Value) {
        let callback = self.shared.on_change.lock().clone();
        if let Some(callback) = callback {
            callback(path, new, previous);
        }
    }

    /// Copy of the data as it should be sent: transformed, then renamed when
    /// nested attributes are enabled.
    pub(crate) fn request_payload(&self) -> Value {
        let data = self.data();
        let transform = self.shared.transform.lock().clone();
        let data = match transform {
            Some(transform) => transform(data),
            None => data,
        };
        if self.shared.config.rails_attributes {
            nestform_path::rename_tree(&data, &self.shared.config.attribute_suffix)
        } else {
            data
        }
    }
}

impl Drop for Form {
    fn drop(&mut self) {
        self.shared.state.lock().revoke_timer();
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Form")
            .field("data", &state.data)
            .field("errors", &state.errors)
            .field("processing", &state.processing)
            .finish()
    }
}

/// Builder for [`Form`].
pub struct FormBuilder {
    initial: Value,
    config: FormConfig,
    navigator: Option<Arc<dyn Navigator>>,
    http_client: Option<Arc<dyn HttpClient>>,
    remember: Option<Remember>,
}

impl FormBuilder {
    pub fn new(initial: Value) -> Self {
        Self {
            initial,
            config: FormConfig::default(),
            navigator: None,
            http_client: None,
            remember: None,
        }
    }

    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Transport for visit-mode submissions.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Transport for deferred submissions.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Restore from and persist to `store` under `key`.
    pub fn remember(mut self, key: impl Into<String>, store: Arc<dyn RememberStore>) -> Self {
        self.remember = Some(Remember {
            key: key.into(),
            store,
        });
        self
    }

    pub fn build(self) -> Form {
        let defaults = fill_empty_values(&self.initial);
        let (data, errors) = match &self.remember {
            Some(remember) => restore(remember, &defaults),
            None => (defaults.clone(), ErrorMap::new()),
        };
        let state = FormState {
            data,
            defaults,
            has_errors: !errors.is_empty(),
            errors,
            processing: false,
            progress: None,
            was_successful: false,
            recently_successful: false,
            cancel: None,
            timer: None,
            generation: 0,
        };
        Form {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                config: self.config,
                navigator: self.navigator,
                http_client: self.http_client,
                remember: self.remember,
                on_change: Mutex::new(None),
                transform: Mutex::new(None),
            }),
        }
    }
}

fn restore(remember: &Remember, initial: &Value) -> (Value, ErrorMap) {
    let data = remember
        .store
        .restore(&remember.data_key())
        .unwrap_or_else(|| initial.clone());
    let errors = match remember.store.restore(&remember.errors_key()) {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            debug!(key = %remember.key, error = %e, "discarding remembered errors");
            ErrorMap::new()
        }),
        None => ErrorMap::new(),
    };
    (data, errors)
}
