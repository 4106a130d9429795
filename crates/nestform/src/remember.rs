//! Opaque key-value slot used to keep form state across navigations.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// Storage for remembered form state.
///
/// The form writes `"{key}:data"` and `"{key}:errors"` after every change
/// and reads them back when it is built.
pub trait RememberStore: Send + Sync {
    fn restore(&self, key: &str) -> Option<Value>;
    fn remember(&self, key: &str, value: Value);
}

/// In-memory [`RememberStore`].
#[derive(Debug, Default)]
pub struct MemoryRememberStore {
    slots: Mutex<HashMap<String, Value>>,
}

impl MemoryRememberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RememberStore for MemoryRememberStore {
    fn restore(&self, key: &str) -> Option<Value> {
        self.slots.lock().get(key).cloned()
    }

    fn remember(&self, key: &str, value: Value) {
        self.slots.lock().insert(key.to_string(), value);
    }
}

/// A store plus the key prefix a form writes under.
#[derive(Clone)]
pub(crate) struct Remember {
    pub(crate) key: String,
    pub(crate) store: Arc<dyn RememberStore>,
}

impl Remember {
    pub(crate) fn data_key(&self) -> String {
        format!("{}:data", self.key)
    }

    pub(crate) fn errors_key(&self) -> String {
        format!("{}:errors", self.key)
    }
}

impl std::fmt::Debug for Remember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remember").field("key", &self.key).finish()
    }
}
