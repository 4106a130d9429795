use serde_json::Value;

use super::transport::{CancelHandle, Progress, Visit};
use crate::error_map::ErrorMap;

/// Caller callbacks for one submission.
///
/// Each hook runs after the form has applied its own state change and
/// released its lock. `on_error` sees the errors as the transport reported
/// them, before the root-key rewrite.
///
/// ```
/// use nestform::Hooks;
///
/// let hooks = Hooks::new()
///     .on_success(|payload| println!("saved: {payload}"))
///     .on_finish(|visit| println!("done: {}", visit.url));
/// ```
#[derive(Default)]
pub struct Hooks {
    pub(crate) on_cancel_token: Option<Box<dyn FnMut(&CancelHandle) + Send>>,
    pub(crate) on_before: Option<Box<dyn FnMut(&Visit) + Send>>,
    pub(crate) on_start: Option<Box<dyn FnMut(&Visit) + Send>>,
    pub(crate) on_progress: Option<Box<dyn FnMut(&Progress) + Send>>,
    pub(crate) on_success: Option<Box<dyn FnMut(&Value) + Send>>,
    pub(crate) on_error: Option<Box<dyn FnMut(&ErrorMap) + Send>>,
    pub(crate) on_cancel: Option<Box<dyn FnMut() + Send>>,
    pub(crate) on_finish: Option<Box<dyn FnMut(&Visit) + Send>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cancel_token(mut self, f: impl FnMut(&CancelHandle) + Send + 'static) -> Self {
        self.on_cancel_token = Some(Box::new(f));
        self
    }

    pub fn on_before(mut self, f: impl FnMut(&Visit) + Send + 'static) -> Self {
        self.on_before = Some(Box::new(f));
        self
    }

    pub fn on_start(mut self, f: impl FnMut(&Visit) + Send + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_progress(mut self, f: impl FnMut(&Progress) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn on_success(mut self, f: impl FnMut(&Value) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&ErrorMap) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    pub fn on_finish(mut self, f: impl FnMut(&Visit) + Send + 'static) -> Self {
        self.on_finish = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_cancel_token", &self.on_cancel_token.is_some())
            .field("on_before", &self.on_before.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

/// Per-submission options.
#[derive(Debug, Default)]
pub struct VisitOptions {
    /// Send through the [`HttpClient`](super::HttpClient) and drive the hooks
    /// locally, instead of handing the visit to the
    /// [`Navigator`](super::Navigator).
    pub deferred: bool,
    pub hooks: Hooks,
}

impl VisitOptions {
    /// Visit-mode options with no hooks.
    pub fn visit() -> Self {
        Self::default()
    }

    /// Deferred-mode options with no hooks.
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            hooks: Hooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }
}
