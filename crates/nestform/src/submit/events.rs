//! Form-side handling of the submission hooks.

use std::sync::{Arc, Weak};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, trace};

use super::hooks::Hooks;
use super::transport::{CancelHandle, Method, Progress, Visit, VisitEvents};
use crate::error_map::{rewrite_error_keys, root_model_key, ErrorMap};
use crate::form::{Form, FormState, Shared};

/// Applies each hook to the form's state, then forwards it to the caller.
///
/// Dropping it before `on_finish` (the submit future was dropped mid-flight)
/// applies the finish effects so the form can submit again.
pub(crate) struct SubmitEvents<'a> {
    form: &'a Form,
    method: Method,
    url: String,
    hooks: Hooks,
    finished: bool,
}

impl<'a> SubmitEvents<'a> {
    pub(crate) fn new(form: &'a Form, method: Method, url: &str, hooks: Hooks) -> Self {
        Self {
            form,
            method,
            url: url.to_string(),
            hooks,
            finished: false,
        }
    }

    fn trace(&self, hook: &'static str) {
        trace!(method = %self.method, url = %self.url, hook, "submit hook");
    }
}

impl VisitEvents for SubmitEvents<'_> {
    fn on_cancel_token(&mut self, handle: CancelHandle) {
        self.trace("cancel_token");
        self.form.update(|state| state.cancel = Some(handle.clone()));
        if let Some(hook) = self.hooks.on_cancel_token.as_mut() {
            hook(&handle);
        }
    }

    fn on_before(&mut self, visit: &Visit) {
        self.trace("before");
        self.form.update(|state| {
            state.was_successful = false;
            state.recently_successful = false;
            state.revoke_timer();
        });
        if let Some(hook) = self.hooks.on_before.as_mut() {
            hook(visit);
        }
    }

    fn on_start(&mut self, visit: &Visit) {
        self.trace("start");
        self.form.update(|state| state.processing = true);
        if let Some(hook) = self.hooks.on_start.as_mut() {
            hook(visit);
        }
    }

    fn on_progress(&mut self, progress: Progress) {
        self.trace("progress");
        self.form.update(|state| state.progress = Some(progress));
        if let Some(hook) = self.hooks.on_progress.as_mut() {
            hook(&progress);
        }
    }

    fn on_success(&mut self, payload: Value) {
        self.trace("success");
        let shared = &self.form.shared;
        self.form.update(|state| {
            state.processing = false;
            state.progress = None;
            state.errors.clear();
            state.has_errors = false;
            state.was_successful = true;
            state.recently_successful = true;
            start_recently_successful_timer(shared, state);
        });
        if let Some(hook) = self.hooks.on_success.as_mut() {
            hook(&payload);
        }
    }

    fn on_error(&mut self, errors: ErrorMap) {
        self.trace("error");
        self.form.update(|state| {
            state.processing = false;
            state.progress = None;
            let root = root_model_key(&state.data);
            state
                .errors
                .extend(rewrite_error_keys(errors.clone(), root.as_deref()));
            state.has_errors = true;
        });
        if let Some(hook) = self.hooks.on_error.as_mut() {
            hook(&errors);
        }
    }

    fn on_cancel(&mut self) {
        self.trace("cancel");
        self.form.update(|state| {
            state.processing = false;
            state.progress = None;
        });
        if let Some(hook) = self.hooks.on_cancel.as_mut() {
            hook();
        }
    }

    fn on_finish(&mut self, visit: &Visit) {
        self.trace("finish");
        self.finished = true;
        self.form.update(settle);
        if let Some(hook) = self.hooks.on_finish.as_mut() {
            hook(visit);
        }
    }
}

impl Drop for SubmitEvents<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        debug!(method = %self.method, url = %self.url, "submission dropped before finish");
        self.form.update(settle);
    }
}

fn settle(state: &mut FormState) {
    state.processing = false;
    state.progress = None;
    state.cancel = None;
}

/// Open a new recently-successful window and schedule its expiry.
///
/// The task holds only a weak reference; it writes nothing if the form is
/// gone or a newer window has replaced this one.
fn start_recently_successful_timer(shared: &Arc<Shared>, state: &mut FormState) {
    state.revoke_timer();
    let generation = state.generation;
    let weak: Weak<Shared> = Arc::downgrade(shared);
    let delay = Duration::from_millis(shared.config.recently_successful_ms);

    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        debug!("no tokio runtime, recently_successful will not expire");
        return;
    };
    state.timer = Some(runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(shared) = weak.upgrade() {
            let mut state = shared.state.lock();
            if state.generation == generation {
                state.recently_successful = false;
                state.timer = None;
            }
        }
    }));
}
