//! Submission lifecycle.
//!
//! A submission moves through `before → start → progress* → (success |
//! error | cancel) → finish`. In visit mode a [`Navigator`] drives those
//! hooks. In deferred mode the form calls an [`HttpClient`] and drives
//! them itself, so callers observe the same sequence either way.

mod events;
mod hooks;
mod transport;

pub use hooks::{Hooks, VisitOptions};
pub use transport::{CancelHandle, HttpClient, Method, Navigator, Progress, Visit, VisitEvents};

use std::sync::Arc;

use futures::future::{AbortHandle, Abortable};
use tracing::{debug, warn};

use crate::error::{FormError, TransportError};
use crate::error_map::error_map;
use crate::form::Form;
use events::SubmitEvents;

/// Error-map key used for transport failures that carry no field.
pub const BASE_ERROR_KEY: &str = "base";

impl Form {
    /// Send the form's data with `method` to `url`.
    ///
    /// Returns once the terminal hook and `on_finish` have run. Validation
    /// and network failures are reported through the error map and the
    /// `on_error` hook, not through the return value.
    pub async fn submit(
        &self,
        method: Method,
        url: &str,
        options: VisitOptions,
    ) -> Result<(), FormError> {
        let VisitOptions { deferred, hooks } = options;
        if deferred && self.shared.http_client.is_none() {
            return Err(FormError::TransportUnavailable("http client"));
        }
        if !deferred && self.shared.navigator.is_none() {
            return Err(FormError::TransportUnavailable("navigator"));
        }
        if self.processing() {
            debug!(%method, url, "submit while another submission is in flight");
        }

        let visit = Visit {
            method,
            url: url.to_string(),
            data: self.request_payload(),
        };
        let mut events = SubmitEvents::new(self, method, url, hooks);

        match (&self.shared.navigator, &self.shared.http_client, deferred) {
            (_, Some(client), true) => drive_deferred(client.clone(), visit, &mut events).await,
            (Some(navigator), _, false) => navigator.visit(visit, &mut events).await,
            _ => {}
        }
        Ok(())
    }

    pub async fn get(&self, url: &str, options: VisitOptions) -> Result<(), FormError> {
        self.submit(Method::Get, url, options).await
    }

    pub async fn post(&self, url: &str, options: VisitOptions) -> Result<(), FormError> {
        self.submit(Method::Post, url, options).await
    }

    pub async fn put(&self, url: &str, options: VisitOptions) -> Result<(), FormError> {
        self.submit(Method::Put, url, options).await
    }

    pub async fn patch(&self, url: &str, options: VisitOptions) -> Result<(), FormError> {
        self.submit(Method::Patch, url, options).await
    }

    pub async fn delete(&self, url: &str, options: VisitOptions) -> Result<(), FormError> {
        self.submit(Method::Delete, url, options).await
    }

    /// Cancel the in-flight submission, if it registered a handle.
    pub fn cancel(&self) {
        let handle = self.shared.state.lock().cancel.clone();
        match handle {
            Some(handle) => handle.cancel(),
            None => debug!("cancel with no submission in flight"),
        }
    }
}

/// Run the full hook sequence around one abortable client call.
async fn drive_deferred(client: Arc<dyn HttpClient>, visit: Visit, events: &mut SubmitEvents<'_>) {
    let (abort, registration) = AbortHandle::new_pair();
    events.on_cancel_token(CancelHandle::from(abort));
    events.on_before(&visit);
    events.on_start(&visit);

    let outcome = {
        let mut on_upload_progress = |progress: Progress| events.on_progress(progress);
        Abortable::new(client.send(&visit, &mut on_upload_progress), registration).await
    };

    match outcome {
        Ok(Ok(payload)) => events.on_success(payload),
        Ok(Err(TransportError::Validation(errors))) => events.on_error(errors),
        Ok(Err(TransportError::Network(message))) => {
            warn!(method = %visit.method, url = %visit.url, %message, "submission failed");
            events.on_error(error_map([(BASE_ERROR_KEY, message)]));
        }
        Err(_aborted) => events.on_cancel(),
    }
    events.on_finish(&visit);
}
