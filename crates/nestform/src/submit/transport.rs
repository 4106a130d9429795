//! Collaborator boundary for sending a form.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::AbortHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;
use crate::error_map::ErrorMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub method: Method,
    pub url: String,
    /// Payload after transform and attribute renaming.
    pub data: Value,
}

/// Upload progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl Progress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// Percentage in `0.0..=100.0`, when the total is known and non-zero.
    pub fn percentage(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.loaded as f64 * 100.0 / total as f64),
            _ => None,
        }
    }
}

/// Cancels an in-flight submission when invoked.
#[derive(Clone)]
pub struct CancelHandle(Arc<dyn Fn() + Send + Sync>);

impl CancelHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(cancel))
    }

    pub fn cancel(&self) {
        (self.0)()
    }
}

impl From<AbortHandle> for CancelHandle {
    fn from(handle: AbortHandle) -> Self {
        Self::new(move || handle.abort())
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CancelHandle")
    }
}

/// Lifecycle hooks a [`Navigator`] drives during a visit.
///
/// Order: `on_cancel_token`, `on_before`, `on_start`, any number of
/// `on_progress`, exactly one of `on_success` / `on_error` / `on_cancel`,
/// then `on_finish`.
pub trait VisitEvents: Send {
    fn on_cancel_token(&mut self, handle: CancelHandle);
    fn on_before(&mut self, visit: &Visit);
    fn on_start(&mut self, visit: &Visit);
    fn on_progress(&mut self, progress: Progress);
    fn on_success(&mut self, payload: Value);
    fn on_error(&mut self, errors: ErrorMap);
    fn on_cancel(&mut self);
    fn on_finish(&mut self, visit: &Visit);
}

/// Navigation-style transport that drives the hook sequence itself.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn visit(&self, visit: Visit, events: &mut dyn VisitEvents);
}

/// Plain request/response client. The form drives the hooks around it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(
        &self,
        visit: &Visit,
        on_upload_progress: &mut (dyn FnMut(Progress) + Send),
    ) -> Result<Value, TransportError>;
}
