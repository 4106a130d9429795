#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use nestform::{
    CancelHandle, ErrorMap, Hooks, HttpClient, Navigator, Progress, TransportError, Visit,
    VisitEvents,
};
use parking_lot::Mutex;
use serde_json::Value;

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().clone()
}

/// Hooks that append their own name to `log`.
pub fn recording_hooks(log: &Log) -> Hooks {
    let (a, b, c, d, e, f, g) = (
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
    );
    Hooks::new()
        .on_before(move |_| a.lock().push("before".into()))
        .on_start(move |_| b.lock().push("start".into()))
        .on_progress(move |_| c.lock().push("progress".into()))
        .on_success(move |_| d.lock().push("success".into()))
        .on_error(move |_| e.lock().push("error".into()))
        .on_cancel(move || f.lock().push("cancel".into()))
        .on_finish(move |_| g.lock().push("finish".into()))
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Success(Value),
    Errors(ErrorMap),
    Cancel,
}

/// Navigator that replays a fixed hook sequence.
pub struct FakeNavigator {
    outcome: Outcome,
    progress: Vec<Progress>,
    pub visits: Mutex<Vec<Visit>>,
}

impl FakeNavigator {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Self::with_progress(outcome, Vec::new())
    }

    pub fn with_progress(outcome: Outcome, progress: Vec<Progress>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            progress,
            visits: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Navigator for FakeNavigator {
    async fn visit(&self, visit: Visit, events: &mut dyn VisitEvents) {
        self.visits.lock().push(visit.clone());
        events.on_cancel_token(CancelHandle::new(|| {}));
        events.on_before(&visit);
        events.on_start(&visit);
        for progress in &self.progress {
            events.on_progress(*progress);
        }
        match &self.outcome {
            Outcome::Success(payload) => events.on_success(payload.clone()),
            Outcome::Errors(errors) => events.on_error(errors.clone()),
            Outcome::Cancel => events.on_cancel(),
        }
        events.on_finish(&visit);
    }
}

#[derive(Debug, Clone)]
pub enum Response {
    Ok(Value),
    Err(TransportError),
    /// Never completes; only cancellation ends the request.
    Hang,
}

/// Request/response client with a canned answer.
pub struct FakeClient {
    response: Response,
    progress: Vec<Progress>,
    pub sent: Mutex<Vec<Visit>>,
}

impl FakeClient {
    pub fn new(response: Response) -> Arc<Self> {
        Self::with_progress(response, Vec::new())
    }

    pub fn with_progress(response: Response, progress: Vec<Progress>) -> Arc<Self> {
        Arc::new(Self {
            response,
            progress,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn last_sent(&self) -> Option<Visit> {
        self.sent.lock().last().cloned()
    }
}

#[async_trait]
impl HttpClient for FakeClient {
    async fn send(
        &self,
        visit: &Visit,
        on_upload_progress: &mut (dyn FnMut(Progress) + Send),
    ) -> Result<Value, TransportError> {
        self.sent.lock().push(visit.clone());
        for progress in &self.progress {
            on_upload_progress(*progress);
        }
        match &self.response {
            Response::Ok(payload) => Ok(payload.clone()),
            Response::Err(error) => Err(error.clone()),
            Response::Hang => std::future::pending().await,
        }
    }
}
