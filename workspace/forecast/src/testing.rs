//! Test doubles for the transport, view and event seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::{ForecastError, Result};
use crate::handler::SubmitEvent;
use crate::transport::{ApiRequest, RawResponse, Transport};
use crate::view::{DisplayMessage, ResultView};

struct Step {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<RawResponse>,
}

/// Replays a fixed sequence of responses, one per request, and records
/// every request it was asked to send.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: RefCell<VecDeque<Step>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(None, Ok(RawResponse { status, body: body.to_string() }))
    }

    /// Like [`respond`](Self::respond), but the response is held back until `gate` fires.
    pub fn respond_after(self, gate: oneshot::Receiver<()>, status: u16, body: &str) -> Self {
        self.push(Some(gate), Ok(RawResponse { status, body: body.to_string() }))
    }

    pub fn fail(self, reason: &str) -> Self {
        self.push(None, Err(ForecastError::Transport(reason.to_string())))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    fn push(self, gate: Option<oneshot::Receiver<()>>, outcome: Result<RawResponse>) -> Self {
        self.steps.borrow_mut().push_back(Step { gate, outcome });
        self
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.borrow_mut().push(request);
        let step = self.steps.borrow_mut().pop_front();
        let Some(step) = step else {
            return Err(ForecastError::Transport("no scripted response left".to_string()));
        };
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.outcome
    }
}

/// Remembers everything it was asked to show.
#[derive(Default)]
pub struct RecordingView {
    shown: RefCell<Vec<DisplayMessage>>,
    pending: RefCell<Vec<bool>>,
}

impl RecordingView {
    pub fn texts(&self) -> Vec<String> {
        self.shown.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn pending_changes(&self) -> Vec<bool> {
        self.pending.borrow().clone()
    }
}

impl ResultView for RecordingView {
    fn show(&self, message: &DisplayMessage) {
        self.shown.borrow_mut().push(message.clone());
    }

    fn set_pending(&self, pending: bool) {
        self.pending.borrow_mut().push(pending);
    }
}

/// Counts how often its default action was suppressed. Clones share the count.
#[derive(Clone, Default)]
pub struct RecordingEvent {
    prevented: Rc<Cell<usize>>,
}

impl RecordingEvent {
    pub fn prevented(&self) -> usize {
        self.prevented.get()
    }
}

impl SubmitEvent for RecordingEvent {
    fn prevent_default(&self) {
        self.prevented.set(self.prevented.get() + 1);
    }
}
