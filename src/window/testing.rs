use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::oneshot;

use crate::window::{TransportError, WindowCommand, WindowStateSnapshot, WindowStateTransport};

pub(crate) fn snapshot(state: Option<f64>) -> WindowStateSnapshot {
    WindowStateSnapshot {
        state,
        ..WindowStateSnapshot::default()
    }
}

pub(crate) fn unavailable(endpoint: &str) -> TransportError {
    TransportError::Status {
        endpoint: endpoint.to_owned(),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[derive(Default)]
struct Script {
    reads: VecDeque<Result<WindowStateSnapshot, TransportError>>,
    write_results: VecDeque<Result<(), TransportError>>,
    read_calls: usize,
    writes: Vec<WindowCommand>,
}

/// Answers reads from a queue (503 once it runs dry) and records writes,
/// which succeed unless a failure was queued.
#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    name: String,
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            script: Arc::default(),
        }
    }

    pub fn push_read(&self, result: Result<WindowStateSnapshot, TransportError>) {
        self.script.lock().unwrap().reads.push_back(result);
    }

    pub fn push_write(&self, result: Result<(), TransportError>) {
        self.script.lock().unwrap().write_results.push_back(result);
    }

    pub fn read_calls(&self) -> usize {
        self.script.lock().unwrap().read_calls
    }

    pub fn writes(&self) -> Vec<WindowCommand> {
        self.script.lock().unwrap().writes.clone()
    }
}

#[async_trait]
impl WindowStateTransport for ScriptedTransport {
    fn endpoint(&self) -> &str {
        &self.name
    }

    async fn read_state(&self) -> Result<WindowStateSnapshot, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.read_calls += 1;
        script
            .reads
            .pop_front()
            .unwrap_or_else(|| Err(unavailable(&self.name)))
    }

    async fn write_state(&self, command: WindowCommand) -> Result<(), TransportError> {
        let mut script = self.script.lock().unwrap();
        script.writes.push(command);
        script.write_results.pop_front().unwrap_or(Ok(()))
    }
}

/// Reads block until the test releases them, in call order. Writes succeed
/// immediately.
#[derive(Clone, Default)]
pub(crate) struct GatedTransport {
    gates: Arc<Mutex<VecDeque<oneshot::Receiver<Result<WindowStateSnapshot, TransportError>>>>>,
}

impl GatedTransport {
    pub fn gate(&self) -> oneshot::Sender<Result<WindowStateSnapshot, TransportError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl WindowStateTransport for GatedTransport {
    fn endpoint(&self) -> &str {
        "gated"
    }

    async fn read_state(&self) -> Result<WindowStateSnapshot, TransportError> {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(unavailable("gated"))),
            None => Err(unavailable("gated")),
        }
    }

    async fn write_state(&self, _command: WindowCommand) -> Result<(), TransportError> {
        Ok(())
    }
}
