use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::telemetry::WindowPosition;
use crate::window::{WindowCommand, WindowStateSnapshot, WindowStateTransport};

pub const READ_FAILED: &str = "failed to read window state";
pub const WRITE_FAILED: &str = "failed to send window command";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    Loading,
    Ready,
    /// The last request failed; any earlier snapshot is still available.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Position unknown or another command in flight; nothing was sent.
    Refused,
    Applied(WindowCommand),
    Failed,
}

/// Point-in-time copy of the controller state. Everything derived from it is
/// recomputed on each call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerView {
    pub snapshot: Option<WindowStateSnapshot>,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ControllerView {
    pub fn phase(&self) -> Phase {
        if let Some(error) = &self.error {
            return Phase::Error(error.clone());
        }

        match (&self.snapshot, self.loading) {
            (Some(_), _) => Phase::Ready,
            (None, true) => Phase::Loading,
            (None, false) => Phase::Idle,
        }
    }

    pub fn position(&self) -> WindowPosition {
        self.snapshot
            .as_ref()
            .map_or(WindowPosition::Unknown, WindowStateSnapshot::position)
    }

    pub fn target_command(&self) -> Option<WindowCommand> {
        WindowCommand::toggling(self.position())
    }

    pub fn action_label(&self) -> &'static str {
        if self.submitting {
            return "Sending…";
        }

        match self.position() {
            WindowPosition::Closed => "Open window",
            WindowPosition::Open => "Close window",
            WindowPosition::Unknown => "Reading state…",
        }
    }

    pub fn status_text(&self) -> &str {
        if let Some(error) = &self.error {
            return error;
        }

        if self.loading && self.snapshot.is_none() {
            return "Loading…";
        }

        match self.position() {
            WindowPosition::Closed => "Window closed (1)",
            WindowPosition::Open => "Window open (0)",
            WindowPosition::Unknown => "No window state reported",
        }
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    snapshot: Option<WindowStateSnapshot>,
    error: Option<String>,
    polls_in_flight: usize,
    submitting: bool,
    issued_seq: u64,
    applied_seq: u64,
}

struct Shared<T> {
    transport: T,
    state: Mutex<ControllerState>,
}

impl<T> Shared<T> {
    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, Copy)]
enum Flight {
    Poll,
    Command,
}

/// Clears the in-flight marker when dropped, so a cancelled poll or command
/// does not leave the controller loading or submitting.
struct FlightGuard<'a, T> {
    shared: &'a Shared<T>,
    flight: Flight,
}

impl<T> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.shared.state();
        match self.flight {
            Flight::Poll => state.polls_in_flight -= 1,
            Flight::Command => state.submitting = false,
        }
    }
}

/// Owns the local view of one window actuator.
///
/// Clones share the same state, so a clone can be handed to the polling timer
/// while the original keeps serving reads and commands.
pub struct WindowController<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for WindowController<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: WindowStateTransport> WindowController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                transport,
                state: Mutex::new(ControllerState::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.shared.state()
    }

    pub fn view(&self) -> ControllerView {
        let state = self.state();
        ControllerView {
            snapshot: state.snapshot.clone(),
            loading: state.polls_in_flight > 0,
            submitting: state.submitting,
            error: state.error.clone(),
        }
    }

    /// Reads the actuator state. Failures are recorded in the view, never
    /// returned.
    ///
    /// Each poll is numbered when issued; a response that completes after a
    /// newer one has been applied is dropped.
    pub async fn poll(&self) {
        let seq = {
            let mut state = self.state();
            state.issued_seq += 1;
            state.polls_in_flight += 1;
            state.issued_seq
        };
        let _in_flight = FlightGuard {
            shared: &self.shared,
            flight: Flight::Poll,
        };

        let result = self.shared.transport.read_state().await;

        let mut state = self.state();
        if seq < state.applied_seq {
            debug!(seq, applied = state.applied_seq, "dropping stale window state response");
            return;
        }
        state.applied_seq = seq;

        match result {
            Ok(snapshot) => {
                debug!(seq, state = ?snapshot.state, "window state refreshed");
                state.snapshot = Some(snapshot);
                state.error = None;
            }
            Err(err) => {
                warn!(seq, error = %err, "{READ_FAILED}");
                state.error = Some(READ_FAILED.to_owned());
            }
        }
    }

    /// Out-of-band poll; the timer schedule is left alone.
    pub async fn refresh(&self) {
        self.poll().await;
    }

    /// Sends the command that flips the known position, then re-reads the
    /// state before clearing `submitting`. Dropping the future early also
    /// clears it.
    pub async fn toggle(&self) -> CommandOutcome {
        let command = {
            let mut state = self.state();
            if state.submitting {
                debug!("window command already in flight");
                return CommandOutcome::Refused;
            }

            let position = state
                .snapshot
                .as_ref()
                .map_or(WindowPosition::Unknown, WindowStateSnapshot::position);
            let Some(command) = WindowCommand::toggling(position) else {
                debug!("window position unknown, not sending a command");
                return CommandOutcome::Refused;
            };

            state.submitting = true;
            state.error = None;
            command
        };
        let _in_flight = FlightGuard {
            shared: &self.shared,
            flight: Flight::Command,
        };

        info!(?command, "sending window command");

        match self.shared.transport.write_state(command).await {
            Ok(()) => {
                self.poll().await;
                CommandOutcome::Applied(command)
            }
            Err(err) => {
                warn!(?command, error = %err, "{WRITE_FAILED}");
                self.state().error = Some(WRITE_FAILED.to_owned());
                CommandOutcome::Failed
            }
        }
    }
}
