use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::{Payload, WindowPosition};

/// Actuator state as last reported by the backend. Replaced wholesale, never
/// merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStateSnapshot {
    #[serde(default)]
    pub state: Option<f64>,

    #[serde(default)]
    pub ts: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl WindowStateSnapshot {
    pub fn position(&self) -> WindowPosition {
        WindowPosition::from_state(self.state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Open,
    Close,
}

impl WindowCommand {
    /// The command that flips `position`; `None` while the position is unknown.
    pub fn toggling(position: WindowPosition) -> Option<Self> {
        match position {
            WindowPosition::Closed => Some(WindowCommand::Open),
            WindowPosition::Open => Some(WindowCommand::Close),
            WindowPosition::Unknown => None,
        }
    }

    pub fn state(&self) -> u8 {
        match self {
            WindowCommand::Open => 0,
            WindowCommand::Close => 1,
        }
    }
}

/// Wire body of a state write: `{"state": 0|1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateCommandBody {
    pub state: u8,
}

impl From<WindowCommand> for StateCommandBody {
    fn from(command: WindowCommand) -> Self {
        Self {
            state: command.state(),
        }
    }
}
