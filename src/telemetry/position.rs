use std::fmt;

use serde::{Deserialize, Serialize};

/// Readings at or above this value mean the window is closed.
pub const CLOSED_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPosition {
    Closed,
    Open,
    /// No state reported yet; neither open nor closed.
    Unknown,
}

impl WindowPosition {
    pub fn from_state(state: Option<f64>) -> Self {
        match state {
            Some(v) if v >= CLOSED_THRESHOLD => WindowPosition::Closed,
            Some(v) if v < CLOSED_THRESHOLD => WindowPosition::Open,
            // NaN compares false both ways.
            _ => WindowPosition::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPosition::Closed => "closed",
            WindowPosition::Open => "open",
            WindowPosition::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WindowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
