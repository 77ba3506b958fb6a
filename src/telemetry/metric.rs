use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Metric {
    TemperatureInside,
    TemperatureOutside,
    TemperatureOutsideAmbient,
    WindowClosed,
    /// Kept as reported by the source but never charted.
    Other(String),
}

impl Metric {
    pub fn as_str(&self) -> &str {
        match self {
            Metric::TemperatureInside => "temperature_inside",
            Metric::TemperatureOutside => "temperature_outside",
            Metric::TemperatureOutsideAmbient => "temperature_outside_ambient",
            Metric::WindowClosed => "window_closed",
            Metric::Other(name) => name,
        }
    }
}

impl From<&str> for Metric {
    fn from(s: &str) -> Self {
        match s {
            "temperature_inside" => Metric::TemperatureInside,
            "temperature_outside" => Metric::TemperatureOutside,
            "temperature_outside_ambient" => Metric::TemperatureOutsideAmbient,
            "window_closed" => Metric::WindowClosed,
            other => Metric::Other(other.to_owned()),
        }
    }
}

impl From<String> for Metric {
    fn from(s: String) -> Self {
        match Metric::from(s.as_str()) {
            Metric::Other(_) => Metric::Other(s),
            known => known,
        }
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
