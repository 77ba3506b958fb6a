use chrono::{DateTime, Utc};

use crate::telemetry::{Measurement, Metric, Payload, WindowPosition};

/// Newest sample per known metric, for "current value" displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestReadings {
    pub inside: Option<Measurement>,
    pub outside: Option<Measurement>,
    pub ambient: Option<Measurement>,
    pub window_closed: Option<Measurement>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStatus {
    pub position: WindowPosition,
    pub leak_suspected: bool,
    pub measured_at: DateTime<Utc>,
}

impl LatestReadings {
    fn slot(&mut self, metric: &Metric) -> Option<&mut Option<Measurement>> {
        match metric {
            Metric::TemperatureInside => Some(&mut self.inside),
            Metric::TemperatureOutside => Some(&mut self.outside),
            Metric::TemperatureOutsideAmbient => Some(&mut self.ambient),
            Metric::WindowClosed => Some(&mut self.window_closed),
            Metric::Other(_) => None,
        }
    }

    pub fn window_status(&self) -> Option<WindowStatus> {
        let m = self.window_closed.as_ref()?;
        Some(WindowStatus {
            position: WindowPosition::from_state(Some(m.value)),
            leak_suspected: m.payload.as_ref().is_some_and(Payload::leak_suspected),
            measured_at: m.measured_at,
        })
    }
}

/// On equal timestamps the sample seen first is kept.
pub fn latest_readings(samples: &[Measurement]) -> LatestReadings {
    let mut latest = LatestReadings::default();

    for m in samples {
        let Some(slot) = latest.slot(&m.metric) else {
            continue;
        };

        if slot
            .as_ref()
            .is_none_or(|previous| m.measured_at > previous.measured_at)
        {
            *slot = Some(m.clone());
        }
    }

    latest
}
