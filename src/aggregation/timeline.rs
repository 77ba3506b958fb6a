use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::Serialize;

use crate::telemetry::{Measurement, Metric};

/// Metric values recorded at one exact instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    #[serde(rename = "ts")]
    pub measured_at: DateTime<Utc>,

    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inside: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_closed: Option<f64>,
}

impl TimelinePoint {
    fn new(measured_at: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            measured_at,
            label: format_time_label(measured_at, timezone),
            inside: None,
            outside: None,
            ambient: None,
            window_closed: None,
        }
    }

    pub fn has_temperature(&self) -> bool {
        self.inside.is_some() || self.outside.is_some() || self.ambient.is_some()
    }

    pub fn delta(&self) -> Option<f64> {
        Some(self.outside? - self.ambient?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaPoint {
    #[serde(rename = "ts")]
    pub measured_at: DateTime<Utc>,

    pub label: String,

    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowPoint {
    #[serde(rename = "ts")]
    pub measured_at: DateTime<Utc>,

    pub label: String,

    pub value: f64,
}

/// Sorted, grouped view of one batch plus the per-reading sequences the
/// statistics need.
#[derive(Debug, Default)]
pub(crate) struct Timeline {
    pub points: Vec<TimelinePoint>,
    pub inside_readings: Vec<f64>,
    pub window_readings: Vec<f64>,
    pub span_minutes: f64,
}

pub(crate) fn build_timeline(samples: &[Measurement], timezone: Tz) -> Timeline {
    let mut sorted: Vec<&Measurement> = samples.iter().collect();
    sorted.sort_by_key(|m| m.measured_at);

    let mut points: IndexMap<DateTime<Utc>, TimelinePoint> = IndexMap::new();
    let mut inside_readings = Vec::new();
    let mut window_readings = Vec::new();

    for m in &sorted {
        let point = points
            .entry(m.measured_at)
            .or_insert_with(|| TimelinePoint::new(m.measured_at, timezone));

        match m.metric {
            Metric::TemperatureInside => {
                point.inside = Some(m.value);
                inside_readings.push(m.value);
            }
            Metric::TemperatureOutside => point.outside = Some(m.value),
            Metric::TemperatureOutsideAmbient => point.ambient = Some(m.value),
            Metric::WindowClosed => {
                point.window_closed = Some(m.value);
                window_readings.push(m.value);
            }
            Metric::Other(_) => {}
        }
    }

    let span_minutes = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => {
            let span = last.measured_at - first.measured_at;
            (span.num_milliseconds() as f64 / 60_000.0).max(0.0)
        }
        _ => 0.0,
    };

    Timeline {
        points: points.into_values().collect(),
        inside_readings,
        window_readings,
        span_minutes,
    }
}

pub fn format_time_label(at: DateTime<Utc>, timezone: Tz) -> String {
    at.with_timezone(&timezone).format("%H:%M").to_string()
}

impl Timeline {
    pub fn temperature_series(&self) -> Vec<TimelinePoint> {
        self.points
            .iter()
            .filter(|p| p.has_temperature())
            .cloned()
            .collect()
    }

    pub fn delta_series(&self) -> Vec<DeltaPoint> {
        self.points
            .iter()
            .filter_map(|p| {
                Some(DeltaPoint {
                    measured_at: p.measured_at,
                    label: p.label.clone(),
                    delta: p.delta()?,
                })
            })
            .collect()
    }

    pub fn window_series(&self) -> Vec<WindowPoint> {
        self.points
            .iter()
            .filter_map(|p| {
                Some(WindowPoint {
                    measured_at: p.measured_at,
                    label: p.label.clone(),
                    value: p.window_closed?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::aggregation::DEFAULT_LABEL_TIMEZONE;

    #[test]
    fn labels_use_fixed_zone() {
        // 11:05 UTC is 12:05 in Warsaw during winter and 13:05 in summer.
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 11, 5, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 11, 5, 0).unwrap();
        assert_eq!(format_time_label(winter, DEFAULT_LABEL_TIMEZONE), "12:05");
        assert_eq!(format_time_label(summer, DEFAULT_LABEL_TIMEZONE), "13:05");
        assert_eq!(format_time_label(winter, chrono_tz::UTC), "11:05");
    }

    #[test]
    fn span_covers_first_to_last_sample() {
        let at = |min| Utc.with_ymd_and_hms(2025, 1, 15, 8, min, 0).unwrap();
        let sample = |id, min| Measurement {
            id,
            device_id: "window-sensor".to_owned(),
            metric: Metric::Other("humidity".to_owned()),
            value: 40.0,
            measured_at: at(min),
            payload: None,
        };

        let samples = [sample(1, 30), sample(2, 0), sample(3, 15)];
        let timeline = build_timeline(&samples, chrono_tz::UTC);
        assert_eq!(timeline.span_minutes, 30.0);
        assert_eq!(timeline.points.len(), 3);
        assert!(timeline.points.iter().all(|p| !p.has_temperature()));
    }
}
