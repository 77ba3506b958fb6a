//! Turns an unordered batch of readings into chart-ready series and summary
//! statistics.
//!
//! Everything here is a pure function of its input: no I/O, no state kept
//! between calls.

mod config;
mod latest;
mod stats;
mod timeline;

pub use config::*;
pub use latest::*;
pub use stats::SummaryStatistics;
pub use timeline::{DeltaPoint, TimelinePoint, WindowPoint, format_time_label};

use serde::Serialize;

use crate::telemetry::Measurement;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// Points with at least one temperature; absent metrics are gaps, not zeros.
    pub temperature_series: Vec<TimelinePoint>,

    /// Points carrying both the outside and the ambient reading.
    pub delta_series: Vec<DeltaPoint>,

    pub window_series: Vec<WindowPoint>,

    pub stats: SummaryStatistics,
}

pub fn aggregate(samples: &[Measurement]) -> Aggregation {
    aggregate_with(samples, &AggregationConfig::default())
}

/// Readings sharing an exact timestamp are merged into one point. When one
/// metric repeats at the same instant, the later one in sort order wins.
pub fn aggregate_with(samples: &[Measurement], config: &AggregationConfig) -> Aggregation {
    let timeline = timeline::build_timeline(samples, config.timezone);

    let delta_series = timeline.delta_series();
    let stats = stats::summarize(&timeline, &delta_series, config.sampling_cadence_minutes);

    Aggregation {
        temperature_series: timeline.temperature_series(),
        delta_series,
        window_series: timeline.window_series(),
        stats,
    }
}
