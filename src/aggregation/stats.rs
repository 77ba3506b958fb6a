use serde::Serialize;

use crate::aggregation::timeline::{DeltaPoint, Timeline};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Mean absolute step between consecutive inside readings.
    pub inside_fluctuation: f64,

    /// Mean of `|outside - ambient|` over points carrying both.
    pub delta_average: f64,

    /// Share of observed time the window was open, in `[0, 1]`.
    pub open_fraction: f64,

    pub open_minutes: f64,
}

pub(crate) fn summarize(
    timeline: &Timeline,
    deltas: &[DeltaPoint],
    sampling_cadence_minutes: f64,
) -> SummaryStatistics {
    let open_fraction = open_fraction(&timeline.window_readings);

    let open_minutes = if timeline.span_minutes > 0.0 {
        open_fraction * timeline.span_minutes
    } else {
        open_fraction * timeline.window_readings.len() as f64 * sampling_cadence_minutes
    };

    SummaryStatistics {
        inside_fluctuation: average_step_diff(&timeline.inside_readings),
        delta_average: mean(deltas.iter().map(|d| d.delta.abs())),
        open_fraction,
        open_minutes,
    }
}

pub(crate) fn average_step_diff(values: &[f64]) -> f64 {
    mean(values.windows(2).map(|w| (w[1] - w[0]).abs()))
}

/// No window telemetry reads as "closed the whole time".
fn open_fraction(window_readings: &[f64]) -> f64 {
    if window_readings.is_empty() {
        return 0.0;
    }

    (1.0 - mean(window_readings.iter().copied())).clamp(0.0, 1.0)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
