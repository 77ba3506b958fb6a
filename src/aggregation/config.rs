use chrono_tz::Tz;

/// Chart labels are rendered in this zone regardless of where the viewer is.
pub const DEFAULT_LABEL_TIMEZONE: Tz = chrono_tz::Europe::Warsaw;

/// Assumed gap between window samples when a batch has no measurable span.
pub const DEFAULT_SAMPLING_CADENCE_MINUTES: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationConfig {
    pub timezone: Tz,

    pub sampling_cadence_minutes: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_LABEL_TIMEZONE,
            sampling_cadence_minutes: DEFAULT_SAMPLING_CADENCE_MINUTES,
        }
    }
}
