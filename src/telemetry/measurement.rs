use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::{Metric, Payload};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,

    pub device_id: String,

    pub metric: Metric,

    pub value: f64,

    #[serde(rename = "ts")]
    pub measured_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}
