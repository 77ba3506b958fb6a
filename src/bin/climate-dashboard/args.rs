use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use climate_dashboard::aggregation::DEFAULT_SAMPLING_CADENCE_MINUTES;

#[derive(Debug, Parser)]
pub struct Args {
    /// Aggregator API base URL, e.g. http://localhost:8000
    #[arg(long, env = "API_BASE_URL", required_unless_present = "file")]
    pub api_base_url: Option<String>,

    /// Read a JSON array of measurements instead of calling the API.
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long, default_value = "24h")]
    pub window: String,

    #[arg(long, env = "DASHBOARD_TZ", default_value = "Europe/Warsaw")]
    pub timezone: Tz,

    #[arg(long, default_value_t = DEFAULT_SAMPLING_CADENCE_MINUTES)]
    pub sampling_cadence_minutes: f64,

    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Csv,
    /// Every reading as received, one per line.
    List,
}
