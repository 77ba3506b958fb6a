use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use climate_dashboard::window::window_state_url;

#[derive(Debug, Parser)]
pub struct Args {
    /// Window-state URL tried first, usually the dashboard's proxy route.
    #[arg(long, env = "WINDOW_STATE_URL")]
    pub primary_url: Option<String>,

    /// Aggregator base URL, tried directly when the primary fails.
    #[arg(long, env = "AGGREGATOR_API_BASE_URL")]
    pub aggregator_url: Option<String>,

    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, env = "DASHBOARD_TZ", default_value = "Europe/Warsaw")]
    pub timezone: Tz,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current window state.
    Status,

    /// Flip the window: open it if closed, close it if open.
    Toggle,

    /// Keep polling and accept commands on stdin.
    Watch {
        #[arg(long, default_value_t = 15)]
        interval_secs: u64,
    },
}

impl Args {
    /// Primary first, then the direct aggregator route.
    pub fn endpoints(&self) -> Vec<String> {
        self.primary_url
            .iter()
            .cloned()
            .chain(self.aggregator_url.as_deref().map(window_state_url))
            .collect()
    }
}
