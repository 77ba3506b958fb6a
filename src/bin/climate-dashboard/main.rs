mod args;
mod report;

use std::io::{self, Write as _};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use args::{Args, Format};
use clap::Parser as _;
use climate_dashboard::{
    aggregation::{AggregationConfig, aggregate_with, latest_readings},
    source::{MeasurementSource, load_measurements_file, new_http_client},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let measurements = match (&args.file, &args.api_base_url) {
        (Some(path), _) => load_measurements_file(path)
            .with_context(|| format!("failed to load measurements from {path:?}"))?,
        (None, Some(base_url)) => {
            let client = new_http_client(Duration::from_secs(args.timeout_secs))?;
            MeasurementSource::new(client, base_url)
                .fetch_or_empty(&args.window)
                .await
        }
        (None, None) => bail!("either --api-base-url or --file is required"),
    };

    let config = AggregationConfig {
        timezone: args.timezone,
        sampling_cadence_minutes: args.sampling_cadence_minutes,
    };
    let aggregation = aggregate_with(&measurements, &config);

    let mut stdout = io::stdout().lock();
    match args.format {
        Format::Text if measurements.is_empty() => {
            writeln!(stdout, "No data: nothing has arrived from the sensors yet.")?;
        }
        Format::Text => {
            let latest = latest_readings(&measurements);
            report::write_text(&mut stdout, &aggregation, &latest, args.timezone)
                .context("failed to write report")?;
        }
        Format::Json => {
            report::write_json(&mut stdout, &aggregation)?;
            writeln!(stdout)?;
        }
        Format::Csv => report::write_csv(&mut stdout, &aggregation)?,
        Format::List if measurements.is_empty() => {
            writeln!(stdout, "No data: nothing has arrived from the sensors yet.")?;
        }
        Format::List => report::write_list(&mut stdout, &measurements, args.timezone)?,
    }

    Ok(())
}
