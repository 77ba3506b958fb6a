use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use climate_dashboard::aggregation::{Aggregation, LatestReadings, format_time_label};
use climate_dashboard::telemetry::{Measurement, Payload, WindowPosition};
use csv::Writer;
use serde::Serialize;

pub fn write_text<W: Write>(
    mut out: W,
    aggregation: &Aggregation,
    latest: &LatestReadings,
    timezone: Tz,
) -> Result<()> {
    let stats = &aggregation.stats;

    writeln!(out, "Inside fluctuation      {:.2} °C", stats.inside_fluctuation)?;
    writeln!(out, "  mean change between consecutive inside readings")?;
    writeln!(out, "Window vs ambient       {:.2} °C", stats.delta_average)?;
    writeln!(out, "  larger differences suggest heat leaking at the window")?;
    writeln!(out, "Window open (estimate)  {} min", stats.open_minutes.round())?;
    writeln!(
        out,
        "  ~{}% of recorded time",
        (stats.open_fraction * 100.0).round()
    )?;
    writeln!(out)?;

    let cards = [
        ("Inside (now)", &latest.inside),
        ("At window (outside)", &latest.outside),
        ("Ambient reference", &latest.ambient),
    ];
    for (title, reading) in cards {
        writeln!(
            out,
            "{title:<22}  {:>9}  {}",
            format_temperature(reading.as_ref()),
            format_updated(reading.as_ref().map(|m| m.measured_at), timezone)
        )?;
    }

    match latest.window_status() {
        Some(status) => {
            let label = match status.position {
                WindowPosition::Closed => "Closed",
                WindowPosition::Open => "Open",
                WindowPosition::Unknown => "-",
            };
            let leak = if status.leak_suspected {
                " (possible leak)"
            } else {
                ""
            };
            writeln!(
                out,
                "{:<22}  {label:>9}  {}{leak}",
                "Window",
                format_updated(Some(status.measured_at), timezone)
            )?;
        }
        None => writeln!(out, "{:<22}  {:>9}  no reading", "Window", "-")?,
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} temperature points, {} delta points, {} window points",
        aggregation.temperature_series.len(),
        aggregation.delta_series.len(),
        aggregation.window_series.len()
    )?;

    Ok(())
}

fn format_temperature(reading: Option<&Measurement>) -> String {
    match reading {
        Some(m) => format!("{:.1} °C", m.value),
        None => "-".to_owned(),
    }
}

fn format_updated(at: Option<DateTime<Utc>>, timezone: Tz) -> String {
    match at {
        Some(at) => format!("updated {}", format_time_label(at, timezone)),
        None => "no reading".to_owned(),
    }
}

/// Readings in the order received: metric, device, value with unit, local
/// time and the raw payload.
pub fn write_list<W: Write>(
    mut out: W,
    measurements: &[Measurement],
    timezone: Tz,
) -> Result<()> {
    for m in measurements {
        let unit = m.payload.as_ref().and_then(Payload::unit).unwrap_or_default();
        let payload = match &m.payload {
            Some(payload) => {
                serde_json::to_string(payload).context("failed to encode payload")?
            }
            None => "{}".to_owned(),
        };

        writeln!(
            out,
            "{:<28}  {:<18}  {:>12}  {}  {payload}",
            m.metric.as_str().replace('_', " "),
            m.device_id,
            format!("{} {unit}", m.value).trim_end(),
            m.measured_at.with_timezone(&timezone).format("%H:%M:%S"),
        )?;
    }

    Ok(())
}

pub fn write_json<W: Write>(out: W, aggregation: &Aggregation) -> Result<()> {
    serde_json::to_writer_pretty(out, aggregation).context("failed to write JSON report")
}

#[derive(Debug, Serialize)]
struct TimelineRow<'a> {
    ts: DateTime<Utc>,
    label: &'a str,
    inside: Option<f64>,
    outside: Option<f64>,
    ambient: Option<f64>,
    window_closed: Option<f64>,
}

/// One row per temperature point; missing metrics are left as empty cells.
pub fn write_csv<W: Write>(out: W, aggregation: &Aggregation) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    for point in &aggregation.temperature_series {
        writer
            .serialize(TimelineRow {
                ts: point.measured_at,
                label: &point.label,
                inside: point.inside,
                outside: point.outside,
                ambient: point.ambient,
                window_closed: point.window_closed,
            })
            .context("failed to write CSV row")?;
    }

    writer.flush().context("failed to flush CSV output")?;

    Ok(())
}
