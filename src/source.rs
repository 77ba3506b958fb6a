use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};
use reqwest::Client;
use tracing::{debug, warn};

use crate::telemetry::Measurement;

pub fn new_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")
}

/// Reads recent measurements from the aggregator API.
#[derive(Debug, Clone)]
pub struct MeasurementSource {
    client: Client,
    url: String,
}

impl MeasurementSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/measurements", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `window` is passed through verbatim, e.g. `24h`.
    pub async fn fetch_window(&self, window: &str) -> Result<Vec<Measurement>> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("window", window)])
            .send()
            .await
            .with_context(|| format!("failed to request measurements: {}", self.url))?
            .error_for_status()
            .context("measurements request was rejected")?;

        let measurements: Vec<Measurement> = response
            .json()
            .await
            .context("failed to decode measurements")?;

        debug!(count = measurements.len(), window, "fetched measurements");

        Ok(measurements)
    }

    /// Any failure reads as "no data", so the dashboard can still render.
    pub async fn fetch_or_empty(&self, window: &str) -> Vec<Measurement> {
        match self.fetch_window(window).await {
            Ok(measurements) => measurements,
            Err(err) => {
                let error = format!("{err:#}");
                warn!(url = %self.url, %error, "treating measurements as empty");
                Vec::new()
            }
        }
    }
}

/// Loads a JSON array of measurements, as returned by the API.
pub fn load_measurements_file(path: &Path) -> Result<Vec<Measurement>> {
    let file = File::open(path).with_context(|| format!("failed to open file: {path:?}"))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse measurements: {path:?}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::telemetry::Metric;
    use crate::testing::{serve_once, test_client};

    const BODY: &str = r#"[
        {"id": 1, "device_id": "window-sensor", "metric": "temperature_inside", "value": 21.5, "ts": "2025-01-10T06:30:00Z", "payload": {"unit": "C"}},
        {"id": 2, "device_id": "window-actuator", "metric": "window_closed", "value": 1.0, "ts": "2025-01-10T06:30:00Z", "payload": null}
    ]"#;

    #[tokio::test]
    async fn fetches_window_of_measurements() {
        let (base, server) = serve_once(200, BODY).await;
        let source = MeasurementSource::new(test_client(), &base);

        let measurements = source.fetch_window("24h").await.unwrap();
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[1].metric, Metric::WindowClosed);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /measurements?window=24h "), "{request}");
    }

    #[tokio::test]
    async fn error_status_fails_fetch() {
        let (base, _server) = serve_once(500, "{}").await;
        let source = MeasurementSource::new(test_client(), &base);

        assert!(source.fetch_window("1h").await.is_err());
    }

    #[tokio::test]
    async fn failed_fetch_reads_as_empty() {
        let (base, _server) = serve_once(200, r#"{"detail": "not a list"}"#).await;
        let source = MeasurementSource::new(test_client(), &format!("{base}/"));
        assert_eq!(source.url(), format!("{base}/measurements"));

        assert!(source.fetch_or_empty("1h").await.is_empty());
    }

    #[test]
    fn loads_measurement_dump() {
        let mut dump = NamedTempFile::new().unwrap();
        dump.write_all(BODY.as_bytes()).unwrap();

        let measurements = load_measurements_file(dump.path()).unwrap();

        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].value, 21.5);
    }

    #[test]
    fn malformed_dump_is_an_error() {
        let mut dump = NamedTempFile::new().unwrap();
        dump.write_all(br#"{"detail": "not a list"}"#).unwrap();

        let err = load_measurements_file(dump.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse measurements"));
    }

    #[test]
    fn missing_dump_is_an_error() {
        let err = load_measurements_file(Path::new("/nonexistent/measurements.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to open file"));
    }
}
