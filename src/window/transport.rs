use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CACHE_CONTROL};
use thiserror::Error;
use tracing::{debug, warn};

use crate::window::{StateCommandBody, WindowCommand, WindowStateSnapshot};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with {status}")]
    Status { endpoint: String, status: StatusCode },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    #[error("no window-state endpoint configured")]
    NoEndpoints,
}

/// Reads and writes the actuator state on one backend.
#[async_trait]
pub trait WindowStateTransport: Send + Sync {
    /// Short name used in logs.
    fn endpoint(&self) -> &str;

    async fn read_state(&self) -> Result<WindowStateSnapshot, TransportError>;

    async fn write_state(&self, command: WindowCommand) -> Result<(), TransportError>;
}

pub fn window_state_url(base_url: &str) -> String {
    format!("{}/window-state", base_url.trim_end_matches('/'))
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn request_error(&self, source: reqwest::Error) -> TransportError {
        TransportError::Request {
            endpoint: self.url.clone(),
            source,
        }
    }

    fn check_status(&self, status: StatusCode) -> Result<(), TransportError> {
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: self.url.clone(),
                status,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl WindowStateTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn read_state(&self) -> Result<WindowStateSnapshot, TransportError> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        self.check_status(response.status())?;

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;

        serde_json::from_slice(&body).map_err(|source| TransportError::Decode {
            endpoint: self.url.clone(),
            source,
        })
    }

    async fn write_state(&self, command: WindowCommand) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(&StateCommandBody::from(command))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        // The body is not trusted to echo the new state; callers re-read.
        self.check_status(response.status())
    }
}

/// Tries each transport in order; the first success wins and the last error
/// is returned once the list is exhausted.
pub struct FallbackTransport {
    endpoints: Vec<Box<dyn WindowStateTransport>>,
}

impl FallbackTransport {
    pub fn new(endpoints: Vec<Box<dyn WindowStateTransport>>) -> Self {
        Self { endpoints }
    }

    pub fn http(client: &Client, urls: impl IntoIterator<Item = String>) -> Self {
        let endpoints = urls
            .into_iter()
            .map(|url| -> Box<dyn WindowStateTransport> {
                Box::new(HttpTransport::new(client.clone(), url))
            })
            .collect();

        Self::new(endpoints)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[async_trait]
impl WindowStateTransport for FallbackTransport {
    fn endpoint(&self) -> &str {
        "fallback"
    }

    async fn read_state(&self) -> Result<WindowStateSnapshot, TransportError> {
        let mut last_error = TransportError::NoEndpoints;

        for transport in &self.endpoints {
            match transport.read_state().await {
                Ok(snapshot) => {
                    debug!(endpoint = transport.endpoint(), "read window state");
                    return Ok(snapshot);
                }
                Err(err) => {
                    warn!(endpoint = transport.endpoint(), error = %err, "window state read failed");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }

    async fn write_state(&self, command: WindowCommand) -> Result<(), TransportError> {
        let mut last_error = TransportError::NoEndpoints;

        for transport in &self.endpoints {
            match transport.write_state(command).await {
                Ok(()) => {
                    debug!(endpoint = transport.endpoint(), ?command, "wrote window state");
                    return Ok(());
                }
                Err(err) => {
                    warn!(endpoint = transport.endpoint(), error = %err, "window state write failed");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}
