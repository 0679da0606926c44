//! HTTP transport to the device
//!
//! The device speaks a single-endpoint protocol: every command is a JSON
//! POST to `http://{address}/post`, and reachability is checked with a GET
//! against `http://{address}/get`. This module is deliberately thin: one
//! call, one timeout, no retries, response body passed through untouched.
//!
//! [`Transport`] is the seam for tests: [`MockTransport`] records every
//! command it is asked to send so assertions can run against the exact
//! wire sequence.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::trace;

use crate::encoder;
use crate::types::Command;
use crate::{PanelError, Result};

/// Per-call bound for command sends and remote image fetches.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-attempt bound for the startup reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that can deliver commands to a device.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one command and return the raw response body.
    async fn send(&self, command: &Command) -> Result<Value>;
}

/// Real HTTP transport backed by a reused [`reqwest::Client`].
pub struct HttpTransport {
    post_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for a device address (hostname or IP).
    pub fn new(address: &str) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(CALL_TIMEOUT).build()?;
        Ok(Self { post_url: format!("http://{address}/post"), client })
    }
}

/// Fetch raw bytes from a remote image/GIF source.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    trace!(url, "Fetching remote image");
    let client = reqwest::Client::builder().timeout(CALL_TIMEOUT).build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, command: &Command) -> Result<Value> {
        trace!(command = command.name(), "Sending command");
        let response = self
            .client
            .post(&self.post_url)
            .json(&encoder::encode(command))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Outcome of a single reachability probe attempt.
///
/// The four categories are kept distinct so startup logs can tell a silent
/// device from a refused connection or a confused one.
#[derive(Debug)]
pub(crate) enum ProbeOutcome {
    Reachable,
    Timeout,
    TransportError(String),
    Unexpected(String),
}

/// Issue one reachability probe against the device's status endpoint.
///
/// Read-only: the `/get` endpoint reports device state without mutating it.
pub(crate) async fn probe(address: &str) -> ProbeOutcome {
    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(err) => return ProbeOutcome::Unexpected(err.to_string()),
    };

    match client.get(format!("http://{address}/get")).send().await {
        Ok(response) if response.status().is_success() => ProbeOutcome::Reachable,
        Ok(response) => {
            ProbeOutcome::Unexpected(format!("status {}", response.status()))
        }
        Err(err) if err.is_timeout() => ProbeOutcome::Timeout,
        Err(err) => ProbeOutcome::TransportError(err.to_string()),
    }
}

/// Recording transport for tests and dry runs.
#[derive(Default)]
pub struct MockTransport {
    commands: Mutex<Vec<Command>>,
    fail_at: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Default::default()
    }

    /// A transport whose `index`-th send (zero-based, counted across all
    /// commands) fails with a transport error.
    pub fn failing_at(index: usize) -> Self {
        Self { commands: Mutex::new(Vec::new()), fail_at: Some(index) }
    }

    /// Snapshot of every command successfully sent so far, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, command: &Command) -> Result<Value> {
        let mut commands = self.commands.lock().unwrap();
        if self.fail_at == Some(commands.len()) {
            return Err(PanelError::transport("scripted mock failure"));
        }
        commands.push(command.clone());
        Ok(json!({"error_code": 0}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_in_order() {
        let mock = MockTransport::new();
        mock.send(&Command::ResetAnimation).await.unwrap();
        mock.send(&Command::DrawStatic { dimension: 16, data: vec![0; 768] }).await.unwrap();

        let commands = mock.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], Command::ResetAnimation);
        assert!(matches!(commands[1], Command::DrawStatic { dimension: 16, .. }));
    }

    #[tokio::test]
    async fn mock_scripted_failure_counts_sends() {
        let mock = MockTransport::failing_at(1);
        assert!(mock.send(&Command::ResetAnimation).await.is_ok());
        let err = mock.send(&Command::ResetAnimation).await.unwrap_err();
        assert!(err.is_retryable());
        // The failed send is not recorded.
        assert_eq!(mock.commands().len(), 1);
    }
}
