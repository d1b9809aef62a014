// API client module: a small async HTTP client that pulls the monkey list
// from the configured remote endpoint. It makes exactly one GET per call;
// deciding what to do on failure is left to the provider.

use crate::error::RemoteError;
use crate::model::Monkey;
use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Holds a reqwest client and the endpoint it reads from.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// Create a client for `endpoint`. `timeout` bounds the whole request,
    /// including reading the body.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// GET the endpoint and decode a non-empty JSON array of monkeys.
    pub async fn fetch_monkeys(&self) -> Result<Vec<Monkey>, RemoteError> {
        let res = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let body = res.bytes().await?;
        let monkeys: Vec<Monkey> = serde_json::from_slice(&body)?;
        if monkeys.is_empty() {
            return Err(RemoteError::EmptyPayload);
        }
        debug!(endpoint = %self.endpoint, count = monkeys.len(), "fetched monkeys from remote");
        Ok(monkeys)
    }
}
