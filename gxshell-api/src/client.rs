//! Node API client implementation.
//!
//! Commands are issued as `POST <base_url>/api/v0/<command>` with arguments
//! in the query string, and answers are decoded from JSON.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use gxshell_core::constants::{API_PATH_PREFIX, VERSION_COMMAND};
use gxshell_core::error::{Result, ShellError};
use gxshell_core::types::VersionInfo;

use crate::address::{dial_address, is_loopback_target};

/// Client handle bound to one node API endpoint.
#[derive(Clone, Debug)]
pub struct ApiClient {
    endpoint: String,
    base_url: String,
    timeout: Option<Duration>,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `endpoint`.
    ///
    /// Accepts a multiaddr (`/ip4/127.0.0.1/tcp/5001`), a `host:port`, or a
    /// full URL. Scheme-less endpoints are reached over plain `http://`.
    /// No request is made.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http_client(endpoint, reqwest::Client::new())
    }

    /// Creates a client that issues requests through `http_client`.
    pub fn with_http_client(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        let endpoint = endpoint.into();
        let base_url = base_url_for(&endpoint);

        Self {
            endpoint,
            base_url,
            timeout: None,
            http_client,
        }
    }

    /// Creates a client for a node running on this machine.
    ///
    /// Loopback endpoints are dialed directly, ignoring any proxy configured
    /// through `HTTP_PROXY` and friends.
    pub fn local(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();

        let mut builder = reqwest::Client::builder();
        if is_loopback_target(dial_target(&base_url_for(&endpoint))) {
            builder = builder.no_proxy();
        }
        let http_client = builder
            .build()
            .map_err(|e| ShellError::HttpError(e.to_string()))?;

        Ok(Self::with_http_client(endpoint, http_client))
    }

    /// Applies `timeout` to every request made by this client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The endpoint this client was bound to, exactly as given.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The HTTP base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an API command.
    pub fn command_url(&self, command: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            API_PATH_PREFIX,
            command.trim_start_matches('/')
        )
    }

    /// Issues an API command and decodes its JSON answer.
    #[instrument(skip(self, args), fields(endpoint = %self.endpoint))]
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        command: &str,
        args: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.command_url(command);

        let mut request = self.http_client.post(&url).query(args);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ShellError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ShellError::HttpError(format!(
                "{} failed with status {}: {}",
                command,
                status,
                text.trim()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ShellError::HttpError(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| ShellError::InvalidResponse(format!("{}: {}", command, e)))
    }

    /// Queries the node version. Used as the liveness check.
    pub async fn version(&self) -> Result<VersionInfo> {
        let info: VersionInfo = self.request_json(VERSION_COMMAND, &[]).await?;
        debug!(endpoint = %self.endpoint, version = %info.version, "Node answered version");
        Ok(info)
    }
}

fn base_url_for(endpoint: &str) -> String {
    let endpoint = endpoint.trim();

    let target = if endpoint.starts_with('/') {
        dial_address(endpoint).unwrap_or_else(|_| endpoint.to_string())
    } else {
        endpoint.to_string()
    };
    let target = target.trim_end_matches('/');

    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    }
}

fn dial_target(base_url: &str) -> &str {
    let rest = base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"))
        .unwrap_or(base_url);
    rest.split('/').next().unwrap_or(rest)
}
