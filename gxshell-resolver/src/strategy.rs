//! Resolution strategies.
//!
//! Each strategy is one way of finding an endpoint. The resolver tries them
//! in order and keeps the first client returned.

use async_trait::async_trait;

use gxshell_api::ApiClient;
use gxshell_core::error::Result;
use gxshell_core::types::EndpointSource;

use crate::discovery::LocalDiscovery;

/// One way of producing a client.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Which kind of endpoint this strategy yields.
    fn source(&self) -> EndpointSource;

    /// Tries to produce a client. An error means "try the next strategy".
    async fn attempt(&self) -> Result<ApiClient>;
}

/// Uses an explicitly configured endpoint without probing it.
#[derive(Clone, Debug)]
pub struct OverrideStrategy {
    endpoint: String,
}

impl OverrideStrategy {
    /// Creates a strategy bound to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ResolveStrategy for OverrideStrategy {
    fn source(&self) -> EndpointSource {
        EndpointSource::Override
    }

    async fn attempt(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.endpoint.as_str()))
    }
}

/// Uses the endpoint of a local node that answers a liveness check.
#[derive(Debug)]
pub struct LocalNodeStrategy {
    discovery: LocalDiscovery,
}

impl LocalNodeStrategy {
    /// Wraps `discovery`.
    pub fn new(discovery: LocalDiscovery) -> Self {
        Self { discovery }
    }
}

#[async_trait]
impl ResolveStrategy for LocalNodeStrategy {
    fn source(&self) -> EndpointSource {
        EndpointSource::Local
    }

    async fn attempt(&self) -> Result<ApiClient> {
        self.discovery.discover().await
    }
}
