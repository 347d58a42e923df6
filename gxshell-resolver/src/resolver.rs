//! Endpoint resolver: override, then local node, then public gateway.

use tracing::{debug, info, instrument, warn};

use gxshell_api::ApiClient;
use gxshell_core::types::EndpointSource;

use crate::config::ResolverConfig;
use crate::discovery::LocalDiscovery;
use crate::strategy::{LocalNodeStrategy, OverrideStrategy, ResolveStrategy};

/// Outcome of a resolution.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// Client bound to the chosen endpoint
    pub client: ApiClient,
    /// Which step produced the endpoint
    pub source: EndpointSource,
    /// Whether every strategy failed and the public gateway was chosen
    pub used_fallback: bool,
}

impl Resolution {
    /// The endpoint the client is bound to.
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

/// Resolves the API endpoint a client should use.
///
/// Strategies are tried in order and the first client produced wins. When
/// every strategy fails the resolver falls back to the gateway, so
/// [`resolve`](Self::resolve) always returns a client.
pub struct Resolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
    gateway_url: String,
}

impl Resolver {
    /// Creates a resolver with default configuration.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Creates a resolver configured from `DMS3FS_API` and `DMS3FS_PATH`.
    pub fn from_env() -> Self {
        Self::with_config(ResolverConfig::from_env())
    }

    /// Creates a resolver with custom configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        let discovery = LocalDiscovery::from_config(&config);
        Self::with_discovery(config, discovery)
    }

    /// Creates a resolver that discovers local nodes through `discovery`.
    ///
    /// The override in `config` still takes precedence.
    pub fn with_discovery(config: ResolverConfig, discovery: LocalDiscovery) -> Self {
        let mut strategies: Vec<Box<dyn ResolveStrategy>> = Vec::with_capacity(2);

        if let Some(endpoint) = config.api_override.filter(|e| !e.is_empty()) {
            strategies.push(Box::new(OverrideStrategy::new(endpoint)));
        }
        strategies.push(Box::new(LocalNodeStrategy::new(discovery)));

        Self::from_strategies(strategies, config.gateway_url)
    }

    /// Creates a resolver from an explicit strategy list and gateway.
    pub fn from_strategies(
        strategies: Vec<Box<dyn ResolveStrategy>>,
        gateway_url: impl Into<String>,
    ) -> Self {
        Self {
            strategies,
            gateway_url: gateway_url.into(),
        }
    }

    /// Sources of the configured strategies, in the order they are tried.
    pub fn sources(&self) -> Vec<EndpointSource> {
        self.strategies.iter().map(|s| s.source()).collect()
    }

    /// The endpoint used when every strategy fails.
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Resolves an endpoint and returns a client bound to it.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Resolution {
        for strategy in &self.strategies {
            let source = strategy.source();

            match strategy.attempt().await {
                Ok(client) => {
                    info!(%source, endpoint = %client.endpoint(), "Using API endpoint");
                    return Resolution {
                        client,
                        source,
                        used_fallback: false,
                    };
                }
                Err(e) if e.is_discovery_miss() => {
                    debug!(%source, error = %e, "No endpoint found, trying next");
                }
                Err(e) => {
                    warn!(%source, error = %e, "Endpoint rejected, trying next");
                }
            }
        }

        info!(endpoint = %self.gateway_url, "Using public gateway as API endpoint");
        Resolution {
            client: ApiClient::new(self.gateway_url.as_str()),
            source: EndpointSource::Gateway,
            used_fallback: true,
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves an endpoint from the process environment.
///
/// Shorthand for `Resolver::from_env().resolve()`.
pub async fn new_shell() -> Resolution {
    Resolver::from_env().resolve().await
}
