//! Resolver configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gxshell_core::constants::{ENV_API, ENV_REPO_PATH, PUBLIC_GATEWAY_URL};

/// Resolver configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Endpoint used as-is, skipping discovery
    pub api_override: Option<String>,
    /// Repo directory holding the `api` file (default `~/.dms3-fs`)
    pub repo_path: Option<PathBuf>,
    /// Endpoint used when nothing else works
    pub gateway_url: String,
    /// Timeout for the local liveness check, in seconds
    pub probe_timeout_seconds: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_override: None,
            repo_path: None,
            gateway_url: PUBLIC_GATEWAY_URL.into(),
            probe_timeout_seconds: None,
        }
    }
}

impl ResolverConfig {
    /// Reads `DMS3FS_API` and `DMS3FS_PATH`. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            api_override: non_empty_var(ENV_API),
            repo_path: non_empty_var(ENV_REPO_PATH).map(PathBuf::from),
            ..Default::default()
        }
    }

    /// Sets the override endpoint.
    pub fn with_api_override(mut self, endpoint: impl Into<String>) -> Self {
        self.api_override = Some(endpoint.into()).filter(|e: &String| !e.is_empty());
        self
    }

    /// Sets the repo directory searched for the `api` file.
    pub fn with_repo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.repo_path = Some(path.into());
        self
    }

    /// Sets the fallback gateway.
    pub fn with_gateway(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Bounds the liveness check of a local node. Zero means no bound.
    pub fn with_probe_timeout(mut self, seconds: u64) -> Self {
        self.probe_timeout_seconds = Some(seconds).filter(|s| *s > 0);
        self
    }

    pub(crate) fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_seconds
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert!(config.api_override.is_none());
        assert!(config.repo_path.is_none());
        assert_eq!(config.gateway_url, "https://dms3.io");
        assert!(config.probe_timeout().is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ResolverConfig::default()
            .with_api_override("127.0.0.1:5001")
            .with_repo_path("/tmp/repo")
            .with_gateway("https://gateway.example.com")
            .with_probe_timeout(3);

        assert_eq!(config.api_override.as_deref(), Some("127.0.0.1:5001"));
        assert_eq!(config.repo_path, Some(PathBuf::from("/tmp/repo")));
        assert_eq!(config.gateway_url, "https://gateway.example.com");
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_zero_timeout_is_unbounded() {
        let config = ResolverConfig::default().with_probe_timeout(0);
        assert!(config.probe_timeout_seconds.is_none());
        assert!(config.probe_timeout().is_none());

        let config = ResolverConfig {
            probe_timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(config.probe_timeout().is_none());
    }

    #[test]
    fn test_empty_override_is_unset() {
        let config = ResolverConfig::default().with_api_override("");
        assert!(config.api_override.is_none());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(ENV_API, "");
        std::env::set_var(ENV_REPO_PATH, "/srv/dms3fs");
        let config = ResolverConfig::from_env();
        std::env::remove_var(ENV_API);
        std::env::remove_var(ENV_REPO_PATH);

        assert!(config.api_override.is_none());
        assert_eq!(config.repo_path, Some(PathBuf::from("/srv/dms3fs")));
        assert_eq!(config.gateway_url, PUBLIC_GATEWAY_URL);
    }

    #[test]
    fn test_config_serde() {
        let config = ResolverConfig::default().with_repo_path("/srv/node");
        let json = serde_json::to_string(&config).unwrap();
        let back: ResolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
