//! Local node discovery.
//!
//! A running node writes its API multiaddr to `<repo>/api`. Discovery reads
//! that file, converts the address to `host:port`, and only trusts it once
//! the node answers a `version` query.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use gxshell_api::{dial_address, ApiClient};
use gxshell_core::constants::{API_FILE_NAME, API_FILE_TRIM, DEFAULT_REPO_DIR};
use gxshell_core::error::{Result, ShellError};
use gxshell_core::traits::ApiFileReader;

use crate::config::ResolverConfig;

/// Reads the `api` file from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsApiFileReader;

#[async_trait]
impl ApiFileReader for FsApiFileReader {
    async fn read_api_file(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Discovers and validates the API endpoint of a local node.
#[derive(Clone)]
pub struct LocalDiscovery {
    repo_path: Option<PathBuf>,
    probe_timeout: Option<Duration>,
    reader: Arc<dyn ApiFileReader>,
}

impl LocalDiscovery {
    /// Creates discovery over `repo_path`, or `~/.dms3-fs` when `None`.
    pub fn new(repo_path: Option<PathBuf>) -> Self {
        Self {
            repo_path,
            probe_timeout: None,
            reader: Arc::new(FsApiFileReader),
        }
    }

    /// Creates discovery from the repo path and probe timeout of `config`.
    pub fn from_config(config: &ResolverConfig) -> Self {
        let mut discovery = Self::new(config.repo_path.clone());
        discovery.probe_timeout = config.probe_timeout();
        discovery
    }

    /// Reads the `api` file through `reader`.
    pub fn with_reader(mut self, reader: Arc<dyn ApiFileReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Bounds the liveness check.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    /// The repo directory searched for the `api` file.
    pub fn repo_dir(&self) -> Result<PathBuf> {
        match &self.repo_path {
            Some(path) => Ok(path.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(DEFAULT_REPO_DIR))
                .ok_or(ShellError::HomeDirUnavailable),
        }
    }

    /// Path of the `api` file.
    pub fn api_file(&self) -> Result<PathBuf> {
        Ok(self.repo_dir()?.join(API_FILE_NAME))
    }

    /// Reads the `api` file and returns the dialable `host:port` it names.
    pub async fn read_endpoint(&self) -> Result<String> {
        let path = self.api_file()?;

        let data = self
            .reader
            .read_api_file(&path)
            .await
            .map_err(|source| ShellError::ConfigFileUnreadable {
                path: path.clone(),
                source,
            })?;

        let contents = String::from_utf8_lossy(&data);
        let addr = contents.trim_matches(API_FILE_TRIM);
        debug!(path = %path.display(), addr, "Read API file");

        dial_address(addr)
    }

    /// Runs discovery and returns a client for a node that answered.
    #[instrument(skip(self))]
    pub async fn discover(&self) -> Result<ApiClient> {
        let host = self.read_endpoint().await?;

        let mut client =
            ApiClient::local(host.as_str()).map_err(|e| ShellError::EndpointUnreachable {
                endpoint: host.clone(),
                reason: e.to_string(),
            })?;
        if let Some(timeout) = self.probe_timeout {
            client = client.with_timeout(timeout);
        }

        client
            .version()
            .await
            .map_err(|e| ShellError::EndpointUnreachable {
                endpoint: host.clone(),
                reason: e.to_string(),
            })?;

        debug!(endpoint = %host, "Local node is live");
        Ok(client)
    }
}

impl std::fmt::Debug for LocalDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalDiscovery")
            .field("repo_path", &self.repo_path)
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn live_node() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "Version": "0.4.22", "Commit": "" })),
            )
            .mount(&server)
            .await;
        server
    }

    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn test_repo_dir_override() {
        let discovery = LocalDiscovery::new(Some(PathBuf::from("/srv/dms3fs")));
        assert_eq!(discovery.api_file().unwrap(), PathBuf::from("/srv/dms3fs/api"));
    }

    #[test]
    fn test_repo_dir_default_under_home() {
        let discovery = LocalDiscovery::new(None);
        match dirs::home_dir() {
            Some(home) => assert_eq!(
                discovery.repo_dir().unwrap(),
                home.join(".dms3-fs")
            ),
            None => assert!(matches!(
                discovery.repo_dir(),
                Err(ShellError::HomeDirUnavailable)
            )),
        }
    }

    #[tokio::test]
    async fn test_read_endpoint_trims_padding() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("api"), "  /ip4/127.0.0.1/tcp/5001\n").unwrap();

        let padded = LocalDiscovery::new(Some(dir.path().to_path_buf()));
        assert_eq!(padded.read_endpoint().await.unwrap(), "127.0.0.1:5001");

        std::fs::write(dir.path().join("api"), "/ip4/127.0.0.1/tcp/5001").unwrap();
        assert_eq!(padded.read_endpoint().await.unwrap(), "127.0.0.1:5001");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let discovery = LocalDiscovery::new(Some(dir.path().to_path_buf()));

        let err = discovery.discover().await.unwrap_err();
        assert!(matches!(err, ShellError::ConfigFileUnreadable { .. }));
        assert!(err.is_discovery_miss());
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("api"), "not a multiaddr").unwrap();
        let discovery = LocalDiscovery::new(Some(dir.path().to_path_buf()));

        let err = discovery.discover().await.unwrap_err();
        assert!(matches!(err, ShellError::AddressMalformed { .. }));
    }

    #[tokio::test]
    async fn test_discover_live_node() {
        let server = live_node().await;
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("api"),
            format!("/ip4/127.0.0.1/tcp/{}\n", server.address().port()),
        )
        .unwrap();

        let client = LocalDiscovery::new(Some(dir.path().to_path_buf()))
            .with_probe_timeout(Duration::from_secs(5))
            .discover()
            .await
            .unwrap();
        assert_eq!(client.endpoint(), format!("127.0.0.1:{}", server.address().port()));
    }

    #[tokio::test]
    async fn test_dead_node() {
        let dir = tempdir().unwrap();
        let port = closed_port();
        std::fs::write(dir.path().join("api"), format!("/ip4/127.0.0.1/tcp/{}", port)).unwrap();

        let err = LocalDiscovery::new(Some(dir.path().to_path_buf()))
            .discover()
            .await
            .unwrap_err();
        match err {
            ShellError::EndpointUnreachable { endpoint, .. } => {
                assert_eq!(endpoint, format!("127.0.0.1:{}", port))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
