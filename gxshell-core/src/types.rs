//! Domain types for gxshell.
//!
//! - [`EndpointSource`]: which resolution step produced a client
//! - [`VersionInfo`]: a node's answer to the `version` command

use std::fmt;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// ENDPOINT SOURCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Where a resolved endpoint came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointSource {
    /// Explicit override from the environment or configuration.
    Override,
    /// The `api` file of a local node that answered the liveness check.
    Local,
    /// The public gateway.
    Gateway,
}

impl EndpointSource {
    /// Returns the lowercase name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointSource::Override => "override",
            EndpointSource::Local => "local",
            EndpointSource::Gateway => "gateway",
        }
    }
}

impl fmt::Display for EndpointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VERSION
// ═══════════════════════════════════════════════════════════════════════════════

/// Response of the node's `version` command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionInfo {
    /// Node software version
    pub version: String,
    /// Build commit, empty for release builds
    #[serde(default)]
    pub commit: String,
    /// Repo format version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Operating system and architecture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Toolchain the node was built with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golang: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_source_display() {
        assert_eq!(EndpointSource::Override.to_string(), "override");
        assert_eq!(EndpointSource::Local.to_string(), "local");
        assert_eq!(
            serde_json::to_string(&EndpointSource::Gateway).unwrap(),
            "\"gateway\""
        );
    }

    #[test]
    fn test_version_info_from_node_json() {
        let json = r#"{"Version":"0.4.22","Commit":"4e981576b","Repo":"7","System":"amd64/linux","Golang":"go1.12.7"}"#;
        let info: VersionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.version, "0.4.22");
        assert_eq!(info.commit, "4e981576b");
        assert_eq!(info.repo.as_deref(), Some("7"));
    }

    #[test]
    fn test_version_info_minimal() {
        let info: VersionInfo = serde_json::from_str(r#"{"Version":"0.1.0"}"#).unwrap();
        assert_eq!(info.version, "0.1.0");
        assert!(info.commit.is_empty());
        assert!(info.system.is_none());
    }
}
