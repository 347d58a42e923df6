//! Error types for gxshell.
//!
//! Every step of local discovery has its own variant so the resolver can log
//! exactly why it moved on to the next endpoint.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `ShellError`.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Main error type for all gxshell operations.
#[derive(Debug, Error)]
pub enum ShellError {
    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL DISCOVERY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The user's home directory could not be determined.
    #[error("Home directory unavailable; set DMS3FS_PATH to locate the repo")]
    HomeDirUnavailable,

    /// The node's `api` file is missing or unreadable.
    #[error("Cannot read API file '{}': {source}", path.display())]
    ConfigFileUnreadable {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The stored address does not follow the multiaddr grammar.
    #[error("Malformed address '{addr}': {reason}")]
    AddressMalformed {
        /// Address as read
        addr: String,
        /// Parser message
        reason: String,
    },

    /// The address parsed but has no dialable host and TCP port.
    #[error("Address '{addr}' is not dialable: {reason}")]
    AddressUnresolvable {
        /// Address as read
        addr: String,
        /// Why no dial target could be derived
        reason: String,
    },

    /// The endpoint did not answer the liveness check.
    #[error("Endpoint '{endpoint}' unreachable: {reason}")]
    EndpointUnreachable {
        /// Endpoint that was probed
        endpoint: String,
        /// Transport or API failure
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // CLIENT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The API answered with a body that could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ShellError {
    /// Returns true if this is the ordinary "no local node" case.
    ///
    /// A missing `api` file is expected on first run or on machines without
    /// a node, so it is not worth a warning.
    pub fn is_discovery_miss(&self) -> bool {
        match self {
            ShellError::ConfigFileUnreadable { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Returns true if the stored address itself is at fault.
    pub fn is_address_error(&self) -> bool {
        matches!(
            self,
            ShellError::AddressMalformed { .. } | ShellError::AddressUnresolvable { .. }
        )
    }
}
