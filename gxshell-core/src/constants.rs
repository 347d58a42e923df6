//! Constants for locating a DMS3-FS node.
//!
//! These mirror the layout a running node leaves on disk and the environment
//! variables its tooling honours.

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable holding an explicit API endpoint.
///
/// When non-empty it short-circuits every other resolution step.
pub const ENV_API: &str = "DMS3FS_API";

/// Environment variable holding the node's repo directory.
///
/// Replaces `~/.dms3-fs` when locating the `api` file.
pub const ENV_REPO_PATH: &str = "DMS3FS_PATH";

// ═══════════════════════════════════════════════════════════════════════════════
// REPO LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Name of the repo directory under the user's home.
pub const DEFAULT_REPO_DIR: &str = ".dms3-fs";

/// File inside the repo where a running node writes its API multiaddr.
pub const API_FILE_NAME: &str = "api";

/// Characters stripped from both ends of the `api` file contents.
pub const API_FILE_TRIM: &[char] = &['\n', '\t', ' '];

// ═══════════════════════════════════════════════════════════════════════════════
// NETWORK
// ═══════════════════════════════════════════════════════════════════════════════

/// Public gateway used when no local node can be found or reached.
pub const PUBLIC_GATEWAY_URL: &str = "https://dms3.io";

/// Path prefix of the node's HTTP RPC API.
pub const API_PATH_PREFIX: &str = "/api/v0";

/// RPC command used as the liveness check.
pub const VERSION_COMMAND: &str = "version";
