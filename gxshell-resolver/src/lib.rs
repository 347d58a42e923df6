//! # gxshell Resolver
//!
//! Finds the DMS3-FS API endpoint a client should talk to and returns a
//! ready [`ApiClient`]. Endpoints are tried in order:
//!
//! 1. an explicit override (`DMS3FS_API`),
//! 2. the `api` file of a local node that answers a `version` query,
//! 3. the public gateway.
//!
//! ```rust,no_run
//! # async fn run() {
//! let resolution = gxshell_resolver::new_shell().await;
//! if resolution.used_fallback {
//!     eprintln!("no local node, using {}", resolution.client.endpoint());
//! }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod discovery;
mod resolver;
mod strategy;

pub use config::ResolverConfig;
pub use discovery::{FsApiFileReader, LocalDiscovery};
pub use gxshell_api::{dial_address, ApiClient};
pub use resolver::{new_shell, Resolution, Resolver};
pub use strategy::{LocalNodeStrategy, OverrideStrategy, ResolveStrategy};
