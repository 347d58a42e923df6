//! RPC client handle for a DMS3-FS node.
//!
//! An [`ApiClient`] is bound to one endpoint and talks to the node's HTTP API
//! under `/api/v0`. [`dial_address`] turns a node's multiaddr into the
//! `host:port` the client dials.

mod address;
mod client;

pub use address::{dial_address, is_loopback_target};
pub use client::ApiClient;
