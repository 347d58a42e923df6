//! # gxshell Core
//!
//! Core types, errors, and traits shared by the gxshell crates.
//!
//! - **Types**: where an endpoint came from, the node's version report
//! - **Errors**: the resolution error taxonomy
//! - **Constants**: environment variables, repo layout, public gateway
//! - **Traits**: the seam used to read the node's `api` file
//!
//! ## Example
//!
//! ```rust
//! use gxshell_core::{EndpointSource, ShellError};
//!
//! assert_eq!(EndpointSource::Gateway.to_string(), "gateway");
//! assert!(ShellError::HomeDirUnavailable.to_string().contains("Home"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, ShellError};
pub use traits::*;
pub use types::*;
