//! Multiaddr to `host:port` conversion.

use std::net::IpAddr;

use multiaddr::{Multiaddr, Protocol};

use gxshell_core::error::{Result, ShellError};

/// Converts a multiaddr such as `/ip4/127.0.0.1/tcp/5001` into a dialable
/// `host:port`.
///
/// Only "thin waist" addresses are accepted: one network component (`ip4`,
/// `ip6`, `dns`, `dns4`, `dns6`) followed by one `tcp` component. IPv6 hosts
/// are bracketed.
pub fn dial_address(addr: &str) -> Result<String> {
    let maddr: Multiaddr = addr.parse().map_err(|e: multiaddr::Error| ShellError::AddressMalformed {
        addr: addr.to_string(),
        reason: e.to_string(),
    })?;

    let mut components = maddr.iter();

    let host = match components.next() {
        Some(Protocol::Ip4(ip)) => ip.to_string(),
        Some(Protocol::Ip6(ip)) => format!("[{}]", ip),
        Some(Protocol::Dns(name) | Protocol::Dns4(name) | Protocol::Dns6(name)) => {
            name.into_owned()
        }
        Some(other) => {
            return Err(unresolvable(addr, format!("unsupported network protocol {}", other)))
        }
        None => return Err(unresolvable(addr, "empty address")),
    };

    let port = match components.next() {
        Some(Protocol::Tcp(port)) => port,
        Some(other) => {
            return Err(unresolvable(addr, format!("unsupported transport {}", other)))
        }
        None => return Err(unresolvable(addr, "missing tcp component")),
    };

    if let Some(extra) = components.next() {
        return Err(unresolvable(addr, format!("unexpected component {}", extra)));
    }

    Ok(format!("{}:{}", host, port))
}

/// Returns true if a `host:port` dial target names this machine's loopback
/// interface.
pub fn is_loopback_target(target: &str) -> bool {
    let host = target.rsplit_once(':').map_or(target, |(host, _)| host);
    let host = host.trim_start_matches('[').trim_end_matches(']');

    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().map_or(false, |ip| ip.is_loopback())
}

fn unresolvable(addr: &str, reason: impl Into<String>) -> ShellError {
    ShellError::AddressUnresolvable {
        addr: addr.to_string(),
        reason: reason.into(),
    }
}
