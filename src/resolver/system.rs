//! System reverse resolver using getnameinfo.
//!
//! This resolver uses the operating system's native name service via
//! `getnameinfo`, executed in a thread pool to avoid blocking the async
//! runtime.
//!
//! # When to Use
//!
//! - When you need to respect system resolver configuration
//!   (/etc/nsswitch.conf, /etc/hosts, etc.)
//! - As a fallback when hickory-dns is not available

use super::{Address, Resolve, Resolving};
use std::net::IpAddr;

/// System reverse resolver running `getnameinfo` in a thread pool.
///
/// Wraps the `dns-lookup` crate's address lookup and executes it in
/// `tokio::task::spawn_blocking` to keep the slow, uninterruptible
/// system call off the async runtime.
///
/// Honors the [`Resolve`] contract: an address that is not an IP
/// literal, is unknown to the name service, or whose lookup errors in
/// any way resolves to itself.
#[derive(Clone, Debug, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Creates a new `SystemResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for SystemResolver {
    fn resolve(&self, addr: Address) -> Resolving {
        Box::pin(async move {
            let ip: IpAddr = match addr.as_str().parse() {
                Ok(ip) => ip,
                Err(_) => {
                    tracing::debug!(address = %addr, "not an IP literal, echoing address");
                    return addr.as_str().to_string();
                }
            };

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(ip = %ip, "reverse lookup via getnameinfo");
                dns_lookup::lookup_addr(&ip)
            })
            .await;

            match result {
                Ok(Ok(name)) => {
                    tracing::debug!(address = %addr, name = %name, "reverse lookup complete");
                    name
                }
                Ok(Err(e)) => {
                    tracing::debug!(address = %addr, error = %e, "reverse lookup failed");
                    addr.as_str().to_string()
                }
                // Task join error (cancellation, panic)
                Err(e) => {
                    tracing::error!(address = %addr, error = %e, "reverse lookup task failed");
                    addr.as_str().to_string()
                }
            }
        })
    }
}
