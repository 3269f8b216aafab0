//! Async reverse resolver using hickory-dns.
//!
//! Performs PTR lookups through a fully async DNS client, with system
//! configuration auto-detection.
//!
//! # Performance
//!
//! Unlike [`SystemResolver`](super::SystemResolver), this resolver does
//! not spawn blocking tasks. It maintains connection pools to DNS
//! servers for better performance under load.

use super::{Address, Resolve, Resolving};
use hickory_resolver::{
    config::ResolverConfig, name_server::TokioConnectionProvider, TokioResolver,
};
use std::{net::IpAddr, sync::LazyLock};

/// Async reverse resolver backed by hickory-dns.
///
/// The underlying client is lazily initialized on first use and shared
/// across all instances via a static `LazyLock`. It automatically
/// configures itself from the system's DNS settings, falling back to
/// defaults if those cannot be read.
///
/// Honors the [`Resolve`] contract: a non-IP address, an empty PTR
/// answer, or any lookup error resolves to the address itself.
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: &'static LazyLock<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver`.
    ///
    /// The underlying DNS client is lazily initialized on first query.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
            let builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            builder.build()
        });

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, addr: Address) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            let ip: IpAddr = match addr.as_str().parse() {
                Ok(ip) => ip,
                Err(_) => {
                    tracing::debug!(address = %addr, "not an IP literal, echoing address");
                    return addr.as_str().to_string();
                }
            };

            match resolver.resolver.reverse_lookup(ip).await {
                Ok(lookup) => match lookup.iter().next() {
                    Some(ptr) => {
                        // PTR answers are fully qualified; drop the root dot.
                        let name = ptr.0.to_string();
                        let name = name.trim_end_matches('.').to_string();
                        tracing::debug!(address = %addr, name = %name, "PTR lookup complete");
                        name
                    }
                    None => {
                        tracing::debug!(address = %addr, "empty PTR answer, echoing address");
                        addr.as_str().to_string()
                    }
                },
                Err(e) => {
                    tracing::debug!(address = %addr, error = %e, "PTR lookup failed");
                    addr.as_str().to_string()
                }
            }
        })
    }
}
