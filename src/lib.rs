//! # logresolve
//!
//! Hostname resolution for log streams: a resolution cache with
//! background lookup workers and a line-oriented rewriter that
//! substitutes IP-style address tokens with their resolved names.
//!
//! The resolver layers compose as decorators around one capability
//! trait, so callers pick exactly the behavior they need:
//!
//! - [`resolver::SystemResolver`] / [`resolver::HickoryResolver`] — the
//!   slow reverse lookups (system name service or async DNS)
//! - [`resolver::CachingResolver`] — write-through memoization with
//!   explicit invalidation
//! - [`resolver::BackgroundResolver`] — never blocks a caller; misses
//!   are drained by a fixed pool of worker tasks
//! - [`rewrite::HostnameRewriter`] — applies any of the above to a text
//!   stream, line by line
//!
//! Resolution never fails: an address that cannot be resolved (or whose
//! background lookup has not completed yet) resolves to itself.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use logresolve::config::ResolveConfig;
//! use logresolve::resolver::SystemResolver;
//! use logresolve::rewrite::HostnameRewriter;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResolveConfig {
//!         background: true,
//!         ..ResolveConfig::default()
//!     };
//!     let resolver = config.build_resolver(Arc::new(SystemResolver::new()))?;
//!
//!     let stdin = tokio::io::stdin();
//!     let mut rewriter = HostnameRewriter::new(stdin, resolver).with_mode(config.mode);
//!     while let Some(line) = rewriter.read_line().await? {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Crate-wide error type
//! - [`config`] - Pipeline configuration and stack composition
//! - [`resolver`] - The capability trait, its decorators and backends
//! - [`rewrite`] - Line-oriented address substitution

pub mod base;
pub mod config;
pub mod resolver;
pub mod rewrite;
