//! Hostname Resolution Module
//!
//! Provides address-to-hostname resolution with support for:
//! - System reverse lookup (getnameinfo via thread pool)
//! - Async hickory-dns PTR lookup
//! - Write-through result caching with explicit invalidation
//! - Non-blocking resolution backed by a background worker pool
//!
//! # Architecture
//!
//! The `Resolve` trait is the core abstraction; everything else is a
//! decorator over it. [`CachingResolver`] memoizes any resolver;
//! [`BackgroundResolver`] wraps a caching resolver and moves the slow
//! lookups onto worker tasks, answering callers immediately with the
//! cached name or with the address itself while a lookup is pending.
//!
//! # Example
//!
//! ```rust,ignore
//! use logresolve::resolver::{Address, CachingResolver, Resolve, SystemResolver};
//! use std::sync::Arc;
//!
//! let resolver = CachingResolver::new(Arc::new(SystemResolver::new()));
//! let name = resolver.resolve(Address::new("127.0.0.1")).await;
//! println!("Resolved: {}", name);
//! ```

mod background;
mod caching;
mod hickory;
mod resolve;
mod system;

pub use background::{BackgroundResolver, DEFAULT_POOL_SIZE};
pub use caching::CachingResolver;
pub use hickory::HickoryResolver;
pub use resolve::{Address, Resolve, Resolving, TableResolver};
pub use system::SystemResolver;
