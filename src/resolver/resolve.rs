//! Core resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the hostname resolution layer.

use std::{borrow::Borrow, collections::HashMap, fmt, future::Future, pin::Pin, sync::Arc};

/// An address to resolve into a hostname.
///
/// This is a lightweight wrapper around an opaque address string (typically
/// a dotted-quad IP token) that provides a type-safe key for the cache and
/// work-queue layers. No validation is performed here; interpreting the
/// string is the backend resolver's concern.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Address {
    addr: Box<str>,
}

impl Address {
    /// Creates a new [`Address`] from any string-like type.
    #[inline]
    pub fn new(addr: impl Into<Box<str>>) -> Self {
        Self { addr: addr.into() }
    }

    /// View the address as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.addr
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address::new(value)
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        &self.addr
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.addr, f)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

/// Alias for the `Future` type returned by a resolver.
pub type Resolving = Pin<Box<dyn Future<Output = String> + Send>>;

/// Trait for hostname resolution.
///
/// This is the core abstraction of the crate. Implementations must be
/// thread-safe and must never fail: an address that cannot be resolved
/// (malformed, unknown, backend unreachable) resolves to itself. The
/// returned name therefore equals the input address both for unresolvable
/// addresses and, in the background resolver, for lookups that have not
/// completed yet.
///
/// # Design Notes
///
/// - Resolution may block the awaiting task for an arbitrarily long time
///   (the backend lookup has no timeout of its own).
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    /// Resolves an address to a hostname, falling back to the address
    /// itself when resolution is impossible.
    fn resolve(&self, addr: Address) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, addr: Address) -> Resolving {
        (**self).resolve(addr)
    }
}

/// Resolver backed by a fixed address-to-hostname table.
///
/// Addresses absent from the table resolve to themselves, per the
/// [`Resolve`] contract. Useful for:
/// - Testing without real reverse DNS
/// - Forcing specific names for known addresses
/// - Annotating streams from closed networks with a known host inventory
pub struct TableResolver {
    entries: Arc<HashMap<Address, String>>,
}

impl TableResolver {
    /// Creates a resolver over the given address-to-hostname table.
    pub fn new(entries: HashMap<Address, String>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns the number of table entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Address, String)> for TableResolver {
    fn from_iter<I: IntoIterator<Item = (Address, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Resolve for TableResolver {
    fn resolve(&self, addr: Address) -> Resolving {
        let name = match self.entries.get(&addr) {
            Some(name) => name.clone(),
            None => {
                tracing::debug!(address = %addr, "no table entry, echoing address");
                addr.as_str().to_string()
            }
        };
        Box::pin(std::future::ready(name))
    }
}

impl fmt::Debug for TableResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableResolver")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
