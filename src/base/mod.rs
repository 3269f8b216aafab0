//! Base types and error handling.
//!
//! Provides the crate-wide error type:
//! - [`ResolveError`]: configuration and stream I/O failures

pub mod error;

pub use error::ResolveError;
