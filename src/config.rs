//! Resolver pipeline configuration.
//!
//! A single serializable surface for the knobs the surrounding system
//! hands in: caching on/off, background resolution on/off, worker pool
//! size and the rewriter's substitution mode.

use crate::base::ResolveError;
use crate::resolver::{BackgroundResolver, CachingResolver, Resolve, DEFAULT_POOL_SIZE};
use crate::rewrite::RewriteMode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for a resolver stack and its rewriter.
///
/// Requesting `background` without `caching` is a configuration error:
/// the worker pool's only output is the cache it populates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Memoize resolution results.
    pub caching: bool,
    /// Perform slow lookups on background workers; callers get the
    /// address back as a sentinel until the lookup lands.
    pub background: bool,
    /// Number of background worker tasks.
    pub pool_size: usize,
    /// Replace address tokens or annotate them in place.
    pub mode: RewriteMode,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            caching: true,
            background: false,
            pool_size: DEFAULT_POOL_SIZE,
            mode: RewriteMode::default(),
        }
    }
}

impl ResolveConfig {
    /// Composes the configured decorator stack over a backend resolver.
    ///
    /// Validation is eager: an invalid combination is rejected here, not
    /// downgraded. With `background` enabled this spawns the worker pool
    /// and therefore must run inside a tokio runtime.
    pub fn build_resolver(
        &self,
        backend: Arc<dyn Resolve>,
    ) -> Result<Arc<dyn Resolve>, ResolveError> {
        if self.background && !self.caching {
            return Err(ResolveError::BackgroundRequiresCaching);
        }
        if !self.caching {
            return Ok(backend);
        }

        let caching = Arc::new(CachingResolver::new(backend));
        if !self.background {
            return Ok(caching as Arc<dyn Resolve>);
        }

        Ok(Arc::new(BackgroundResolver::new(caching, self.pool_size)) as Arc<dyn Resolve>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{Address, TableResolver};
    use std::collections::HashMap;

    fn backend() -> Arc<dyn Resolve> {
        Arc::new(TableResolver::new(HashMap::from([(
            Address::new("128.34.12.5"),
            "www.foobar.com".to_string(),
        )])))
    }

    #[tokio::test]
    async fn test_default_config_builds_caching_stack() {
        let config = ResolveConfig::default();
        let resolver = config.build_resolver(backend()).unwrap();

        let name = resolver.resolve(Address::new("128.34.12.5")).await;
        assert_eq!(name, "www.foobar.com");
    }

    #[tokio::test]
    async fn test_plain_stack_passes_through() {
        let config = ResolveConfig {
            caching: false,
            ..ResolveConfig::default()
        };
        let resolver = config.build_resolver(backend()).unwrap();

        let name = resolver.resolve(Address::new("99.98.86.84")).await;
        assert_eq!(name, "99.98.86.84");
    }

    #[test]
    fn test_background_without_caching_rejected() {
        let config = ResolveConfig {
            caching: false,
            background: true,
            ..ResolveConfig::default()
        };

        let err = match config.build_resolver(backend()) {
            Err(err) => err,
            Ok(_) => panic!("invalid configuration was accepted"),
        };
        assert!(matches!(err, ResolveError::BackgroundRequiresCaching));
    }

    #[tokio::test]
    async fn test_background_stack_returns_sentinel_first() {
        let config = ResolveConfig {
            background: true,
            pool_size: 2,
            ..ResolveConfig::default()
        };
        let resolver = config.build_resolver(backend()).unwrap();

        // First answer is the sentinel; the lookup is in flight.
        let name = resolver.resolve(Address::new("128.34.12.5")).await;
        assert_eq!(name, "128.34.12.5");
    }

    #[test]
    fn test_config_from_json() {
        let config: ResolveConfig =
            serde_json::from_str(r#"{"background": true, "pool_size": 2, "mode": "annotate"}"#)
                .unwrap();

        assert!(config.caching);
        assert!(config.background);
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.mode, RewriteMode::Annotate);
    }

    #[test]
    fn test_invalid_json_config_still_rejected_at_build() {
        let config: ResolveConfig =
            serde_json::from_str(r#"{"caching": false, "background": true}"#).unwrap();
        assert!(config.build_resolver(backend()).is_err());
    }
}
