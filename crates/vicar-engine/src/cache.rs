//! Proxy type cache
//!
//! Process-lifetime, monotonically growing mapping from
//! `(target TypeId, strategy)` to the synthesized [`ProxyType`]. Safe for
//! concurrent use without external locking. The cache is race-tolerant:
//! under contention the build closure may run more than once, but exactly
//! one result is retained and every caller converges on the same shared
//! `Arc`. Synthesized types for the same key are interchangeable, so
//! keeping whichever insert wins is sufficient.

use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::trace;

use vicar_sdk::{ProxyError, ProxyStrategy};

use crate::builder::ProxyType;

/// Cache key: target type identity plus generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyTypeKey {
    /// Identity of the proxied target type
    pub target: TypeId,
    /// Strategy the type was (or will be) synthesized under
    pub strategy: ProxyStrategy,
}

impl ProxyTypeKey {
    /// Key for target type `T` under `strategy`
    pub fn of<T: Any>(strategy: ProxyStrategy) -> Self {
        Self {
            target: TypeId::of::<T>(),
            strategy,
        }
    }
}

/// Concurrent cache of synthesized proxy types. Never evicts.
pub struct ProxyTypeCache {
    types: DashMap<ProxyTypeKey, Arc<ProxyType>>,
}

impl ProxyTypeCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Get the cached type for `key`, if already synthesized
    pub fn lookup(&self, key: ProxyTypeKey) -> Option<Arc<ProxyType>> {
        self.types.get(&key).map(|entry| entry.clone())
    }

    /// Get the cached type for `key`, synthesizing it with `build` on a
    /// miss.
    ///
    /// `build` runs outside the map lock, so two racing callers may both
    /// synthesize; the entry API keeps one winner and both callers get
    /// the retained `Arc`. A build failure caches nothing.
    pub fn insert_if_absent<F>(
        &self,
        key: ProxyTypeKey,
        build: F,
    ) -> Result<Arc<ProxyType>, ProxyError>
    where
        F: FnOnce() -> Result<ProxyType, ProxyError>,
    {
        if let Some(existing) = self.lookup(key) {
            trace!(type_name = %existing.type_name(), "proxy type cache hit");
            return Ok(existing);
        }

        let built = Arc::new(build()?);
        let retained = self.types.entry(key).or_insert(built).clone();
        trace!(type_name = %retained.type_name(), "proxy type cached");
        Ok(retained)
    }

    /// Number of cached proxy types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for ProxyTypeCache {
    fn default() -> Self {
        Self::new()
    }
}
