//! Proxy factory facade
//!
//! The single public creation entry point: validates the handler,
//! resolves the target descriptor, consults the proxy type cache
//! (synthesizing on a miss), constructs or wraps the held instance, and
//! returns a ready-to-use [`Proxy`] bound to the caller's handler. No
//! retries anywhere: every resolution or synthesis failure is terminal
//! for that call.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;
use vicar_sdk::{InvocationHandler, ProxyError, ProxyStrategy, ProxyTarget, Value};

use crate::builder::ProxyTypeBuilder;
use crate::cache::{ProxyTypeCache, ProxyTypeKey};
use crate::proxy::Proxy;
use crate::resolver;

static GLOBAL: Lazy<ProxyFactory> = Lazy::new(ProxyFactory::new);

/// Creates proxy instances, caching one synthesized type per
/// `(target type, strategy)` for the lifetime of the factory.
///
/// Safe to share across threads without external locking; the cache is
/// the only shared mutable state.
pub struct ProxyFactory {
    cache: ProxyTypeCache,
}

impl ProxyFactory {
    /// Create a factory with an empty type cache
    pub fn new() -> Self {
        Self {
            cache: ProxyTypeCache::new(),
        }
    }

    /// The process-wide shared factory
    pub fn global() -> &'static ProxyFactory {
        &GLOBAL
    }

    /// Create a proxy for `T` under `strategy`, bound to `handler`.
    ///
    /// `args` select and feed the target constructor (positional, exact
    /// runtime-type match). Under [`ProxyStrategy::Inheritance`] the
    /// proxy runs the matched constructor itself; under
    /// [`ProxyStrategy::Interfaces`] a real instance is constructed
    /// ordinarily first and the proxy wraps it, presenting the target's
    /// interface closure as its callable surface.
    ///
    /// Fails with [`ProxyError::InvalidHandler`] when `handler` is
    /// `None`; resolution failures surface as
    /// [`ProxyError::UnsupportedType`] before any instance exists.
    pub fn create<T: ProxyTarget>(
        &self,
        strategy: ProxyStrategy,
        handler: Option<Arc<dyn InvocationHandler>>,
        args: Vec<Value>,
    ) -> Result<Proxy, ProxyError> {
        let handler = handler.ok_or(ProxyError::InvalidHandler)?;
        let descriptor = T::descriptor();
        debug!(target_type = %descriptor.name(), %strategy, "creating proxy");

        if strategy == ProxyStrategy::Inheritance {
            resolver::check_subclassable(&descriptor)?;
        }
        let construct = resolver::resolve_constructor(&descriptor, &args)?;

        let key = ProxyTypeKey::of::<T>(strategy);
        let proxy_type = self.cache.insert_if_absent(key, || match strategy {
            ProxyStrategy::Inheritance => ProxyTypeBuilder::inheritance(&descriptor),
            ProxyStrategy::Interfaces => ProxyTypeBuilder::interfaces(&descriptor),
        })?;

        let instance = (construct.as_ref())(args)?;
        Ok(Proxy::new(proxy_type, handler, instance))
    }

    /// Create an interfaces-mode proxy around a caller-supplied real
    /// instance, skipping construction.
    pub fn create_around<T: ProxyTarget>(
        &self,
        handler: Option<Arc<dyn InvocationHandler>>,
        instance: T,
    ) -> Result<Proxy, ProxyError> {
        let handler = handler.ok_or(ProxyError::InvalidHandler)?;
        let descriptor = T::descriptor();
        debug!(target_type = %descriptor.name(), "wrapping supplied instance");

        let key = ProxyTypeKey::of::<T>(ProxyStrategy::Interfaces);
        let proxy_type = self
            .cache
            .insert_if_absent(key, || ProxyTypeBuilder::interfaces(&descriptor))?;

        Ok(Proxy::new(proxy_type, handler, Box::new(instance)))
    }

    /// Number of proxy types synthesized and cached so far
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ProxyFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vicar_sdk::{
        ConstructorDescriptor, HandlerError, MethodDescriptor, TypeDescriptor,
    };

    struct Gate;

    impl ProxyTarget for Gate {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::class("Gate")
                .constructor(ConstructorDescriptor::new().builds::<Gate, _>(|_| Gate))
                .method(
                    MethodDescriptor::new("open")
                        .overridable()
                        .body::<Gate, _>(|_, _| Value::unit()),
                )
        }
    }

    fn permit_all() -> Arc<dyn InvocationHandler> {
        Arc::new(|_: &str| -> Result<(), HandlerError> { Ok(()) })
    }

    #[test]
    fn test_create_and_call() {
        let factory = ProxyFactory::new();
        let proxy = factory
            .create::<Gate>(ProxyStrategy::Inheritance, Some(permit_all()), Vec::new())
            .unwrap();

        assert!(proxy.call("open", &[]).unwrap().is_unit());
        assert_eq!(factory.cached_types(), 1);
    }

    #[test]
    fn test_missing_handler() {
        let factory = ProxyFactory::new();
        let err = factory
            .create::<Gate>(ProxyStrategy::Inheritance, None, Vec::new())
            .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidHandler));
        // Rejected before anything was resolved or synthesized
        assert_eq!(factory.cached_types(), 0);
    }

    #[test]
    fn test_global_factory_is_shared() {
        let first = ProxyFactory::global() as *const ProxyFactory;
        let second = ProxyFactory::global() as *const ProxyFactory;
        assert_eq!(first, second);
    }
}
