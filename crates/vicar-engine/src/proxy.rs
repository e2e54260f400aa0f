//! Proxy instances and call dispatch
//!
//! A [`Proxy`] is a runtime object of a synthesized [`ProxyType`]: it
//! owns its bound invocation handler and the held instance (the
//! self-constructed target under inheritance, the wrapped real instance
//! under interfaces). All calls go through the single generic [`Proxy::call`]
//! entry point: select the table entry, notify the handler, forward to
//! the real body, return the result unchanged.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::trace;
use vicar_sdk::{InvocationHandler, ProxyError, ProxyStrategy, Value};

use crate::builder::ProxyType;

/// A ready-to-use proxy instance bound to its handler.
///
/// Proxies add no synchronization of their own: a proxy is only as
/// thread-safe as its handler and held instance.
pub struct Proxy {
    proxy_type: Arc<ProxyType>,
    handler: Arc<dyn InvocationHandler>,
    instance: Box<dyn Any + Send>,
}

impl Proxy {
    pub(crate) fn new(
        proxy_type: Arc<ProxyType>,
        handler: Arc<dyn InvocationHandler>,
        instance: Box<dyn Any + Send>,
    ) -> Self {
        Self {
            proxy_type,
            handler,
            instance,
        }
    }

    /// Invoke the method `name` with `args`.
    ///
    /// For an intercepted entry the handler is notified first, with the
    /// method name only; a handler error rejects the call, the real body
    /// is never invoked, and the handler's error propagates as the
    /// [`ProxyError::Rejected`] source. Otherwise the real body runs with
    /// the same arguments and its result is returned unmodified (unit for
    /// void methods).
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ProxyError> {
        let entry = self.proxy_type.select(name, args)?;

        if entry.is_intercepted() {
            trace!(method = name, "notifying invocation handler");
            self.handler
                .invoked(name)
                .map_err(|source| ProxyError::Rejected {
                    method: name.to_string(),
                    source,
                })?;
        }

        (entry.body().as_ref())(self.instance.as_ref(), args)
    }

    /// The synthesized type this instance was created from
    pub fn proxy_type(&self) -> &Arc<ProxyType> {
        &self.proxy_type
    }

    /// Name of the synthesized proxy type
    pub fn type_name(&self) -> &str {
        self.proxy_type.type_name()
    }

    /// Name of the proxied target type
    pub fn target_name(&self) -> &str {
        self.proxy_type.target_name()
    }

    /// Strategy this proxy was created under
    pub fn strategy(&self) -> ProxyStrategy {
        self.proxy_type.strategy()
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("type_name", &self.type_name())
            .field("strategy", &self.strategy())
            .finish_non_exhaustive()
    }
}
