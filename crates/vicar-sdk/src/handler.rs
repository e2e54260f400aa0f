//! Invocation handlers
//!
//! A proxy notifies its handler with the name of every intercepted method
//! before the real body runs. The notification carries the method name and
//! nothing else: no argument values, no return value. A handler that
//! returns an error vetoes the call; the real body is never invoked and
//! the error propagates to the proxy's caller as
//! [`ProxyError::Rejected`](crate::ProxyError::Rejected).

/// Error type raised by an invocation handler.
///
/// Handlers report failures in their own domain (authorization denial,
/// quota exhaustion, ...); the proxy preserves the error unchanged as the
/// rejection source.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Caller-supplied capability notified of each intercepted method call.
///
/// Implementations must be safe to share across threads; the proxy adds
/// no synchronization of its own.
pub trait InvocationHandler: Send + Sync {
    /// Notify that `method_name` is about to be invoked.
    ///
    /// Returning `Err` rejects the call: the underlying method body is
    /// not executed.
    fn invoked(&self, method_name: &str) -> Result<(), HandlerError>;
}

impl<F> InvocationHandler for F
where
    F: Fn(&str) -> Result<(), HandlerError> + Send + Sync,
{
    fn invoked(&self, method_name: &str) -> Result<(), HandlerError> {
        self(method_name)
    }
}
