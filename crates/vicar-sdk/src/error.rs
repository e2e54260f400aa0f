//! Error types for proxy creation and dispatch

use crate::handler::HandlerError;

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Errors surfaced by proxy creation and dispatch.
///
/// Nothing is recovered or retried anywhere: every failure is returned
/// to the immediate caller.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No invocation handler was supplied to the factory
    #[error("an invocation handler is required")]
    InvalidHandler,

    /// The target type is structurally incompatible with the requested
    /// strategy, or no constructor matches the supplied arguments
    #[error("unsupported type {type_name}: {reason}")]
    UnsupportedType {
        /// Name of the offending target type
        type_name: String,
        /// Why the type cannot be proxied as requested
        reason: String,
    },

    /// The invocation handler rejected the call; the real method body
    /// was never invoked
    #[error("method {method} rejected by invocation handler")]
    Rejected {
        /// Name of the rejected method
        method: String,
        /// The handler's own error, unchanged
        #[source]
        source: HandlerError,
    },

    /// The wrapped real type's constructor failed (interfaces mode)
    #[error("construction of {type_name} failed")]
    Construction {
        /// Name of the type being constructed
        type_name: String,
        /// The constructor's own error, unchanged
        #[source]
        source: HandlerError,
    },

    /// No method with this name exists on the proxied surface
    #[error("no method named {method} on proxy type {type_name}")]
    NoSuchMethod {
        /// Requested method name
        method: String,
        /// Name of the generated proxy type
        type_name: String,
    },

    /// A method with this name exists, but no declared parameter shape
    /// matches the supplied arguments
    #[error("method {method} expects {expected}, got {got}")]
    SignatureMismatch {
        /// Requested method name
        method: String,
        /// Declared parameter shapes, rendered
        expected: String,
        /// Runtime argument types, rendered
        got: String,
    },

    /// A body thunk received a receiver of the wrong concrete type.
    /// Indicates a malformed type descriptor.
    #[error("receiver type mismatch: expected {expected}")]
    ReceiverMismatch {
        /// Concrete type the body was registered for
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProxyError::UnsupportedType {
            type_name: "Widget".to_string(),
            reason: "sealed type cannot be subclassed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported type Widget: sealed type cannot be subclassed"
        );
    }

    #[test]
    fn test_rejection_preserves_source() {
        use std::error::Error;

        let source: HandlerError = "access denied".into();
        let err = ProxyError::Rejected {
            method: "five".to_string(),
            source,
        };
        let source = err.source().expect("rejection carries its source");
        assert_eq!(source.to_string(), "access denied");
    }
}
