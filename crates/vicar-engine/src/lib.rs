//! Vicar Engine - Runtime interception proxy generator
//!
//! Given a registered target type description, the engine synthesizes a
//! proxy type (an immutable dispatch table of the target's callable
//! surface) and hands out proxy instances whose every intercepted call
//! notifies an invocation handler before delegating to the real method
//! body (inheritance strategy) or a wrapped real instance (interfaces
//! strategy):
//! - **Resolver**: constructor matching and interface closure (`resolver` module)
//! - **Cache**: one synthesized type per `(target, strategy)` (`cache` module)
//! - **Builder**: the two synthesis paths (`builder` module)
//! - **Proxy**: instances and the generic call entry point (`proxy` module)
//! - **Factory**: the public creation facade (`factory` module)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vicar_engine::{ProxyFactory, ProxyStrategy};
//!
//! let proxy = ProxyFactory::global().create::<Greeter>(
//!     ProxyStrategy::Inheritance,
//!     Some(Arc::new(audit_handler)),
//!     Vec::new(),
//! )?;
//! let greeting = proxy.call("greet", &[])?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Proxy type synthesis: dispatch tables and the two strategy paths
pub mod builder;

/// Concurrent proxy type cache
pub mod cache;

/// Creation facade
pub mod factory;

/// Proxy instances and call dispatch
pub mod proxy;

/// Descriptor resolution: constructors, subclassability, interface closure
pub mod resolver;

pub use builder::{MethodEntry, ProxyType, ProxyTypeBuilder};
pub use cache::{ProxyTypeCache, ProxyTypeKey};
pub use factory::ProxyFactory;
pub use proxy::Proxy;

// Re-export the SDK contract so consumers need a single dependency.
pub use vicar_sdk::{
    ConstructorDescriptor, HandlerError, InterfaceDescriptor, InvocationHandler,
    MethodDescriptor, ParamType, ProxyError, ProxyResult, ProxyStrategy, ProxyTarget,
    TypeDescriptor, TypeKind, Value,
};
