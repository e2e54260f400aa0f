//! Vicar SDK - Lightweight contract for describing proxyable types
//!
//! This crate provides the minimal types and traits needed to describe a
//! proxyable type and write invocation handlers, without depending on the
//! proxy engine itself:
//! - **Values**: type-erased argument/return handles (`value` module)
//! - **Descriptors**: target type surfaces and builders (`descriptor` module)
//! - **Handlers**: the interception capability (`handler` module)
//! - **Errors**: the creation/dispatch error taxonomy (`error` module)
//!
//! # Example
//!
//! ```ignore
//! use vicar_sdk::{
//!     ConstructorDescriptor, MethodDescriptor, ProxyTarget, TypeDescriptor, Value,
//! };
//!
//! struct Greeter;
//!
//! impl ProxyTarget for Greeter {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::class("Greeter")
//!             .constructor(ConstructorDescriptor::new().builds::<Greeter, _>(|_| Greeter))
//!             .method(
//!                 MethodDescriptor::new("greet")
//!                     .returns::<String>()
//!                     .overridable()
//!                     .body::<Greeter, _>(|_, _| Value::new(String::from("hello"))),
//!             )
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod descriptor;
mod error;
mod handler;
mod value;

pub use descriptor::{
    ConstructFn, ConstructorDescriptor, InterfaceDescriptor, MethodBody, MethodDescriptor,
    ProxyStrategy, ProxyTarget, TypeDescriptor, TypeKind,
};
pub use error::{ProxyError, ProxyResult};
pub use handler::{HandlerError, InvocationHandler};
pub use value::{
    argument_signature_string, arguments_match, signature_string, ParamType, Value,
};
