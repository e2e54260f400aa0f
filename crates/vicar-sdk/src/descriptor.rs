//! Target type descriptors
//!
//! A proxyable type registers a [`TypeDescriptor`] describing its callable
//! surface: declared methods (with type-erased body thunks), declared
//! constructors, and (for interface-mode proxying) the interfaces it
//! implements. Descriptors are built with chained definition builders and
//! derived on demand via [`ProxyTarget::descriptor`]; they are cheap to
//! recompute and never cached on their own.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ProxyError;
use crate::handler::HandlerError;
use crate::value::{ParamType, Value};

// ============================================================================
// Strategy
// ============================================================================

/// How a proxy type relates to its target.
///
/// Chosen once per creation request and fixed for the lifetime of the
/// generated type. The two strategies are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyStrategy {
    /// The proxy stands in as a subclass of the target type: it runs the
    /// target's matching constructor itself and forwards intercepted
    /// calls to the inherited method bodies. Requires an extendable
    /// (non-sealed, non-interface) target.
    Inheritance,
    /// The proxy implements the target's interface closure and forwards
    /// calls to a separately constructed real instance it holds. Works
    /// for sealed and interface-fronted targets.
    Interfaces,
}

impl fmt::Display for ProxyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inheritance => write!(f, "inheritance"),
            Self::Interfaces => write!(f, "interfaces"),
        }
    }
}

/// Kind of a described target type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A concrete class-like type with constructors and method bodies
    Class,
    /// A pure interface contract with no bodies of its own
    Interface,
}

// ============================================================================
// Method descriptors
// ============================================================================

/// Type-erased method body: receiver plus argument list in, value out.
///
/// The receiver is the held instance (self-constructed in inheritance
/// mode, the wrapped real instance in interfaces mode).
pub type MethodBody =
    Arc<dyn Fn(&dyn Any, &[Value]) -> Result<Value, ProxyError> + Send + Sync>;

/// A declared method on a target type or interface.
///
/// Class methods carry a body thunk; interface methods are signature-only
/// (the implementing class supplies the body).
#[derive(Clone)]
pub struct MethodDescriptor {
    name: String,
    params: Vec<ParamType>,
    return_type: ParamType,
    is_overridable: bool,
    body: Option<MethodBody>,
}

impl MethodDescriptor {
    /// Start describing a method. Parameterless, unit-returning and
    /// non-overridable until configured otherwise.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: ParamType::unit(),
            is_overridable: false,
            body: None,
        }
    }

    /// Append a parameter of type `T`
    pub fn param<T: Any>(mut self) -> Self {
        self.params.push(ParamType::of::<T>());
        self
    }

    /// Set the return type to `T`
    pub fn returns<T: Any>(mut self) -> Self {
        self.return_type = ParamType::of::<T>();
        self
    }

    /// Mark the method as overridable (polymorphic).
    ///
    /// Under the inheritance strategy only overridable methods are
    /// intercepted; the rest forward to the target unchanged.
    pub fn overridable(mut self) -> Self {
        self.is_overridable = true;
        self
    }

    /// Attach the method body for receiver type `T`.
    ///
    /// The closure receives the downcast receiver and the argument list;
    /// a receiver of any other concrete type surfaces as
    /// [`ProxyError::ReceiverMismatch`].
    pub fn body<T, F>(mut self, f: F) -> Self
    where
        T: Any,
        F: Fn(&T, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(move |receiver: &dyn Any, args: &[Value]| {
            let this = receiver
                .downcast_ref::<T>()
                .ok_or(ProxyError::ReceiverMismatch {
                    expected: std::any::type_name::<T>(),
                })?;
            Ok(f(this, args))
        }));
        self
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered parameter types
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    /// Return type
    pub fn return_type(&self) -> ParamType {
        self.return_type
    }

    /// Whether the method is overridable (polymorphic)
    pub fn is_overridable(&self) -> bool {
        self.is_overridable
    }

    /// The attached body thunk, if any
    pub fn body_thunk(&self) -> Option<&MethodBody> {
        self.body.as_ref()
    }

    /// Whether `other` declares the same name and parameter shape
    pub fn same_shape(&self, other: &MethodDescriptor) -> bool {
        self.name == other.name && self.params == other.params
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("is_overridable", &self.is_overridable)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

// ============================================================================
// Constructor descriptors
// ============================================================================

/// Type-erased constructor: owned argument list in, boxed instance out
pub type ConstructFn =
    Arc<dyn Fn(Vec<Value>) -> Result<Box<dyn Any + Send>, ProxyError> + Send + Sync>;

/// A declared constructor on a target type.
///
/// Constructor selection is positional with exact runtime-type matching
/// against the supplied argument list; a zero-parameter constructor must
/// be declared for zero-argument creation to succeed.
#[derive(Clone)]
pub struct ConstructorDescriptor {
    params: Vec<ParamType>,
    construct: Option<ConstructFn>,
}

impl ConstructorDescriptor {
    /// Start describing a constructor with no parameters
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            construct: None,
        }
    }

    /// Append a parameter of type `T`
    pub fn param<T: Any>(mut self) -> Self {
        self.params.push(ParamType::of::<T>());
        self
    }

    /// Attach an infallible construction closure producing a `T`.
    ///
    /// The argument list has already been matched against the declared
    /// parameters when the closure runs.
    pub fn builds<T, F>(mut self, f: F) -> Self
    where
        T: Any + Send,
        F: Fn(Vec<Value>) -> T + Send + Sync + 'static,
    {
        self.construct = Some(Arc::new(move |args| Ok(Box::new(f(args)))));
        self
    }

    /// Attach a fallible construction closure producing a `T`.
    ///
    /// A returned error propagates unchanged to the factory caller as
    /// [`ProxyError::Construction`].
    pub fn try_builds<T, F>(mut self, f: F) -> Self
    where
        T: Any + Send,
        F: Fn(Vec<Value>) -> Result<T, HandlerError> + Send + Sync + 'static,
    {
        self.construct = Some(Arc::new(move |args| match f(args) {
            Ok(instance) => Ok(Box::new(instance)),
            Err(source) => Err(ProxyError::Construction {
                type_name: std::any::type_name::<T>().to_string(),
                source,
            }),
        }));
        self
    }

    /// Ordered parameter types
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    /// The attached construction thunk, if any
    pub fn construct_thunk(&self) -> Option<&ConstructFn> {
        self.construct.as_ref()
    }
}

impl Default for ConstructorDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .field("has_construct", &self.construct.is_some())
            .finish()
    }
}

// ============================================================================
// Interface descriptors
// ============================================================================

/// An interface implemented by a target type.
///
/// Interfaces may extend other interfaces; the interface-mode proxy
/// surface is the flattened transitive closure, deduplicated by method
/// name and parameter shape.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    name: String,
    extends: Vec<InterfaceDescriptor>,
    methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    /// Start describing an interface
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Declare that this interface extends `parent`
    pub fn extends(mut self, parent: InterfaceDescriptor) -> Self {
        self.extends.push(parent);
        self
    }

    /// Declare a method signature (bodies live on the implementing class)
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Interface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directly extended interfaces
    pub fn extended(&self) -> &[InterfaceDescriptor] {
        &self.extends
    }

    /// Directly declared method signatures
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }
}

// ============================================================================
// Type descriptors
// ============================================================================

/// The introspected shape of a proxyable target type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    is_sealed: bool,
    constructors: Vec<ConstructorDescriptor>,
    methods: Vec<MethodDescriptor>,
    interfaces: Vec<InterfaceDescriptor>,
}

impl TypeDescriptor {
    /// Start describing a concrete class-like type
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            is_sealed: false,
            constructors: Vec::new(),
            methods: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    /// Start describing a pure interface contract
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Interface,
            is_sealed: false,
            constructors: Vec::new(),
            methods: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    /// Mark the type as sealed (non-extendable)
    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Declare a constructor
    pub fn constructor(mut self, ctor: ConstructorDescriptor) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Declare a method directly on this type
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare an implemented interface
    pub fn implements(mut self, interface: InterfaceDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Stable type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the described type
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Whether the type is sealed
    pub fn is_sealed(&self) -> bool {
        self.is_sealed
    }

    /// Declared constructors
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Methods declared directly on this type
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Implemented interfaces (direct; closure is resolved per strategy)
    pub fn interfaces(&self) -> &[InterfaceDescriptor] {
        &self.interfaces
    }
}

// ============================================================================
// Registration
// ============================================================================

/// A type that can be proxied.
///
/// Implementors describe their own callable surface; the descriptor is
/// derived on demand and the generated proxy type is cached by the
/// implementor's `TypeId` plus the chosen strategy.
pub trait ProxyTarget: Any + Send {
    /// Describe this type's methods, constructors and interfaces
    fn descriptor() -> TypeDescriptor
    where
        Self: Sized;
}
