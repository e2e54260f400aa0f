//! Dynamic value handles for proxy dispatch
//!
//! Proxied method calls cross a type-erased boundary: argument lists and
//! return values travel as [`Value`] handles, and parameter shapes are
//! described by [`ParamType`]. Matching is always by exact `TypeId`;
//! there is no implicit coercion anywhere in the dispatch path.

use std::any::{Any, TypeId};
use std::fmt;

// ============================================================================
// Value
// ============================================================================

/// An owned, type-erased value crossing the proxy dispatch boundary.
///
/// Wraps `Box<dyn Any + Send>` and remembers the static type name of the
/// wrapped value for diagnostics. Unit-returning methods use
/// [`Value::unit`] so that "no return value" is still a `Value`.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Value {
    /// Wrap an owned value
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The unit value, returned by methods that return nothing
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Check whether this is the unit value
    pub fn is_unit(&self) -> bool {
        self.inner.as_ref().is::<()>()
    }

    /// `TypeId` of the wrapped value
    pub fn type_id(&self) -> TypeId {
        self.inner.as_ref().type_id()
    }

    /// Static type name of the wrapped value (for diagnostics)
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the wrapped value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().is::<T>()
    }

    /// Take the wrapped value out as a `T`.
    ///
    /// Returns the original `Value` unchanged on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(inner) => Err(Value { inner, type_name }),
        }
    }

    /// Borrow the wrapped value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref().downcast_ref::<T>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ParamType
// ============================================================================

/// A parameter (or return) type in a method or constructor signature.
///
/// Pairs a `TypeId` with the static type name so mismatch errors can name
/// both sides. Two `ParamType`s are equal iff their `TypeId`s are equal.
#[derive(Clone, Copy)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
}

impl ParamType {
    /// The parameter type for `T`
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The unit type, used as the return type of void methods
    pub fn unit() -> Self {
        Self::of::<()>()
    }

    /// `TypeId` of the described type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Static type name of the described type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Exact-type check against a runtime value
    pub fn matches(&self, value: &Value) -> bool {
        self.id == value.type_id()
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

impl std::hash::Hash for ParamType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParamType({})", self.name)
    }
}

/// Render a parameter list as `(A, B, C)` for error messages
pub fn signature_string(params: &[ParamType]) -> String {
    let names: Vec<&str> = params.iter().map(|p| p.name()).collect();
    format!("({})", names.join(", "))
}

/// Render the runtime types of an argument list as `(A, B, C)`
pub fn argument_signature_string(args: &[Value]) -> String {
    let names: Vec<&str> = args.iter().map(|v| v.type_name()).collect();
    format!("({})", names.join(", "))
}

/// Check an argument list against a parameter list, positionally and exactly
pub fn arguments_match(params: &[ParamType], args: &[Value]) -> bool {
    params.len() == args.len() && params.iter().zip(args).all(|(p, a)| p.matches(a))
}
