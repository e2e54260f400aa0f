//! Type descriptor resolution
//!
//! Validates a creation request against a target's [`TypeDescriptor`]:
//! picks the constructor matching the supplied argument shape, checks
//! subclassability for the inheritance strategy, and flattens the
//! transitive interface closure for the interfaces strategy. Every
//! failure here is a [`ProxyError::UnsupportedType`] surfaced before any
//! proxy type or instance exists.

use rustc_hash::FxHashSet;
use std::any::TypeId;

use vicar_sdk::{
    argument_signature_string, arguments_match, ConstructFn, InterfaceDescriptor, MethodBody,
    MethodDescriptor, ProxyError, TypeDescriptor, TypeKind, Value,
};

/// An interface-closure method paired with the implementing body found on
/// the concrete target type.
pub struct ResolvedMethod {
    /// The interface-declared signature
    pub signature: MethodDescriptor,
    /// Body thunk from the implementing class method of the same shape
    pub body: MethodBody,
}

/// Check that the target can be proxied by subclassing.
///
/// Sealed types and pure interface contracts cannot be extended; they
/// must be proxied through the interfaces strategy instead.
pub fn check_subclassable(descriptor: &TypeDescriptor) -> Result<(), ProxyError> {
    if descriptor.kind() == TypeKind::Interface {
        return Err(ProxyError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason: "interface targets cannot be subclassed".to_string(),
        });
    }
    if descriptor.is_sealed() {
        return Err(ProxyError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason: "sealed types cannot be subclassed".to_string(),
        });
    }
    Ok(())
}

/// Select the constructor whose parameter types exactly match the runtime
/// types of `args`, positionally.
///
/// The zero-argument case requires a declared zero-parameter constructor.
/// Returns the construction thunk of the matching constructor.
pub fn resolve_constructor(
    descriptor: &TypeDescriptor,
    args: &[Value],
) -> Result<ConstructFn, ProxyError> {
    let matched = descriptor
        .constructors()
        .iter()
        .find(|ctor| arguments_match(ctor.params(), args));

    let Some(ctor) = matched else {
        return Err(ProxyError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason: format!(
                "no constructor matching {}",
                argument_signature_string(args)
            ),
        });
    };

    ctor.construct_thunk()
        .cloned()
        .ok_or_else(|| ProxyError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason: "matching constructor declares no construction thunk".to_string(),
        })
}

/// Flatten the transitive closure of the target's interfaces and bind
/// each closure method to the implementing body on the concrete type.
///
/// Duplicate signatures (same name and parameter shape, e.g. through
/// diamond extension) collapse to one entry. A closure method with no
/// implementing body on the target means the real instance could not
/// satisfy its interfaces and fails resolution.
pub fn resolve_interface_closure(
    descriptor: &TypeDescriptor,
) -> Result<Vec<ResolvedMethod>, ProxyError> {
    if descriptor.interfaces().is_empty() {
        return Err(ProxyError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason: "implements no interfaces".to_string(),
        });
    }

    let mut resolved = Vec::new();
    let mut seen_shapes: FxHashSet<(String, Vec<TypeId>)> = FxHashSet::default();
    let mut pending: Vec<&InterfaceDescriptor> = descriptor.interfaces().iter().collect();

    while let Some(interface) = pending.pop() {
        pending.extend(interface.extended());

        for signature in interface.methods() {
            let shape = (
                signature.name().to_string(),
                signature.params().iter().map(|p| p.id()).collect(),
            );
            if !seen_shapes.insert(shape) {
                continue;
            }

            let implementing = descriptor
                .methods()
                .iter()
                .find(|m| m.same_shape(signature));

            let body = implementing
                .and_then(|m| m.body_thunk())
                .cloned()
                .ok_or_else(|| ProxyError::UnsupportedType {
                    type_name: descriptor.name().to_string(),
                    reason: format!(
                        "does not implement {}.{}",
                        interface.name(),
                        signature.name()
                    ),
                })?;

            resolved.push(ResolvedMethod {
                signature: signature.clone(),
                body,
            });
        }
    }

    Ok(resolved)
}
