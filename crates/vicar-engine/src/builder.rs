//! Proxy type synthesis
//!
//! Builds the immutable [`ProxyType`] for a target descriptor: a dispatch
//! table mapping method names to entries whose bodies perform
//! handler-then-forward dispatch. Two synthesis paths exist, one per
//! strategy:
//! - **Inheritance**: one entry per method declared directly on the
//!   target; only overridable methods are intercepted, the rest forward
//!   to the target body without notifying the handler.
//! - **Interfaces**: one entry per method in the flattened interface
//!   closure; every entry is intercepted and forwards to the held real
//!   instance.

use rustc_hash::FxHashMap;
use tracing::debug;

use vicar_sdk::{
    argument_signature_string, arguments_match, signature_string, MethodBody, ParamType,
    ProxyError, ProxyStrategy, TypeDescriptor, Value,
};

use crate::resolver;

/// Name suffix appended to the target type name to form the synthesized
/// proxy type name
const PROXY_SUFFIX: &str = "Proxy";

/// One callable slot in a proxy type's dispatch table
pub struct MethodEntry {
    name: String,
    params: Vec<ParamType>,
    return_type: ParamType,
    intercepted: bool,
    body: MethodBody,
}

impl MethodEntry {
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

    /// Whether calls through this entry notify the invocation handler
    pub fn is_intercepted(&self) -> bool {
        self.intercepted
    }

    /// The forwarding body thunk
    pub fn body(&self) -> &MethodBody {
        &self.body
    }
}

/// A synthesized proxy type: the immutable, cacheable dispatch table for
/// one `(target type, strategy)` pair.
///
/// Never mutated after construction; shared behind an `Arc` by the cache
/// and by every proxy instance created from it.
pub struct ProxyType {
    type_name: String,
    target_name: String,
    strategy: ProxyStrategy,
    methods: FxHashMap<String, Vec<MethodEntry>>,
    method_count: usize,
}

impl ProxyType {
    /// Name of the synthesized type (`{target}Proxy`)
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the proxied target type
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Strategy this type was synthesized under
    pub fn strategy(&self) -> ProxyStrategy {
        self.strategy
    }

    /// Number of callable entries on the proxied surface
    pub fn method_count(&self) -> usize {
        self.method_count
    }

    /// Whether the surface declares a method with this name
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Sorted names of the callable surface
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Select the entry for `name` whose parameter shape exactly matches
    /// the runtime types of `args`.
    pub fn select(&self, name: &str, args: &[Value]) -> Result<&MethodEntry, ProxyError> {
        let Some(entries) = self.methods.get(name) else {
            return Err(ProxyError::NoSuchMethod {
                method: name.to_string(),
                type_name: self.type_name.clone(),
            });
        };

        entries
            .iter()
            .find(|entry| arguments_match(&entry.params, args))
            .ok_or_else(|| ProxyError::SignatureMismatch {
                method: name.to_string(),
                expected: entries
                    .iter()
                    .map(|e| signature_string(&e.params))
                    .collect::<Vec<_>>()
                    .join(" | "),
                got: argument_signature_string(args),
            })
    }

    fn insert(&mut self, entry: MethodEntry) {
        self.methods.entry(entry.name.clone()).or_default().push(entry);
        self.method_count += 1;
    }
}

impl std::fmt::Debug for ProxyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyType")
            .field("type_name", &self.type_name)
            .field("strategy", &self.strategy)
            .field("method_count", &self.method_count)
            .finish()
    }
}

/// Synthesizes [`ProxyType`]s from target descriptors
pub struct ProxyTypeBuilder;

impl ProxyTypeBuilder {
    /// Synthesize the subclass-style proxy type for `descriptor`.
    ///
    /// Fails when the target is sealed or an interface, or when a
    /// declared method carries no body to forward to.
    pub fn inheritance(descriptor: &TypeDescriptor) -> Result<ProxyType, ProxyError> {
        resolver::check_subclassable(descriptor)?;

        let mut proxy_type = ProxyType {
            type_name: format!("{}{}", descriptor.name(), PROXY_SUFFIX),
            target_name: descriptor.name().to_string(),
            strategy: ProxyStrategy::Inheritance,
            methods: FxHashMap::default(),
            method_count: 0,
        };

        for method in descriptor.methods() {
            let body = method
                .body_thunk()
                .cloned()
                .ok_or_else(|| ProxyError::UnsupportedType {
                    type_name: descriptor.name().to_string(),
                    reason: format!("declared method {} has no body", method.name()),
                })?;

            proxy_type.insert(MethodEntry {
                name: method.name().to_string(),
                params: method.params().to_vec(),
                return_type: method.return_type(),
                // Non-overridable methods are inherited unchanged, not
                // intercepted
                intercepted: method.is_overridable(),
                body,
            });
        }

        debug!(
            type_name = %proxy_type.type_name,
            methods = proxy_type.method_count,
            "synthesized inheritance proxy type"
        );
        Ok(proxy_type)
    }

    /// Synthesize the delegate-style proxy type for `descriptor`.
    ///
    /// The surface is the flattened interface closure; every entry is
    /// intercepted and forwards to the held real instance.
    pub fn interfaces(descriptor: &TypeDescriptor) -> Result<ProxyType, ProxyError> {
        let resolved = resolver::resolve_interface_closure(descriptor)?;

        let mut proxy_type = ProxyType {
            type_name: format!("{}{}", descriptor.name(), PROXY_SUFFIX),
            target_name: descriptor.name().to_string(),
            strategy: ProxyStrategy::Interfaces,
            methods: FxHashMap::default(),
            method_count: 0,
        };

        for method in resolved {
            proxy_type.insert(MethodEntry {
                name: method.signature.name().to_string(),
                params: method.signature.params().to_vec(),
                return_type: method.signature.return_type(),
                intercepted: true,
                body: method.body,
            });
        }

        debug!(
            type_name = %proxy_type.type_name,
            methods = proxy_type.method_count,
            "synthesized interfaces proxy type"
        );
        Ok(proxy_type)
    }
}
