//! Shared proxy test fixtures
//!
//! The usual consumer shapes: a plain target with a no-argument
//! constructor, a target constructed from a value, a probe whose bodies
//! journal their execution, and a sealed interface-backed target. The
//! recording handler journals every notification and rejects method
//! names ending in "five" or "six".
#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

use vicar_engine::{
    ConstructorDescriptor, HandlerError, InterfaceDescriptor, InvocationHandler,
    MethodDescriptor, ProxyTarget, TypeDescriptor, Value,
};

/// Shared journal of observed events, in order
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().clone()
}

// ============================================================================
// Handler
// ============================================================================

/// The domain error an authorizing handler raises
#[derive(Debug, Error)]
#[error("access denied to {0}")]
pub struct AccessDenied(pub String);

/// Journals every notification as `notify:{name}`; rejects names ending
/// in "five" or "six" (any casing) with [`AccessDenied`].
pub struct RecordingHandler {
    journal: Journal,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Self::with_journal(journal())
    }

    pub fn with_journal(journal: Journal) -> Arc<Self> {
        Arc::new(Self { journal })
    }

    pub fn notifications(&self) -> Vec<String> {
        entries(&self.journal)
    }
}

impl InvocationHandler for RecordingHandler {
    fn invoked(&self, method_name: &str) -> Result<(), HandlerError> {
        self.journal.lock().push(format!("notify:{method_name}"));
        let lowered = method_name.to_ascii_lowercase();
        if lowered.ends_with("five") || lowered.ends_with("six") {
            return Err(Box::new(AccessDenied(method_name.to_string())));
        }
        Ok(())
    }
}

// ============================================================================
// Widget: plain target, no-argument constructor
// ============================================================================

pub struct Widget;

impl ProxyTarget for Widget {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class("Widget")
            .constructor(ConstructorDescriptor::new().builds::<Widget, _>(|_| Widget))
            .method(
                MethodDescriptor::new("one")
                    .overridable()
                    .body::<Widget, _>(|_, _| Value::unit()),
            )
            .method(
                MethodDescriptor::new("two")
                    .param::<String>()
                    .overridable()
                    .body::<Widget, _>(|_, _| Value::unit()),
            )
            .method(
                MethodDescriptor::new("three")
                    .returns::<String>()
                    .overridable()
                    .body::<Widget, _>(|_, _| Value::new(String::from("From three"))),
            )
            .method(
                MethodDescriptor::new("four")
                    .param::<String>()
                    .returns::<String>()
                    .overridable()
                    .body::<Widget, _>(|_, _| Value::new(String::from("From four"))),
            )
            .method(
                MethodDescriptor::new("five")
                    .overridable()
                    .body::<Widget, _>(|_, _| Value::unit()),
            )
            .method(
                MethodDescriptor::new("six")
                    .param::<String>()
                    .returns::<String>()
                    .overridable()
                    .body::<Widget, _>(|_, _| Value::new(String::from("From six"))),
            )
            .method(
                // Deliberately not overridable: inherited unchanged,
                // never intercepted
                MethodDescriptor::new("fixed")
                    .returns::<String>()
                    .body::<Widget, _>(|_, _| Value::new(String::from("From fixed"))),
            )
    }
}

// ============================================================================
// NamedWidget: constructed from a value, also interface-backed
// ============================================================================

pub struct NamedWidget {
    pub name: String,
}

impl ProxyTarget for NamedWidget {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class("NamedWidget")
            .constructor(
                ConstructorDescriptor::new()
                    .param::<String>()
                    .builds::<NamedWidget, _>(|mut args| NamedWidget {
                        name: args.remove(0).downcast::<String>().unwrap(),
                    }),
            )
            .method(
                MethodDescriptor::new("name")
                    .returns::<String>()
                    .overridable()
                    .body::<NamedWidget, _>(|this, _| Value::new(this.name.clone())),
            )
            .method(
                MethodDescriptor::new("three")
                    .returns::<String>()
                    .overridable()
                    .body::<NamedWidget, _>(|_, _| Value::new(String::from("From three"))),
            )
            .implements(
                InterfaceDescriptor::new("Named")
                    .method(MethodDescriptor::new("name").returns::<String>()),
            )
    }
}

// ============================================================================
// Probe: journals real-body execution
// ============================================================================

pub struct Probe {
    journal: Journal,
}

impl ProxyTarget for Probe {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class("Probe")
            .constructor(
                ConstructorDescriptor::new()
                    .param::<Journal>()
                    .builds::<Probe, _>(|mut args| Probe {
                        journal: args.remove(0).downcast::<Journal>().unwrap(),
                    }),
            )
            .method(
                MethodDescriptor::new("ping")
                    .overridable()
                    .body::<Probe, _>(|this, _| {
                        this.journal.lock().push("body:ping".to_string());
                        Value::unit()
                    }),
            )
            .method(
                MethodDescriptor::new("five")
                    .overridable()
                    .body::<Probe, _>(|this, _| {
                        this.journal.lock().push("body:five".to_string());
                        Value::unit()
                    }),
            )
            .method(
                MethodDescriptor::new("echo")
                    .returns::<String>()
                    .overridable()
                    .body::<Probe, _>(|this, _| {
                        this.journal.lock().push("body:echo".to_string());
                        Value::new(String::from("empty"))
                    }),
            )
            .method(
                MethodDescriptor::new("echo")
                    .param::<String>()
                    .returns::<String>()
                    .overridable()
                    .body::<Probe, _>(|this, args| {
                        let arg = args[0].downcast_ref::<String>().unwrap();
                        this.journal.lock().push(format!("body:echo:{arg}"));
                        Value::new(arg.clone())
                    }),
            )
    }
}

// ============================================================================
// SealedWidget: sealed, fronted by an interface contract
// ============================================================================

fn closeable() -> InterfaceDescriptor {
    InterfaceDescriptor::new("Closeable").method(MethodDescriptor::new("close"))
}

fn widget_api() -> InterfaceDescriptor {
    InterfaceDescriptor::new("WidgetApi")
        .extends(closeable())
        .method(MethodDescriptor::new("methodOne"))
        .method(MethodDescriptor::new("methodTwo").param::<String>())
        .method(MethodDescriptor::new("methodThree").returns::<String>())
        .method(
            MethodDescriptor::new("methodFour")
                .param::<String>()
                .returns::<String>(),
        )
        .method(MethodDescriptor::new("methodFive"))
        .method(
            MethodDescriptor::new("methodSix")
                .param::<String>()
                .returns::<String>(),
        )
}

pub struct SealedWidget;

impl ProxyTarget for SealedWidget {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class("SealedWidget")
            .sealed()
            .constructor(ConstructorDescriptor::new().builds::<SealedWidget, _>(|_| SealedWidget))
            .method(MethodDescriptor::new("methodOne").body::<SealedWidget, _>(|_, _| Value::unit()))
            .method(
                MethodDescriptor::new("methodTwo")
                    .param::<String>()
                    .body::<SealedWidget, _>(|_, _| Value::unit()),
            )
            .method(
                MethodDescriptor::new("methodThree")
                    .returns::<String>()
                    .body::<SealedWidget, _>(|_, _| {
                        Value::new(String::from("In SealedWidget, method methodThree"))
                    }),
            )
            .method(
                MethodDescriptor::new("methodFour")
                    .param::<String>()
                    .returns::<String>()
                    .body::<SealedWidget, _>(|_, _| {
                        Value::new(String::from("In SealedWidget, method methodFour"))
                    }),
            )
            .method(
                MethodDescriptor::new("methodFive").body::<SealedWidget, _>(|_, _| Value::unit()),
            )
            .method(
                MethodDescriptor::new("methodSix")
                    .param::<String>()
                    .returns::<String>()
                    .body::<SealedWidget, _>(|_, _| {
                        Value::new(String::from("In SealedWidget, method methodSix"))
                    }),
            )
            .method(MethodDescriptor::new("close").body::<SealedWidget, _>(|_, _| Value::unit()))
            .implements(widget_api())
    }
}
