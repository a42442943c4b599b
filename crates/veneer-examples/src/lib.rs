//! Example scenarios
//!
//! Each scenario defines a small class through the veneer API, drives it,
//! and reports through a [`Sink`]. The transcripts are asserted exactly in
//! the integration tests, so these double as end-to-end fixtures.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use veneer::{
    before, callable, intercept, member_interceptor, metadata, metadata_writer, CallContext,
    CallError, ClassBuilder, MemberDecorator, MemberDef, MemberRegistry, Result, Sink, Value,
};

/// Basic interception: a decorator wraps a static method so "Hello" is
/// written before the body's own "World".
pub fn hello_world(sink: Arc<dyn Sink>) -> Result<()> {
    let mut registry = MemberRegistry::new();

    let body = {
        let sink = sink.clone();
        callable(move |_, _| {
            sink.write("World");
            Ok(Value::Null)
        })
    };
    let log = member_interceptor(before({
        let sink = sink.clone();
        move |_: &CallContext, _: &[Value]| sink.write("Hello")
    }));

    let class = ClassBuilder::new("Test")
        .member(MemberDef::static_method("method", body).decorate(log))
        .install(&mut registry)?;

    let cx = CallContext::of(class.statics(), "method");
    intercept::invoke(&registry, &cx, &[])?;
    Ok(())
}

/// All four decorator shapes on one class: a class decorator, an
/// accessor-only decorator on a field, a member decorator on a method and
/// on a setter, and a parameter decorator. Each shape writes a metadata
/// marker; the class itself behaves unchanged.
pub fn decorator_shapes(sink: Arc<dyn Sink>) -> Result<()> {
    let mut registry = MemberRegistry::new();

    // Backing storage for the instance field `_property`.
    let property = Arc::new(Mutex::new(String::new()));

    let method_body = {
        let sink = sink.clone();
        let property = property.clone();
        callable(move |_, args| {
            let parameter = args[0].as_str().unwrap_or_default();
            sink.write(&format!("{} {} World!", property.lock(), parameter));
            Ok(Value::Null)
        })
    };
    let setter_body = {
        let property = property.clone();
        callable(move |_, args| {
            *property.lock() = args[0].as_str().unwrap_or_default().to_string();
            Ok(Value::Null)
        })
    };

    let class = ClassBuilder::new("Test")
        .member(MemberDef::field("_property", Value::from("")).annotate(metadata_writer("observed", true)))
        .member(
            MemberDef::method("method", method_body)
                .decorate(metadata_writer("wrapped", true))
                .parameter(0, metadata_writer("parameter", 0)),
        )
        .member(MemberDef::setter("property", setter_body).decorate(metadata_writer("accessor", true)))
        .decorate(metadata_writer("decorated", true))
        .install(&mut registry)?;

    let instance = class.prototype();
    intercept::invoke(
        &registry,
        &CallContext::of(instance, "property"),
        &[Value::from("Hello")],
    )?;
    intercept::invoke(
        &registry,
        &CallContext::of(instance, "method"),
        &[Value::from("beautiful")],
    )?;
    Ok(())
}

/// Metadata round-trip: a static field carries a ("magic", 42) annotation;
/// a static method enumerates the field's metadata keys and reads the
/// value back.
pub fn magic_number(sink: Arc<dyn Sink>) -> Result<()> {
    let mut registry = MemberRegistry::new();

    let text = "The magic number is: ";
    let do_something = {
        let sink = sink.clone();
        callable(move |cx, _| {
            let store = metadata::global().lock();
            let keys = store.keys(cx.target, Some("text"));
            // Position 0 of what this scenario defined; positional access
            // into the key list is a fragile caller convention.
            let magic = store
                .get(cx.target, Some("text"), &keys[0])
                .map_err(|e| CallError::from(e.to_string()))?;
            sink.write(&format!("{text}{magic}"));
            Ok(Value::Null)
        })
    };

    let class = ClassBuilder::new("Test")
        .member(MemberDef::static_field("text", Value::from(text)).decorate(metadata_writer("magic", 42)))
        .member(MemberDef::static_method("doSomething", do_something))
        .install(&mut registry)?;

    let cx = CallContext::of(class.statics(), "doSomething");
    intercept::invoke(&registry, &cx, &[])?;
    Ok(())
}

/// Severity for the [`log`] factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational
    Log,
    /// Warning
    Warn,
    /// Error
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Log => write!(f, "log"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Parameterized decorator factory.
///
/// Configuration is evaluated eagerly: the init line is written at
/// factory-call time, before any class is defined. The returned decorator
/// then writes "Method called" before each invocation of the member it
/// wraps.
pub fn log(level: LogLevel, sink: Arc<dyn Sink>) -> MemberDecorator {
    sink.write(&format!("Init with logLevel: {level}"));

    member_interceptor(before(move |_: &CallContext, _: &[Value]| {
        sink.write("Method called")
    }))
}

/// Eager-configuration scenario: the factory prints its init line once,
/// then two invocations of the decorated static method each print
/// "Method called" followed by the body's own line.
pub fn log_levels(sink: Arc<dyn Sink>) -> Result<()> {
    let decorator = log(LogLevel::Error, sink.clone());

    let body = {
        let sink = sink.clone();
        callable(move |_, _| {
            sink.write("Done");
            Ok(Value::Null)
        })
    };

    let mut registry = MemberRegistry::new();
    let class = ClassBuilder::new("Test")
        .member(MemberDef::static_method("method", body).decorate(decorator))
        .install(&mut registry)?;

    let cx = CallContext::of(class.statics(), "method");
    intercept::invoke(&registry, &cx, &[])?;
    intercept::invoke(&registry, &cx, &[])?;
    Ok(())
}
