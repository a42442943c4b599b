//! Veneer - declarative interception and metadata registry
//!
//! Lets external code wrap a class member's invocation with cross-cutting
//! behavior (logging, timing, validation) without modifying its body, and
//! attach and later query key/value metadata on classes, members, and
//! parameters.
//!
//! Four components:
//! - [`registry`] - current member descriptors per (target, name)
//! - [`metadata`] - key/value annotations keyed by (target, member, key)
//! - [`intercept`] - behavior chains composed around original logic
//! - [`factory`] - parameterized interceptors and metadata writers
//!
//! The definition step that drives decorator application lives in
//! [`define`]; error types in [`error`]; the opaque output channel
//! behaviors report through in [`sink`].
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use veneer::{
//!     callable, intercept, member_interceptor, ClassBuilder, CallContext,
//!     MemberDef, MemberRegistry, Value,
//! };
//!
//! let mut registry = MemberRegistry::new();
//! let class = ClassBuilder::new("Test")
//!     .member(
//!         MemberDef::static_method("method", callable(|_, _| Ok(Value::Null)))
//!             .decorate(member_interceptor(|inner| {
//!                 callable(move |cx, args| {
//!                     // pre-logic
//!                     inner(cx, args)
//!                     // post-logic
//!                 })
//!             })),
//!     )
//!     .install(&mut registry)?;
//!
//! let cx = CallContext::of(class.statics(), "method");
//! intercept::invoke(&registry, &cx, &[])?;
//! ```

#![warn(missing_docs)]

pub mod define;
pub mod error;
pub mod factory;
pub mod intercept;
pub mod member;
pub mod metadata;
pub mod registry;
pub mod sink;
pub mod target;
pub mod value;

pub use define::{
    ClassBuilder, ClassDecorator, ClassHandle, DecoratorInvocation, DescriptorUpdate,
    MemberDecorator, MemberDef, ParameterDecorator, PropertyDecorator,
};
pub use error::{CallError, Error, Result};
pub use factory::{member_interceptor, metadata_writer, MetadataWriter};
pub use intercept::{around, before, BehaviorChain};
pub use member::{callable, CallContext, CallResult, Callable, MemberDescriptor, MemberKind, MemberValue};
pub use metadata::{MetadataScope, MetadataStore};
pub use registry::MemberRegistry;
pub use sink::{ConsoleSink, MemorySink, NullSink, Sink};
pub use target::{ClassId, Facet, Target};
pub use value::Value;
