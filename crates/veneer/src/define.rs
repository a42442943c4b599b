//! Definition step
//!
//! In-crate realization of the host "compilation step" contract: each
//! attached decorator is invoked exactly once, synchronously, in a fixed
//! traversal. Per member, parameter decorators run first (ascending
//! index), then accessor-only decorators, then member-value decorators —
//! stacked decorators bottom-to-top, so the decorator listed last is
//! applied first and becomes the innermost wrapper. Class decorators run
//! last, after every member decorator for the class has finished.
//!
//! Application is all-or-nothing: the first failing decorator stops the
//! traversal and nothing is registered; the class definition is invalid.

use crate::error::Result;
use crate::member::{MemberDescriptor, MemberValue, Callable};
use crate::registry::{self, MemberRegistry};
use crate::target::{ClassId, Target};
use crate::value::Value;

/// Transient record describing one decorator application.
///
/// Built by the definition step for each decorator invocation and not
/// retained after the decorator returns.
#[derive(Debug, Clone)]
pub struct DecoratorInvocation {
    /// The decorated facet
    pub target: Target,
    /// Member name; `None` for class decorators
    pub member_name: Option<String>,
    /// Parameter index; parameter decorators only
    pub parameter_index: Option<usize>,
    /// Current descriptor snapshot; member-value decorators only
    pub descriptor: Option<MemberDescriptor>,
}

impl DecoratorInvocation {
    fn class(target: Target) -> Self {
        DecoratorInvocation {
            target,
            member_name: None,
            parameter_index: None,
            descriptor: None,
        }
    }

    fn member(target: Target, descriptor: &MemberDescriptor) -> Self {
        DecoratorInvocation {
            target,
            member_name: Some(descriptor.name.clone()),
            parameter_index: None,
            descriptor: Some(descriptor.clone()),
        }
    }

    fn property(target: Target, name: &str) -> Self {
        DecoratorInvocation {
            target,
            member_name: Some(name.to_string()),
            parameter_index: None,
            descriptor: None,
        }
    }

    fn parameter(target: Target, name: &str, index: usize) -> Self {
        DecoratorInvocation {
            target,
            member_name: Some(name.to_string()),
            parameter_index: Some(index),
            descriptor: None,
        }
    }
}

/// How a member-value decorator changes the current descriptor
pub enum DescriptorUpdate {
    /// Swap in a new callable, keeping the rest of the descriptor intact
    WrapValue(Callable),
    /// Replace the whole descriptor
    Replace(MemberDescriptor),
    /// Leave the current descriptor untouched
    Keep,
}

/// Decorator applied to a class as a whole
pub struct ClassDecorator(Box<dyn Fn(&DecoratorInvocation) -> Result<()> + Send + Sync>);

impl ClassDecorator {
    /// Wrap a closure as a class decorator
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DecoratorInvocation) -> Result<()> + Send + Sync + 'static,
    {
        ClassDecorator(Box::new(f))
    }

    /// Invoke the decorator once
    pub fn apply(&self, invocation: &DecoratorInvocation) -> Result<()> {
        (self.0)(invocation)
    }
}

/// Decorator applied to a member's value slot; may replace the descriptor
pub struct MemberDecorator(Box<dyn Fn(&DecoratorInvocation) -> Result<DescriptorUpdate> + Send + Sync>);

impl MemberDecorator {
    /// Wrap a closure as a member-value decorator
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DecoratorInvocation) -> Result<DescriptorUpdate> + Send + Sync + 'static,
    {
        MemberDecorator(Box::new(f))
    }

    /// Invoke the decorator once
    pub fn apply(&self, invocation: &DecoratorInvocation) -> Result<DescriptorUpdate> {
        (self.0)(invocation)
    }
}

/// Accessor-only decorator: sees (target, name) but no descriptor and
/// cannot replace anything
pub struct PropertyDecorator(Box<dyn Fn(&DecoratorInvocation) -> Result<()> + Send + Sync>);

impl PropertyDecorator {
    /// Wrap a closure as an accessor-only decorator
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DecoratorInvocation) -> Result<()> + Send + Sync + 'static,
    {
        PropertyDecorator(Box::new(f))
    }

    /// Invoke the decorator once
    pub fn apply(&self, invocation: &DecoratorInvocation) -> Result<()> {
        (self.0)(invocation)
    }
}

/// Decorator applied to one parameter of a member
pub struct ParameterDecorator(Box<dyn Fn(&DecoratorInvocation) -> Result<()> + Send + Sync>);

impl ParameterDecorator {
    /// Wrap a closure as a parameter decorator
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DecoratorInvocation) -> Result<()> + Send + Sync + 'static,
    {
        ParameterDecorator(Box::new(f))
    }

    /// Invoke the decorator once
    pub fn apply(&self, invocation: &DecoratorInvocation) -> Result<()> {
        (self.0)(invocation)
    }
}

/// One member declaration with its attached decorators.
///
/// Decorators are listed in source order (top to bottom); the definition
/// step applies them bottom-to-top.
pub struct MemberDef {
    descriptor: MemberDescriptor,
    is_static: bool,
    decorators: Vec<MemberDecorator>,
    annotations: Vec<PropertyDecorator>,
    parameters: Vec<(usize, ParameterDecorator)>,
}

impl MemberDef {
    fn new(descriptor: MemberDescriptor, is_static: bool) -> Self {
        MemberDef {
            descriptor,
            is_static,
            decorators: Vec::new(),
            annotations: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Instance method
    pub fn method(name: impl Into<String>, body: Callable) -> Self {
        Self::new(MemberDescriptor::method(name, body), false)
    }

    /// Static method
    pub fn static_method(name: impl Into<String>, body: Callable) -> Self {
        Self::new(MemberDescriptor::method(name, body), true)
    }

    /// Instance getter
    pub fn getter(name: impl Into<String>, body: Callable) -> Self {
        Self::new(MemberDescriptor::getter(name, body), false)
    }

    /// Instance setter
    pub fn setter(name: impl Into<String>, body: Callable) -> Self {
        Self::new(MemberDescriptor::setter(name, body), false)
    }

    /// Instance data field
    pub fn field(name: impl Into<String>, initial: Value) -> Self {
        Self::new(MemberDescriptor::field(name, initial), false)
    }

    /// Static data field
    pub fn static_field(name: impl Into<String>, initial: Value) -> Self {
        Self::new(MemberDescriptor::field(name, initial), true)
    }

    /// Declare a member from an explicit descriptor
    pub fn from_descriptor(descriptor: MemberDescriptor, is_static: bool) -> Self {
        Self::new(descriptor, is_static)
    }

    /// Attach a member-value decorator (listed top to bottom)
    pub fn decorate(mut self, decorator: impl Into<MemberDecorator>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    /// Attach an accessor-only decorator (listed top to bottom)
    pub fn annotate(mut self, decorator: impl Into<PropertyDecorator>) -> Self {
        self.annotations.push(decorator.into());
        self
    }

    /// Attach a decorator to one parameter of this member
    pub fn parameter(mut self, index: usize, decorator: impl Into<ParameterDecorator>) -> Self {
        self.parameters.push((index, decorator.into()));
        self
    }
}

/// Handle to an installed class definition
#[derive(Debug, Clone)]
pub struct ClassHandle {
    name: String,
    class_id: ClassId,
}

impl ClassHandle {
    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class ID
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// Target of the static facet
    pub fn statics(&self) -> Target {
        Target::statics(self.class_id)
    }

    /// Target of the instance (prototype) facet
    pub fn prototype(&self) -> Target {
        Target::instance(self.class_id)
    }
}

/// Collects member declarations and decorators, then runs the definition
/// traversal in one step.
pub struct ClassBuilder {
    name: String,
    class_id: ClassId,
    members: Vec<MemberDef>,
    class_decorators: Vec<ClassDecorator>,
}

impl ClassBuilder {
    /// Start a class definition. Allocates the class identity eagerly so
    /// decorator factories can reference its targets before installation.
    pub fn new(name: impl Into<String>) -> Self {
        ClassBuilder {
            name: name.into(),
            class_id: ClassId::next(),
            members: Vec::new(),
            class_decorators: Vec::new(),
        }
    }

    /// Target of the static facet being defined
    pub fn statics(&self) -> Target {
        Target::statics(self.class_id)
    }

    /// Target of the instance facet being defined
    pub fn prototype(&self) -> Target {
        Target::instance(self.class_id)
    }

    /// Declare a member
    pub fn member(mut self, def: MemberDef) -> Self {
        self.members.push(def);
        self
    }

    /// Attach a class decorator (listed top to bottom, applied
    /// bottom-to-top, after all member decorators)
    pub fn decorate(mut self, decorator: impl Into<ClassDecorator>) -> Self {
        self.class_decorators.push(decorator.into());
        self
    }

    /// Run the definition traversal and register the final descriptors.
    ///
    /// On the first decorator failure the error is returned and nothing is
    /// registered.
    pub fn install(self, registry: &mut MemberRegistry) -> Result<ClassHandle> {
        let statics = Target::statics(self.class_id);
        let prototype = Target::instance(self.class_id);

        let mut installed: Vec<(Target, MemberDescriptor)> = Vec::new();

        for def in &self.members {
            let target = if def.is_static { statics } else { prototype };
            let mut current = def.descriptor.clone();

            for (index, decorator) in &def.parameters {
                decorator.apply(&DecoratorInvocation::parameter(target, &current.name, *index))?;
            }

            for decorator in def.annotations.iter().rev() {
                decorator.apply(&DecoratorInvocation::property(target, &current.name))?;
            }

            for decorator in def.decorators.iter().rev() {
                let invocation = DecoratorInvocation::member(target, &current);
                match decorator.apply(&invocation)? {
                    DescriptorUpdate::WrapValue(body) => {
                        current = current.with_value(MemberValue::Callable(body));
                    }
                    DescriptorUpdate::Replace(descriptor) => current = descriptor,
                    DescriptorUpdate::Keep => {}
                }
            }

            installed.push((target, current));
        }

        for decorator in self.class_decorators.iter().rev() {
            decorator.apply(&DecoratorInvocation::class(statics))?;
        }

        for (target, descriptor) in installed {
            registry.declare(target, descriptor);
        }

        Ok(ClassHandle {
            name: self.name,
            class_id: self.class_id,
        })
    }

    /// Install into the process-wide registry
    pub fn install_global(self) -> Result<ClassHandle> {
        self.install(&mut registry::global().lock())
    }
}
