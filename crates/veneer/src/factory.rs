//! Decorator Factory
//!
//! Produces decorators from configuration. Configuration is evaluated
//! eagerly, at the point the factory is called (which may be before any
//! class exists), and captured by the returned decorator; the decorator's
//! own logic runs lazily, once per application, at definition time.

use crate::define::{
    ClassDecorator, DecoratorInvocation, DescriptorUpdate, MemberDecorator, ParameterDecorator,
    PropertyDecorator,
};
use crate::error::Error;
use crate::member::Callable;
use crate::metadata;
use crate::value::Value;

/// Build a member-value decorator that wraps the member's callable with a
/// behavior.
///
/// The produced decorator reads the descriptor's current callable as the
/// original logic, applies `behavior` to it, and returns a
/// [`DescriptorUpdate::WrapValue`] carrying the result; the rest of the
/// descriptor is kept intact. Applying it to a member with no callable
/// value (a plain data field) fails with [`Error::NotCallable`]. It never
/// touches the metadata store.
pub fn member_interceptor<B>(behavior: B) -> MemberDecorator
where
    B: Fn(Callable) -> Callable + Send + Sync + 'static,
{
    MemberDecorator::new(move |invocation: &DecoratorInvocation| {
        let not_callable = || Error::NotCallable {
            target: invocation.target,
            name: invocation.member_name.clone().unwrap_or_default(),
        };
        let descriptor = invocation.descriptor.as_ref().ok_or_else(not_callable)?;
        let original = descriptor
            .value
            .as_callable()
            .cloned()
            .ok_or_else(not_callable)?;
        Ok(DescriptorUpdate::WrapValue(behavior(original)))
    })
}

/// Configuration for a metadata-writing decorator.
///
/// Convertible into any of the four decorator shapes; the produced
/// decorator writes (key, value) into the process-wide metadata store at
/// the invocation's coordinates and leaves the descriptor or target
/// unchanged.
#[derive(Debug, Clone)]
pub struct MetadataWriter {
    key: String,
    value: Value,
}

impl MetadataWriter {
    fn write(&self, invocation: &DecoratorInvocation) {
        metadata::global().lock().define(
            invocation.target,
            invocation.member_name.as_deref(),
            self.key.clone(),
            self.value.clone(),
        );
    }
}

/// Build a metadata-writing decorator.
///
/// Key and value are captured eagerly; each application writes one entry.
pub fn metadata_writer(key: impl Into<String>, value: impl Into<Value>) -> MetadataWriter {
    MetadataWriter {
        key: key.into(),
        value: value.into(),
    }
}

impl From<MetadataWriter> for ClassDecorator {
    fn from(writer: MetadataWriter) -> Self {
        ClassDecorator::new(move |invocation| {
            writer.write(invocation);
            Ok(())
        })
    }
}

impl From<MetadataWriter> for MemberDecorator {
    fn from(writer: MetadataWriter) -> Self {
        MemberDecorator::new(move |invocation| {
            writer.write(invocation);
            Ok(DescriptorUpdate::Keep)
        })
    }
}

impl From<MetadataWriter> for PropertyDecorator {
    fn from(writer: MetadataWriter) -> Self {
        PropertyDecorator::new(move |invocation| {
            writer.write(invocation);
            Ok(())
        })
    }
}

impl From<MetadataWriter> for ParameterDecorator {
    fn from(writer: MetadataWriter) -> Self {
        ParameterDecorator::new(move |invocation| {
            writer.write(invocation);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{callable, CallContext, MemberDescriptor};
    use crate::target::{ClassId, Target};

    fn method_invocation(target: Target, descriptor: &MemberDescriptor) -> DecoratorInvocation {
        DecoratorInvocation {
            target,
            member_name: Some(descriptor.name.clone()),
            parameter_index: None,
            descriptor: Some(descriptor.clone()),
        }
    }

    #[test]
    fn test_member_interceptor_wraps_value() {
        let target = Target::statics(ClassId::next());
        let descriptor = MemberDescriptor::method("inc", callable(|_, args| {
            Ok(Value::from(args[0].as_int().unwrap() + 1))
        }));

        let decorator = member_interceptor(|inner: Callable| {
            callable(move |cx, args| {
                let out = inner(cx, args)?;
                Ok(Value::from(out.as_int().unwrap() * 10))
            })
        });

        let update = decorator.apply(&method_invocation(target, &descriptor)).unwrap();
        let DescriptorUpdate::WrapValue(wrapped) = update else {
            panic!("expected WrapValue");
        };
        let cx = CallContext::of(target, "inc");
        assert_eq!(wrapped(&cx, &[Value::from(4)]), Ok(Value::from(50)));
    }

    #[test]
    fn test_member_interceptor_rejects_data_field() {
        let target = Target::statics(ClassId::next());
        let descriptor = MemberDescriptor::field("text", Value::from("hi"));

        let decorator = member_interceptor(|inner| inner);
        let err = decorator.apply(&method_invocation(target, &descriptor));
        assert!(matches!(err, Err(Error::NotCallable { .. })));
        // Nothing was written for this target.
        assert!(metadata::global().lock().keys(target, Some("text")).is_empty());
    }

    #[test]
    fn test_metadata_writer_member_form() {
        let target = Target::statics(ClassId::next());
        let descriptor = MemberDescriptor::field("text", Value::from("hi"));

        let decorator: MemberDecorator = metadata_writer("magic", 42).into();
        let update = decorator.apply(&method_invocation(target, &descriptor)).unwrap();
        assert!(matches!(update, DescriptorUpdate::Keep));

        let store = metadata::global().lock();
        assert_eq!(store.get(target, Some("text"), "magic").unwrap(), Value::from(42));
    }

    #[test]
    fn test_metadata_writer_class_form() {
        let target = Target::statics(ClassId::next());
        let decorator: ClassDecorator = metadata_writer("role", "service").into();
        decorator
            .apply(&DecoratorInvocation {
                target,
                member_name: None,
                parameter_index: None,
                descriptor: None,
            })
            .unwrap();

        let store = metadata::global().lock();
        assert_eq!(store.get(target, None, "role").unwrap(), Value::from("service"));
    }

    #[test]
    fn test_writer_is_reusable_across_members() {
        let target = Target::instance(ClassId::next());
        let writer = metadata_writer("tracked", true);

        for name in ["a", "b"] {
            let descriptor = MemberDescriptor::field(name, Value::Null);
            let decorator: MemberDecorator = writer.clone().into();
            decorator.apply(&method_invocation(target, &descriptor)).unwrap();
        }

        let store = metadata::global().lock();
        assert!(store.has(target, Some("a"), "tracked"));
        assert!(store.has(target, Some("b"), "tracked"));
    }
}
