//! Member descriptors and callables
//!
//! A [`MemberDescriptor`] is the record the definition step creates for
//! each declared member and the unit decorators inspect and replace.
//! Descriptors are value-like: cloning one takes a snapshot, with the
//! callable shared behind an `Arc`. A snapshot captured by a closure stays
//! valid even after the registry's current descriptor is replaced.

use std::fmt;
use std::sync::Arc;

use crate::error::CallError;
use crate::target::Target;
use crate::value::Value;

/// Outcome of one member call
pub type CallResult = std::result::Result<Value, CallError>;

/// Per-call binding handed to every layer of a behavior chain.
///
/// Carries the receiver binding (the `this` equivalent); for static
/// members the receiver is [`Value::Null`].
#[derive(Debug, Clone)]
pub struct CallContext {
    /// The facet the member lives on
    pub target: Target,
    /// The member being invoked
    pub member: String,
    /// Receiver value; `Value::Null` for static members
    pub receiver: Value,
}

impl CallContext {
    /// Context for a static-member call (null receiver)
    pub fn of(target: Target, member: impl Into<String>) -> Self {
        CallContext {
            target,
            member: member.into(),
            receiver: Value::Null,
        }
    }

    /// Attach a receiver value
    pub fn with_receiver(mut self, receiver: Value) -> Self {
        self.receiver = receiver;
        self
    }
}

/// An invocable member body or behavior layer.
///
/// Every layer of a behavior chain shares this signature, so arguments,
/// return value, receiver binding, and raised errors pass through
/// unchanged unless a layer deliberately intercepts them.
pub type Callable = Arc<dyn Fn(&CallContext, &[Value]) -> CallResult + Send + Sync>;

/// Wrap a closure as a [`Callable`]
pub fn callable<F>(f: F) -> Callable
where
    F: Fn(&CallContext, &[Value]) -> CallResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What kind of member a descriptor describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Regular method
    Method,
    /// Property getter
    Getter,
    /// Property setter
    Setter,
    /// Plain data field
    Field,
}

/// The value slot of a descriptor: plain data or an invocable body
#[derive(Clone)]
pub enum MemberValue {
    /// Initial data value of a field
    Data(Value),
    /// Current callable of a method or accessor
    Callable(Callable),
}

impl MemberValue {
    /// Get the callable, if this member holds one
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            MemberValue::Callable(c) => Some(c),
            MemberValue::Data(_) => None,
        }
    }

    /// Get the data value, if this member holds one
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            MemberValue::Data(v) => Some(v),
            MemberValue::Callable(_) => None,
        }
    }
}

impl fmt::Debug for MemberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberValue::Data(v) => f.debug_tuple("Data").field(v).finish(),
            MemberValue::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// Descriptor for one class member.
///
/// Created once when the class is defined; a decorator may replace it
/// wholesale, after which the replacement is the current descriptor.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Member name
    pub name: String,
    /// Member kind
    pub kind: MemberKind,
    /// Current callable or initial data value
    pub value: MemberValue,
    /// Whether the member shows up in enumeration
    pub enumerable: bool,
    /// Whether the member may be redefined
    pub configurable: bool,
    /// Whether the value slot may be written
    pub writable: bool,
}

impl MemberDescriptor {
    /// Descriptor for a method
    pub fn method(name: impl Into<String>, body: Callable) -> Self {
        MemberDescriptor {
            name: name.into(),
            kind: MemberKind::Method,
            value: MemberValue::Callable(body),
            enumerable: false,
            configurable: true,
            writable: true,
        }
    }

    /// Descriptor for a getter
    pub fn getter(name: impl Into<String>, body: Callable) -> Self {
        MemberDescriptor {
            kind: MemberKind::Getter,
            ..Self::method(name, body)
        }
    }

    /// Descriptor for a setter
    pub fn setter(name: impl Into<String>, body: Callable) -> Self {
        MemberDescriptor {
            kind: MemberKind::Setter,
            ..Self::method(name, body)
        }
    }

    /// Descriptor for a plain data field
    pub fn field(name: impl Into<String>, initial: Value) -> Self {
        MemberDescriptor {
            name: name.into(),
            kind: MemberKind::Field,
            value: MemberValue::Data(initial),
            enumerable: true,
            configurable: true,
            writable: true,
        }
    }

    /// Mark as non-enumerable
    pub fn non_enumerable(mut self) -> Self {
        self.enumerable = false;
        self
    }

    /// Mark as non-configurable
    pub fn non_configurable(mut self) -> Self {
        self.configurable = false;
        self
    }

    /// Mark as read-only
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Copy of this descriptor with a different value slot
    pub fn with_value(&self, value: MemberValue) -> Self {
        let mut copy = self.clone();
        copy.value = value;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ClassId;

    #[test]
    fn test_descriptor_defaults() {
        let m = MemberDescriptor::method("run", callable(|_, _| Ok(Value::Null)));
        assert_eq!(m.kind, MemberKind::Method);
        assert!(!m.enumerable);
        assert!(m.configurable);

        let f = MemberDescriptor::field("count", Value::from(0));
        assert_eq!(f.kind, MemberKind::Field);
        assert!(f.enumerable);
    }

    #[test]
    fn test_value_slot_accessors() {
        let m = MemberDescriptor::method("run", callable(|_, _| Ok(Value::from(1))));
        assert!(m.value.as_callable().is_some());
        assert!(m.value.as_data().is_none());

        let f = MemberDescriptor::field("count", Value::from(7));
        assert_eq!(f.value.as_data(), Some(&Value::from(7)));
        assert!(f.value.as_callable().is_none());
    }

    #[test]
    fn test_snapshot_keeps_original_callable() {
        let original = MemberDescriptor::method("run", callable(|_, _| Ok(Value::from(1))));
        let snapshot = original.clone();
        let replaced = original.with_value(MemberValue::Callable(callable(|_, _| Ok(Value::from(2)))));

        let cx = CallContext::of(Target::statics(ClassId::next()), "run");
        let old = snapshot.value.as_callable().unwrap();
        let new = replaced.value.as_callable().unwrap();
        assert_eq!(old(&cx, &[]), Ok(Value::from(1)));
        assert_eq!(new(&cx, &[]), Ok(Value::from(2)));
    }
}
