//! Member Registry
//!
//! Resolves a (target, name) pair to the current [`MemberDescriptor`] and
//! supports atomic replacement. Exactly one descriptor is current per
//! (target, name) at any time; reads hand out snapshots, so a reference
//! captured before a replacement stays valid but is no longer current.

use std::sync::LazyLock;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::member::MemberDescriptor;
use crate::target::Target;

/// Registry of current member descriptors
#[derive(Debug, Default)]
pub struct MemberRegistry {
    /// Current descriptor per (target, name)
    descriptors: FxHashMap<(Target, String), MemberDescriptor>,
    /// Member names per target, in declaration order
    declared: FxHashMap<Target, Vec<String>>,
}

impl MemberRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the initial descriptor for a member.
    ///
    /// Called by the definition step once per declared member. Declaring
    /// the same name again replaces the descriptor but keeps the member's
    /// original position in declaration order.
    pub fn declare(&mut self, target: Target, descriptor: MemberDescriptor) {
        let name = descriptor.name.clone();
        let names = self.declared.entry(target).or_default();
        if !names.contains(&name) {
            names.push(name.clone());
        }
        self.descriptors.insert((target, name), descriptor);
    }

    /// Get a snapshot of the current descriptor for a member
    pub fn descriptor(&self, target: Target, name: &str) -> Result<MemberDescriptor> {
        self.descriptors
            .get(&(target, name.to_string()))
            .cloned()
            .ok_or_else(|| Error::MemberNotFound {
                target,
                name: name.to_string(),
            })
    }

    /// Replace the current descriptor for an already-declared member.
    ///
    /// Atomic from the perspective of subsequent reads: the next
    /// [`descriptor`](Self::descriptor) call serves the replacement.
    pub fn set_descriptor(
        &mut self,
        target: Target,
        name: &str,
        descriptor: MemberDescriptor,
    ) -> Result<()> {
        let key = (target, name.to_string());
        if !self.descriptors.contains_key(&key) {
            return Err(Error::MemberNotFound {
                target,
                name: name.to_string(),
            });
        }
        self.descriptors.insert(key, descriptor);
        Ok(())
    }

    /// Member names declared on a target, in declaration order
    pub fn members(&self, target: Target) -> &[String] {
        self.declared.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether a member was declared
    pub fn contains(&self, target: Target, name: &str) -> bool {
        self.descriptors.contains_key(&(target, name.to_string()))
    }

    /// Total number of declared members across all targets
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

static GLOBAL_REGISTRY: LazyLock<Mutex<MemberRegistry>> =
    LazyLock::new(|| Mutex::new(MemberRegistry::new()));

/// The process-wide member registry.
///
/// Empty at startup; definition-time writes all happen on the single
/// definition pass, so the mutex only matters for multi-threaded
/// embeddings.
pub fn global() -> &'static Mutex<MemberRegistry> {
    &GLOBAL_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{callable, CallContext, MemberValue};
    use crate::target::ClassId;
    use crate::value::Value;

    #[test]
    fn test_declare_and_lookup() {
        let mut registry = MemberRegistry::new();
        let target = Target::statics(ClassId::next());
        registry.declare(target, MemberDescriptor::field("text", Value::from("hi")));

        let d = registry.descriptor(target, "text").unwrap();
        assert_eq!(d.value.as_data(), Some(&Value::from("hi")));
        assert!(registry.contains(target, "text"));
        assert!(matches!(
            registry.descriptor(target, "missing"),
            Err(Error::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_replacement_serves_new_descriptor() {
        let mut registry = MemberRegistry::new();
        let target = Target::instance(ClassId::next());
        registry.declare(target, MemberDescriptor::method("run", callable(|_, _| Ok(Value::from(1)))));

        let before = registry.descriptor(target, "run").unwrap();
        let replacement = before.with_value(MemberValue::Callable(callable(|_, _| Ok(Value::from(2)))));
        registry.set_descriptor(target, "run", replacement).unwrap();

        let cx = CallContext::of(target, "run");
        // The captured snapshot still calls the old body.
        assert_eq!(before.value.as_callable().unwrap()(&cx, &[]), Ok(Value::from(1)));
        // Future reads serve the replacement.
        let current = registry.descriptor(target, "run").unwrap();
        assert_eq!(current.value.as_callable().unwrap()(&cx, &[]), Ok(Value::from(2)));
    }

    #[test]
    fn test_set_descriptor_requires_declaration() {
        let mut registry = MemberRegistry::new();
        let target = Target::statics(ClassId::next());
        let err = registry.set_descriptor(
            target,
            "ghost",
            MemberDescriptor::field("ghost", Value::Null),
        );
        assert!(matches!(err, Err(Error::MemberNotFound { .. })));
    }

    #[test]
    fn test_members_in_declaration_order() {
        let mut registry = MemberRegistry::new();
        let target = Target::instance(ClassId::next());
        registry.declare(target, MemberDescriptor::field("b", Value::Null));
        registry.declare(target, MemberDescriptor::field("a", Value::Null));
        registry.declare(target, MemberDescriptor::field("b", Value::from(1)));

        assert_eq!(registry.members(target), ["b".to_string(), "a".to_string()]);
        assert!(registry.members(Target::statics(ClassId::next())).is_empty());
    }

    #[test]
    fn test_facets_do_not_alias() {
        let mut registry = MemberRegistry::new();
        let id = ClassId::next();
        registry.declare(Target::statics(id), MemberDescriptor::field("x", Value::from(1)));

        assert!(registry.descriptor(Target::instance(id), "x").is_err());
    }
}
