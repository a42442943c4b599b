//! Metadata Store
//!
//! Key/value annotations keyed by (target, member-or-none, key). At most
//! one value exists per distinct triple; re-defining a key overwrites the
//! value but keeps the key's original position in the insertion order that
//! [`MetadataStore::keys`] reports. Entries live for the process lifetime;
//! nothing is persisted.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::target::Target;
use crate::value::Value;

/// Coordinates of a metadata entry: a target plus an optional member name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataScope {
    /// The annotated target
    pub target: Target,
    /// The annotated member, or `None` for class-level metadata
    pub member: Option<String>,
}

impl MetadataScope {
    /// Build a scope from a target and optional member name
    pub fn new(target: Target, member: Option<&str>) -> Self {
        MetadataScope {
            target,
            member: member.map(str::to_string),
        }
    }
}

impl fmt::Display for MetadataScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(m) => write!(f, "{}::{}", self.target, m),
            None => write!(f, "{}", self.target),
        }
    }
}

/// Annotation storage with scoped, insertion-ordered queries
#[derive(Debug, Default)]
pub struct MetadataStore {
    /// Per-scope key/value entries; the inner map preserves insertion order
    entries: FxHashMap<MetadataScope, IndexMap<String, Value>>,
}

impl MetadataStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value for a triple. Always succeeds.
    pub fn define(
        &mut self,
        target: Target,
        member: Option<&str>,
        key: impl Into<String>,
        value: Value,
    ) {
        let scope = MetadataScope::new(target, member);
        self.entries.entry(scope).or_default().insert(key.into(), value);
    }

    /// Get the value for a triple
    pub fn get(&self, target: Target, member: Option<&str>, key: &str) -> Result<Value> {
        let scope = MetadataScope::new(target, member);
        self.entries
            .get(&scope)
            .and_then(|m| m.get(key))
            .cloned()
            .ok_or_else(|| Error::MetadataNotFound {
                scope,
                key: key.to_string(),
            })
    }

    /// Check whether a triple is present
    pub fn has(&self, target: Target, member: Option<&str>, key: &str) -> bool {
        self.entries
            .get(&MetadataScope::new(target, member))
            .is_some_and(|m| m.contains_key(key))
    }

    /// Keys defined on a scope, in insertion order.
    ///
    /// Each call recomputes the current snapshot. Re-defining an existing
    /// key does not move it. The order is deterministic, but positional
    /// access into the returned list is a fragile caller convention, not a
    /// contract of this store.
    pub fn keys(&self, target: Target, member: Option<&str>) -> Vec<String> {
        self.entries
            .get(&MetadataScope::new(target, member))
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove one triple. Returns true if it existed.
    pub fn delete(&mut self, target: Target, member: Option<&str>, key: &str) -> bool {
        self.entries
            .get_mut(&MetadataScope::new(target, member))
            .is_some_and(|m| m.shift_remove(key).is_some())
    }

    /// Remove every entry scoped to a target, member-level included.
    /// Returns true if anything was removed.
    pub fn clear_target(&mut self, target: Target) -> bool {
        let before = self.entries.len();
        self.entries.retain(|scope, _| scope.target != target);
        self.entries.len() != before
    }

    /// Number of scopes holding at least one entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL_STORE: LazyLock<Mutex<MetadataStore>> =
    LazyLock::new(|| Mutex::new(MetadataStore::new()));

/// The process-wide metadata store.
///
/// Empty at startup, dropped at process exit. Decorators produced by
/// [`crate::factory::metadata_writer`] write here; embeddings that want an
/// isolated store can use [`MetadataStore`] directly.
pub fn global() -> &'static Mutex<MetadataStore> {
    &GLOBAL_STORE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ClassId;

    #[test]
    fn test_define_get_round_trip() {
        let mut store = MetadataStore::new();
        let target = Target::statics(ClassId::next());

        store.define(target, Some("text"), "magic", Value::from(42));
        assert_eq!(store.get(target, Some("text"), "magic").unwrap(), Value::from(42));
        assert!(matches!(
            store.get(target, Some("text"), "missing"),
            Err(Error::MetadataNotFound { .. })
        ));
    }

    #[test]
    fn test_class_and_member_scopes_are_distinct() {
        let mut store = MetadataStore::new();
        let target = Target::statics(ClassId::next());

        store.define(target, None, "role", Value::from("controller"));
        assert!(store.has(target, None, "role"));
        assert!(!store.has(target, Some("run"), "role"));
    }

    #[test]
    fn test_keys_in_insertion_order() {
        let mut store = MetadataStore::new();
        let target = Target::instance(ClassId::next());

        store.define(target, Some("m"), "first", Value::from(1));
        store.define(target, Some("m"), "second", Value::from(2));
        store.define(target, Some("m"), "third", Value::from(3));

        assert_eq!(store.keys(target, Some("m")), ["first", "second", "third"]);
    }

    #[test]
    fn test_redefine_overwrites_in_place() {
        let mut store = MetadataStore::new();
        let target = Target::instance(ClassId::next());

        store.define(target, None, "a", Value::from(1));
        store.define(target, None, "b", Value::from(2));
        store.define(target, None, "a", Value::from(10));

        assert_eq!(store.keys(target, None), ["a", "b"]);
        assert_eq!(store.get(target, None, "a").unwrap(), Value::from(10));
    }

    #[test]
    fn test_keys_empty_when_absent() {
        let store = MetadataStore::new();
        assert!(store.keys(Target::statics(ClassId::next()), None).is_empty());
    }

    #[test]
    fn test_delete() {
        let mut store = MetadataStore::new();
        let target = Target::statics(ClassId::next());

        store.define(target, None, "tmp", Value::Null);
        assert!(store.delete(target, None, "tmp"));
        assert!(!store.has(target, None, "tmp"));
        assert!(!store.delete(target, None, "tmp"));
    }

    #[test]
    fn test_clear_target_removes_both_levels() {
        let mut store = MetadataStore::new();
        let target = Target::statics(ClassId::next());
        let other = Target::statics(ClassId::next());

        store.define(target, None, "a", Value::from(1));
        store.define(target, Some("m"), "b", Value::from(2));
        store.define(other, None, "keep", Value::from(3));

        assert!(store.clear_target(target));
        assert!(!store.has(target, None, "a"));
        assert!(!store.has(target, Some("m"), "b"));
        assert!(store.has(other, None, "keep"));
    }
}
