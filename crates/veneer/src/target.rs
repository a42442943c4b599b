//! Target identity
//!
//! A `Target` names one facet of a class: its shared (static) side or its
//! per-instance (prototype) side. The two facets of one class are distinct
//! targets; a target stays stable for the lifetime of the class definition.
//!
//! Class IDs are allocated from a process-wide counter, so a fresh ID is
//! unique without coordination.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique class IDs
static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one class definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(u64);

impl ClassId {
    /// Allocate the next unused class ID
    pub fn next() -> Self {
        ClassId(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric ID
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Which side of a class a target names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// The shared, class-level side (static members)
    Static,
    /// The per-instance side (prototype members)
    Instance,
}

/// Opaque identity of a class facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    class_id: ClassId,
    facet: Facet,
}

impl Target {
    /// Target for the static facet of a class
    pub fn statics(class_id: ClassId) -> Self {
        Target {
            class_id,
            facet: Facet::Static,
        }
    }

    /// Target for the instance (prototype) facet of a class
    pub fn instance(class_id: ClassId) -> Self {
        Target {
            class_id,
            facet: Facet::Instance,
        }
    }

    /// The class this target belongs to
    pub fn class_id(self) -> ClassId {
        self.class_id
    }

    /// The facet this target names
    pub fn facet(self) -> Facet {
        self.facet
    }

    /// Check whether this is the static facet
    pub fn is_static(self) -> bool {
        self.facet == Facet::Static
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.facet {
            Facet::Static => write!(f, "{}/static", self.class_id),
            Facet::Instance => write!(f, "{}/instance", self.class_id),
        }
    }
}
