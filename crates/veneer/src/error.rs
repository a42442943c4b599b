//! Error types
//!
//! Definition-time and lookup failures surface as [`Error`]; failures
//! raised by wrapped member logic travel as [`CallError`] and pass through
//! every behavior layer unchanged.

use crate::metadata::MetadataScope;
use crate::target::Target;

/// Result type for registry, metadata, and definition operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the registry, metadata store, and definition step
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// No member with this name was ever declared on the target
    #[error("no member named `{name}` on {target}")]
    MemberNotFound {
        /// The queried target
        target: Target,
        /// The queried member name
        name: String,
    },

    /// The metadata triple is absent
    #[error("no metadata key `{key}` at {scope}")]
    MetadataNotFound {
        /// The queried scope (target plus optional member)
        scope: MetadataScope,
        /// The queried key
        key: String,
    },

    /// A member interceptor was applied to a member with no callable value
    #[error("member `{name}` on {target} has no callable value to intercept")]
    NotCallable {
        /// The decorated target
        target: Target,
        /// The decorated member name
        name: String,
    },

    /// The wrapped original logic raised an error at call time
    #[error(transparent)]
    Invocation(#[from] CallError),
}

/// Error raised by a member's own logic during invocation.
///
/// Behavior layers must re-raise this unchanged; no layer may swallow it
/// unless it explicitly documents that it does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CallError(pub String);

impl From<String> for CallError {
    fn from(s: String) -> Self {
        CallError(s)
    }
}

impl From<&str> for CallError {
    fn from(s: &str) -> Self {
        CallError(s.to_string())
    }
}
