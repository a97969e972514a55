//! Resolution errors.
//!
//! A resolution *miss* is never an error: it is an empty list or `None`.
//! These variants cover the cases where the index itself cannot be trusted.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors surfaced by the symbol source or by records that break its contract.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The symbol source could not serve a lookup.
    #[error("symbol index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    /// A method record documents neither a typed first argument nor a
    /// namespace prefix, so its receiver type cannot be derived.
    #[error("method `{name}` has no derivable receiver type")]
    MissingReceiver { name: SmolStr },
}

impl ResolveError {
    /// Shorthand for [`ResolveError::IndexUnavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ResolveError::IndexUnavailable {
            reason: reason.into(),
        }
    }
}

/// Result type for resolution operations.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
