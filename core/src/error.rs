//! Errors raised while dispatching and loading components.
//!
//! There are two families:
//!
//! - [`DispatchError`] is a programmer error: a name that is not in the
//!   registry. It is returned synchronously and never recovered locally.
//! - [`LoadError`] is a runtime condition: the loader rejected or did not
//!   finish within its timeout. Lazy components render it through their
//!   error placeholder.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by the dispatch function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The requested component is not registered
    #[error("Component \"{name}\" not found in registry")]
    NotFound {
        /// Name exactly as requested
        name: String,
    },
}

impl DispatchError {
    /// Build a [`DispatchError::NotFound`] for `name`.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

/// Errors produced while a loader is running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The loader did not resolve within the configured timeout
    #[error("Component load timed out after {}ms", .timeout.as_millis())]
    TimedOut {
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// The loader's underlying operation failed
    #[error("Component failed to load: {reason}")]
    Rejected {
        /// Failure description from the loader
        reason: String,
    },
}

impl LoadError {
    /// Build a [`LoadError::Rejected`] from any displayable reason.
    #[must_use]
    pub fn rejected(reason: impl std::fmt::Display) -> Self {
        Self::Rejected {
            reason: reason.to_string(),
        }
    }

    /// Whether this error came from the timeout rather than the loader.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DispatchError::not_found("NonExistentComponent");
        assert_eq!(
            err.to_string(),
            "Component \"NonExistentComponent\" not found in registry"
        );
    }

    #[test]
    fn test_load_error_messages() {
        let timeout = LoadError::TimedOut {
            timeout: Duration::from_millis(5000),
        };
        assert_eq!(timeout.to_string(), "Component load timed out after 5000ms");
        assert!(timeout.is_timeout());

        let rejected = LoadError::rejected("network down");
        assert_eq!(rejected.to_string(), "Component failed to load: network down");
        assert!(!rejected.is_timeout());
    }
}
