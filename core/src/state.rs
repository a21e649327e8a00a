//! Render states of a mounted lazy component.
//!
//! # States
//!
//! - **Idle**: mounted, driver not started yet
//! - **Loading**: loader running, delay window still open
//! - **LoadingShown**: delay elapsed without a result; loading placeholder visible
//! - **Resolved**: loaded component shown (terminal)
//! - **TimedOut**: timeout elapsed first (terminal)
//! - **Rejected**: loader failed (terminal)

use crate::error::LoadError;

/// Phase of a single load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    /// Mounted but not started
    Idle,
    /// Loader running inside the delay window
    Loading,
    /// Delay elapsed, loading placeholder shown
    LoadingShown,
    /// Loader resolved before the timeout
    Resolved,
    /// Timeout elapsed before the loader finished
    TimedOut,
    /// Loader failed
    Rejected,
}

impl LoadPhase {
    /// Whether no further transition can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::TimedOut | Self::Rejected)
    }

    /// Whether the load ended on the error path.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::TimedOut | Self::Rejected)
    }
}

/// What a mounted component displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<T> {
    /// Nothing yet
    Empty,
    /// The configured loading placeholder
    Loading(T),
    /// The loaded component
    Content(T),
    /// The configured error placeholder
    Error(T),
    /// No error placeholder configured; the failure is left to the caller
    DefaultError(LoadError),
}

impl<T> View<T> {
    /// The loaded component, if the view shows it.
    #[must_use]
    pub const fn content(&self) -> Option<&T> {
        match self {
            Self::Content(component) => Some(component),
            _ => None,
        }
    }
}

/// Snapshot published by a mounted lazy component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState<T> {
    /// Current phase
    pub phase: LoadPhase,
    /// What is displayed
    pub view: View<T>,
    /// Whether the loading placeholder has been displayed at some point
    pub loading_shown: bool,
    /// Failure cause once the phase is `TimedOut` or `Rejected`
    pub error: Option<LoadError>,
}

impl<T> RenderState<T> {
    /// State right after mounting.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            phase: LoadPhase::Idle,
            view: View::Empty,
            loading_shown: false,
            error: None,
        }
    }

    /// Whether the state is terminal.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Convert into the loaded component, or the failure cause.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] when the load timed out or was rejected.
    pub fn into_result(self) -> Result<Option<T>, LoadError> {
        match (self.error, self.view) {
            (Some(err), _) => Err(err),
            (None, View::Content(component)) => Ok(Some(component)),
            (None, _) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!LoadPhase::Idle.is_terminal());
        assert!(!LoadPhase::Loading.is_terminal());
        assert!(!LoadPhase::LoadingShown.is_terminal());
        assert!(LoadPhase::Resolved.is_terminal());
        assert!(LoadPhase::TimedOut.is_failure());
        assert!(LoadPhase::Rejected.is_failure());
        assert!(!LoadPhase::Resolved.is_failure());
    }

    #[test]
    fn test_into_result() {
        let resolved = RenderState {
            phase: LoadPhase::Resolved,
            view: View::Content("dialog"),
            loading_shown: true,
            error: None,
        };
        assert_eq!(resolved.into_result(), Ok(Some("dialog")));

        let failed = RenderState {
            phase: LoadPhase::Rejected,
            view: View::Error("error"),
            loading_shown: false,
            error: Some(LoadError::rejected("boom")),
        };
        assert_eq!(failed.into_result(), Err(LoadError::rejected("boom")));

        assert_eq!(RenderState::<&str>::idle().into_result(), Ok(None));
    }
}
