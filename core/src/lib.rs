//! # Component Loader Core
//!
//! Core types for loading UI components on demand.
//!
//! This crate holds the vocabulary shared by the runtime and testing crates:
//!
//! - **`ComponentName`**: the closed set of loadable components
//! - **`Loader`**: a reusable, zero-argument async producer of a component
//! - **`LazyOptions`**: delay, timeout and placeholders for deferred rendering
//! - **`RenderState`**: what a mounted lazy component currently shows
//! - **Errors**: dispatch failures and load failures
//! - **Environment**: injected wall and monotonic clocks
//!
//! ## Example
//!
//! ```
//! use component_loader_core::{ComponentName, Loader};
//!
//! let loader = Loader::new(|| async { Ok::<_, component_loader_core::LoadError>("<button/>") });
//! let name: ComponentName = "Button".parse().unwrap_or(ComponentName::Button);
//! assert_eq!(name.as_str(), "Button");
//! # let _ = loader;
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Bundle size helpers for component variants
pub mod bundle;

/// Error types for dispatch and loading
pub mod error;

/// Loader handle type
pub mod loader;

/// Component names and catalog tiers
pub mod name;

/// Lazy wrapper options
pub mod options;

/// Render states published by mounted lazy components
pub mod state;

/// Environment module - Dependency injection traits
///
/// Time is abstracted behind traits so components that measure or stamp
/// time can be driven by deterministic clocks in tests.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::time::Instant;

    /// Clock trait - abstracts wall-clock time for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Monotonic clock used for measuring elapsed durations.
    pub trait MonotonicClock: Send + Sync {
        /// Get the current monotonic instant
        fn instant(&self) -> Instant;
    }

    /// Production clock.
    ///
    /// Wall time comes from the system; monotonic time follows tokio's clock,
    /// so it honours paused time in tests.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    impl MonotonicClock for SystemClock {
        fn instant(&self) -> Instant {
            tokio::time::Instant::now().into_std()
        }
    }
}

pub use error::{DispatchError, LoadError};
pub use loader::{LoadFuture, Loader};
pub use name::{ComponentName, ComponentTier};
pub use options::LazyOptions;
pub use state::{LoadPhase, RenderState, View};

#[cfg(test)]
mod tests {
    use super::environment::{MonotonicClock, SystemClock};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_follows_paused_tokio_time() {
        let clock = SystemClock;
        let before = clock.instant();
        tokio::time::advance(Duration::from_millis(250)).await;
        let after = clock.instant();
        assert_eq!(after - before, Duration::from_millis(250));
    }
}
