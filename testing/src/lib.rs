//! # Component Loader Testing
//!
//! Testing utilities and helpers for the component loader.
//!
//! This crate provides:
//! - Deterministic clocks (`FixedClock`, `ManualClock`)
//! - Mock loaders with controlled timing and failures
//! - Fixture components and a ready-made registry
//!
//! ## Example
//!
//! ```ignore
//! use component_loader_testing::{loaders, mock_registry};
//!
//! #[tokio::test(start_paused = true)]
//! async fn test_dialog_renders() {
//!     let loader = ComponentLoader::new(mock_registry());
//!     let lazy = loader.load(ComponentName::Dialog)?.as_lazy().cloned().unwrap();
//!     let state = lazy.mount().settled().await?;
//!     assert_eq!(state.phase, LoadPhase::Resolved);
//! }
//! ```

use chrono::{DateTime, Utc};
use component_loader_core::environment::{Clock, MonotonicClock};

/// Mock implementations of the environment traits.
pub mod mocks {
    use super::{Clock, DateTime, MonotonicClock, Utc};
    use std::sync::{Mutex, PoisonError};
    use std::time::{Duration, Instant};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use component_loader_testing::mocks::FixedClock;
    /// use component_loader_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Monotonic clock that only moves when told to.
    ///
    /// # Example
    ///
    /// ```
    /// use component_loader_testing::mocks::ManualClock;
    /// use component_loader_core::environment::MonotonicClock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new();
    /// let start = clock.instant();
    /// clock.advance(Duration::from_millis(40));
    /// assert_eq!(clock.instant() - start, Duration::from_millis(40));
    /// ```
    #[derive(Debug)]
    pub struct ManualClock {
        origin: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        /// Create a clock frozen at the current instant.
        #[must_use]
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        /// Move the clock forward.
        pub fn advance(&self, by: Duration) {
            let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
            *offset += by;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MonotonicClock for ManualClock {
        fn instant(&self) -> Instant {
            let offset = *self.offset.lock().unwrap_or_else(PoisonError::into_inner);
            self.origin + offset
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Mock loaders with controlled behaviour.
pub mod loaders {
    use component_loader_core::{LoadError, Loader};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Loader that resolves immediately with `component`.
    #[must_use]
    pub fn immediate<T>(component: T) -> Loader<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Loader::new(move || {
            let component = component.clone();
            async move { Ok(component) }
        })
    }

    /// Loader that resolves with `component` after `after`.
    #[must_use]
    pub fn delayed<T>(component: T, after: Duration) -> Loader<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Loader::new(move || {
            let component = component.clone();
            async move {
                tokio::time::sleep(after).await;
                Ok(component)
            }
        })
    }

    /// Loader that never resolves.
    #[must_use]
    pub fn never<T>() -> Loader<T>
    where
        T: Send + 'static,
    {
        Loader::new(futures::future::pending)
    }

    /// Loader that rejects immediately with `reason`.
    #[must_use]
    pub fn rejecting<T>(reason: &str) -> Loader<T>
    where
        T: Send + 'static,
    {
        let reason = reason.to_string();
        Loader::new(move || {
            let err = LoadError::rejected(&reason);
            async move { Err(err) }
        })
    }

    /// Loader that counts its invocations.
    #[must_use]
    pub fn counting<T>(component: T) -> (Loader<T>, Arc<AtomicUsize>)
    where
        T: Clone + Send + Sync + 'static,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let loader = Loader::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let component = component.clone();
            async move { Ok(component) }
        });
        (loader, calls)
    }
}

/// Fixture components and registries.
pub mod fixtures {
    use super::loaders;
    use component_loader_core::ComponentName;
    use component_loader_runtime::registry::ResourceRegistry;

    /// Stand-in for a rendered UI component.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MockComponent {
        /// Component name or placeholder label
        pub name: String,
        /// Rendered markup
        pub markup: String,
    }

    impl MockComponent {
        /// Create a component with the given markup.
        #[must_use]
        pub fn new(name: impl Into<String>, markup: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                markup: markup.into(),
            }
        }

        /// Default markup for a catalog component.
        #[must_use]
        pub fn for_name(name: ComponentName) -> Self {
            Self::new(name.as_str(), format!("<div data-component=\"{name}\"><slot /></div>"))
        }

        /// Loading placeholder.
        #[must_use]
        pub fn loading() -> Self {
            Self::new("Loading", "<div>Loading...</div>")
        }

        /// Error placeholder.
        #[must_use]
        pub fn error() -> Self {
            Self::new("Error", "<div>Error occurred</div>")
        }
    }

    /// Standard registry whose loaders resolve immediately with [`MockComponent::for_name`].
    #[must_use]
    pub fn mock_registry() -> ResourceRegistry<MockComponent> {
        ResourceRegistry::standard(|name| loaders::immediate(MockComponent::for_name(name)))
    }
}

/// Install a test subscriber that writes through the test harness.
///
/// Safe to call from several tests; only the first call installs it.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "component_loader_runtime=debug".into()),
        )
        .try_init();
}

// Re-export commonly used items
pub use fixtures::{MockComponent, mock_registry};
pub use mocks::{FixedClock, ManualClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.instant();
        assert_eq!(clock.instant(), start);

        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.instant() - start, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_loader_waits() {
        let loader = loaders::delayed("card", Duration::from_millis(100));
        let start = tokio::time::Instant::now();

        assert_eq!(loader.load().await, Ok("card"));
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rejecting_loader() {
        let loader = loaders::rejecting::<()>("Component failed to load");
        let err = loader.load().await.unwrap_err();
        assert_eq!(err.to_string(), "Component failed to load: Component failed to load");
    }

    #[tokio::test]
    async fn test_counting_loader() {
        let (loader, calls) = loaders::counting(1);
        let _ = loader.load().await;
        let _ = loader.load().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_mock_registry_is_complete() {
        let registry = mock_registry();
        assert_eq!(registry.len(), 8);
    }
}
