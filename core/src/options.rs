//! Options for lazily rendered components.
//!
//! # Default Values
//!
//! - `delay`: 200ms before the loading placeholder appears
//! - `timeout`: 3000ms before the load is considered failed
//! - no loading or error placeholder
//!
//! Complex catalog entries use [`COMPLEX_DELAY`] and [`COMPLEX_TIMEOUT`].

use std::time::Duration;

/// Default delay before showing the loading placeholder.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Default time after which a load is treated as failed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Delay used for complex components.
pub const COMPLEX_DELAY: Duration = Duration::from_millis(100);

/// Timeout used for complex components.
pub const COMPLEX_TIMEOUT: Duration = Duration::from_millis(5000);

/// Configuration of a lazy wrapper.
///
/// `T` is the component type; placeholders are components too.
///
/// # Example
///
/// ```
/// use component_loader_core::LazyOptions;
/// use std::time::Duration;
///
/// let options = LazyOptions::builder()
///     .loading_component("<spinner/>")
///     .error_component("<oops/>")
///     .delay(Duration::from_millis(50))
///     .timeout(Duration::from_secs(2))
///     .build();
///
/// assert_eq!(options.effective_delay(), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyOptions<T> {
    /// Shown once `delay` has elapsed without a result
    pub loading_component: Option<T>,
    /// Shown when the load times out or rejects
    pub error_component: Option<T>,
    /// Time before the loading placeholder appears
    pub delay: Duration,
    /// Time after which the load is treated as failed
    pub timeout: Duration,
}

impl<T> Default for LazyOptions<T> {
    fn default() -> Self {
        Self {
            loading_component: None,
            error_component: None,
            delay: DEFAULT_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl<T> LazyOptions<T> {
    /// Create a new options builder.
    #[must_use]
    pub const fn builder() -> LazyOptionsBuilder<T> {
        LazyOptionsBuilder {
            loading_component: None,
            error_component: None,
            delay: None,
            timeout: None,
        }
    }

    /// Options used for complex catalog entries (100ms delay, 5000ms timeout).
    #[must_use]
    pub fn complex() -> Self {
        Self {
            delay: COMPLEX_DELAY,
            timeout: COMPLEX_TIMEOUT,
            ..Self::default()
        }
    }

    /// Delay actually applied, clamped so it never exceeds the timeout.
    #[must_use]
    pub fn effective_delay(&self) -> Duration {
        self.delay.min(self.timeout)
    }

    /// Whether `delay` had to be clamped.
    #[must_use]
    pub fn delay_clamped(&self) -> bool {
        self.delay > self.timeout
    }
}

/// Builder for [`LazyOptions`].
#[derive(Debug, Clone)]
pub struct LazyOptionsBuilder<T> {
    loading_component: Option<T>,
    error_component: Option<T>,
    delay: Option<Duration>,
    timeout: Option<Duration>,
}

impl<T> LazyOptionsBuilder<T> {
    /// Set the loading placeholder.
    #[must_use]
    pub fn loading_component(mut self, component: T) -> Self {
        self.loading_component = Some(component);
        self
    }

    /// Set the error placeholder.
    #[must_use]
    pub fn error_component(mut self, component: T) -> Self {
        self.error_component = Some(component);
        self
    }

    /// Set the delay before the loading placeholder appears.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the [`LazyOptions`].
    #[must_use]
    pub fn build(self) -> LazyOptions<T> {
        LazyOptions {
            loading_component: self.loading_component,
            error_component: self.error_component,
            delay: self.delay.unwrap_or(DEFAULT_DELAY),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options: LazyOptions<&str> = LazyOptions::default();
        assert_eq!(options.delay, Duration::from_millis(200));
        assert_eq!(options.timeout, Duration::from_millis(3000));
        assert!(options.loading_component.is_none());
        assert!(options.error_component.is_none());
    }

    #[test]
    fn test_builder_fills_unset_fields_with_defaults() {
        let options = LazyOptions::builder()
            .error_component("error")
            .timeout(Duration::from_millis(100))
            .build();

        assert_eq!(options.delay, DEFAULT_DELAY);
        assert_eq!(options.timeout, Duration::from_millis(100));
        assert_eq!(options.error_component, Some("error"));
    }

    #[test]
    fn test_complex_options() {
        let options: LazyOptions<()> = LazyOptions::complex();
        assert_eq!(options.delay, Duration::from_millis(100));
        assert_eq!(options.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_delay_is_clamped_to_timeout() {
        let options: LazyOptions<()> = LazyOptions::builder()
            .delay(Duration::from_millis(500))
            .timeout(Duration::from_millis(100))
            .build();

        assert!(options.delay_clamped());
        assert_eq!(options.effective_delay(), Duration::from_millis(100));
    }
}
