//! Loader configuration.
//!
//! Provides environment-based configuration with validation.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `LOADER_DEFAULT_DELAY_MS` | 200 |
//! | `LOADER_DEFAULT_TIMEOUT_MS` | 3000 |
//! | `LOADER_COMPLEX_DELAY_MS` | 100 |
//! | `LOADER_COMPLEX_TIMEOUT_MS` | 5000 |
//! | `LOADER_STALLED_AFTER_MS` | 5000 |
//! | `LOADER_ENV` | `development` |
//! | `LOADER_VERSION` | crate version |
//!
//! # Example
//!
//! ```no_run
//! use component_loader_runtime::config::LoaderConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LoaderConfig::from_env()?;
//! println!("Complex timeout: {:?}", config.complex_timeout);
//! # Ok(())
//! # }
//! ```

use component_loader_core::LazyOptions;
use component_loader_core::options::{COMPLEX_DELAY, COMPLEX_TIMEOUT, DEFAULT_DELAY, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable holds a value that cannot be parsed
    #[error("Invalid value for {key}: {value:?}")]
    Invalid {
        /// Variable name
        key: String,
        /// Raw value
        value: String,
    },
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Delay for lazy components without explicit options
    pub default_delay: Duration,
    /// Timeout for lazy components without explicit options
    pub default_timeout: Duration,
    /// Delay for complex catalog entries
    pub complex_delay: Duration,
    /// Timeout for complex catalog entries
    pub complex_timeout: Duration,
    /// Age after which an unfinished timed load counts as stalled
    pub stalled_after: Duration,
    /// Deployment environment name
    pub environment: String,
    /// Application version reported by health checks
    pub version: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_delay: DEFAULT_DELAY,
            default_timeout: DEFAULT_TIMEOUT,
            complex_delay: COMPLEX_DELAY,
            complex_timeout: COMPLEX_TIMEOUT,
            stalled_after: COMPLEX_TIMEOUT,
            environment: "development".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration from process environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or validation fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| -> Result<Duration, ConfigError> {
            lookup(key).map_or(Ok(default), |raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::Invalid {
                        key: key.to_string(),
                        value: raw.clone(),
                    })
            })
        };

        let config = Self {
            default_delay: millis("LOADER_DEFAULT_DELAY_MS", defaults.default_delay)?,
            default_timeout: millis("LOADER_DEFAULT_TIMEOUT_MS", defaults.default_timeout)?,
            complex_delay: millis("LOADER_COMPLEX_DELAY_MS", defaults.complex_delay)?,
            complex_timeout: millis("LOADER_COMPLEX_TIMEOUT_MS", defaults.complex_timeout)?,
            stalled_after: millis("LOADER_STALLED_AFTER_MS", defaults.stalled_after)?,
            environment: lookup("LOADER_ENV").unwrap_or(defaults.environment),
            version: lookup("LOADER_VERSION").unwrap_or(defaults.version),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the default delay and timeout.
    #[must_use]
    pub const fn with_defaults(mut self, delay: Duration, timeout: Duration) -> Self {
        self.default_delay = delay;
        self.default_timeout = timeout;
        self
    }

    /// Set the complex delay and timeout.
    #[must_use]
    pub const fn with_complex(mut self, delay: Duration, timeout: Duration) -> Self {
        self.complex_delay = delay;
        self.complex_timeout = timeout;
        self
    }

    /// Set the stalled-load threshold.
    #[must_use]
    pub const fn with_stalled_after(mut self, stalled_after: Duration) -> Self {
        self.stalled_after = stalled_after;
        self
    }

    /// Set the environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Validate the configuration.
    ///
    /// A delay longer than its timeout is accepted; lazy components clamp it.
    ///
    /// # Errors
    ///
    /// Returns error if a timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout.is_zero() {
            return Err(ConfigError::Validation("default timeout must be greater than zero".to_string()));
        }
        if self.complex_timeout.is_zero() {
            return Err(ConfigError::Validation("complex timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Lazy options for components without explicit options.
    #[must_use]
    pub fn default_options<T>(&self) -> LazyOptions<T> {
        LazyOptions::builder()
            .delay(self.default_delay)
            .timeout(self.default_timeout)
            .build()
    }

    /// Lazy options for complex catalog entries.
    #[must_use]
    pub fn complex_options<T>(&self) -> LazyOptions<T> {
        LazyOptions::builder()
            .delay(self.complex_delay)
            .timeout(self.complex_timeout)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_component_options() {
        let config = LoaderConfig::default();
        assert_eq!(config.default_options::<()>(), LazyOptions::default());
        assert_eq!(config.complex_options::<()>(), LazyOptions::complex());
    }

    #[test]
    fn test_unset_variables_keep_defaults() {
        let config = LoaderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = LoaderConfig::from_lookup(lookup(&[
            ("LOADER_COMPLEX_DELAY_MS", "50"),
            ("LOADER_COMPLEX_TIMEOUT_MS", " 8000 "),
            ("LOADER_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(config.complex_delay, Duration::from_millis(50));
        assert_eq!(config.complex_timeout, Duration::from_millis(8000));
        assert_eq!(config.environment, "production");
        assert_eq!(config.default_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_unparseable_value_is_rejected() {
        let err = LoaderConfig::from_lookup(lookup(&[("LOADER_DEFAULT_DELAY_MS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "LOADER_DEFAULT_DELAY_MS".to_string(),
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let err = LoaderConfig::from_lookup(lookup(&[("LOADER_DEFAULT_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_builder_methods() {
        let config = LoaderConfig::default()
            .with_defaults(Duration::from_millis(10), Duration::from_millis(20))
            .with_complex(Duration::from_millis(30), Duration::from_millis(40))
            .with_stalled_after(Duration::from_secs(1))
            .with_environment("staging");

        assert_eq!(config.default_options::<()>().timeout, Duration::from_millis(20));
        assert_eq!(config.complex_options::<()>().delay, Duration::from_millis(30));
        assert_eq!(config.stalled_after, Duration::from_secs(1));
        assert_eq!(config.environment, "staging");
        tokio_test::assert_ok!(config.validate());
    }
}
