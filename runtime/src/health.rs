//! Health reporting for the loader.
//!
//! A [`HealthChecker`] reports whether component loading is keeping up. It is
//! `Healthy` unless some load timed by the [`PerformanceMonitor`] has been
//! running for longer than the configured stalled-load threshold, in which
//! case it is `Degraded`.
//!
//! # Example
//!
//! ```rust
//! use component_loader_runtime::config::LoaderConfig;
//! use component_loader_runtime::health::{HealthChecker, HealthStatus};
//! use component_loader_runtime::monitor::PerformanceMonitor;
//! use std::sync::Arc;
//!
//! let checker = HealthChecker::new(LoaderConfig::default(), Arc::new(PerformanceMonitor::new()));
//! let report = checker.check();
//! assert_eq!(report.status, HealthStatus::Healthy);
//! ```

use crate::config::LoaderConfig;
use crate::monitor::PerformanceMonitor;
use chrono::{DateTime, Utc};
use component_loader_core::environment::{Clock, MonotonicClock, SystemClock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Health status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Loads complete within their expected window
    Healthy,

    /// At least one load has been running longer than the stalled threshold
    Degraded,
}

impl HealthStatus {
    /// Check if status is healthy
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Health snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Overall status
    pub status: HealthStatus,
    /// When the report was produced
    pub timestamp: DateTime<Utc>,
    /// Seconds since the checker was created
    pub uptime: f64,
    /// Deployment environment name
    pub environment: String,
    /// Application version
    pub version: String,
    /// Loads currently timed by the performance monitor
    pub active_loads: usize,
}

impl HealthReport {
    /// Serialize the report as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Produces [`HealthReport`]s.
pub struct HealthChecker {
    config: LoaderConfig,
    monitor: Arc<PerformanceMonitor>,
    wall: Arc<dyn Clock>,
    monotonic: Arc<dyn MonotonicClock>,
    started: Instant,
}

impl HealthChecker {
    /// Create a checker using the system clock.
    #[must_use]
    pub fn new(config: LoaderConfig, monitor: Arc<PerformanceMonitor>) -> Self {
        Self::with_clocks(config, monitor, Arc::new(SystemClock), Arc::new(SystemClock))
    }

    /// Create a checker with injected clocks.
    #[must_use]
    pub fn with_clocks(
        config: LoaderConfig,
        monitor: Arc<PerformanceMonitor>,
        wall: Arc<dyn Clock>,
        monotonic: Arc<dyn MonotonicClock>,
    ) -> Self {
        let started = monotonic.instant();
        Self {
            config,
            monitor,
            wall,
            monotonic,
            started,
        }
    }

    /// Produce a health report.
    #[must_use]
    pub fn check(&self) -> HealthReport {
        let stats = self.monitor.stats();
        let stalled = self
            .monitor
            .oldest_active()
            .is_some_and(|age| age > self.config.stalled_after);

        let status = if stalled {
            tracing::warn!(
                active_loads = stats.active_loads,
                stalled_after_ms = self.config.stalled_after.as_millis(),
                "Component loads stalled"
            );
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthReport {
            status,
            timestamp: self.wall.now(),
            uptime: self
                .monotonic
                .instant()
                .saturating_duration_since(self.started)
                .as_secs_f64(),
            environment: self.config.environment.clone(),
            version: self.config.version.clone(),
            active_loads: stats.active_loads,
        }
    }
}

impl std::fmt::Debug for HealthChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthChecker")
            .field("config", &self.config)
            .field("monitor", &self.monitor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_healthy_without_active_loads() {
        let checker = HealthChecker::new(LoaderConfig::default(), Arc::new(PerformanceMonitor::new()));
        tokio::time::advance(Duration::from_secs(3)).await;

        let report = checker.check();
        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.active_loads, 0);
        assert!(report.uptime >= 3.0);
        assert_eq!(report.environment, "development");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_load_degrades() {
        let monitor = Arc::new(PerformanceMonitor::new());
        let config = LoaderConfig::default().with_stalled_after(Duration::from_millis(500));
        let checker = HealthChecker::new(config, Arc::clone(&monitor));

        monitor.start("Dialog");
        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(checker.check().status.is_healthy());

        tokio::time::advance(Duration::from_millis(400)).await;
        let report = checker.check();
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.active_loads, 1);

        let _ = monitor.end("Dialog");
        assert!(checker.check().status.is_healthy());
    }

    #[test]
    fn test_report_json_shape() {
        let checker = HealthChecker::new(
            LoaderConfig::default().with_environment("production"),
            Arc::new(PerformanceMonitor::new()),
        );

        let json: serde_json::Value = serde_json::from_str(&checker.check().to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["environment"], "production");
        assert_eq!(json["activeLoads"], 0);
        assert!(json.get("timestamp").is_some());
        assert!(json.get("uptime").is_some());
    }
}
