//! Prometheus metrics for observability and monitoring.
//!
//! This module provides metric collection for the loader components:
//! - Dispatch lookups and unknown names
//! - Lazy component outcomes and durations
//! - Timer registry measurements and active loads
//!
//! Recording is a no-op until a recorder is installed, so library code can
//! record unconditionally.
//!
//! # Example
//!
//! ```rust,no_run
//! use component_loader_runtime::metrics::MetricsServer;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = MetricsServer::new("0.0.0.0:9090".parse()?);
//! server.start()?;
//!
//! if let Some(rendered) = server.render() {
//!     println!("{rendered}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics server.
///
/// Installs the global recorder and renders the scrape payload.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a new metrics server.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address the scrape endpoint is reported on (e.g., `0.0.0.0:9090`)
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr, handle: None }
    }

    /// Register metric descriptions and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., by another test), this logs a
    /// warning and succeeds without a handle.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!(addr = %self.addr, "Metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Address the scrape endpoint is reported on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if this server did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    // Dispatch Metrics
    describe_counter!(
        "loader_dispatch_total",
        "Total number of components handed out by the dispatch function"
    );
    describe_counter!(
        "loader_dispatch_not_found_total",
        "Total number of dispatches for unregistered components"
    );

    // Lazy Component Metrics
    describe_counter!(
        "lazy_component_loads_started_total",
        "Total number of lazy component loads started"
    );
    describe_counter!(
        "lazy_component_loading_shown_total",
        "Total number of loads that displayed the loading placeholder"
    );
    describe_counter!(
        "lazy_component_resolved_total",
        "Total number of lazy component loads that resolved"
    );
    describe_counter!(
        "lazy_component_timeouts_total",
        "Total number of lazy component loads that timed out"
    );
    describe_counter!(
        "lazy_component_rejections_total",
        "Total number of lazy component loads that were rejected"
    );
    describe_histogram!(
        "lazy_component_load_duration_seconds",
        "Time taken for lazy component loads to resolve"
    );

    // Performance Monitor Metrics
    describe_histogram!(
        "component_load_duration_seconds",
        "Load times measured by the performance monitor"
    );
    describe_gauge!(
        "component_active_loads",
        "Number of loads currently timed by the performance monitor"
    );
}

/// Dispatch metrics recorder.
pub struct DispatchMetrics;

impl DispatchMetrics {
    /// Record a successful dispatch.
    pub fn record_dispatch(strategy: &'static str) {
        counter!("loader_dispatch_total", "strategy" => strategy).increment(1);
    }

    /// Record a dispatch for an unknown name.
    pub fn record_not_found() {
        counter!("loader_dispatch_not_found_total").increment(1);
    }
}

/// Lazy component metrics recorder.
pub struct LazyLoadMetrics;

impl LazyLoadMetrics {
    /// Record a load start.
    pub fn record_started() {
        counter!("lazy_component_loads_started_total").increment(1);
    }

    /// Record the loading placeholder being displayed.
    pub fn record_loading_shown() {
        counter!("lazy_component_loading_shown_total").increment(1);
    }

    /// Record a resolved load.
    pub fn record_resolved(duration: Duration) {
        counter!("lazy_component_resolved_total").increment(1);
        histogram!("lazy_component_load_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record a timed-out load.
    pub fn record_timeout() {
        counter!("lazy_component_timeouts_total").increment(1);
    }

    /// Record a rejected load.
    pub fn record_rejection() {
        counter!("lazy_component_rejections_total").increment(1);
    }
}

/// Performance monitor metrics recorder.
pub struct MonitorMetrics;

impl MonitorMetrics {
    /// Record a measured load.
    pub fn record_load(component: &str, duration: Duration) {
        histogram!("component_load_duration_seconds", "component" => component.to_string())
            .record(duration.as_secs_f64());
    }

    /// Record the number of active timers.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_active(count: usize) {
        gauge!("component_active_loads").set(count as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_server_creation() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let server = MetricsServer::new(addr);
        assert!(server.handle().is_none());
        assert_eq!(server.addr(), addr);
    }

    #[tokio::test]
    async fn test_metrics_server_start() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let mut server = MetricsServer::new(addr);

        let result = server.start();
        assert!(result.is_ok());
        // Note: handle might be None if another test already initialized the recorder
    }

    #[tokio::test]
    async fn test_loader_metrics_render() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let mut server = MetricsServer::new(addr);
        server.start().unwrap();

        DispatchMetrics::record_dispatch("lazy");
        DispatchMetrics::record_not_found();
        LazyLoadMetrics::record_started();
        LazyLoadMetrics::record_resolved(Duration::from_millis(120));
        LazyLoadMetrics::record_timeout();
        MonitorMetrics::record_load("Dialog", Duration::from_millis(80));
        MonitorMetrics::record_active(2);

        // If this test runs after another test initialized the recorder,
        // handle might be None. That's OK - metrics are still being recorded.
        if let Some(rendered) = server.render() {
            assert!(rendered.contains("loader_dispatch_total"));
            assert!(rendered.contains("loader_dispatch_not_found_total"));
            assert!(rendered.contains("lazy_component_timeouts_total"));
            assert!(rendered.contains("component_load_duration_seconds"));
            assert!(rendered.contains("component_active_loads"));
        }
    }
}
