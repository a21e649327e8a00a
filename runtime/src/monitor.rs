//! Load-time instrumentation.
//!
//! [`PerformanceMonitor`] keeps one start time per label and turns it into an
//! elapsed duration when the label is ended. It is an owned object: create
//! one at startup and share it (`Arc`) with whatever needs to time loads.
//!
//! # Example
//!
//! ```rust
//! use component_loader_runtime::monitor::PerformanceMonitor;
//!
//! let monitor = PerformanceMonitor::new();
//! monitor.start("Dialog");
//! assert_eq!(monitor.stats().active_loads, 1);
//!
//! let elapsed = monitor.end("Dialog");
//! assert!(monitor.stats().components.is_empty());
//! # let _ = elapsed;
//! ```

use crate::metrics::MonitorMetrics;
use component_loader_core::environment::{MonotonicClock, SystemClock};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Snapshot of active timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    /// Number of labels started but not ended
    pub active_loads: usize,
    /// Active labels in the order they were first started
    pub components: Vec<String>,
}

/// Timer registry for component loads.
pub struct PerformanceMonitor {
    clock: Arc<dyn MonotonicClock>,
    // Insertion-ordered; label lookups are linear over a handful of entries.
    timers: Mutex<Vec<(String, Instant)>>,
}

impl PerformanceMonitor {
    /// Create a monitor backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a monitor backed by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn MonotonicClock>) -> Self {
        Self {
            clock,
            timers: Mutex::new(Vec::new()),
        }
    }

    /// Record the start of `label`.
    ///
    /// Starting an active label again replaces its start time.
    pub fn start(&self, label: impl Into<String>) {
        let label = label.into();
        let now = self.clock.instant();
        let mut timers = self.timers();

        match timers.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, started)) => *started = now,
            None => timers.push((label, now)),
        }
        MonitorMetrics::record_active(timers.len());
    }

    /// Stop timing `label` and return how long it ran.
    ///
    /// Returns [`Duration::ZERO`] if `label` was never started.
    pub fn end(&self, label: &str) -> Duration {
        let now = self.clock.instant();
        let mut timers = self.timers();

        let Some(index) = timers.iter().position(|(existing, _)| existing == label) else {
            return Duration::ZERO;
        };
        let (_, started) = timers.remove(index);
        let active = timers.len();
        drop(timers);

        let elapsed = now.saturating_duration_since(started);
        tracing::info!(
            component = label,
            load_ms = elapsed.as_secs_f64() * 1000.0,
            "Component loaded"
        );
        MonitorMetrics::record_load(label, elapsed);
        MonitorMetrics::record_active(active);
        elapsed
    }

    /// Active timers at the time of the call.
    #[must_use]
    pub fn stats(&self) -> LoadStats {
        let timers = self.timers();
        LoadStats {
            active_loads: timers.len(),
            components: timers.iter().map(|(label, _)| label.clone()).collect(),
        }
    }

    /// How long the oldest active timer has been running.
    #[must_use]
    pub fn oldest_active(&self) -> Option<Duration> {
        let now = self.clock.instant();
        self.timers()
            .iter()
            .map(|(_, started)| now.saturating_duration_since(*started))
            .max()
    }

    /// Drop every active timer.
    pub fn reset(&self) {
        self.timers().clear();
        MonitorMetrics::record_active(0);
    }

    /// Time `future` under `label`.
    ///
    /// Returns the future's output and the measured duration.
    pub async fn instrument<F>(&self, label: impl Into<String>, future: F) -> (F::Output, Duration)
    where
        F: Future,
    {
        let label = label.into();
        self.start(label.clone());
        let output = future.await;
        let elapsed = self.end(&label);
        (output, elapsed)
    }

    fn timers(&self) -> MutexGuard<'_, Vec<(String, Instant)>> {
        // No operation panics while holding the lock, so a poisoned guard is still consistent.
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PerformanceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceMonitor")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_then_end_is_non_negative() {
        let monitor = PerformanceMonitor::new();
        monitor.start("TestComponent");
        assert_eq!(monitor.stats().components, vec!["TestComponent"]);

        let elapsed = monitor.end("TestComponent");
        assert!(elapsed >= Duration::ZERO);
        assert_eq!(monitor.stats().active_loads, 0);
    }

    #[test]
    fn test_end_without_start_is_zero() {
        let monitor = PerformanceMonitor::new();
        assert_eq!(monitor.end("NonExistentComponent"), Duration::ZERO);
    }

    #[test]
    fn test_second_end_is_zero() {
        let monitor = PerformanceMonitor::new();
        monitor.start("Card");
        let _ = monitor.end("Card");
        assert_eq!(monitor.end("Card"), Duration::ZERO);
    }

    #[test]
    fn test_stats_follow_insertion_order() {
        let monitor = PerformanceMonitor::new();
        monitor.start("Component1");
        monitor.start("Component2");

        let stats = monitor.stats();
        assert_eq!(stats.active_loads, 2);
        assert_eq!(stats.components, vec!["Component1", "Component2"]);

        let _ = monitor.end("Component1");

        let updated = monitor.stats();
        assert_eq!(updated.active_loads, 1);
        assert_eq!(updated.components, vec!["Component2"]);
        // Earlier snapshot is unaffected
        assert_eq!(stats.active_loads, 2);
    }

    #[test]
    fn test_restart_keeps_position() {
        let monitor = PerformanceMonitor::new();
        monitor.start("a");
        monitor.start("b");
        monitor.start("a");

        assert_eq!(monitor.stats().components, vec!["a", "b"]);
    }

    #[test]
    fn test_reset_clears_timers() {
        let monitor = PerformanceMonitor::new();
        monitor.start("a");
        monitor.start("b");
        monitor.reset();

        assert_eq!(monitor.stats(), LoadStats { active_loads: 0, components: vec![] });
        assert_eq!(monitor.oldest_active(), None);
    }

    #[test]
    fn test_stats_serialize_like_the_frontend_shape() {
        let monitor = PerformanceMonitor::new();
        monitor.start("Dialog");

        let json = serde_json::to_value(monitor.stats()).unwrap();
        assert_eq!(json, serde_json::json!({ "activeLoads": 1, "components": ["Dialog"] }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_instrument_measures_future() {
        let monitor = PerformanceMonitor::new();

        let (value, elapsed) = monitor
            .instrument("Select", async {
                tokio::time::sleep(Duration::from_millis(40)).await;
                "select"
            })
            .await;

        assert_eq!(value, "select");
        assert!(elapsed >= Duration::from_millis(40));
        assert_eq!(monitor.stats().active_loads, 0);
    }
}
