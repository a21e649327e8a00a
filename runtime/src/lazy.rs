//! Deferred rendering of components.
//!
//! A [`LazyComponent`] holds a loader and its [`LazyOptions`]. Mounting it
//! spawns a driver task that races three things:
//!
//! - the loader itself
//! - the display delay, after which the loading placeholder is shown
//! - the timeout, after which the load is treated as failed
//!
//! The driver publishes every transition on a `watch` channel observed
//! through [`MountedComponent`]. Timers are dropped as soon as a terminal
//! state is reached, and a timed-out loader is dropped with them.
//!
//! # Example
//!
//! ```rust
//! use component_loader_core::{LazyOptions, LoadError, LoadPhase, Loader, View};
//! use component_loader_runtime::lazy::create_lazy_component;
//!
//! # async fn example() -> Result<(), LoadError> {
//! let loader = Loader::new(|| async { Ok::<_, LoadError>("<dialog/>") });
//! let lazy = create_lazy_component(loader, LazyOptions::builder().loading_component("...").build());
//!
//! let state = lazy.mount().settled().await?;
//! assert_eq!(state.phase, LoadPhase::Resolved);
//! assert_eq!(state.view, View::Content("<dialog/>"));
//! # Ok(())
//! # }
//! ```

use crate::metrics::LazyLoadMetrics;
use component_loader_core::{LazyOptions, LoadError, LoadPhase, Loader, RenderState, View};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

/// Wrap `loader` into a deferred component.
///
/// Unset options fall back to a 200ms delay and a 3000ms timeout.
#[must_use]
pub fn create_lazy_component<T>(loader: Loader<T>, options: LazyOptions<T>) -> LazyComponent<T> {
    LazyComponent::with_options(loader, options)
}

/// A loader that renders through placeholders.
#[derive(Debug, Clone)]
pub struct LazyComponent<T> {
    loader: Loader<T>,
    options: LazyOptions<T>,
}

impl<T> LazyComponent<T> {
    /// Wrap a loader with default options.
    #[must_use]
    pub fn new(loader: Loader<T>) -> Self {
        Self::with_options(loader, LazyOptions::default())
    }

    /// Wrap a loader with explicit options.
    #[must_use]
    pub fn with_options(loader: Loader<T>, options: LazyOptions<T>) -> Self {
        if options.delay_clamped() {
            tracing::warn!(
                delay_ms = options.delay.as_millis(),
                timeout_ms = options.timeout.as_millis(),
                "Lazy component delay exceeds timeout, clamping delay to timeout"
            );
        }
        Self { loader, options }
    }

    /// The wrapped loader.
    #[must_use]
    pub const fn loader(&self) -> &Loader<T> {
        &self.loader
    }

    /// The options this component renders with.
    #[must_use]
    pub const fn options(&self) -> &LazyOptions<T> {
        &self.options
    }
}

impl<T> LazyComponent<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Render the component: start the loader and begin publishing states.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn mount(&self) -> MountedComponent<T> {
        let (tx, rx) = watch::channel(RenderState::idle());
        let driver = LoadDriver {
            loader: self.loader.clone(),
            options: self.options.clone(),
            tx,
        };
        let task = tokio::spawn(driver.run());
        MountedComponent { state: rx, task }
    }
}

/// Handle to a mounted lazy component.
///
/// Dropping the handle unmounts the component: the driver is aborted and
/// any eventual result is discarded.
#[derive(Debug)]
pub struct MountedComponent<T> {
    state: watch::Receiver<RenderState<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone> MountedComponent<T> {
    /// Current render state.
    #[must_use]
    pub fn state(&self) -> RenderState<T> {
        self.state.borrow().clone()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.state.borrow().phase
    }

    /// Wait until a state satisfies `predicate`.
    ///
    /// If the driver is gone before that happens, the last published state
    /// is returned.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> RenderState<T>
    where
        F: FnMut(&RenderState<T>) -> bool,
    {
        let reached = self
            .state
            .wait_for(|state| predicate(state))
            .await
            .map(|state| RenderState::clone(&state))
            .ok();
        reached.unwrap_or_else(|| self.state.borrow().clone())
    }

    /// Wait for a terminal state.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] when the load failed and no error placeholder
    /// was configured. With a placeholder, failures are rendered and the
    /// terminal state is returned instead. A driver that stops before
    /// reaching a terminal state is reported as a rejection.
    pub async fn settled(mut self) -> Result<RenderState<T>, LoadError> {
        let state = self.wait_for(RenderState::is_settled).await;
        if !state.is_settled() {
            return Err(LoadError::rejected("load task ended before settling"));
        }
        match state.view {
            View::DefaultError(err) => Err(err),
            _ => Ok(state),
        }
    }

    /// Unmount before completion, discarding the result.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<T> Drop for MountedComponent<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct LoadDriver<T> {
    loader: Loader<T>,
    options: LazyOptions<T>,
    tx: watch::Sender<RenderState<T>>,
}

impl<T: Clone> LoadDriver<T> {
    async fn run(self) {
        let started = Instant::now();
        let delay = self.options.effective_delay();
        let timeout = self.options.timeout;

        tracing::debug!(
            delay_ms = delay.as_millis(),
            timeout_ms = timeout.as_millis(),
            "Lazy component load started"
        );
        LazyLoadMetrics::record_started();

        self.publish(LoadPhase::Loading, View::Empty, false, None);
        let mut loading_shown = false;
        if delay.is_zero() {
            loading_shown = self.show_loading();
        }

        let loader = self.loader.clone();
        let load = AssertUnwindSafe(async move { loader.load().await })
            .catch_unwind()
            .map(|caught| caught.unwrap_or_else(|payload| Err(LoadError::rejected(panic_reason(&*payload)))));
        tokio::pin!(load);
        let delay_timer = sleep(delay);
        let timeout_timer = sleep(timeout);
        tokio::pin!(delay_timer, timeout_timer);
        let mut delay_elapsed = delay.is_zero();

        let outcome = loop {
            tokio::select! {
                biased;
                result = &mut load => break result,
                () = &mut timeout_timer => break Err(LoadError::TimedOut { timeout }),
                () = &mut delay_timer, if !delay_elapsed => {
                    delay_elapsed = true;
                    loading_shown = self.show_loading();
                }
            }
        };

        self.finish(outcome, loading_shown, started.elapsed());
    }

    fn show_loading(&self) -> bool {
        let view = self
            .options
            .loading_component
            .clone()
            .map_or(View::Empty, View::Loading);
        let shown = matches!(view, View::Loading(_));
        self.publish(LoadPhase::LoadingShown, view, shown, None);
        if shown {
            LazyLoadMetrics::record_loading_shown();
        }
        shown
    }

    fn finish(&self, outcome: Result<T, LoadError>, loading_shown: bool, elapsed: Duration) {
        match outcome {
            Ok(component) => {
                tracing::info!(elapsed_ms = elapsed.as_millis(), "Lazy component resolved");
                LazyLoadMetrics::record_resolved(elapsed);
                self.publish(LoadPhase::Resolved, View::Content(component), loading_shown, None);
            }
            Err(err) => {
                let phase = if err.is_timeout() {
                    LazyLoadMetrics::record_timeout();
                    LoadPhase::TimedOut
                } else {
                    LazyLoadMetrics::record_rejection();
                    LoadPhase::Rejected
                };
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis(),
                    error = %err,
                    "Lazy component failed to load"
                );
                let view = self
                    .options
                    .error_component
                    .clone()
                    .map_or_else(|| View::DefaultError(err.clone()), View::Error);
                self.publish(phase, view, loading_shown, Some(err));
            }
        }
    }

    fn publish(&self, phase: LoadPhase, view: View<T>, loading_shown: bool, error: Option<LoadError>) {
        self.tx.send_replace(RenderState {
            phase,
            view,
            loading_shown,
            error,
        });
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "loader panicked".to_string())
}
