//! Loader handles.
//!
//! A [`Loader`] is the unit stored in the registry: a shared closure that
//! starts a fresh load every time it is called. Nothing is cached here; two
//! calls may trigger two fetches.

use crate::error::LoadError;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Boxed future returned by a [`Loader`].
pub type LoadFuture<T> = BoxFuture<'static, Result<T, LoadError>>;

type LoadFn<T> = dyn Fn() -> LoadFuture<T> + Send + Sync;

/// Reusable zero-argument async producer of a component.
///
/// Cloning is cheap and preserves identity: clones compare equal under
/// [`Loader::ptr_eq`].
///
/// # Example
///
/// ```
/// use component_loader_core::{LoadError, Loader};
///
/// # async fn example() -> Result<(), LoadError> {
/// let loader = Loader::new(|| async { Ok::<_, LoadError>(42) });
/// assert_eq!(loader.load().await?, 42);
/// # Ok(())
/// # }
/// ```
pub struct Loader<T> {
    load_fn: Arc<LoadFn<T>>,
}

impl<T: 'static> Loader<T> {
    /// Wrap an async closure as a loader.
    pub fn new<F, Fut>(load_fn: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, LoadError>> + Send + 'static,
    {
        Self {
            load_fn: Arc::new(move || load_fn().boxed()),
        }
    }
}

impl<T> Loader<T> {
    /// Start a new load.
    #[must_use]
    pub fn load(&self) -> LoadFuture<T> {
        (self.load_fn)()
    }

    /// Whether both handles point at the same registered closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.load_fn, &other.load_fn)
    }
}

impl<T> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self {
            load_fn: Arc::clone(&self.load_fn),
        }
    }
}

impl<T> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("handles", &Arc::strong_count(&self.load_fn))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_each_call_runs_the_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let loader = Loader::new(move || {
            let c = Arc::clone(&counter);
            async move { Ok::<_, LoadError>(c.fetch_add(1, Ordering::SeqCst)) }
        });

        assert_eq!(loader.load().await, Ok(0));
        assert_eq!(loader.load().await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clone_preserves_identity() {
        let loader = Loader::new(|| async { Ok::<_, LoadError>("card") });
        let other = Loader::new(|| async { Ok::<_, LoadError>("card") });

        assert!(loader.ptr_eq(&loader.clone()));
        assert!(!loader.ptr_eq(&other));
    }

    #[tokio::test]
    async fn test_rejection_passes_through() {
        let loader: Loader<()> = Loader::new(|| async { Err(LoadError::rejected("boom")) });
        let err = tokio_test::assert_err!(loader.load().await);
        assert_eq!(err, LoadError::rejected("boom"));
    }
}
