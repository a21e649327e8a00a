//! Dispatch function.
//!
//! [`ComponentLoader::load`] turns a component name into something the
//! caller can render: the raw loader for directly loaded components, or a
//! [`LazyComponent`] for components registered with a lazy strategy. It never
//! invokes the loader itself.
//!
//! # Example
//!
//! ```rust
//! use component_loader_core::{ComponentName, LoadError, Loader};
//! use component_loader_runtime::dispatch::ComponentLoader;
//! use component_loader_runtime::registry::ResourceRegistry;
//!
//! let registry = ResourceRegistry::standard(|name| {
//!     Loader::new(move || async move { Ok::<_, LoadError>(name.as_str()) })
//! });
//! let loader = ComponentLoader::new(registry);
//!
//! assert!(loader.load(ComponentName::Dialog).is_ok_and(|c| c.is_lazy()));
//! assert_eq!(
//!     loader.load_by_name("Carousel").unwrap_err().to_string(),
//!     "Component \"Carousel\" not found in registry",
//! );
//! ```

use crate::lazy::LazyComponent;
use crate::metrics::DispatchMetrics;
use crate::registry::{LoadStrategy, ResourceRegistry};
use component_loader_core::{ComponentName, DispatchError, Loader};
use std::sync::Arc;

/// Result of a dispatch.
#[derive(Debug, Clone)]
pub enum LoadedComponent<T> {
    /// Raw loader; the caller invokes and awaits it
    Direct(Loader<T>),
    /// Loader wrapped for deferred rendering
    Lazy(LazyComponent<T>),
}

impl<T> LoadedComponent<T> {
    /// Whether the component was lazily wrapped.
    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// The raw loader, if the component was not wrapped.
    #[must_use]
    pub const fn as_loader(&self) -> Option<&Loader<T>> {
        match self {
            Self::Direct(loader) => Some(loader),
            Self::Lazy(_) => None,
        }
    }

    /// The lazy wrapper, if the component was wrapped.
    #[must_use]
    pub const fn as_lazy(&self) -> Option<&LazyComponent<T>> {
        match self {
            Self::Lazy(component) => Some(component),
            Self::Direct(_) => None,
        }
    }

    /// The underlying loader, wrapped or not.
    #[must_use]
    pub const fn loader(&self) -> &Loader<T> {
        match self {
            Self::Direct(loader) => loader,
            Self::Lazy(component) => component.loader(),
        }
    }
}

/// Looks components up in a [`ResourceRegistry`].
#[derive(Debug)]
pub struct ComponentLoader<T> {
    registry: Arc<ResourceRegistry<T>>,
}

impl<T> Clone for ComponentLoader<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: Clone> ComponentLoader<T> {
    /// Create a dispatcher over `registry`.
    #[must_use]
    pub fn new(registry: ResourceRegistry<T>) -> Self {
        Self::shared(Arc::new(registry))
    }

    /// Create a dispatcher over an already shared registry.
    #[must_use]
    pub const fn shared(registry: Arc<ResourceRegistry<T>>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher reads from.
    #[must_use]
    pub fn registry(&self) -> &ResourceRegistry<T> {
        &self.registry
    }

    /// Resolve `name` to a loader or a lazy component.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotFound`] if `name` is not registered.
    pub fn load(&self, name: ComponentName) -> Result<LoadedComponent<T>, DispatchError> {
        let Some(registration) = self.registry.get(name) else {
            return Err(not_found(name.as_str()));
        };

        DispatchMetrics::record_dispatch(registration.strategy.label());
        tracing::trace!(component = %name, strategy = registration.strategy.label(), "Dispatching component");

        Ok(match &registration.strategy {
            LoadStrategy::Direct => LoadedComponent::Direct(registration.loader.clone()),
            LoadStrategy::Lazy(options) => LoadedComponent::Lazy(LazyComponent::with_options(
                registration.loader.clone(),
                options.clone(),
            )),
        })
    }

    /// Resolve a component by its string name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotFound`] if `name` is not a known component
    /// or is not registered.
    pub fn load_by_name(&self, name: &str) -> Result<LoadedComponent<T>, DispatchError> {
        match name.parse::<ComponentName>() {
            Ok(parsed) => self.load(parsed),
            Err(_) => Err(not_found(name)),
        }
    }
}

fn not_found(name: &str) -> DispatchError {
    DispatchMetrics::record_not_found();
    tracing::warn!(component = name, "Component not found in registry");
    DispatchError::not_found(name)
}
