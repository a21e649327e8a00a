//! Resource registry.
//!
//! Maps each [`ComponentName`] to its loader and its loading strategy. The
//! registry is assembled once at startup and is read-only afterwards; the
//! dispatch function only ever reads from it.
//!
//! Whether a component is loaded directly or through a lazy wrapper is
//! decided here, at registration time.
//!
//! # Example
//!
//! ```rust
//! use component_loader_core::{ComponentName, LoadError, Loader};
//! use component_loader_runtime::registry::ResourceRegistry;
//!
//! let registry = ResourceRegistry::builder()
//!     .simple(ComponentName::Button, Loader::new(|| async { Ok::<_, LoadError>("<button/>") }))
//!     .complex(ComponentName::Dialog, Loader::new(|| async { Ok::<_, LoadError>("<dialog/>") }))
//!     .build();
//!
//! assert_eq!(registry.len(), 2);
//! assert!(registry.contains(ComponentName::Dialog));
//! ```

use component_loader_core::{ComponentName, ComponentTier, LazyOptions, Loader};
use std::collections::BTreeMap;

/// How a registered component is handed out by the dispatch function.
#[derive(Debug, Clone)]
pub enum LoadStrategy<T> {
    /// Return the raw loader
    Direct,
    /// Wrap the loader in a lazy component with these options
    Lazy(LazyOptions<T>),
}

impl<T> LoadStrategy<T> {
    /// Whether this strategy wraps the loader.
    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// Metric label for this strategy.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Lazy(_) => "lazy",
        }
    }
}

/// A loader together with its strategy.
#[derive(Debug, Clone)]
pub struct Registration<T> {
    /// Loader producing the component
    pub loader: Loader<T>,
    /// Strategy chosen at registration time
    pub strategy: LoadStrategy<T>,
}

/// Read-only mapping from component name to registration.
#[derive(Debug, Clone)]
pub struct ResourceRegistry<T> {
    entries: BTreeMap<ComponentName, Registration<T>>,
}

impl<T> ResourceRegistry<T> {
    /// Create a new registry builder.
    #[must_use]
    pub fn builder() -> ResourceRegistryBuilder<T> {
        ResourceRegistryBuilder {
            entries: BTreeMap::new(),
            complex_options: LazyOptions::complex(),
        }
    }

    /// Look up a registration.
    #[must_use]
    pub fn get(&self, name: ComponentName) -> Option<&Registration<T>> {
        self.entries.get(&name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: ComponentName) -> bool {
        self.entries.contains_key(&name)
    }

    /// Registered names, in catalog order.
    pub fn names(&self) -> impl Iterator<Item = ComponentName> + '_ {
        self.entries.keys().copied()
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> ResourceRegistry<T> {
    /// Register every known component, choosing the strategy from its tier.
    ///
    /// `factory` builds the loader for each name.
    pub fn standard<F>(factory: F) -> Self
    where
        F: FnMut(ComponentName) -> Loader<T>,
    {
        Self::builder().standard(factory).build()
    }
}

/// Builder for [`ResourceRegistry`].
#[derive(Debug)]
pub struct ResourceRegistryBuilder<T> {
    entries: BTreeMap<ComponentName, Registration<T>>,
    complex_options: LazyOptions<T>,
}

impl<T: Clone> ResourceRegistryBuilder<T> {
    /// Options applied by [`complex`](Self::complex) registrations made after this call.
    #[must_use]
    pub fn complex_options(mut self, options: LazyOptions<T>) -> Self {
        self.complex_options = options;
        self
    }

    /// Register a component returned as its raw loader.
    #[must_use]
    pub fn simple(self, name: ComponentName, loader: Loader<T>) -> Self {
        self.register(name, loader, LoadStrategy::Direct)
    }

    /// Register a component that is always lazily wrapped with the complex options.
    #[must_use]
    pub fn complex(self, name: ComponentName, loader: Loader<T>) -> Self {
        let options = self.complex_options.clone();
        self.register(name, loader, LoadStrategy::Lazy(options))
    }

    /// Register a lazily wrapped component with explicit options.
    #[must_use]
    pub fn lazy(self, name: ComponentName, loader: Loader<T>, options: LazyOptions<T>) -> Self {
        self.register(name, loader, LoadStrategy::Lazy(options))
    }

    /// Register every known component, choosing the strategy from its tier.
    #[must_use]
    pub fn standard<F>(self, mut factory: F) -> Self
    where
        F: FnMut(ComponentName) -> Loader<T>,
    {
        ComponentName::ALL.into_iter().fold(self, |builder, name| {
            let loader = factory(name);
            match name.tier() {
                ComponentTier::Core => builder.simple(name, loader),
                ComponentTier::Complex => builder.complex(name, loader),
            }
        })
    }

    /// Build the [`ResourceRegistry`].
    #[must_use]
    pub fn build(self) -> ResourceRegistry<T> {
        tracing::debug!(components = self.entries.len(), "Resource registry built");
        ResourceRegistry {
            entries: self.entries,
        }
    }

    fn register(mut self, name: ComponentName, loader: Loader<T>, strategy: LoadStrategy<T>) -> Self {
        if self.entries.insert(name, Registration { loader, strategy }).is_some() {
            tracing::warn!(component = %name, "Component registered twice, keeping the latest loader");
        }
        self
    }
}
