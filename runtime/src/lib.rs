//! # Component Loader Runtime
//!
//! Runtime for loading UI components on demand.
//!
//! ## Core Components
//!
//! - **Registry**: read-only map from component name to loader and strategy
//! - **Dispatch**: hands out raw loaders or lazy components by name
//! - **Lazy components**: race a load against a display delay and a timeout
//! - **Performance monitor**: times loads per label
//!
//! Metrics, health reporting and configuration sit alongside.
//!
//! ## Example
//!
//! ```ignore
//! use component_loader_runtime::{ComponentLoader, LoadedComponent, ResourceRegistry};
//!
//! let loader = ComponentLoader::new(ResourceRegistry::standard(fetch_component));
//!
//! match loader.load(ComponentName::Dialog)? {
//!     LoadedComponent::Direct(loader) => render(loader.load().await?),
//!     LoadedComponent::Lazy(lazy) => {
//!         let mounted = lazy.mount();
//!         // observe mounted.state() as the load progresses
//!     }
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Dispatch function
pub mod dispatch;

/// Health reporting
pub mod health;

/// Deferred rendering with delay and timeout
pub mod lazy;

/// Prometheus metrics for observability
pub mod metrics;

/// Load-time instrumentation
pub mod monitor;

/// Resource registry
pub mod registry;

pub use config::{ConfigError, LoaderConfig};
pub use dispatch::{ComponentLoader, LoadedComponent};
pub use health::{HealthChecker, HealthReport, HealthStatus};
pub use lazy::{LazyComponent, MountedComponent, create_lazy_component};
pub use monitor::{LoadStats, PerformanceMonitor};
pub use registry::{LoadStrategy, Registration, ResourceRegistry};
