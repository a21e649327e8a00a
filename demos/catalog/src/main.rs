//! Catalog demo binary
//!
//! Loads every catalog component through the dispatch function. Simple
//! components are awaited directly; complex ones are mounted as lazy
//! components and their render states are printed as they change.

use component_loader_core::{ComponentName, LazyOptions, LoadError, LoadPhase, Loader, View};
use component_loader_runtime::metrics::MetricsServer;
use component_loader_runtime::{
    ComponentLoader, HealthChecker, LoadedComponent, LoaderConfig, PerformanceMonitor, ResourceRegistry,
    create_lazy_component,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simulated fetch latency per component.
const fn latency(name: ComponentName) -> Duration {
    match name {
        ComponentName::Dialog => Duration::from_millis(250),
        ComponentName::Select => Duration::from_millis(60),
        _ => Duration::from_millis(5),
    }
}

fn fetch(name: ComponentName) -> Loader<String> {
    Loader::new(move || async move {
        tokio::time::sleep(latency(name)).await;
        Ok::<_, LoadError>(format!("<{} />", name.as_str().to_lowercase()))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_demo=debug,component_loader_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LoaderConfig::from_env()?;
    info!(environment = %config.environment, version = %config.version, "Starting catalog demo");

    let mut metrics = MetricsServer::new("0.0.0.0:9090".parse()?);
    metrics.start()?;

    let complex = LazyOptions::builder()
        .loading_component("<spinner />".to_string())
        .error_component("<load-error />".to_string())
        .delay(config.complex_delay)
        .timeout(config.complex_timeout)
        .build();
    let registry = ResourceRegistry::builder().complex_options(complex).standard(fetch).build();
    let dispatcher = ComponentLoader::new(registry);
    let monitor = Arc::new(PerformanceMonitor::new());
    let health = HealthChecker::new(config.clone(), Arc::clone(&monitor));

    println!("=== Catalog Demo: Lazy Component Loading ===\n");

    for name in ComponentName::ALL {
        monitor.start(name.as_str());
        match dispatcher.load(name)? {
            LoadedComponent::Direct(loader) => {
                let markup = loader.load().await?;
                println!("{name:<12} direct  -> {markup}");
            }
            LoadedComponent::Lazy(lazy) => {
                let mut mounted = lazy.mount();
                let shown = mounted
                    .wait_for(|s| s.phase == LoadPhase::LoadingShown || s.is_settled())
                    .await;
                if let View::Loading(placeholder) = &shown.view {
                    println!("{name:<12} lazy    .. {placeholder}");
                }
                let state = mounted.settled().await?;
                match state.view {
                    View::Content(markup) => println!("{name:<12} lazy    -> {markup}"),
                    View::Error(placeholder) => println!("{name:<12} lazy    !! {placeholder}"),
                    other => println!("{name:<12} lazy    ?? {other:?}"),
                }
            }
        }
        let elapsed = monitor.end(name.as_str());
        println!("{:<12}         {:.2}ms", "", elapsed.as_secs_f64() * 1000.0);
    }

    // A core component can still be deferred explicitly with the configured defaults.
    let card = create_lazy_component(fetch(ComponentName::Card), config.default_options());
    let (state, elapsed) = monitor.instrument("Card (deferred)", card.mount().settled()).await;
    if let View::Content(markup) = state?.view {
        println!(
            "\n{:<12} lazy    -> {markup} ({:.2}ms, delay {:?}, timeout {:?})",
            "Card",
            elapsed.as_secs_f64() * 1000.0,
            config.default_delay,
            config.default_timeout
        );
    }

    if let Err(err) = dispatcher.load_by_name("Carousel") {
        println!("\nUnknown component: {err}");
    }

    println!("\nHealth: {}", health.check().to_json()?);
    if let Some(rendered) = metrics.render() {
        let loader_lines = rendered.lines().filter(|line| !line.starts_with('#')).count();
        println!("Metrics: {loader_lines} samples recorded");
    }

    Ok(())
}
