use catalog_core::{CatalogObserver, TracingObserver};
use catalog_util::CatalogConfig;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;
use tracing_subscriber::{
    fmt::{self as tracing_fmt, time::UtcTime},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer, Registry,
};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize tracing: {0}")]
    Tracing(#[from] TryInitError),
    #[error("failed to initialize prometheus recorder: {0}")]
    Metrics(#[from] BuildError),
}

/// Installs the global subscriber: JSON lines in production, pretty output
/// everywhere else. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(config: &CatalogConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> =
        if config.environment.uses_json_logs() {
            tracing_fmt::layer()
                .json()
                .with_target(false)
                .with_timer(UtcTime::rfc_3339())
                .boxed()
        } else {
            tracing_fmt::layer()
                .pretty()
                .with_target(false)
                .with_timer(UtcTime::rfc_3339())
                .boxed()
        };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::info!(
        stage = "telemetry",
        env = %config.environment.as_str(),
        version = env!("CARGO_PKG_VERSION"),
        "tracing initialized"
    );
    Ok(())
}

/// Installs the prometheus recorder and registers the catalog metrics.
pub fn init_metrics() -> Result<PrometheusHandle, TelemetryError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_catalog_metrics();
    Ok(handle)
}

fn describe_catalog_metrics() {
    describe_gauge!(
        "catalog_initialized",
        "1 once the catalog has performed its one-time initialization"
    );
    describe_counter!(
        "catalog_items_added_total",
        "Count of items appended to the catalog"
    );
    describe_counter!(
        "catalog_empty_keyword_total",
        "Count of searches rejected because the keyword was empty"
    );
    describe_counter!(
        "catalog_seed_rejected_total",
        "Count of configured seed items the catalog refused, labelled by error kind"
    );
}

/// Catalog observer that records metrics and then logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObserver {
    inner: TracingObserver,
}

impl CatalogObserver for MetricsObserver {
    fn empty_keyword(&self) {
        counter!("catalog_empty_keyword_total").increment(1);
        self.inner.empty_keyword();
    }

    fn initialized(&self) {
        gauge!("catalog_initialized").set(1.0);
        self.inner.initialized();
    }

    fn item_added(&self, item: &str) {
        counter!("catalog_items_added_total").increment(1);
        self.inner.item_added(item);
    }
}
