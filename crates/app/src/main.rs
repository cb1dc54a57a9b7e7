mod seed;
mod telemetry;

use catalog_core::{CatalogLimits, CatalogStore};
use catalog_util::{load_env_file, CatalogConfig};
use tracing::info;

use crate::telemetry::MetricsObserver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = CatalogConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let limits = CatalogLimits::new(config.max_search_results, config.default_page_size);
    let store = CatalogStore::with_observer(limits, MetricsObserver::default());
    info!(
        stage = "app",
        env = %config.environment.as_str(),
        max_search_results = limits.max_search_results,
        default_page_size = limits.default_page_size,
        seed_items = config.seed_items.len(),
        "catalog store created"
    );

    let report = seed::seed_catalog(&store, &config.seed_items);
    let snapshot = serde_json::to_string(&store.snapshot())?;
    info!(
        stage = "app",
        added = report.added,
        rejected = report.rejected,
        %snapshot,
        "catalog seeded"
    );

    print!("{}", metrics.render());
    Ok(())
}
