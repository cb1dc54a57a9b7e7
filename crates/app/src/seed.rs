use catalog_core::{CatalogObserver, CatalogStore};
use metrics::counter;
use tracing::warn;

/// Outcome of inserting the configured seed items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub added: usize,
    pub rejected: usize,
}

/// Inserts `items` in order. Rejected entries are counted and logged; they
/// never abort seeding.
pub fn seed_catalog<O: CatalogObserver>(
    store: &CatalogStore<O>,
    items: &[String],
) -> SeedReport {
    let mut report = SeedReport::default();
    for item in items {
        match store.add_item(item.as_str()) {
            Ok(()) => report.added += 1,
            Err(err) => {
                counter!("catalog_seed_rejected_total", "kind" => err.kind()).increment(1);
                warn!(stage = "seed", %item, error = %err, "seed item rejected");
                report.rejected += 1;
            }
        }
    }
    report
}
