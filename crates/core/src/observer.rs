use tracing::{info, warn};

/// Receives notifications about notable catalog events.
///
/// Each store owns its observer, so tests can attach a recording
/// implementation without touching process-wide logging state.
pub trait CatalogObserver: Send + Sync {
    /// A search was attempted with an absent or empty keyword.
    fn empty_keyword(&self) {}

    /// The store transitioned to the initialized state.
    fn initialized(&self) {}

    /// An item was appended to the catalog.
    fn item_added(&self, _item: &str) {}
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CatalogObserver for TracingObserver {
    fn empty_keyword(&self) {
        warn!(stage = "catalog", "search keyword is empty");
    }

    fn initialized(&self) {
        info!(stage = "catalog", "catalog initialized");
    }

    fn item_added(&self, item: &str) {
        info!(stage = "catalog", %item, "item added");
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CatalogObserver for NoopObserver {}

impl<T: CatalogObserver + ?Sized> CatalogObserver for std::sync::Arc<T> {
    fn empty_keyword(&self) {
        (**self).empty_keyword();
    }

    fn initialized(&self) {
        (**self).initialized();
    }

    fn item_added(&self, item: &str) {
        (**self).item_added(item);
    }
}
