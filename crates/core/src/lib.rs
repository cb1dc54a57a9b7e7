//! In-memory catalog store with keyword search, prefix lookup and
//! append-only insertion.

pub mod observer;
pub mod store;
pub mod types;

pub use observer::{CatalogObserver, NoopObserver, TracingObserver};
pub use store::CatalogStore;
pub use types::{
    CatalogError, CatalogLimits, CatalogSnapshot, Item, DEFAULT_PAGE_SIZE, MAX_SEARCH_RESULTS,
};
