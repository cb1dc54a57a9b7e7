use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single catalog entry. Entries are opaque strings and are never mutated
/// after insertion.
pub type Item = String;

/// Upper bound on the number of items any keyword search returns.
pub const MAX_SEARCH_RESULTS: usize = 100;

/// Minimum payload length accepted by [`crate::CatalogStore::validate_payload`].
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Size limits applied by a catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLimits {
    #[serde(default = "CatalogLimits::default_max_search_results")]
    pub max_search_results: usize,
    #[serde(default = "CatalogLimits::default_page_size")]
    pub default_page_size: usize,
}

impl CatalogLimits {
    pub fn new(max_search_results: usize, default_page_size: usize) -> Self {
        Self {
            max_search_results,
            default_page_size,
        }
    }

    /// Clamps a caller supplied result limit to `max_search_results`.
    pub fn clamp_limit(&self, requested: usize) -> usize {
        requested.min(self.max_search_results)
    }

    const fn default_max_search_results() -> usize {
        MAX_SEARCH_RESULTS
    }

    const fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self::new(MAX_SEARCH_RESULTS, DEFAULT_PAGE_SIZE)
    }
}

/// Point-in-time view of a store, captured under a single lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub initialized: bool,
    pub items: Vec<Item>,
}

/// Errors surfaced by catalog operations. The store is left unchanged
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("validation failed: {0}")]
    Validation(String),
}

impl CatalogError {
    /// Returns a stable identifier suitable for logging/metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Validation(_) => "validation",
        }
    }
}
