use std::{env, fmt};

use catalog_core::{DEFAULT_PAGE_SIZE, MAX_SEARCH_RESULTS};

use super::{positive_count_from_env, split_seed_items};

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns `true` when logs should be emitted as JSON lines.
    pub fn uses_json_logs(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns the canonical name used for logging/metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub environment: Environment,
    pub max_search_results: usize,
    pub default_page_size: usize,
    /// Items inserted into the catalog at startup.
    pub seed_items: Vec<String>,
}

impl CatalogConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("CATALOG_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;
        let max_search_results =
            positive_count_from_env("CATALOG_MAX_SEARCH_RESULTS", MAX_SEARCH_RESULTS)?;
        let default_page_size =
            positive_count_from_env("CATALOG_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let seed_items = env::var("CATALOG_SEED")
            .map(|raw| split_seed_items(&raw))
            .unwrap_or_default();

        Ok(Self {
            environment,
            max_search_results,
            default_page_size,
            seed_items,
        })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    InvalidNumber { key: &'static str, value: String },
    ZeroLimit(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "CATALOG_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer (got {value})")
            }
            Self::ZeroLimit(key) => write!(f, "{key} must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
