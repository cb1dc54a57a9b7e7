pub mod config;

use std::env;

pub use config::{CatalogConfig, ConfigError, Environment};

/// Loads environment variables from `.env` when available.
///
/// Missing files are ignored so the function is safe in production builds
/// where dotenv files are not deployed.
pub fn load_env_file() {
    let _ = dotenvy::dotenv();
}

/// Reads a positive count from the environment variable `key`.
///
/// Falls back to `default` when the variable is not set.
pub fn positive_count_from_env(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Ok(value) = env::var(key) else {
        return Ok(default);
    };

    let parsed = value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidNumber { key, value })?;
    if parsed == 0 {
        return Err(ConfigError::ZeroLimit(key));
    }
    Ok(parsed)
}

/// Splits a comma separated seed list into trimmed entries.
///
/// Blank entries are kept so the catalog can reject and report them; only a
/// wholly blank list yields no entries.
pub fn split_seed_items(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|item| item.trim().to_string()).collect()
}
