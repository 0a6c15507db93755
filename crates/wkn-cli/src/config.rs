//! # Runtime Configuration
//!
//! Builds the store configuration from defaults, `WKN_*` environment
//! variables and the `--db-path` flag (highest precedence).
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `WKN_DB_PATH` | path | `.wkn` |
//! | `WKN_LOCK_ATTEMPTS` | integer >= 1 | `5` |
//! | `WKN_LOCK_RETRY_MS` | integer | `200` |
//! | `WKN_LOCK_STRATEGY` | `token`, `flock` | `token` |
//! | `WKN_ON_CORRUPT` | `fail`, `reset` | `fail` |
//! | `WKN_FORMAT` | `json`, `bincode` | `json` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};
use wkn_db::StoreConfig;

/// Load configuration from the process environment.
pub fn load_config(db_path: Option<PathBuf>) -> StoreConfig {
    config_from(|key| std::env::var(key).ok(), db_path)
}

/// Build a configuration from an arbitrary variable source.
///
/// Invalid values are logged and ignored.
pub fn config_from<F>(var: F, db_path: Option<PathBuf>) -> StoreConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = StoreConfig::default();

    if let Some(path) = var("WKN_DB_PATH").filter(|p| !p.is_empty()) {
        config.db_path = PathBuf::from(path);
    }
    if let Some(path) = db_path {
        config.db_path = path;
    }

    if let Some(attempts) = parse_var::<u32, _>(&var, "WKN_LOCK_ATTEMPTS") {
        if attempts == 0 {
            warn!("WKN_LOCK_ATTEMPTS must be at least 1, keeping {}", config.lock.max_attempts);
        } else {
            config.lock.max_attempts = attempts;
        }
    }
    if let Some(ms) = parse_var::<u64, _>(&var, "WKN_LOCK_RETRY_MS") {
        config.lock.retry_delay = Duration::from_millis(ms);
    }
    if let Some(strategy) = parse_var(&var, "WKN_LOCK_STRATEGY") {
        config.lock.strategy = strategy;
    }
    if let Some(policy) = parse_var(&var, "WKN_ON_CORRUPT") {
        config.corrupt_policy = policy;
    }
    if let Some(format) = parse_var(&var, "WKN_FORMAT") {
        config.format = format;
    }

    info!(
        db_path = %config.db_path.display(),
        lock_strategy = ?config.lock.strategy,
        format = ?config.format,
        "configuration loaded"
    );
    config
}

fn parse_var<T, F>(var: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
