/// Process-wide configuration
///
/// Loaded once at startup from the environment (a `.env` file is honoured
/// through `dotenvy`) and handed to `AppState::initialize`.
use crate::shared::errors::{AppError, AppResult};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_LOG_LEVEL: &str = "CULTURASTOCK_LOG_LEVEL";
pub const ENV_SNAPSHOT_PATH: &str = "CULTURASTOCK_SNAPSHOT_PATH";
pub const ENV_CULTURAL_GROUPS: &str = "CULTURASTOCK_CULTURAL_GROUPS";
pub const ENV_SUGGESTION_LIMIT: &str = "CULTURASTOCK_SUGGESTION_LIMIT";
pub const ENV_MAX_CAS_RETRIES: &str = "CULTURASTOCK_MAX_CAS_RETRIES";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: log::LevelFilter,

    /// JSON snapshot the in-memory store is loaded from and flushed to on shutdown
    pub snapshot_path: Option<PathBuf>,

    /// Known cultural groups. Empty means any non-empty text is accepted.
    pub cultural_groups: Vec<String>,

    /// Maximum number of borrower suggestions returned
    pub suggestion_limit: usize,

    /// Retries of a guarded status update before giving up with `Conflict`
    pub max_cas_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: log::LevelFilter::Info,
            snapshot_path: None,
            cultural_groups: Vec::new(),
            suggestion_limit: 5,
            max_cas_retries: 3,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_level = match value(ENV_LOG_LEVEL) {
            Some(raw) => log::LevelFilter::from_str(&raw).map_err(|_| {
                AppError::ConfigError(format!("{} has invalid level '{}'", ENV_LOG_LEVEL, raw))
            })?,
            None => defaults.log_level,
        };

        let cultural_groups = value(ENV_CULTURAL_GROUPS)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|group| !group.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let suggestion_limit = parse_number(ENV_SUGGESTION_LIMIT, value(ENV_SUGGESTION_LIMIT))?
            .unwrap_or(defaults.suggestion_limit);
        if suggestion_limit == 0 {
            return Err(AppError::ConfigError(format!(
                "{} must be positive",
                ENV_SUGGESTION_LIMIT
            )));
        }

        let max_cas_retries = parse_number(ENV_MAX_CAS_RETRIES, value(ENV_MAX_CAS_RETRIES))?
            .unwrap_or(defaults.max_cas_retries);

        Ok(Self {
            log_level,
            snapshot_path: value(ENV_SNAPSHOT_PATH).map(PathBuf::from),
            cultural_groups,
            suggestion_limit,
            max_cas_retries,
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>) -> AppResult<Option<T>> {
    raw.map(|raw| {
        raw.parse::<T>().map_err(|_| {
            AppError::ConfigError(format!("{} must be a non-negative integer, got '{}'", key, raw))
        })
    })
    .transpose()
}
