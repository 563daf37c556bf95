use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::error::{AppError, Context, Result};
use crate::fetch::TimeSeriesFunction;

use super::{validator, Config};

pub const ENV_STOCK_API_KEY: &str = "STOCK_API_KEY";
pub const ENV_SYMBOL_API_KEY: &str = "STOCK_SYMBOL_API_KEY";
pub const ENV_BASE_URL: &str = "STOCK_API_BASE_URL";

/// Builtin defaults, overlaid by the JSON file at `path` (if any), then by the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = Config::builtin();

    if let Some(path) = path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config JSON at {}", path.display()))?;
        let raw: RawConfig = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse config JSON at {}", path.display()))?;
        raw.apply(&mut config)?;
    }

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validator::validate_config(&config)?;

    Ok(config)
}

/// Apply environment overrides through `lookup` so callers can supply their own source.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(key) = non_empty(ENV_STOCK_API_KEY) {
        config.api.stock_api_key = key;
    }
    if let Some(key) = non_empty(ENV_SYMBOL_API_KEY) {
        config.api.symbol_api_key = key;
    }
    if let Some(url) = non_empty(ENV_BASE_URL) {
        config.api.base_url = url;
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    api: RawApiConfig,
    #[serde(default)]
    dashboard: RawDashboardConfig,
    #[serde(default)]
    logging: RawLoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApiConfig {
    base_url: Option<String>,
    stock_api_key: Option<String>,
    symbol_api_key: Option<String>,
    #[serde(default)]
    headers: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDashboardConfig {
    items_per_page: Option<usize>,
    debounce_ms: Option<u64>,
    default_function: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl RawConfig {
    fn apply(self, config: &mut Config) -> Result<()> {
        let RawConfig {
            api,
            dashboard,
            logging,
        } = self;

        if let Some(url) = api.base_url {
            config.api.base_url = url;
        }
        if let Some(key) = api.stock_api_key {
            config.api.stock_api_key = key;
        }
        if let Some(key) = api.symbol_api_key {
            config.api.symbol_api_key = key;
        }
        config.api.headers.extend(api.headers);

        if let Some(items) = dashboard.items_per_page {
            config.dashboard.items_per_page = items;
        }
        if let Some(ms) = dashboard.debounce_ms {
            config.dashboard.debounce_ms = ms;
        }
        if let Some(name) = dashboard.default_function {
            let function = name.parse::<TimeSeriesFunction>().map_err(|_| {
                AppError::Config(format!(
                    "dashboard.default_function `{name}` is not a known time series"
                ))
            })?;
            config.dashboard.default_function = Some(function);
        }

        if let Some(level) = logging.level {
            config.logging.level = level;
        }
        if let Some(file) = logging.file {
            config.logging.file = Some(file.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn file_values_override_builtin_defaults() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "api": {"stock_api_key": "${MY_KEY}", "headers": {"Accept": "application/json"}},
                "dashboard": {"items_per_page": 25, "default_function": "weekly-adjusted"},
                "logging": {"level": "debug", "file": "dashboard.log"}
            }"#,
        )
        .unwrap();

        let mut config = Config::builtin();
        raw.apply(&mut config).unwrap();

        assert_eq!(config.api.stock_api_key, "${MY_KEY}");
        assert_eq!(config.api.symbol_api_key, "demo");
        assert_eq!(config.api.headers.len(), 2);
        assert_eq!(config.dashboard.items_per_page, 25);
        assert_eq!(config.dashboard.debounce_ms, 300);
        assert_eq!(
            config.dashboard.default_function,
            Some(TimeSeriesFunction::WeeklyAdjusted)
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_unknown_series_and_unknown_keys() {
        let file = write_config(r#"{"dashboard": {"default_function": "hourly"}}"#);
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("hourly"), "unexpected error: {err}");

        let file = write_config(r#"{"dashbord": {}}"#);
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn environment_overrides_win() {
        let mut config = Config::builtin();
        apply_env_overrides(&mut config, |name| match name {
            ENV_STOCK_API_KEY => Some("live-key".to_string()),
            ENV_SYMBOL_API_KEY => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.api.stock_api_key, "live-key");
        assert_eq!(config.api.symbol_api_key, "demo");
        assert_eq!(config.api.base_url, crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = load_config(Some(Path::new("/nonexistent/dashboard.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dashboard.json"));
    }
}
