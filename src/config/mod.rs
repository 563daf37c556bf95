use std::collections::HashMap;
use std::path::PathBuf;

use crate::fetch::TimeSeriesFunction;

pub mod loader;
pub mod validator;

pub use loader::{apply_env_overrides, load_config};
pub use validator::validate_config;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_API_KEY: &str = "demo";

/// Remote endpoint and credentials. Key values may hold `${VAR}` placeholders.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub stock_api_key: String,
    pub symbol_api_key: String,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub items_per_page: usize,
    pub debounce_ms: u64,
    pub default_function: Option<TimeSeriesFunction>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub level: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn builtin() -> Self {
        let headers = HashMap::from([(
            "User-Agent".to_string(),
            concat!("stock-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        )]);

        Config {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                stock_api_key: DEFAULT_API_KEY.to_string(),
                symbol_api_key: DEFAULT_API_KEY.to_string(),
                headers,
            },
            dashboard: DashboardConfig {
                items_per_page: 10,
                debounce_ms: 300,
                default_function: None,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                file: None,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
