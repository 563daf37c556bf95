use crate::error::{AppError, Result};

use super::Config;

/// Collect every problem in `config` and report them together.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_api(config, &mut issues);
    validate_dashboard(config, &mut issues);

    if config.logging.level.trim().is_empty() {
        issues.push("logging.level must not be empty".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(issues.join("; ")))
    }
}

fn validate_api(config: &Config, issues: &mut Vec<String>) {
    let api = &config.api;
    let url = api.base_url.trim();
    if url.is_empty() {
        issues.push("api.base_url must not be empty".to_string());
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        issues.push(format!("api.base_url `{url}` must be an http(s) URL"));
    }

    if api.stock_api_key.trim().is_empty() {
        issues.push("api.stock_api_key must not be empty".to_string());
    }
    if api.symbol_api_key.trim().is_empty() {
        issues.push("api.symbol_api_key must not be empty".to_string());
    }

    for name in api.headers.keys() {
        if name.trim().is_empty() {
            issues.push("api.headers contains an empty header name".to_string());
        }
    }
}

fn validate_dashboard(config: &Config, issues: &mut Vec<String>) {
    if config.dashboard.items_per_page == 0 {
        issues.push("dashboard.items_per_page must be at least 1".to_string());
    }
}
