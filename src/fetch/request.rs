use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ApiConfig;
use crate::error::{AppError, Context};

use super::series::TimeSeriesFunction;
use super::FetchResult;

pub const SYMBOL_SEARCH_FUNCTION: &str = "SYMBOL_SEARCH";

/// Parameters of a `SYMBOL_SEARCH` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolQuery {
    pub keywords: String,
}

/// Parameters of a time-series fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub function: TimeSeriesFunction,
    pub symbol: String,
}

#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
    pub headers: HeaderMap,
}

impl PreparedRequest {
    /// Query string with the API key masked, for log lines.
    pub fn redacted(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                if *key == "apikey" {
                    format!("{key}=***")
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

pub fn prepare_symbol_request(api: &ApiConfig, query: &SymbolQuery) -> FetchResult<PreparedRequest> {
    let keywords = query.keywords.trim();
    if keywords.is_empty() {
        return Err(AppError::message("Symbol search requires keywords"));
    }

    let apikey = expand_env_vars(&api.symbol_api_key)?;
    let params = vec![
        ("function", SYMBOL_SEARCH_FUNCTION.to_string()),
        ("keywords", keywords.to_string()),
        ("apikey", apikey),
    ];

    Ok(PreparedRequest {
        url: api.base_url.clone(),
        params,
        headers: build_headers(&api.headers)?,
    })
}

pub fn prepare_series_request(api: &ApiConfig, query: &SeriesQuery) -> FetchResult<PreparedRequest> {
    let symbol = query.symbol.trim();
    if symbol.is_empty() {
        return Err(AppError::message("Time series request requires a symbol"));
    }

    let apikey = expand_env_vars(&api.stock_api_key)?;
    let params = vec![
        ("function", query.function.api_name().to_string()),
        ("symbol", symbol.to_string()),
        ("apikey", apikey),
    ];

    Ok(PreparedRequest {
        url: api.base_url.clone(),
        params,
        headers: build_headers(&api.headers)?,
    })
}

/// Replace `${NAME}` placeholders with the value of environment variable `NAME`.
pub fn expand_env_vars(value: &str) -> FetchResult<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder in API settings",
                ));
            }

            if !closed {
                return Err(AppError::message(
                    "Unterminated environment placeholder in API settings",
                ));
            }

            let value = std::env::var(&name).with_context(|| {
                format!("Environment variable {} referenced by API settings is not set", name)
            })?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

fn build_headers(headers: &HashMap<String, String>) -> FetchResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .with_context(|| format!("Invalid header name: {}", key))?;
        let expanded = expand_env_vars(value)?;
        let header_value = HeaderValue::from_str(&expanded)
            .with_context(|| format!("Invalid header value for {}", key))?;
        map.insert(name, header_value);
    }
    Ok(map)
}
