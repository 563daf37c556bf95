//! Composition root: builds the client and store, then runs one command.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use crate::app::effects::{fetch_stock_data, search_symbols};
use crate::app::{QueryController, QueryState, QueryStore};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::fetch::{AlphaVantageClient, MarketDataApi, TimeSeriesFunction};
use crate::logging::LogBuffer;
use crate::ui::report::{self, OutputFormat};

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub symbol: String,
    pub function: TimeSeriesFunction,
    pub page: usize,
    pub format: OutputFormat,
}

pub fn build_client(config: &Config) -> Result<Arc<dyn MarketDataApi>> {
    Ok(Arc::new(AlphaVantageClient::new(config.api.clone())?))
}

/// Run the full-screen dashboard until the user quits.
pub fn run_dashboard(config: &Config, logs: Option<&LogBuffer>) -> Result<()> {
    let api = build_client(config)?;
    let mut controller = QueryController::new(api, &config.dashboard);
    crate::ui::run_dashboard(&mut controller, logs)
}

pub async fn run_search(config: &Config, keywords: &str) -> Result<()> {
    let api = build_client(config)?;
    let state = until_cancelled(search_state(api.as_ref(), keywords)).await?;

    let mut out = io::stdout().lock();
    if state.suggestions.is_empty() {
        writeln!(out, "No matches for `{}`.", keywords.trim())?;
        return Ok(());
    }
    report::write_matches(&mut out, &state.suggestions)
}

pub async fn run_fetch(config: &Config, options: &FetchOptions) -> Result<()> {
    let api = build_client(config)?;
    let items_per_page = config.dashboard.items_per_page;
    let state = until_cancelled(fetch_state(api.as_ref(), options, items_per_page)).await?;

    let color = io::stdout().is_terminal();
    let mut out = io::stdout().lock();
    render_fetch(&mut out, &state, options.format, items_per_page, color)
}

pub fn list_series() -> Result<()> {
    report::write_series_list(&mut io::stdout().lock())
}

/// Drive the suggestion flow headless through a fresh store.
pub async fn search_state(api: &dyn MarketDataApi, keywords: &str) -> Result<QueryState> {
    let mut store = QueryStore::new();
    store.set_symbol(keywords);
    search_symbols(&mut store, api, keywords).await;
    Ok(store.state().clone())
}

/// Drive the data flow headless through a fresh store, ending on `options.page`.
pub async fn fetch_state(
    api: &dyn MarketDataApi,
    options: &FetchOptions,
    items_per_page: usize,
) -> Result<QueryState> {
    let mut store = QueryStore::new();
    store.set_symbol(options.symbol.as_str());
    store.set_time_series_function(Some(options.function));

    if !fetch_stock_data(&mut store, api).await {
        return Err(AppError::message("a symbol is required"));
    }
    if let Some(error) = &store.state().error {
        return Err(AppError::message(error.clone()));
    }

    store.select_page(options.page, items_per_page);
    Ok(store.state().clone())
}

pub fn render_fetch<W: Write>(
    out: &mut W,
    state: &QueryState,
    format: OutputFormat,
    items_per_page: usize,
    color: bool,
) -> Result<()> {
    let Some(dataset) = state.data.as_deref() else {
        return Err(AppError::message("no data to show"));
    };

    match format {
        OutputFormat::Csv => report::write_csv(out, dataset),
        OutputFormat::Table => {
            writeln!(out, "{} · {}", state.title(), dataset.function.label())?;
            if state.used_fallback {
                writeln!(out, "No data from the API; showing bundled sample data.")?;
            }
            writeln!(out)?;
            match state.table_page(items_per_page) {
                Some(page) => report::write_page(out, &page, color),
                None => Ok(()),
            }
        }
    }
}

async fn until_cancelled<F, T>(work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        result = work => result,
        _ = tokio::signal::ctrl_c() => Err(AppError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::effects::testing::FakeApi;
    use crate::fetch::mock::fallback_matches;

    fn options(symbol: &str, page: usize) -> FetchOptions {
        FetchOptions {
            symbol: symbol.to_string(),
            function: TimeSeriesFunction::Monthly,
            page,
            format: OutputFormat::Table,
        }
    }

    #[tokio::test]
    async fn headless_fetch_lands_on_requested_page() {
        let api = FakeApi::default();
        let state = fetch_state(&api, &options("IBM", 3), 10).await.unwrap();

        assert!(state.used_fallback);
        assert_eq!(state.page, 3);

        let mut out = Vec::new();
        render_fetch(&mut out, &state, OutputFormat::Table, 10, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("IBM · Monthly Adjusted"));
        assert!(text.contains("bundled sample data"));
        assert!(text.trim_end().ends_with("Page 3/4: 1 2 [3] 4"));
    }

    #[tokio::test]
    async fn headless_fetch_reports_failures() {
        let api = FakeApi {
            fail_series: Some("Request failed with status 429".into()),
            ..FakeApi::default()
        };
        let err = fetch_state(&api, &options("IBM", 1), 10).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 429");

        let err = fetch_state(&FakeApi::default(), &options("  ", 1), 10)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("symbol"));
    }

    #[tokio::test]
    async fn csv_output_has_every_row() {
        let state = fetch_state(&FakeApi::default(), &options("IBM", 1), 10)
            .await
            .unwrap();
        let mut out = Vec::new();
        render_fetch(&mut out, &state, OutputFormat::Csv, 10, false).unwrap();

        let rows = String::from_utf8(out).unwrap().lines().count();
        assert_eq!(Some(rows - 1), state.data.as_ref().map(|data| data.len()));
    }

    #[tokio::test]
    async fn headless_search_uses_sample_matches_when_empty() {
        let state = search_state(&FakeApi::default(), "tesco").await.unwrap();
        assert_eq!(state.suggestions, fallback_matches().to_vec());
    }
}
