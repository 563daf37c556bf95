//! Async halves of the query operations. Each call resolves to the event the
//! reducer should apply, so callers decide where and when state changes.

use chrono::Local;
use log::{info, warn};

use crate::fetch::{MarketDataApi, SeriesQuery, SymbolQuery};

use super::reducer::QueryEvent;
use super::store::QueryStore;

pub async fn resolve_suggestions(api: &dyn MarketDataApi, keywords: &str) -> QueryEvent {
    let query = SymbolQuery {
        keywords: keywords.to_string(),
    };
    match api.search_symbols(&query).await {
        Ok(matches) => QueryEvent::SuggestionsResolved(matches),
        Err(err) => QueryEvent::SuggestionsFailed(err.to_string()),
    }
}

pub async fn resolve_data(api: &dyn MarketDataApi, query: &SeriesQuery) -> QueryEvent {
    info!("Fetching {} for {}", query.function, query.symbol);
    match api.fetch_series(query).await {
        Ok(dataset) => QueryEvent::DataResolved {
            dataset,
            received_at: Local::now(),
        },
        Err(err) => {
            warn!("Time series request failed: {}", err);
            QueryEvent::DataFailed(err.to_string())
        }
    }
}

/// Look up suggestions for `keywords` and apply the outcome.
pub async fn search_symbols(store: &mut QueryStore, api: &dyn MarketDataApi, keywords: &str) {
    if keywords.trim().is_empty() {
        store.clear_suggestions();
        return;
    }
    store.dispatch(QueryEvent::SuggestionsRequested);
    let event = resolve_suggestions(api, keywords).await;
    store.dispatch(event);
}

/// Fetch the selected series for the current symbol. Returns `false` without
/// touching state when either is missing.
pub async fn fetch_stock_data(store: &mut QueryStore, api: &dyn MarketDataApi) -> bool {
    let Some(query) = store.state().series_query() else {
        return false;
    };
    store.dispatch(QueryEvent::DataRequested);
    let event = resolve_data(api, &query).await;
    store.dispatch(event);
    true
}
