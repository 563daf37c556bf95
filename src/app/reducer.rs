use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{debug, warn};

use crate::fetch::mock::{fallback_dataset, fallback_matches};
use crate::fetch::{Dataset, SymbolMatch, TimeSeriesFunction};
use crate::table::clamp_page;

use super::state::QueryState;

pub const DEFAULT_DATA_ERROR: &str = "Failed to fetch stock data";

/// Inputs to the query state machine: user edits and resolved async calls.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEvent {
    SymbolChanged(String),
    TimeSeriesSelected(Option<TimeSeriesFunction>),
    SuggestionsRequested,
    /// `None` (or an empty list) means the lookup answered without matches.
    SuggestionsResolved(Option<Vec<SymbolMatch>>),
    SuggestionsFailed(String),
    SuggestionsCleared,
    SuggestionSelected(SymbolMatch),
    DataRequested,
    /// `dataset: None` means the fetch answered without a payload.
    DataResolved {
        dataset: Option<Dataset>,
        received_at: DateTime<Local>,
    },
    DataFailed(String),
    PageSelected {
        page: usize,
        items_per_page: usize,
    },
}

impl QueryEvent {
    fn name(&self) -> &'static str {
        match self {
            QueryEvent::SymbolChanged(_) => "symbol_changed",
            QueryEvent::TimeSeriesSelected(_) => "time_series_selected",
            QueryEvent::SuggestionsRequested => "suggestions_requested",
            QueryEvent::SuggestionsResolved(_) => "suggestions_resolved",
            QueryEvent::SuggestionsFailed(_) => "suggestions_failed",
            QueryEvent::SuggestionsCleared => "suggestions_cleared",
            QueryEvent::SuggestionSelected(_) => "suggestion_selected",
            QueryEvent::DataRequested => "data_requested",
            QueryEvent::DataResolved { .. } => "data_resolved",
            QueryEvent::DataFailed(_) => "data_failed",
            QueryEvent::PageSelected { .. } => "page_selected",
        }
    }
}

/// Apply one event. Pure apart from logging; the previous state is consumed.
pub fn reduce(mut state: QueryState, event: QueryEvent) -> QueryState {
    debug!("reduce {}", event.name());

    match event {
        QueryEvent::SymbolChanged(text) => {
            if text.is_empty() {
                state.suggestions.clear();
                state.searching = false;
            }
            state.symbol = text;
            state.company_name = None;
        }
        QueryEvent::TimeSeriesSelected(function) => {
            state.time_series_function = function;
        }
        QueryEvent::SuggestionsRequested => {
            state.searching = true;
        }
        QueryEvent::SuggestionsResolved(matches) => {
            state.searching = false;
            state.suggestions = match matches {
                Some(matches) if !matches.is_empty() => matches,
                _ => {
                    warn!("Symbol search returned no matches; showing sample suggestions");
                    fallback_matches().to_vec()
                }
            };
        }
        QueryEvent::SuggestionsFailed(reason) => {
            warn!("Symbol search failed: {}", reason);
            state.searching = false;
        }
        QueryEvent::SuggestionsCleared => {
            state.suggestions.clear();
        }
        QueryEvent::SuggestionSelected(selected) => {
            state.symbol = selected.symbol;
            state.company_name = Some(selected.name);
            state.suggestions.clear();
            state.searching = false;
        }
        QueryEvent::DataRequested => {
            state.loading = true;
            state.error = None;
        }
        QueryEvent::DataResolved {
            dataset,
            received_at,
        } => {
            state.loading = false;
            state.page = 1;
            state.fetched_at = Some(received_at);
            match dataset {
                Some(dataset) if !dataset.is_empty() => {
                    state.data = Some(Arc::new(dataset));
                    state.used_fallback = false;
                }
                _ => {
                    warn!("Time series request returned no data; showing the bundled sample");
                    state.data = Some(Arc::new(fallback_dataset().clone()));
                    state.used_fallback = true;
                }
            }
        }
        QueryEvent::DataFailed(message) => {
            state.loading = false;
            state.error = Some(if message.trim().is_empty() {
                DEFAULT_DATA_ERROR.to_string()
            } else {
                message
            });
        }
        QueryEvent::PageSelected {
            page,
            items_per_page,
        } => {
            let total = state.data.as_ref().map_or(0, |data| data.len());
            state.page = clamp_page(page, total, items_per_page);
        }
    }

    state
}
