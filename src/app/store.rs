use crate::fetch::TimeSeriesFunction;

use super::reducer::{reduce, QueryEvent};
use super::state::QueryState;

/// Owns one `QueryState` and routes every change through the reducer.
#[derive(Debug, Default)]
pub struct QueryStore {
    state: QueryState,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: QueryState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn dispatch(&mut self, event: QueryEvent) -> &QueryState {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, event);
        &self.state
    }

    pub fn set_symbol(&mut self, text: impl Into<String>) -> &QueryState {
        self.dispatch(QueryEvent::SymbolChanged(text.into()))
    }

    pub fn set_time_series_function(
        &mut self,
        function: Option<TimeSeriesFunction>,
    ) -> &QueryState {
        self.dispatch(QueryEvent::TimeSeriesSelected(function))
    }

    pub fn clear_suggestions(&mut self) -> &QueryState {
        self.dispatch(QueryEvent::SuggestionsCleared)
    }

    pub fn select_page(&mut self, page: usize, items_per_page: usize) -> &QueryState {
        self.dispatch(QueryEvent::PageSelected {
            page,
            items_per_page,
        })
    }
}
