use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::fetch::{Dataset, SeriesQuery, SymbolMatch, TimeSeriesFunction};
use crate::table::TablePage;

/// Everything the dashboard shows, for one session. Mutated only through `reduce`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub symbol: String,
    /// Name of the suggestion the symbol was picked from, if any.
    pub company_name: Option<String>,
    pub time_series_function: Option<TimeSeriesFunction>,
    pub data: Option<Arc<Dataset>>,
    pub loading: bool,
    pub error: Option<String>,
    pub suggestions: Vec<SymbolMatch>,
    pub searching: bool,
    /// 1-based.
    pub page: usize,
    pub fetched_at: Option<DateTime<Local>>,
    /// The data on screen is the bundled sample, not a live response.
    pub used_fallback: bool,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            company_name: None,
            time_series_function: None,
            data: None,
            loading: false,
            error: None,
            suggestions: Vec::new(),
            searching: false,
            page: 1,
            fetched_at: None,
            used_fallback: false,
        }
    }
}

impl QueryState {
    /// A data request needs both a symbol and a selected series.
    pub fn can_request_data(&self) -> bool {
        self.series_query().is_some()
    }

    pub fn series_query(&self) -> Option<SeriesQuery> {
        let symbol = self.symbol.trim();
        match self.time_series_function {
            Some(function) if !symbol.is_empty() => Some(SeriesQuery {
                function,
                symbol: symbol.to_string(),
            }),
            _ => None,
        }
    }

    pub fn table_page(&self, items_per_page: usize) -> Option<TablePage<'_>> {
        self.data
            .as_deref()
            .map(|dataset| TablePage::build(dataset, items_per_page, self.page))
    }

    /// `"IBM"` or `"IBM (International Business Machines)"`.
    pub fn title(&self) -> String {
        match &self.company_name {
            Some(name) if !name.is_empty() => format!("{} ({})", self.symbol, name),
            _ => self.symbol.clone(),
        }
    }
}
