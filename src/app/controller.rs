use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::DashboardConfig;
use crate::fetch::{MarketDataApi, TimeSeriesFunction};

use super::debounce::Debouncer;
use super::effects::{resolve_data, resolve_suggestions};
use super::reducer::QueryEvent;
use super::state::QueryState;
use super::store::QueryStore;

/// Drives a `QueryStore` from user input.
///
/// Remote calls run on spawned tasks and report back over a channel; their events
/// are applied only by `apply_pending`/`wait_for_event`, on the caller's thread,
/// in arrival order.
pub struct QueryController {
    store: QueryStore,
    api: Arc<dyn MarketDataApi>,
    events_tx: UnboundedSender<QueryEvent>,
    events_rx: UnboundedReceiver<QueryEvent>,
    debouncer: Debouncer,
    items_per_page: usize,
}

impl QueryController {
    pub fn new(api: Arc<dyn MarketDataApi>, config: &DashboardConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut store = QueryStore::new();
        if config.default_function.is_some() {
            store.set_time_series_function(config.default_function);
        }

        Self {
            store,
            api,
            events_tx,
            events_rx,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            items_per_page: config.items_per_page.max(1),
        }
    }

    pub fn state(&self) -> &QueryState {
        self.store.state()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Store the typed text and schedule a debounced symbol lookup for it.
    pub fn input_symbol(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.store.set_symbol(text.clone());

        let keywords = text.trim().to_string();
        if keywords.is_empty() {
            self.debouncer.cancel();
            return;
        }

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        self.debouncer.schedule(async move {
            debug!("searching symbols for {:?}", keywords);
            let _ = events.send(QueryEvent::SuggestionsRequested);
            let event = resolve_suggestions(api.as_ref(), &keywords).await;
            let _ = events.send(event);
        });
    }

    /// Pick the suggestion at `index`. Returns `false` when there is none.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(selected) = self.state().suggestions.get(index).cloned() else {
            return false;
        };
        self.debouncer.cancel();
        self.store.dispatch(QueryEvent::SuggestionSelected(selected));
        true
    }

    pub fn clear_suggestions(&mut self) {
        self.debouncer.cancel();
        self.store.clear_suggestions();
    }

    pub fn select_function(&mut self, function: Option<TimeSeriesFunction>) {
        self.store.set_time_series_function(function);
    }

    /// Start fetching the selected series. Returns `false` when the symbol or
    /// series is missing.
    pub fn request_data(&mut self) -> bool {
        let Some(query) = self.state().series_query() else {
            return false;
        };
        self.store.dispatch(QueryEvent::DataRequested);

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let event = resolve_data(api.as_ref(), &query).await;
            let _ = events.send(event);
        });
        true
    }

    pub fn select_page(&mut self, page: usize) {
        self.store.select_page(page, self.items_per_page);
    }

    pub fn next_page(&mut self) {
        self.select_page(self.state().page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.select_page(self.state().page.saturating_sub(1));
    }

    /// Apply every event that has arrived so far. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.store.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next event from a background task and apply it.
    pub async fn wait_for_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.store.dispatch(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::effects::testing::FakeApi;
    use crate::config::Config;
    use crate::fetch::mock::fallback_matches;
    use crate::fetch::series::{DatedRow, NormalRow, TimeSeriesRow};
    use crate::fetch::{Dataset, SymbolMatch};

    fn controller(api: Arc<FakeApi>) -> QueryController {
        QueryController::new(api, &Config::builtin().dashboard)
    }

    fn tesco() -> SymbolMatch {
        fallback_matches()[0].clone()
    }

    fn daily(rows: usize) -> Dataset {
        let rows = (0..rows)
            .map(|i| DatedRow {
                date: format!("2024-02-{:02}", i + 1),
                row: TimeSeriesRow::Normal(NormalRow {
                    open: "10".into(),
                    high: "12".into(),
                    low: "9".into(),
                    close: "11".into(),
                    volume: "100".into(),
                }),
            })
            .collect();
        Dataset::new(TimeSeriesFunction::Daily, rows)
    }

    #[tokio::test(start_paused = true)]
    async fn typing_searches_once_with_latest_text() {
        let api = Arc::new(FakeApi {
            matches: Some(vec![tesco()]),
            ..FakeApi::default()
        });
        let mut controller = controller(Arc::clone(&api));

        controller.input_symbol("T");
        controller.input_symbol("TS");
        controller.input_symbol("TSCO");
        assert_eq!(controller.state().symbol, "TSCO");

        controller.wait_for_event().await;
        assert!(controller.state().searching);
        controller.wait_for_event().await;

        assert_eq!(api.searched(), vec!["TSCO".to_string()]);
        assert_eq!(controller.state().suggestions, vec![tesco()]);
        assert!(!controller.state().searching);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_input_cancels_the_lookup() {
        let api = Arc::new(FakeApi::default());
        let mut controller = controller(Arc::clone(&api));

        controller.input_symbol("IBM");
        controller.input_symbol("");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(controller.apply_pending(), 0);
        assert!(api.searched().is_empty());
        assert!(controller.state().suggestions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn picking_a_suggestion_then_fetching() {
        let api = Arc::new(FakeApi {
            matches: Some(vec![tesco()]),
            dataset: Some(daily(12)),
            ..FakeApi::default()
        });
        let mut controller = controller(Arc::clone(&api));

        assert!(!controller.request_data());

        controller.input_symbol("tsco");
        controller.wait_for_event().await;
        controller.wait_for_event().await;
        assert!(controller.select_suggestion(0));
        assert!(!controller.select_suggestion(3));
        assert_eq!(controller.state().symbol, "TSCO.LON");

        controller.select_function(Some(TimeSeriesFunction::Daily));
        assert!(controller.request_data());
        assert!(controller.state().loading);

        controller.wait_for_event().await;
        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.data.as_ref().map(|data| data.len()), Some(12));
        assert_eq!(api.series_call_count(), 1);

        controller.next_page();
        controller.next_page();
        assert_eq!(controller.state().page, 2);
        controller.prev_page();
        controller.prev_page();
        assert_eq!(controller.state().page, 1);
    }

    #[tokio::test]
    async fn default_series_comes_from_config() {
        let mut config = Config::builtin().dashboard;
        config.default_function = Some(TimeSeriesFunction::MonthlyAdjusted);
        let controller = QueryController::new(Arc::new(FakeApi::default()), &config);

        assert_eq!(
            controller.state().time_series_function,
            Some(TimeSeriesFunction::MonthlyAdjusted)
        );
    }
}
