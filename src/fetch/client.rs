use futures::future::{BoxFuture, FutureExt};
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AppError, Context};

use super::decode::{decode_matches, decode_series, upstream_notice};
use super::request::{
    prepare_series_request, prepare_symbol_request, PreparedRequest, SeriesQuery, SymbolQuery,
};
use super::series::Dataset;
use super::symbols::SymbolMatch;
use super::FetchResult;

/// Remote market-data boundary.
///
/// Both calls resolve to `Ok(None)` when the service answered but carried no payload,
/// leaving the fallback decision to the caller.
pub trait MarketDataApi: Send + Sync {
    fn search_symbols<'a>(
        &'a self,
        query: &'a SymbolQuery,
    ) -> BoxFuture<'a, FetchResult<Option<Vec<SymbolMatch>>>>;

    fn fetch_series<'a>(&'a self, query: &'a SeriesQuery) -> BoxFuture<'a, FetchResult<Option<Dataset>>>;
}

/// `MarketDataApi` backed by the Alpha Vantage query endpoint.
pub struct AlphaVantageClient {
    client: Client,
    api: ApiConfig,
}

impl AlphaVantageClient {
    pub fn new(api: ApiConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to construct HTTP client")?;
        Ok(Self { client, api })
    }

    async fn get_json(&self, request: PreparedRequest) -> FetchResult<Value> {
        info!("GET {} ({})", request.url, request.redacted());

        let response = self
            .client
            .get(&request.url)
            .headers(request.headers)
            .query(&request.params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::message(format!(
                "Request failed with status {}",
                status
            )));
        }

        let body = response.text().await?;
        debug!("received {} bytes", body.len());

        let root: Value = serde_json::from_str(&body)
            .map_err(|err| AppError::payload("response", err.to_string()))?;

        if let Some(notice) = upstream_notice(&root) {
            warn!("upstream notice: {}", notice);
        }

        Ok(root)
    }
}

impl MarketDataApi for AlphaVantageClient {
    fn search_symbols<'a>(
        &'a self,
        query: &'a SymbolQuery,
    ) -> BoxFuture<'a, FetchResult<Option<Vec<SymbolMatch>>>> {
        async move {
            let request = prepare_symbol_request(&self.api, query)?;
            let root = self.get_json(request).await?;
            decode_matches(&root)
        }
        .boxed()
    }

    fn fetch_series<'a>(&'a self, query: &'a SeriesQuery) -> BoxFuture<'a, FetchResult<Option<Dataset>>> {
        async move {
            let request = prepare_series_request(&self.api, query)?;
            let root = self.get_json(request).await?;
            decode_series(&root, query.function)
        }
        .boxed()
    }
}
