use crate::error::Result;

pub mod client;
pub mod decode;
pub mod mock;
pub mod request;
pub mod series;
pub mod symbols;

pub use client::{AlphaVantageClient, MarketDataApi};
pub use request::{SeriesQuery, SymbolQuery};
pub use series::{Dataset, DatedRow, Field, TimeSeriesFunction, TimeSeriesRow};
pub use symbols::SymbolMatch;

pub type FetchResult<T> = Result<T>;
