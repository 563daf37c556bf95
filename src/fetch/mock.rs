//! Sample payloads substituted when the API answers without data (daily quota exhausted).

use std::sync::OnceLock;

use log::error;
use serde_json::Value;

use super::decode::{decode_matches, decode_series};
use super::series::{Dataset, TimeSeriesFunction};
use super::symbols::SymbolMatch;
use super::FetchResult;

const MONTHLY_ADJUSTED_JSON: &str = include_str!("../../assets/mock/monthly_adjusted.json");
const SYMBOL_SEARCH_JSON: &str = include_str!("../../assets/mock/symbol_search.json");

/// Series the bundled dataset was captured for.
pub const FALLBACK_FUNCTION: TimeSeriesFunction = TimeSeriesFunction::MonthlyAdjusted;

static FALLBACK_DATASET: OnceLock<Dataset> = OnceLock::new();
static FALLBACK_MATCHES: OnceLock<Vec<SymbolMatch>> = OnceLock::new();

pub fn fallback_dataset() -> &'static Dataset {
    FALLBACK_DATASET.get_or_init(|| match load_dataset() {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("Bundled sample dataset is unusable: {}", err);
            Dataset::new(FALLBACK_FUNCTION, Vec::new())
        }
    })
}

pub fn fallback_matches() -> &'static [SymbolMatch] {
    FALLBACK_MATCHES.get_or_init(|| match load_matches() {
        Ok(matches) => matches,
        Err(err) => {
            error!("Bundled sample suggestions are unusable: {}", err);
            Vec::new()
        }
    })
}

fn load_dataset() -> FetchResult<Dataset> {
    let root: Value = serde_json::from_str(MONTHLY_ADJUSTED_JSON)?;
    Ok(decode_series(&root, FALLBACK_FUNCTION)?
        .unwrap_or_else(|| Dataset::new(FALLBACK_FUNCTION, Vec::new())))
}

fn load_matches() -> FetchResult<Vec<SymbolMatch>> {
    let root: Value = serde_json::from_str(SYMBOL_SEARCH_JSON)?;
    Ok(decode_matches(&root)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_decodes_as_monthly_adjusted() {
        let dataset = load_dataset().expect("bundled dataset");
        assert_eq!(dataset.function, TimeSeriesFunction::MonthlyAdjusted);
        assert!(dataset.len() > 10, "sample should span several pages");
        assert!(dataset.rows.iter().all(|r| r.row.is_adjusted()));
        assert_eq!(fallback_dataset(), &dataset);
    }

    #[test]
    fn bundled_matches_are_present() {
        let matches = load_matches().expect("bundled matches");
        assert!(!matches.is_empty());
        assert_eq!(fallback_matches().len(), matches.len());
        assert!(matches.iter().all(|m| !m.symbol.is_empty()));
    }
}
