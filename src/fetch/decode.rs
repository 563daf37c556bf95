use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

use super::series::{AdjustedRow, Dataset, DatedRow, NormalRow, TimeSeriesFunction, TimeSeriesRow};
use super::symbols::SymbolMatch;
use super::FetchResult;

/// Keys the API uses to report throttling or bad calls alongside a 200 status.
const NOTICE_KEYS: [&str; 3] = ["Note", "Information", "Error Message"];

/// Extract the series for `function`.
///
/// `Ok(None)` means the payload carried no series at all (or an empty one), which is how
/// quota exhaustion shows up. Rows that do not match the expected shape are an error.
pub fn decode_series(root: &Value, function: TimeSeriesFunction) -> FetchResult<Option<Dataset>> {
    let Some(series) = root.get(function.response_key()).filter(|v| !v.is_null()) else {
        return Ok(None);
    };

    let entries = series.as_object().ok_or_else(|| {
        AppError::payload(
            "time series",
            format!("`{}` is not an object", function.response_key()),
        )
    })?;

    if entries.is_empty() {
        return Ok(None);
    }

    let mut rows = Vec::with_capacity(entries.len());
    for (date, raw) in entries {
        let row = decode_row(raw, function).map_err(|err| {
            AppError::payload("time series", format!("row `{date}`: {err}"))
        })?;
        rows.push(DatedRow {
            date: date.clone(),
            row,
        });
    }

    Ok(Some(Dataset::new(function, rows)))
}

fn decode_row(raw: &Value, function: TimeSeriesFunction) -> Result<TimeSeriesRow, serde_json::Error> {
    if function.is_adjusted() {
        AdjustedRow::deserialize(raw).map(TimeSeriesRow::Adjusted)
    } else {
        NormalRow::deserialize(raw).map(TimeSeriesRow::Normal)
    }
}

/// Extract `bestMatches`; `Ok(None)` when the list is missing or empty.
pub fn decode_matches(root: &Value) -> FetchResult<Option<Vec<SymbolMatch>>> {
    let Some(raw) = root.get("bestMatches").filter(|v| !v.is_null()) else {
        return Ok(None);
    };

    let matches = Vec::<SymbolMatch>::deserialize(raw)
        .map_err(|err| AppError::payload("symbol search", err.to_string()))?;

    if matches.is_empty() {
        Ok(None)
    } else {
        Ok(Some(matches))
    }
}

/// First throttling / error notice found at the top level of a payload.
pub fn upstream_notice(root: &Value) -> Option<String> {
    NOTICE_KEYS
        .iter()
        .find_map(|key| root.get(*key))
        .map(value_to_string)
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::series::Field;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn keeps_api_order_of_dates() {
        let root = parse(
            r#"{
                "Meta Data": {"2. Symbol": "IBM"},
                "Time Series (Daily)": {
                    "2024-03-05": {"1. open": "10", "2. high": "12", "3. low": "9", "4. close": "11", "5. volume": "100"},
                    "2024-03-01": {"1. open": "8", "2. high": "9", "3. low": "7", "4. close": "9", "5. volume": "90"},
                    "2024-03-04": {"1. open": "9", "2. high": "10", "3. low": "8", "4. close": "10", "5. volume": "80"}
                }
            }"#,
        );

        let dataset = decode_series(&root, TimeSeriesFunction::Daily)
            .unwrap()
            .expect("series present");

        let dates: Vec<&str> = dataset.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-05", "2024-03-01", "2024-03-04"]);
        assert!(!dataset.is_adjusted());
        assert_eq!(
            dataset.get("2024-03-01").and_then(|r| r.value(Field::Volume)),
            Some("90")
        );
    }

    #[test]
    fn adjusted_function_yields_adjusted_rows() {
        let root = parse(
            r#"{
                "Time Series (Daily)": {
                    "2024-03-05": {
                        "1. open": "10", "2. high": "12", "3. low": "9", "4. close": "11",
                        "5. adjusted close": "10.8", "6. volume": "100",
                        "7. dividend amount": "0.0000", "8. split coefficient": "1.0"
                    }
                }
            }"#,
        );

        let dataset = decode_series(&root, TimeSeriesFunction::DailyAdjusted)
            .unwrap()
            .unwrap();
        assert!(dataset.rows[0].row.is_adjusted());
        assert_eq!(dataset.rows[0].row.number(Field::AdjustedClose), Some(10.8));
    }

    #[test]
    fn missing_or_empty_series_is_absent() {
        let throttled = parse(r#"{"Information": "rate limit reached"}"#);
        assert!(decode_series(&throttled, TimeSeriesFunction::Weekly)
            .unwrap()
            .is_none());
        assert_eq!(
            upstream_notice(&throttled).as_deref(),
            Some("rate limit reached")
        );

        let empty = parse(r#"{"Weekly Time Series": {}}"#);
        assert!(decode_series(&empty, TimeSeriesFunction::Weekly)
            .unwrap()
            .is_none());
    }

    #[test]
    fn row_missing_adjusted_fields_is_malformed() {
        let root = parse(
            r#"{"Monthly Adjusted Time Series": {
                "2024-02-29": {"1. open": "1", "2. high": "2", "3. low": "1", "4. close": "2", "5. volume": "3"}
            }}"#,
        );

        let err = decode_series(&root, TimeSeriesFunction::MonthlyAdjusted).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2024-02-29"), "unexpected message: {message}");
    }

    #[test]
    fn decodes_best_matches() {
        let root = parse(
            r#"{"bestMatches": [{
                "1. symbol": "IBM", "2. name": "International Business Machines Corp",
                "3. type": "Equity", "4. region": "United States",
                "5. marketOpen": "09:30", "6. marketClose": "16:00",
                "7. timezone": "UTC-04", "8. currency": "USD", "9. matchScore": "1.0000"
            }]}"#,
        );

        let matches = decode_matches(&root).unwrap().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol, "IBM");
        assert_eq!(matches[0].score(), Some(1.0));

        assert!(decode_matches(&parse(r#"{"bestMatches": []}"#))
            .unwrap()
            .is_none());
        assert!(decode_matches(&parse("{}")).unwrap().is_none());
    }
}
