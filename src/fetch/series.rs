use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Granularity and adjustment of the series requested from the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSeriesFunction {
    #[serde(rename = "TIME_SERIES_DAILY")]
    Daily,
    #[serde(rename = "TIME_SERIES_DAILY_ADJUSTED")]
    DailyAdjusted,
    #[serde(rename = "TIME_SERIES_WEEKLY")]
    Weekly,
    #[serde(rename = "TIME_SERIES_WEEKLY_ADJUSTED")]
    WeeklyAdjusted,
    #[serde(rename = "TIME_SERIES_MONTHLY")]
    Monthly,
    #[serde(rename = "TIME_SERIES_MONTHLY_ADJUSTED")]
    MonthlyAdjusted,
}

impl TimeSeriesFunction {
    pub const ALL: [TimeSeriesFunction; 6] = [
        TimeSeriesFunction::Daily,
        TimeSeriesFunction::DailyAdjusted,
        TimeSeriesFunction::Weekly,
        TimeSeriesFunction::WeeklyAdjusted,
        TimeSeriesFunction::Monthly,
        TimeSeriesFunction::MonthlyAdjusted,
    ];

    /// Identifier sent as the `function` query parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            TimeSeriesFunction::Daily => "TIME_SERIES_DAILY",
            TimeSeriesFunction::DailyAdjusted => "TIME_SERIES_DAILY_ADJUSTED",
            TimeSeriesFunction::Weekly => "TIME_SERIES_WEEKLY",
            TimeSeriesFunction::WeeklyAdjusted => "TIME_SERIES_WEEKLY_ADJUSTED",
            TimeSeriesFunction::Monthly => "TIME_SERIES_MONTHLY",
            TimeSeriesFunction::MonthlyAdjusted => "TIME_SERIES_MONTHLY_ADJUSTED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSeriesFunction::Daily => "Daily",
            TimeSeriesFunction::DailyAdjusted => "Daily Adjusted",
            TimeSeriesFunction::Weekly => "Weekly",
            TimeSeriesFunction::WeeklyAdjusted => "Weekly Adjusted",
            TimeSeriesFunction::Monthly => "Monthly",
            TimeSeriesFunction::MonthlyAdjusted => "Monthly Adjusted",
        }
    }

    /// Top-level key of the response object that holds the series.
    pub fn response_key(self) -> &'static str {
        match self {
            TimeSeriesFunction::Daily | TimeSeriesFunction::DailyAdjusted => "Time Series (Daily)",
            TimeSeriesFunction::Weekly => "Weekly Time Series",
            TimeSeriesFunction::WeeklyAdjusted => "Weekly Adjusted Time Series",
            TimeSeriesFunction::Monthly => "Monthly Time Series",
            TimeSeriesFunction::MonthlyAdjusted => "Monthly Adjusted Time Series",
        }
    }

    pub fn is_adjusted(self) -> bool {
        matches!(
            self,
            TimeSeriesFunction::DailyAdjusted
                | TimeSeriesFunction::WeeklyAdjusted
                | TimeSeriesFunction::MonthlyAdjusted
        )
    }

    /// Short command-line friendly name, e.g. `weekly-adjusted`.
    pub fn short_name(self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TimeSeriesFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for TimeSeriesFunction {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        let normalized = wanted.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|f| f.api_name().eq_ignore_ascii_case(wanted) || f.short_name() == normalized)
            .ok_or_else(|| AppError::UnknownSeries(wanted.to_string()))
    }
}

/// Column of a time-series row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    AdjustedClose,
    Volume,
    Dividend,
}

impl Field {
    pub fn header(self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::AdjustedClose => "Adjusted Close",
            Field::Volume => "Volume",
            Field::Dividend => "Dividend Amount",
        }
    }

    /// Resolve either the API key (`"5. adjusted close"`) or a camel-case name (`adjustedClose`).
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "1. open" | "open" => Field::Open,
            "2. high" | "high" => Field::High,
            "3. low" | "low" => Field::Low,
            "4. close" | "close" => Field::Close,
            "5. adjusted close" | "adjustedClose" => Field::AdjustedClose,
            "5. volume" | "6. volume" | "volume" => Field::Volume,
            "7. dividend amount" | "dividend" => Field::Dividend,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalRow {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedRow {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. adjusted close")]
    pub adjusted_close: String,
    #[serde(rename = "6. volume")]
    pub volume: String,
    #[serde(rename = "7. dividend amount")]
    pub dividend: String,
}

/// One period of prices. The variant is fixed by the requested function, not by field presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSeriesRow {
    Normal(NormalRow),
    Adjusted(AdjustedRow),
}

impl TimeSeriesRow {
    pub fn is_adjusted(&self) -> bool {
        matches!(self, TimeSeriesRow::Adjusted(_))
    }

    /// Raw text of a field, `None` when the variant does not carry it.
    pub fn value(&self, field: Field) -> Option<&str> {
        match self {
            TimeSeriesRow::Normal(row) => match field {
                Field::Open => Some(&row.open),
                Field::High => Some(&row.high),
                Field::Low => Some(&row.low),
                Field::Close => Some(&row.close),
                Field::Volume => Some(&row.volume),
                Field::AdjustedClose | Field::Dividend => None,
            },
            TimeSeriesRow::Adjusted(row) => match field {
                Field::Open => Some(&row.open),
                Field::High => Some(&row.high),
                Field::Low => Some(&row.low),
                Field::Close => Some(&row.close),
                Field::AdjustedClose => Some(&row.adjusted_close),
                Field::Volume => Some(&row.volume),
                Field::Dividend => Some(&row.dividend),
            },
        }
        .map(String::as_str)
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        self.value(field).and_then(|raw| raw.trim().parse::<f64>().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedRow {
    pub date: String,
    pub row: TimeSeriesRow,
}

/// Rows of one series in the order the API listed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub function: TimeSeriesFunction,
    pub rows: Vec<DatedRow>,
}

impl Dataset {
    pub fn new(function: TimeSeriesFunction, rows: Vec<DatedRow>) -> Self {
        Self { function, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_adjusted(&self) -> bool {
        self.function.is_adjusted()
    }

    pub fn get(&self, date: &str) -> Option<&TimeSeriesRow> {
        self.rows.iter().find(|r| r.date == date).map(|r| &r.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_and_short_names() {
        assert_eq!(
            "TIME_SERIES_WEEKLY_ADJUSTED".parse::<TimeSeriesFunction>().unwrap(),
            TimeSeriesFunction::WeeklyAdjusted
        );
        assert_eq!(
            "daily-adjusted".parse::<TimeSeriesFunction>().unwrap(),
            TimeSeriesFunction::DailyAdjusted
        );
        assert_eq!(
            "monthly_adjusted".parse::<TimeSeriesFunction>().unwrap(),
            TimeSeriesFunction::MonthlyAdjusted
        );
        let err = "hourly".parse::<TimeSeriesFunction>().unwrap_err();
        assert!(err.to_string().contains("hourly"));
    }

    #[test]
    fn daily_variants_share_response_key() {
        assert_eq!(
            TimeSeriesFunction::Daily.response_key(),
            TimeSeriesFunction::DailyAdjusted.response_key()
        );
        assert!(!TimeSeriesFunction::Weekly.is_adjusted());
        assert!(TimeSeriesFunction::MonthlyAdjusted.is_adjusted());
    }

    #[test]
    fn cycling_wraps_both_directions() {
        assert_eq!(
            TimeSeriesFunction::MonthlyAdjusted.next(),
            TimeSeriesFunction::Daily
        );
        assert_eq!(
            TimeSeriesFunction::Daily.prev(),
            TimeSeriesFunction::MonthlyAdjusted
        );
    }

    #[test]
    fn normal_rows_do_not_carry_adjusted_fields() {
        let row = TimeSeriesRow::Normal(NormalRow {
            open: "1.0".into(),
            high: "2.0".into(),
            low: "0.5".into(),
            close: "1.5".into(),
            volume: "100".into(),
        });
        assert_eq!(row.value(Field::AdjustedClose), None);
        assert_eq!(row.number(Field::High), Some(2.0));
        assert_eq!(Field::from_name("5. volume"), Some(Field::Volume));
        assert_eq!(Field::from_name("8. split coefficient"), None);
    }
}
