use crate::fetch::{Field, TimeSeriesRow};

/// Display category of a single table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Positive,
    Negative,
    Neutral,
    Unclassified,
}

/// Classify one cell of `row`. Each field is judged on its own against the row's high.
///
/// Unparseable numbers make the comparison false, so they land on `Negative`.
pub fn classify(row: &TimeSeriesRow, field: Field) -> Category {
    let high = row.number(Field::High);
    let reaches_high = |value: Option<f64>| match (value, high) {
        (Some(value), Some(high)) => value >= high,
        _ => false,
    };

    match field {
        Field::Open => positive_if(reaches_high(row.number(Field::Open))),
        Field::High => Category::Positive,
        Field::Low => Category::Negative,
        Field::Close => positive_if(reaches_high(row.number(Field::Close))),
        Field::AdjustedClose => positive_if(reaches_high(row.number(Field::AdjustedClose))),
        Field::Volume | Field::Dividend => Category::Neutral,
    }
}

/// Same as [`classify`] for a field given by name; unknown names are `Unclassified`.
pub fn classify_named(row: &TimeSeriesRow, name: &str) -> Category {
    Field::from_name(name)
        .map(|field| classify(row, field))
        .unwrap_or(Category::Unclassified)
}

fn positive_if(condition: bool) -> Category {
    if condition {
        Category::Positive
    } else {
        Category::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::series::{AdjustedRow, NormalRow};

    fn normal(open: &str, high: &str, close: &str) -> TimeSeriesRow {
        TimeSeriesRow::Normal(NormalRow {
            open: open.into(),
            high: high.into(),
            low: "1".into(),
            close: close.into(),
            volume: "1000".into(),
        })
    }

    fn adjusted(high: &str, adjusted_close: &str) -> TimeSeriesRow {
        TimeSeriesRow::Adjusted(AdjustedRow {
            open: "10".into(),
            high: high.into(),
            low: "5".into(),
            close: "15".into(),
            adjusted_close: adjusted_close.into(),
            volume: "1000".into(),
            dividend: "0.5".into(),
        })
    }

    #[test]
    fn compares_open_and_close_against_high() {
        let row = normal("10", "20", "25");
        assert_eq!(classify(&row, Field::Open), Category::Negative);
        assert_eq!(classify(&row, Field::Close), Category::Positive);
        assert_eq!(classify(&row, Field::High), Category::Positive);
        assert_eq!(classify(&row, Field::Low), Category::Negative);
    }

    #[test]
    fn open_equal_to_high_is_positive() {
        let row = normal("20", "20", "19");
        assert_eq!(classify(&row, Field::Open), Category::Positive);
        assert_eq!(classify(&row, Field::Close), Category::Negative);
    }

    #[test]
    fn volume_and_dividend_are_neutral() {
        let row = adjusted("20", "21");
        assert_eq!(classify(&row, Field::Volume), Category::Neutral);
        assert_eq!(classify(&row, Field::Dividend), Category::Neutral);
        assert_eq!(classify(&normal("1", "2", "3"), Field::Volume), Category::Neutral);
    }

    #[test]
    fn adjusted_close_needs_a_value() {
        assert_eq!(
            classify(&adjusted("20", "21"), Field::AdjustedClose),
            Category::Positive
        );
        assert_eq!(
            classify(&adjusted("20", "19.99"), Field::AdjustedClose),
            Category::Negative
        );
        assert_eq!(
            classify(&normal("10", "20", "25"), Field::AdjustedClose),
            Category::Negative
        );
    }

    #[test]
    fn unparseable_numbers_fall_to_negative() {
        let row = normal("n/a", "20", "25");
        assert_eq!(classify(&row, Field::Open), Category::Negative);

        let row = normal("30", "", "25");
        assert_eq!(classify(&row, Field::Open), Category::Negative);
        assert_eq!(classify(&row, Field::Close), Category::Negative);
        assert_eq!(classify(&row, Field::High), Category::Positive);
    }

    #[test]
    fn unknown_names_are_unclassified() {
        let row = normal("10", "20", "25");
        assert_eq!(classify_named(&row, "8. split coefficient"), Category::Unclassified);
        assert_eq!(classify_named(&row, "4. close"), Category::Positive);
        assert_eq!(classify_named(&row, "adjustedClose"), Category::Negative);
    }
}
