use crate::fetch::{DatedRow, Field};

use super::classify::{classify, Category};

const NORMAL_FIELDS: [Field; 5] = [
    Field::Open,
    Field::High,
    Field::Low,
    Field::Close,
    Field::Volume,
];

const ADJUSTED_FIELDS: [Field; 7] = [
    Field::Open,
    Field::High,
    Field::Low,
    Field::Close,
    Field::AdjustedClose,
    Field::Volume,
    Field::Dividend,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Value(Field),
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Value(field) => field.header(),
        }
    }
}

/// Columns for normal or adjusted rows, date first.
pub fn columns(adjusted: bool) -> Vec<Column> {
    let fields: &[Field] = if adjusted {
        &ADJUSTED_FIELDS
    } else {
        &NORMAL_FIELDS
    };
    std::iter::once(Column::Date)
        .chain(fields.iter().copied().map(Column::Value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell<'a> {
    pub text: &'a str,
    pub category: Category,
}

pub fn row_cells<'a>(row: &'a DatedRow, columns: &[Column]) -> Vec<TableCell<'a>> {
    columns
        .iter()
        .map(|column| match column {
            Column::Date => TableCell {
                text: row.date.as_str(),
                category: Category::Unclassified,
            },
            Column::Value(field) => TableCell {
                text: row.row.value(*field).unwrap_or(""),
                category: classify(&row.row, *field),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::series::{NormalRow, TimeSeriesRow};

    #[test]
    fn adjusted_layout_adds_three_columns() {
        let headers: Vec<&str> = columns(true).iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            [
                "Date",
                "Open",
                "High",
                "Low",
                "Close",
                "Adjusted Close",
                "Volume",
                "Dividend Amount"
            ]
        );
        assert_eq!(columns(false).len(), 6);
    }

    #[test]
    fn cells_carry_text_and_category() {
        let row = DatedRow {
            date: "2024-01-31".to_string(),
            row: TimeSeriesRow::Normal(NormalRow {
                open: "10".into(),
                high: "20".into(),
                low: "5".into(),
                close: "25".into(),
                volume: "999".into(),
            }),
        };

        let cells = row_cells(&row, &columns(false));
        assert_eq!(cells[0].text, "2024-01-31");
        assert_eq!(cells[0].category, Category::Unclassified);
        assert_eq!(cells[1].category, Category::Negative);
        assert_eq!(cells[4].text, "25");
        assert_eq!(cells[4].category, Category::Positive);
        assert_eq!(cells[5].category, Category::Neutral);
    }
}
