use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use crate::table::{Column, TablePage};
use crate::ui::styles::category_style;

pub fn build_table<'a>(
    rows: Vec<Row<'a>>,
    header: Row<'a>,
    widths: Vec<Constraint>,
    title: impl Into<String>,
) -> Table<'a> {
    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .column_spacing(2)
}

pub fn header_row(columns: &[Column]) -> Row<'static> {
    Row::new(
        columns
            .iter()
            .map(|column| Cell::from(column.header()).style(Style::default().fg(Color::Yellow))),
    )
}

/// One ratatui row per dataset row on the page, each value colored by its category.
pub fn page_rows<'a>(page: &TablePage<'a>) -> Vec<Row<'a>> {
    page.cells()
        .map(|cells| {
            Row::new(
                cells
                    .into_iter()
                    .map(|cell| Cell::from(cell.text).style(category_style(cell.category))),
            )
        })
        .collect()
}

/// Column widths sized to the widest header or value on the page.
pub fn page_widths(page: &TablePage<'_>) -> Vec<Constraint> {
    page.columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let widest = page
                .cells()
                .filter_map(|cells| cells.get(idx).map(|cell| cell.text.width()))
                .max()
                .unwrap_or(0)
                .max(column.header().width());
            Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
        })
        .collect()
}
