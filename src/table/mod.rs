pub mod classify;
pub mod columns;
pub mod pagination;

pub use classify::{classify, classify_named, Category};
pub use columns::{columns, row_cells, Column, TableCell};
pub use pagination::{clamp_page, page_bounds, page_window, total_pages, WINDOW_SIZE};

use crate::fetch::{Dataset, DatedRow};

/// One page of a dataset, ready for rendering.
#[derive(Debug, Clone)]
pub struct TablePage<'a> {
    pub columns: Vec<Column>,
    pub rows: &'a [DatedRow],
    pub page: usize,
    pub total_pages: usize,
    pub window: Vec<usize>,
}

impl<'a> TablePage<'a> {
    pub fn build(dataset: &'a Dataset, items_per_page: usize, page: usize) -> Self {
        let total = dataset.len();
        let page = clamp_page(page, total, items_per_page);
        let bounds = page_bounds(total, items_per_page, page);
        Self {
            columns: columns(dataset.is_adjusted()),
            rows: &dataset.rows[bounds],
            page,
            total_pages: total_pages(total, items_per_page),
            window: page_window(total, items_per_page, page as i64),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Vec<TableCell<'a>>> + '_ {
        self.rows.iter().map(|row| row_cells(row, &self.columns))
    }
}
