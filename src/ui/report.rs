//! Line-oriented output for the headless subcommands.

use std::io::Write;

use crossterm::style::{Color, Stylize};

use crate::error::Result;
use crate::fetch::{Dataset, SymbolMatch, TimeSeriesFunction};
use crate::table::{Category, Column, TablePage};
use crate::utils::{pad_to_width, truncate_to_width};

const NAME_WIDTH: usize = 36;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One colored page plus the page window.
    #[default]
    Table,
    /// Every row, comma separated.
    Csv,
}

fn term_color(category: Category) -> Option<Color> {
    match category {
        Category::Positive => Some(Color::Green),
        Category::Negative => Some(Color::Red),
        Category::Neutral => Some(Color::Grey),
        Category::Unclassified => None,
    }
}

/// Print one table page followed by its page window, e.g. `Page 2/4: 1 [2] 3 4`.
pub fn write_page<W: Write>(out: &mut W, page: &TablePage<'_>, color: bool) -> Result<()> {
    let widths: Vec<usize> = page
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            page.cells()
                .filter_map(|cells| cells.get(idx).map(|cell| cell.text.len()))
                .max()
                .unwrap_or(0)
                .max(column.header().len())
        })
        .collect();

    let header: Vec<String> = page
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad_to_width(column.header(), *width))
        .collect();
    writeln!(out, "{}", header.join("  ").trim_end())?;

    for cells in page.cells() {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let text = pad_to_width(cell.text, *width);
                match term_color(cell.category) {
                    Some(fg) if color => text.with(fg).to_string(),
                    _ => text,
                }
            })
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", window_line(page))?;
    Ok(())
}

pub fn window_line(page: &TablePage<'_>) -> String {
    if page.total_pages == 0 {
        return "No rows".to_string();
    }
    let links: Vec<String> = page
        .window
        .iter()
        .map(|&n| {
            if n == page.page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    format!("Page {}/{}: {}", page.page, page.total_pages, links.join(" "))
}

/// Every row of `dataset` as CSV with the same columns the table shows.
pub fn write_csv<W: Write>(out: W, dataset: &Dataset) -> Result<()> {
    let columns = crate::table::columns(dataset.is_adjusted());
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|column| column.header()))?;
    for row in &dataset.rows {
        writer.write_record(columns.iter().map(|column| match column {
            Column::Date => row.date.as_str(),
            Column::Value(field) => row.row.value(*field).unwrap_or(""),
        }))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_matches<W: Write>(out: &mut W, matches: &[SymbolMatch]) -> Result<()> {
    let symbol_width = matches
        .iter()
        .map(|m| m.symbol.len())
        .max()
        .unwrap_or(0)
        .max("Symbol".len());

    writeln!(
        out,
        "{}  {}  {:<24}  {:<8}  Score",
        pad_to_width("Symbol", symbol_width),
        pad_to_width("Name", NAME_WIDTH),
        "Region",
        "Currency"
    )?;
    for m in matches {
        writeln!(
            out,
            "{}  {}  {:<24}  {:<8}  {}",
            pad_to_width(&m.symbol, symbol_width),
            pad_to_width(&truncate_to_width(&m.name, NAME_WIDTH), NAME_WIDTH),
            m.region,
            m.currency,
            m.match_score
        )?;
    }
    Ok(())
}

pub fn write_series_list<W: Write>(out: &mut W) -> Result<()> {
    for function in TimeSeriesFunction::ALL {
        writeln!(
            out,
            "{:<20}  {:<30}  {}",
            function.short_name(),
            function.api_name(),
            function.label()
        )?;
    }
    Ok(())
}
