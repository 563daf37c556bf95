use std::path::PathBuf;

use clap::{Parser, Subcommand};

use stock_dashboard::fetch::TimeSeriesFunction;
use stock_dashboard::ui::report::OutputFormat;

#[derive(Parser)]
#[command(name = "stock-dashboard")]
#[command(about = "Browse Alpha Vantage daily, weekly and monthly price series from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON config file layered over the builtin defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Append log output to this file instead of the default target
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. `info`, `stock_dashboard=debug`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive dashboard (default)
    Dashboard,

    /// Look up ticker symbols matching the keywords
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Fetch a time series and print one page of it
    Fetch {
        /// Ticker symbol, e.g. IBM
        symbol: String,

        /// Series to fetch: an API name or a short name such as `weekly-adjusted`
        #[arg(short, long, value_parser = parse_series)]
        series: Option<TimeSeriesFunction>,

        /// 1-based page to print
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the available time series
    Series,
}

fn parse_series(value: &str) -> Result<TimeSeriesFunction, String> {
    value.parse().map_err(|err: stock_dashboard::AppError| err.to_string())
}
