mod cli;

use anyhow::Result;
use clap::Parser;

use stock_dashboard::app::bootstrap::{self, FetchOptions};
use stock_dashboard::config::load_config;
use stock_dashboard::fetch::TimeSeriesFunction;
use stock_dashboard::logging::{init_logging, LogBuffer, LogSink};

use cli::{Cli, Commands};

const DASHBOARD_LOG_LINES: usize = 50;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }

    let command = cli.command.unwrap_or(Commands::Dashboard);
    let logs = matches!(command, Commands::Dashboard).then(|| LogBuffer::new(DASHBOARD_LOG_LINES));
    let sink = match &logs {
        Some(buffer) => LogSink::Buffer(buffer.clone()),
        None => LogSink::Stderr,
    };
    init_logging(&config.logging, sink)?;

    match command {
        Commands::Dashboard => {
            bootstrap::run_dashboard(&config, logs.as_ref())?;
        }
        Commands::Search { keywords } => {
            bootstrap::run_search(&config, &keywords.join(" ")).await?;
        }
        Commands::Fetch {
            symbol,
            series,
            page,
            format,
        } => {
            let function = series
                .or(config.dashboard.default_function)
                .unwrap_or(TimeSeriesFunction::Daily);
            let options = FetchOptions {
                symbol,
                function,
                page,
                format,
            };
            bootstrap::run_fetch(&config, &options).await?;
        }
        Commands::Series => {
            bootstrap::list_series()?;
        }
    }

    Ok(())
}
