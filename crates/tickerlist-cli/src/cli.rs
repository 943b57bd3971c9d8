//! CLI argument definitions for tickerlist.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `symbols` | Page through the symbol list API, filter, export to xlsx |
//! | `tickers` | Walk the reference ticker API, filter, export, optional detail report |
//!
//! # Environment
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `API_KEY` | always | Market-data API key |
//! | `API_HOST` | `symbols` | Base URL of the symbol list API; overrides the reference API host |
//! | `RUST_LOG` | no | Log filter (default `info`) |
//! | `TICKERLIST_LOG_FORMAT` | no | `text` (default) or `json` |
//!
//! A `.env` file in the working directory is read before the environment.
//!
//! # Examples
//!
//! ```bash
//! # Default window: 3 pages of 100 symbols
//! tickerlist symbols
//!
//! # Reference listing plus 30-minute detail report
//! tickerlist tickers --details --from 2022-01-03 --to 2022-01-07
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tickerlist_core::domain::parse_iso_date;
use tickerlist_core::fetch::{AGGREGATES_LIMIT, MAX_SYMBOL_COUNT, PAGE_SIZE, TICKER_PAGE_LIMIT};
use tickerlist_core::Timespan;
use time::Date;

/// Stock listing fetcher, filter and spreadsheet exporter.
#[derive(Debug, Parser)]
#[command(
    name = "tickerlist",
    author,
    version,
    about = "Fetch stock listings, keep common stock on major US exchanges, export to xlsx",
    long_about = "tickerlist pulls stock listings from a market-data API, drops OTC listings, \
class/series shares, funds, warrants and units, and writes the survivors to an .xlsx file.\n\
\n\
Existing output files are appended to, not replaced.\n\
\n\
Use 'tickerlist <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Pretty-print the JSON summary written to stdout.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Page through `{API_HOST}/stocks/list`, filter, and export.
    ///
    /// # Examples
    ///
    ///   tickerlist symbols
    ///   tickerlist symbols --page-size 50 --max-symbols 500 --output symbols.xlsx
    ///   tickerlist symbols --no-filter --dump-json symbols.json
    Symbols(SymbolsArgs),

    /// Fetch active reference tickers, map MICs to exchange codes, filter, and export.
    ///
    /// # Examples
    ///
    ///   tickerlist tickers
    ///   tickerlist tickers --max-records 5000
    ///   tickerlist tickers --details --multiplier 15 --timespan minute
    Tickers(TickersArgs),
}

/// Arguments for the `symbols` command.
#[derive(Debug, Args)]
pub struct SymbolsArgs {
    /// Records requested per page.
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: usize,

    /// Stop once this many records have been fetched.
    #[arg(long, default_value_t = MAX_SYMBOL_COUNT)]
    pub max_symbols: usize,

    /// Workbook to create or append to.
    #[arg(long, default_value = "symbols.xlsx")]
    pub output: PathBuf,

    /// Worksheet name.
    #[arg(long, default_value = "symbols")]
    pub sheet: String,

    /// Export every fetched symbol without filtering.
    #[arg(long, default_value_t = false)]
    pub no_filter: bool,

    /// Also write the raw fetched records as JSON to this path.
    #[arg(long)]
    pub dump_json: Option<PathBuf>,
}

/// Arguments for the `tickers` command.
#[derive(Debug, Args)]
pub struct TickersArgs {
    /// Page size of the reference ticker endpoint.
    #[arg(long, default_value_t = TICKER_PAGE_LIMIT)]
    pub limit: usize,

    /// Stop once this many tickers have been fetched.
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Workbook for the filtered listing.
    #[arg(long, default_value = "list_0.xlsx")]
    pub output: PathBuf,

    /// Worksheet name for the filtered listing.
    #[arg(long, default_value = "list 0")]
    pub sheet: String,

    /// Fetch aggregate bars for every kept ticker and export the detail report.
    #[arg(long, default_value_t = false)]
    pub details: bool,

    /// Workbook for the detail report.
    #[arg(long, default_value = "list_1.xlsx")]
    pub details_output: PathBuf,

    /// Worksheet name for the detail report.
    #[arg(long, default_value = "list 1")]
    pub details_sheet: String,

    /// Bar width in units of --timespan.
    #[arg(long, default_value_t = 30)]
    pub multiplier: u32,

    /// Bar width unit: minute, hour, day, week.
    #[arg(long, default_value = "minute")]
    pub timespan: Timespan,

    /// First day of the detail window (YYYY-MM-DD).
    #[arg(long, default_value = "2007-05-01", value_parser = parse_date)]
    pub from: Date,

    /// Last day of the detail window (YYYY-MM-DD).
    #[arg(long, default_value = "2022-04-26", value_parser = parse_date)]
    pub to: Date,

    /// Page size of the aggregates endpoint.
    #[arg(long, default_value_t = AGGREGATES_LIMIT)]
    pub details_limit: usize,
}

fn parse_date(value: &str) -> Result<Date, String> {
    parse_iso_date(value).map_err(|error| error.to_string())
}
