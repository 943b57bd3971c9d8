use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use tickerlist_core::{
    fetch_symbols, filter_listings, ApiConfig, FilterConditions, HttpClient, Listing, Symbol,
    SymbolListOptions,
};
use tickerlist_export::{export_records, ExportReport};

use crate::cli::SymbolsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SymbolsResponseData {
    fetched: usize,
    kept: usize,
    filtered: bool,
    export: ExportReport,
}

pub async fn run(
    args: &SymbolsArgs,
    client: &dyn HttpClient,
    config: &ApiConfig,
) -> Result<CommandResult, CliError> {
    let options = SymbolListOptions::new(args.page_size, args.max_symbols)?;
    let symbols = fetch_symbols(client, config, options).await?;

    if let Some(path) = &args.dump_json {
        dump_json(path, &symbols)?;
    }

    let listings: Vec<Listing> = symbols.iter().map(Listing::from).collect();
    let kept = if args.no_filter {
        listings
    } else {
        filter_listings(&listings, &FilterConditions::default())?
    };

    let export = export_records(&args.output, &args.sheet, &kept)?;

    let data = serde_json::to_value(SymbolsResponseData {
        fetched: symbols.len(),
        kept: kept.len(),
        filtered: !args.no_filter,
        export,
    })?;
    Ok(CommandResult::ok(data))
}

fn dump_json(path: &Path, symbols: &[Symbol]) -> Result<(), CliError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, symbols)?;
    tracing::debug!(path = %path.display(), records = symbols.len(), "raw symbols dumped");
    Ok(())
}
