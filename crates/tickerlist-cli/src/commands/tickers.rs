use serde::Serialize;
use tickerlist_core::{
    apply_exchange_codes, detail_rows, fetch_aggregates, fetch_exchange_codes, fetch_tickers,
    filter_listings, AggregatesRequest, ApiConfig, FilterConditions, HttpClient, Listing,
    TickerListOptions, Timestamp,
};
use tickerlist_export::{export_records, ExportReport};

use crate::cli::TickersArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct TickersResponseData {
    fetched: usize,
    kept: usize,
    export: ExportReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<DetailSummary>,
}

#[derive(Debug, Default, Serialize)]
struct DetailSummary {
    tickers: usize,
    tickers_without_bars: usize,
    rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    export: Option<ExportReport>,
}

pub async fn run(
    args: &TickersArgs,
    client: &dyn HttpClient,
    config: &ApiConfig,
) -> Result<CommandResult, CliError> {
    let options = TickerListOptions {
        limit: args.limit,
        max_records: args.max_records,
    };
    let records = fetch_tickers(client, config, options).await?;
    let fetched = records.len();

    let codes = fetch_exchange_codes(client, config).await?;
    let mut listings: Vec<Listing> = records.into_iter().map(Listing::from).collect();
    apply_exchange_codes(&mut listings, &codes);

    let kept = filter_listings(&listings, &FilterConditions::default())?;
    let export = export_records(&args.output, &args.sheet, &kept)?;

    let details = if args.details {
        Some(export_details(args, client, config, &kept).await?)
    } else {
        None
    };

    let data = serde_json::to_value(TickersResponseData {
        fetched,
        kept: kept.len(),
        export,
        details,
    })?;
    Ok(CommandResult::ok(data))
}

/// Fetches bars ticker by ticker and appends each ticker's rows to the
/// detail workbook as soon as they are rendered.
async fn export_details(
    args: &TickersArgs,
    client: &dyn HttpClient,
    config: &ApiConfig,
    listings: &[Listing],
) -> Result<DetailSummary, CliError> {
    let extracted_on = Timestamp::now().date();
    let mut summary = DetailSummary::default();

    for listing in listings {
        let request = AggregatesRequest::new(
            listing.symbol.as_str(),
            args.multiplier,
            args.timespan,
            args.from,
            args.to,
        )?
        .with_limit(args.details_limit);

        let bars = fetch_aggregates(client, config, &request).await?;
        summary.tickers += 1;
        if bars.is_empty() {
            summary.tickers_without_bars += 1;
            tracing::debug!(ticker = %listing.symbol, "no bars in window");
            continue;
        }

        let rows = detail_rows(listing, &bars, &request, extracted_on)?;
        summary.rows += rows.len();
        summary.export = Some(export_records(
            &args.details_output,
            &args.details_sheet,
            &rows,
        )?);
    }

    tracing::info!(
        tickers = summary.tickers,
        rows = summary.rows,
        "detail report written"
    );
    Ok(summary)
}
