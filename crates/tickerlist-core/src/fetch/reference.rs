use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use time::{Date, Duration};

use crate::config::{join_url, ApiConfig};
use crate::domain::{
    format_iso_date, AggregateBar, AggregatePage, ExchangeCode, ExchangeRecord, Listing,
    TickerPage, TickerRecord,
};
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

use super::get_json;

pub const TICKERS_ENDPOINT: &str = "v3/reference/tickers";
pub const EXCHANGES_ENDPOINT: &str = "v1/meta/exchanges";

/// Page size requested from the ticker reference endpoint.
pub const TICKER_PAGE_LIMIT: usize = 1000;
/// Page size requested from the aggregates endpoint.
pub const AGGREGATES_LIMIT: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerListOptions {
    pub limit: usize,
    pub max_records: Option<usize>,
}

impl Default for TickerListOptions {
    fn default() -> Self {
        Self {
            limit: TICKER_PAGE_LIMIT,
            max_records: None,
        }
    }
}

/// Fetches active stock tickers, following `next_url` while pages come back full.
pub async fn fetch_tickers(
    client: &dyn HttpClient,
    config: &ApiConfig,
    options: TickerListOptions,
) -> Result<Vec<TickerRecord>, FetchError> {
    if options.limit == 0 {
        return Err(FetchError::InvalidRequest(String::from(
            "ticker page limit must be greater than zero",
        )));
    }

    let mut request = HttpRequest::get(join_url(config.reference_host(), TICKERS_ENDPOINT))
        .with_query("active", true)
        .with_query("market", "stocks")
        .with_query("limit", options.limit)
        .with_query("apiKey", config.api_key());

    let mut records: Vec<TickerRecord> = Vec::new();
    let mut page = 1usize;
    loop {
        let result: TickerPage = get_json(client, request).await?;
        let count = result.count.unwrap_or(result.results.len());
        records.extend(result.results);

        tracing::debug!(page, count, total = records.len(), "fetched ticker page");

        if options.max_records.is_some_and(|cap| records.len() >= cap) {
            break;
        }

        match result.next_url {
            Some(next) if count == options.limit => {
                request = HttpRequest::get(next).with_query("apiKey", config.api_key());
                page += 1;
            }
            _ => break,
        }
    }

    if let Some(cap) = options.max_records {
        records.truncate(cap);
    }
    tracing::info!(tickers = records.len(), pages = page, "ticker list fetched");
    Ok(records)
}

/// Fetches the exchange directory and keeps entries that carry both a MIC and a short code.
pub async fn fetch_exchange_codes(
    client: &dyn HttpClient,
    config: &ApiConfig,
) -> Result<Vec<ExchangeCode>, FetchError> {
    let request = HttpRequest::get(join_url(config.reference_host(), EXCHANGES_ENDPOINT))
        .with_query("apiKey", config.api_key());

    let records: Vec<ExchangeRecord> = get_json(client, request).await?;
    let total = records.len();
    let codes: Vec<ExchangeCode> = records
        .into_iter()
        .filter_map(ExchangeRecord::into_code)
        .collect();

    if codes.len() < total {
        tracing::warn!(
            skipped = total - codes.len(),
            "exchange entries without mic/code ignored"
        );
    }
    Ok(codes)
}

/// Replaces each listing's exchange MIC with its short code. Unknown MICs are left as is.
pub fn apply_exchange_codes(listings: &mut [Listing], codes: &[ExchangeCode]) {
    let by_mic: HashMap<&str, &str> = codes
        .iter()
        .map(|code| (code.mic.as_str(), code.code.as_str()))
        .collect();

    for listing in listings.iter_mut() {
        let Some(mic) = listing.exchange.as_deref() else {
            continue;
        };
        if let Some(code) = by_mic.get(mic) {
            listing.exchange = Some((*code).to_owned());
        }
    }
}

/// Bar width unit understood by the aggregates endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timespan {
    Minute,
    Hour,
    Day,
    Week,
}

impl Timespan {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    /// Wall-clock width of `multiplier` units.
    pub fn window(self, multiplier: u32) -> Duration {
        let multiplier = i64::from(multiplier);
        match self {
            Self::Minute => Duration::minutes(multiplier),
            Self::Hour => Duration::hours(multiplier),
            Self::Day => Duration::days(multiplier),
            Self::Week => Duration::weeks(multiplier),
        }
    }
}

impl Display for Timespan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            other => Err(format!(
                "invalid timespan '{other}', expected one of minute, hour, day, week"
            )),
        }
    }
}

/// Parameters of one aggregates query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatesRequest {
    pub ticker: String,
    pub multiplier: u32,
    pub timespan: Timespan,
    pub from: Date,
    pub to: Date,
    pub limit: usize,
}

impl AggregatesRequest {
    pub fn new(
        ticker: impl Into<String>,
        multiplier: u32,
        timespan: Timespan,
        from: Date,
        to: Date,
    ) -> Result<Self, FetchError> {
        let ticker = ticker.into();
        if ticker.trim().is_empty() {
            return Err(FetchError::InvalidRequest(String::from(
                "aggregates request needs a ticker",
            )));
        }
        if multiplier == 0 {
            return Err(FetchError::InvalidRequest(String::from(
                "aggregates multiplier must be greater than zero",
            )));
        }
        if from > to {
            return Err(FetchError::InvalidRequest(format!(
                "aggregates range starts after it ends ({from} > {to})"
            )));
        }
        Ok(Self {
            ticker,
            multiplier,
            timespan,
            from,
            to,
            limit: AGGREGATES_LIMIT,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    fn path(&self) -> String {
        format!(
            "v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            urlencoding::encode(&self.ticker),
            self.multiplier,
            self.timespan,
            format_iso_date(self.from),
            format_iso_date(self.to)
        )
    }
}

/// Fetches split-adjusted bars for one ticker, following `next_url` until it is absent.
pub async fn fetch_aggregates(
    client: &dyn HttpClient,
    config: &ApiConfig,
    request: &AggregatesRequest,
) -> Result<Vec<AggregateBar>, FetchError> {
    let mut next = HttpRequest::get(join_url(config.reference_host(), &request.path()))
        .with_query("unadjusted", false)
        .with_query("limit", request.limit)
        .with_query("apiKey", config.api_key());

    let mut bars: Vec<AggregateBar> = Vec::new();
    loop {
        let page: AggregatePage = get_json(client, next).await?;
        bars.extend(page.results);

        match page.next_url {
            Some(url) => next = HttpRequest::get(url).with_query("apiKey", config.api_key()),
            None => break,
        }
    }

    tracing::debug!(ticker = %request.ticker, bars = bars.len(), "fetched aggregates");
    Ok(bars)
}
