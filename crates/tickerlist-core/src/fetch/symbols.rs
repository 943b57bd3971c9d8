use crate::config::{join_url, ApiConfig};
use crate::domain::{ListPage, Symbol};
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

use super::get_json;

pub const LIST_ENDPOINT: &str = "stocks/list";
pub const PAGE_SIZE: usize = 100;
pub const MAX_SYMBOL_COUNT: usize = 300;

/// Pagination window for the symbol list API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolListOptions {
    pub page_size: usize,
    pub max_symbols: usize,
}

impl Default for SymbolListOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_symbols: MAX_SYMBOL_COUNT,
        }
    }
}

impl SymbolListOptions {
    pub fn new(page_size: usize, max_symbols: usize) -> Result<Self, FetchError> {
        if page_size == 0 {
            return Err(FetchError::InvalidRequest(String::from(
                "page size must be greater than zero",
            )));
        }
        if max_symbols == 0 {
            return Err(FetchError::InvalidRequest(String::from(
                "symbol cap must be greater than zero",
            )));
        }
        Ok(Self {
            page_size,
            max_symbols,
        })
    }

    /// Upper bound on requests: enough pages to cover the cap.
    pub const fn max_pages(&self) -> usize {
        self.max_symbols.div_ceil(self.page_size)
    }
}

/// Fetches pages 1, 2, … of `{API_HOST}/stocks/list` and concatenates them.
///
/// Stops after the first page whose `count` is below the page size, or once
/// the cap is covered; the result holds at most `max_symbols` records.
/// Duplicates across pages are kept; the filter removes them.
pub async fn fetch_symbols(
    client: &dyn HttpClient,
    config: &ApiConfig,
    options: SymbolListOptions,
) -> Result<Vec<Symbol>, FetchError> {
    let options = SymbolListOptions::new(options.page_size, options.max_symbols)?;
    let url = join_url(config.require_host()?, LIST_ENDPOINT);

    let mut symbols: Vec<Symbol> = Vec::new();
    for page in 1..=options.max_pages() {
        let request = HttpRequest::get(&url)
            .with_query("apiKey", config.api_key())
            .with_query("page", page)
            .with_query("pageSize", options.page_size);

        let result: ListPage = get_json(client, request).await?;
        let received = result.results.len();
        symbols.extend(result.results);

        tracing::debug!(
            endpoint = %url,
            page,
            received,
            count = result.count,
            total = symbols.len(),
            "fetched symbol page"
        );

        if result.count < options.page_size {
            break;
        }
    }

    symbols.truncate(options.max_symbols);
    tracing::info!(symbols = symbols.len(), "symbol list fetched");
    Ok(symbols)
}
