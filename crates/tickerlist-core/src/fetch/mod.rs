//! Sequential fetchers for the listing, exchange and aggregate endpoints.
//!
//! Every fetcher issues one request at a time and gives up on the first
//! failure: transport errors, non-2xx statuses and payloads that do not
//! deserialize all surface as [`FetchError`] without retries.

mod reference;
mod symbols;

pub use reference::{
    apply_exchange_codes, fetch_aggregates, fetch_exchange_codes, fetch_tickers,
    AggregatesRequest, TickerListOptions, Timespan, AGGREGATES_LIMIT, TICKER_PAGE_LIMIT,
};
pub use symbols::{fetch_symbols, SymbolListOptions, LIST_ENDPOINT, MAX_SYMBOL_COUNT, PAGE_SIZE};

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

/// Executes `request` and deserializes a successful body into `T`.
pub(crate) async fn get_json<T>(client: &dyn HttpClient, request: HttpRequest) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let endpoint = request.endpoint().to_owned();
    let response = client
        .execute(request)
        .await
        .map_err(|source| FetchError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

    if !response.is_success() {
        return Err(FetchError::Status {
            endpoint,
            status: response.status,
        });
    }

    serde_json::from_str(&response.body).map_err(|source| FetchError::Schema { endpoint, source })
}
