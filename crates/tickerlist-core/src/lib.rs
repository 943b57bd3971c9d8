//! # Tickerlist Core
//!
//! Fetching, validation and filtering of stock listings for the tickerlist
//! toolkit.
//!
//! ## Overview
//!
//! - **Domain records** for the symbol list API and the reference API
//! - **Fetchers** that page through listing, exchange and aggregate endpoints
//! - **Filter** that keeps plain common stock on the major US exchanges
//! - **Detail report** rows rendered from aggregate bars
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | `API_KEY` / `API_HOST` loading |
//! | [`domain`] | Wire records, [`Listing`], [`Timestamp`] |
//! | [`error`] | Config, fetch, filter and report errors |
//! | [`fetch`] | Paginated fetchers |
//! | [`filter`] | Exchange/OTC/warrant filter |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`report`] | Detail report rows |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickerlist_core::{
//!     fetch_symbols, filter_listings, ApiConfig, FilterConditions, Listing,
//!     ReqwestHttpClient, SymbolListOptions,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     let client = ReqwestHttpClient::new();
//!
//!     let symbols = fetch_symbols(&client, &config, SymbolListOptions::default()).await?;
//!     let listings: Vec<Listing> = symbols.iter().map(Listing::from).collect();
//!     let kept = filter_listings(&listings, &FilterConditions::default())?;
//!
//!     println!("kept {} of {}", kept.len(), listings.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Fetchers        │────▶│ HTTP Client      │
//! │ (page / cursor) │     │ (reqwest/script) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Listing rows    │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Filter          │────▶│ Exporter (xlsx)  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Security
//!
//! - API keys are read from the environment or `.env` only
//! - Keys travel as query parameters and are stripped from logged URLs and errors

pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod http_client;
pub mod report;

pub use config::{ApiConfig, DEFAULT_REFERENCE_HOST};

pub use domain::{
    AggregateBar, AggregatePage, Exchange, ExchangeCode, ExchangeRecord, Industry, ListPage,
    Listing, Price, Symbol, SymbolLogo, TickerPage, TickerRecord, Timestamp,
};

pub use error::{ConfigError, FetchError, FilterError, ReportError};

pub use fetch::{
    apply_exchange_codes, fetch_aggregates, fetch_exchange_codes, fetch_symbols, fetch_tickers,
    AggregatesRequest, SymbolListOptions, TickerListOptions, Timespan,
};

pub use filter::{filter_listings, FilterConditions, ListingFilter, MarkerSet};

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, ScriptedHttpClient,
};

pub use report::{detail_rows, DetailRow};
