//! Wire records of the symbol list API (`/stocks/list`).
//!
//! Deserializing into these types is the schema check: a page whose body does
//! not fit fails as a whole. Nullable upstream fields are `Option` and may
//! also be absent from the payload.

use serde::{Deserialize, Serialize};

use super::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolLogo {
    pub size: u64,
    pub extension: String,
    pub filename: String,
    pub content_type: String,
    pub web_path: String,
    pub web_pathname: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub name: String,
}

/// Listing venue referenced by a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub name: String,
    pub operating_mic: String,
    pub country: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub time: Timestamp,
}

/// One security as returned by the symbol list API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(default)]
    pub logo: Option<SymbolLogo>,
    pub locale: String,
    pub market_cap: f64,
    pub shares_outstanding_last: f64,
    pub delisted: bool,
    #[serde(default)]
    pub list_date: Option<Timestamp>,
    pub industry: Industry,
    pub ticker: String,
    pub full_ticker: String,
    pub name: String,
    pub exchange: Exchange,
    #[serde(default)]
    pub last_price: Option<Price>,
}

/// Page envelope of the symbol list API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub status: String,
    pub results: Vec<Symbol>,
    pub count: usize,
}
