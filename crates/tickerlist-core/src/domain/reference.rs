//! Wire records of the Polygon-style reference API.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Row of `/v3/reference/tickers`. Unlisted fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRecord {
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary_exchange: Option<String>,
    #[serde(default)]
    pub last_updated_utc: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerPage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<TickerRecord>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// Entry of the exchange directory. Only entries with both codes are usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    #[serde(default)]
    pub mic: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// MIC → short exchange code mapping (e.g. `XNYS` → `NYE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeCode {
    pub mic: String,
    pub code: String,
}

impl ExchangeRecord {
    pub fn into_code(self) -> Option<ExchangeCode> {
        match (self.mic, self.code) {
            (Some(mic), Some(code)) if !mic.is_empty() && !code.is_empty() => {
                Some(ExchangeCode { mic, code })
            }
            _ => None,
        }
    }
}

/// One aggregate bar; `t` is the window start in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBar {
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    #[serde(default)]
    pub v: Option<f64>,
    pub t: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatePage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<AggregateBar>,
    #[serde(default)]
    pub results_count: Option<usize>,
    #[serde(default, rename = "next_url")]
    pub next_url: Option<String>,
}
