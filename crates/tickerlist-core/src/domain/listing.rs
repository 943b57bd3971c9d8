use serde::{Deserialize, Serialize};

use super::{Symbol, TickerRecord};

/// Flat listing row that is filtered and exported.
///
/// Field order is the column order of the exported sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: Option<String>,
    pub symbol: String,
    pub exchange: Option<String>,
    pub listdate: Option<String>,
    #[serde(skip)]
    pub full_ticker: Option<String>,
}

impl Listing {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, exchange: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            symbol: symbol.into(),
            exchange: exchange.map(str::to_owned),
            listdate: None,
            full_ticker: None,
        }
    }

    pub fn with_listdate(mut self, listdate: impl Into<String>) -> Self {
        self.listdate = Some(listdate.into());
        self
    }

    pub fn with_full_ticker(mut self, full_ticker: impl Into<String>) -> Self {
        self.full_ticker = Some(full_ticker.into());
        self
    }

    /// Identity used for duplicate removal: the venue-qualified ticker when known.
    pub fn key(&self) -> &str {
        self.full_ticker.as_deref().unwrap_or(&self.symbol)
    }
}

impl From<&Symbol> for Listing {
    fn from(symbol: &Symbol) -> Self {
        Self {
            name: Some(symbol.name.clone()),
            symbol: symbol.ticker.clone(),
            exchange: Some(symbol.exchange.name.clone()),
            listdate: symbol.list_date.map(|date| date.format_date()),
            full_ticker: Some(symbol.full_ticker.clone()),
        }
    }
}

impl From<TickerRecord> for Listing {
    fn from(record: TickerRecord) -> Self {
        Self {
            name: record.name,
            symbol: record.ticker,
            exchange: record.primary_exchange,
            listdate: record.last_updated_utc.map(|date| date.format_date()),
            full_ticker: None,
        }
    }
}
