//! # Domain Models
//!
//! Wire records of the two listing APIs plus the flat [`Listing`] row the
//! filter and the exporter work on.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Rich record from the symbol list API |
//! | [`ListPage`] | Page envelope of the symbol list API |
//! | [`TickerRecord`] | Reference API ticker row |
//! | [`ExchangeCode`] | MIC to short exchange code mapping |
//! | [`AggregateBar`] | OHLC bar from the aggregates API |
//! | [`Listing`] | Filterable, exportable listing row |
//! | [`Timestamp`] | RFC3339 instant normalized to UTC |

mod listing;
mod records;
mod reference;
mod timestamp;

pub use listing::Listing;
pub use records::{Exchange, Industry, ListPage, Price, Symbol, SymbolLogo};
pub use reference::{
    AggregateBar, AggregatePage, ExchangeCode, ExchangeRecord, TickerPage, TickerRecord,
};
pub use timestamp::{format_iso_date, parse_iso_date, Timestamp};
