//! Detail report rows built from aggregate bars.
//!
//! Every cell is a display string; the sheet is meant for reading, not for
//! further computation.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use time::macros::{format_description, time};
use time::{Date, PrimitiveDateTime};

use crate::domain::{format_iso_date, AggregateBar, Listing, Timestamp};
use crate::error::ReportError;
use crate::fetch::AggregatesRequest;

/// One bar of the detail report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub day: String,
    pub window_header: String,
    pub window: String,
    pub symbol: String,
    pub name: String,
    pub extracted: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

impl Serialize for DetailRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(9))?;
        map.serialize_entry("day N", &self.day)?;
        map.serialize_entry(&self.window_header, &self.window)?;
        map.serialize_entry("Stock symbol", &self.symbol)?;
        map.serialize_entry("Name of the stock", &self.name)?;
        map.serialize_entry("Date of extraction", &self.extracted)?;
        map.serialize_entry("Open", &self.open)?;
        map.serialize_entry("High", &self.high)?;
        map.serialize_entry("Low", &self.low)?;
        map.serialize_entry("Close", &self.close)?;
        map.end()
    }
}

/// Renders `bars` of `listing` as report rows.
///
/// Day numbers count whole days since midnight UTC of the request's start
/// date; bar windows run from the bar start for one multiplier of the
/// timespan and are printed in UTC.
pub fn detail_rows(
    listing: &Listing,
    bars: &[AggregateBar],
    request: &AggregatesRequest,
    extracted_on: Date,
) -> Result<Vec<DetailRow>, ReportError> {
    let window_header = format!(
        "Timestamp = {} {}s",
        request.multiplier, request.timespan
    );
    let range_start = PrimitiveDateTime::new(request.from, time!(0:00)).assume_utc();
    let width = request.timespan.window(request.multiplier);
    let extracted = format!("D={}", format_iso_date(extracted_on));
    let name = listing.name.clone().unwrap_or_default();

    bars.iter()
        .map(|bar| {
            let start = Timestamp::from_unix_millis(bar.t)?.into_inner();
            let end = start
                .checked_add(width)
                .ok_or_else(|| ReportError::WindowOutOfRange {
                    value: format!("{} + {window_header}", bar.t),
                })?;

            Ok(DetailRow {
                day: format!("D{}", (start - range_start).whole_days()),
                window_header: window_header.clone(),
                window: format!("{} to {}", clock(start)?, clock(end)?),
                symbol: listing.symbol.clone(),
                name: name.clone(),
                extracted: extracted.clone(),
                open: format!("O={}", decimal(bar.o)),
                high: format!("H={}", decimal(bar.h)),
                low: format!("L={}", decimal(bar.l)),
                close: format!("C={}", decimal(bar.c)),
            })
        })
        .collect()
}

fn clock(value: time::OffsetDateTime) -> Result<String, ReportError> {
    value
        .format(format_description!(
            "[hour repr:12 padding:zero]:[minute] [period case:upper]"
        ))
        .map_err(|_| ReportError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Prices keep one decimal place when whole (`170.0`), otherwise shortest form.
fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
