use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::error::ReportError;

/// RFC3339 instant normalized to UTC.
///
/// Upstream payloads carry a mix of `Z` and offset timestamps; both are
/// accepted and stored in UTC so that derived dates do not depend on the
/// offset the API happened to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, ReportError> {
        let parsed = OffsetDateTime::parse(input.trim(), &Rfc3339).map_err(|_| {
            ReportError::InvalidTimestamp {
                value: input.to_owned(),
            }
        })?;

        Ok(Self::from_offset_datetime(parsed))
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    /// Builds a timestamp from epoch milliseconds, the unit used by aggregate bars.
    pub fn from_unix_millis(millis: i64) -> Result<Self, ReportError> {
        let nanos = i128::from(millis) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map(Self)
            .map_err(|_| ReportError::InvalidTimestamp {
                value: millis.to_string(),
            })
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn date(self) -> Date {
        self.0.date()
    }

    /// `YYYY-MM-DD` in UTC.
    pub fn format_date(self) -> String {
        format_iso_date(self.0.date())
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

pub fn parse_iso_date(input: &str) -> Result<Date, ReportError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ReportError::InvalidDate {
            value: input.to_owned(),
        }
    })
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
