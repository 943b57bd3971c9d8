//! Listing filter: keeps plain common stock on the major US exchanges.
//!
//! Stages run in order and keep survivors in input order:
//!
//! | Stage | Rule |
//! |-------|------|
//! | exchange | exchange is on the allow-list (ASCII case-insensitive) |
//! | name | name carries no OTC marker (class/series shares, funds, bonds, `%`, `/`) |
//! | symbol | ticker carries no OTC marker |
//! | suffix | ticker, name, and exchange do not end with `.WS` |
//! | collapse | repeated keys and warrant/unit tickers with a surviving base are dropped |
//!
//! Running [`filter_listings`] on its own output returns the same output.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::domain::Listing;
use crate::error::FilterError;

/// Exchange names and short codes accepted by the exchange stage.
pub const ALLOWED_EXCHANGES: &[&str] = &["NASDAQ", "NSD", "AMEX", "AMX", "NYSE", "NYE", "ARCA"];

/// Markers of listings that are not plain common stock.
pub const OTC_MARKERS: &[&str] = &[
    "%",
    "/",
    "ETF",
    "Bond",
    "Class A",
    "Class B",
    "Class C",
    "Class D",
    "Class F",
    "Series A",
    "Series B",
    "Series C",
    "Series D",
    "Series E",
    "Series F",
    "ordinary shares",
    "mutual funds",
    "mutual fund",
];

/// Trailing marker of warrant listings.
pub const EXCLUDED_SUFFIX: &str = ".WS";

/// Ticker suffixes of warrants and units that trade next to a base ticker.
pub const DERIVATIVE_SUFFIXES: &[&str] = &[".W", ".U", "W", "U"];

/// Static rule tables read by the filter stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConditions<'a> {
    pub exchanges: &'a [&'a str],
    pub otc_markers: &'a [&'a str],
    pub excluded_suffix: &'a str,
    pub derivative_suffixes: &'a [&'a str],
}

impl Default for FilterConditions<'static> {
    fn default() -> Self {
        Self {
            exchanges: ALLOWED_EXCHANGES,
            otc_markers: OTC_MARKERS,
            excluded_suffix: EXCLUDED_SUFFIX,
            derivative_suffixes: DERIVATIVE_SUFFIXES,
        }
    }
}

impl FilterConditions<'_> {
    pub fn passes_exchange(&self, listing: &Listing) -> bool {
        listing.exchange.as_deref().is_some_and(|exchange| {
            self.exchanges
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(exchange.trim()))
        })
    }

    pub fn passes_suffix(&self, listing: &Listing) -> bool {
        let suffix = self.excluded_suffix;
        if suffix.is_empty() {
            return true;
        }

        let excluded = |value: &str| ends_with_ignore_ascii_case(value, suffix);
        !(excluded(&listing.symbol)
            || listing.name.as_deref().is_some_and(excluded)
            || listing.exchange.as_deref().is_some_and(excluded))
    }
}

/// Case-insensitive matcher for OTC markers, compiled once per filter run.
///
/// Marker ends made of letters or digits must sit on word boundaries, so
/// `Class A` matches "Acme Class A" but not "Class Action"; punctuation
/// markers such as `%` match anywhere.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    pattern: Option<Regex>,
}

impl MarkerSet {
    pub fn new(markers: &[&str]) -> Result<Self, FilterError> {
        let alternatives: Vec<String> = markers
            .iter()
            .map(|marker| marker.trim())
            .filter(|marker| !marker.is_empty())
            .map(marker_pattern)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = RegexBuilder::new(&format!("(?:{})", alternatives.join("|")))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn matches(&self, value: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(value))
    }
}

fn marker_pattern(marker: &str) -> String {
    let word_edge = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
    let lead = if word_edge(marker.chars().next()) { r"\b" } else { "" };
    let tail = if word_edge(marker.chars().next_back()) { r"\b" } else { "" };
    format!("{lead}{}{tail}", regex::escape(marker))
}

/// [`FilterConditions`] with the marker table compiled.
#[derive(Debug, Clone)]
pub struct ListingFilter<'a> {
    conditions: FilterConditions<'a>,
    markers: MarkerSet,
}

impl<'a> ListingFilter<'a> {
    pub fn new(conditions: FilterConditions<'a>) -> Result<Self, FilterError> {
        Ok(Self {
            markers: MarkerSet::new(conditions.otc_markers)?,
            conditions,
        })
    }

    pub fn passes_name(&self, listing: &Listing) -> bool {
        match listing.name.as_deref() {
            Some(name) if !name.trim().is_empty() => !self.markers.matches(name),
            _ => false,
        }
    }

    pub fn passes_symbol(&self, listing: &Listing) -> bool {
        !listing.symbol.trim().is_empty() && !self.markers.matches(&listing.symbol)
    }

    /// Exchange, name, symbol and suffix stages combined.
    pub fn passes_predicates(&self, listing: &Listing) -> bool {
        self.conditions.passes_exchange(listing)
            && self.passes_name(listing)
            && self.passes_symbol(listing)
            && self.conditions.passes_suffix(listing)
    }

    /// Runs every stage and returns the survivors in input order.
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        let candidates: Vec<Listing> = listings
            .iter()
            .filter(|listing| self.passes_predicates(listing))
            .cloned()
            .collect();
        let kept = collapse_duplicates(candidates, &self.conditions);

        tracing::debug!(
            input = listings.len(),
            kept = kept.len(),
            "filtered listings"
        );
        kept
    }
}

/// Compiles `conditions` and runs every stage over `listings`.
pub fn filter_listings(
    listings: &[Listing],
    conditions: &FilterConditions<'_>,
) -> Result<Vec<Listing>, FilterError> {
    Ok(ListingFilter::new(*conditions)?.apply(listings))
}

/// Drops repeated keys (first occurrence wins) and warrant/unit tickers whose
/// base ticker is also present. A suffixed ticker without a base is kept.
pub fn collapse_duplicates(listings: Vec<Listing>, conditions: &FilterConditions<'_>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    let unique: Vec<Listing> = listings
        .into_iter()
        .filter(|listing| seen.insert(listing.key().to_ascii_uppercase()))
        .collect();

    let tickers: HashSet<String> = unique
        .iter()
        .map(|listing| listing.symbol.to_ascii_uppercase())
        .collect();

    unique
        .into_iter()
        .filter(|listing| {
            let ticker = listing.symbol.to_ascii_uppercase();
            let shadowed = derivative_bases(conditions.derivative_suffixes, &ticker)
                .any(|base| tickers.contains(base));
            if shadowed {
                tracing::trace!(ticker = %listing.symbol, "dropping warrant/unit listing");
            }
            !shadowed
        })
        .collect()
}

/// Ticker with each matching warrant/unit suffix removed.
fn derivative_bases<'s>(suffixes: &'s [&'s str], ticker: &'s str) -> impl Iterator<Item = &'s str> + 's {
    suffixes.iter().filter_map(move |suffix| {
        if ticker.len() > suffix.len() && ends_with_ignore_ascii_case(ticker, suffix) {
            Some(&ticker[..ticker.len() - suffix.len()])
        } else {
            None
        }
    })
}

fn ends_with_ignore_ascii_case(value: &str, suffix: &str) -> bool {
    let value = value.as_bytes();
    let suffix = suffix.as_bytes();
    value.len() >= suffix.len() && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, symbol: &str, exchange: &str) -> Listing {
        Listing::new(name, symbol, Some(exchange))
    }

    #[test]
    fn exchange_match_ignores_case() {
        let conditions = FilterConditions::default();
        assert!(conditions.passes_exchange(&listing("Acme", "ACME", "nasdaq")));
        assert!(conditions.passes_exchange(&listing("Acme", "ACME", "NYE")));
        assert!(!conditions.passes_exchange(&listing("Acme", "ACME", "OTC")));
        assert!(!conditions.passes_exchange(&Listing::new("Acme", "ACME", None)));
    }

    fn markers(markers: &[&str]) -> MarkerSet {
        MarkerSet::new(markers).expect("literal markers compile")
    }

    #[test]
    fn word_markers_respect_word_boundaries() {
        let set = markers(&["Class A", "ETF"]);
        assert!(set.matches("Acme Corp Class A"));
        assert!(set.matches("class a"));
        assert!(set.matches("SPDR S&P 500 ETF Trust"));
        assert!(!set.matches("Netflix, Inc."));
        assert!(!set.matches("Classic Auto Class AB"));
    }

    #[test]
    fn punctuation_markers_match_anywhere() {
        let set = markers(&["%", "/"]);
        assert!(set.matches("Acme 7.5% Notes"));
        assert!(set.matches("BRK/A"));
        assert!(!set.matches("Acme Inc"));
    }

    #[test]
    fn regex_metacharacters_in_markers_are_literal() {
        let set = markers(&["S&P (500)", "."]);
        assert!(set.matches("Tracks the S&P (500) index"));
        assert!(!set.matches("S&P 500"));
        assert!(set.matches("Acme Inc."));
    }

    #[test]
    fn empty_marker_table_matches_nothing() {
        assert!(!markers(&[]).matches("anything"));
        assert!(!markers(&["", "  "]).matches("anything"));
    }

    #[test]
    fn name_and_symbol_stages_use_the_marker_table() {
        let filter = ListingFilter::new(FilterConditions::default()).expect("defaults compile");
        assert!(!filter.passes_name(&listing("Acme Class B", "ACMB", "NYSE")));
        assert!(!filter.passes_symbol(&listing("Berkshire", "BRK/B", "NYSE")));
        assert!(filter.passes_predicates(&listing("Acme Corp", "ACME", "NYSE")));
    }

    #[test]
    fn suffix_stage_checks_symbol_name_and_exchange() {
        let conditions = FilterConditions::default();
        assert!(!conditions.passes_suffix(&listing("Acme", "ACME.WS", "NYSE")));
        assert!(!conditions.passes_suffix(&listing("Acme.ws", "ACME", "NYSE")));
        assert!(conditions.passes_suffix(&listing("Acme", "ACME", "NYSE")));
    }

    #[test]
    fn warrant_and_unit_suffixes_yield_bases() {
        let bases: Vec<&str> = derivative_bases(DERIVATIVE_SUFFIXES, "ABC.W").collect();
        assert_eq!(bases, ["ABC", "ABC."]);
        assert_eq!(derivative_bases(DERIVATIVE_SUFFIXES, "W").count(), 0);
        assert_eq!(derivative_bases(DERIVATIVE_SUFFIXES, "ABC").count(), 0);
    }

    #[test]
    fn collapse_keeps_first_of_repeated_keys() {
        let conditions = FilterConditions::default();
        let kept = collapse_duplicates(
            vec![
                listing("Acme", "ACME", "NYSE"),
                listing("Acme Again", "ACME", "NYSE"),
            ],
            &conditions,
        );

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name.as_deref(), Some("Acme"));
    }
}
