//! Behavior-driven tests for the listing filter
//!
//! These tests verify WHICH listings survive: common stock on the allowed
//! exchanges, without OTC markers, warrants, units or repeated entries.

use tickerlist_core::filter::collapse_duplicates;
use tickerlist_core::{filter_listings, FilterConditions, Listing, ListingFilter, MarkerSet};

fn listing(name: &str, symbol: &str, exchange: &str) -> Listing {
    Listing::new(name, symbol, Some(exchange))
}

fn symbols(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.symbol.as_str()).collect()
}

fn run(listings: &[Listing]) -> Vec<Listing> {
    filter_listings(listings, &FilterConditions::default()).expect("default markers compile")
}

// =============================================================================
// Exchange stage
// =============================================================================

#[test]
fn only_allowed_exchanges_survive() {
    // Given: Listings on major exchanges, an OTC venue and no venue at all
    let mut no_venue = listing("Orphan Corp", "ORPH", "NYSE");
    no_venue.exchange = None;
    let input = vec![
        listing("Apple Inc.", "AAPL", "NASDAQ"),
        listing("IBM", "IBM", "nyse"),
        listing("Pink Sheet Co", "PSCO", "OTC"),
        listing("Tiny Mining", "TMIN", "TSX"),
        listing("Arca Fund Corp", "ARCF", "ARCA"),
        no_venue,
    ];

    // When: Filtering
    let kept = run(&input);

    // Then: Exchange match is case-insensitive and missing venues are dropped
    assert_eq!(symbols(&kept), ["AAPL", "IBM", "ARCF"]);
}

#[test]
fn short_exchange_codes_are_accepted() {
    let input = vec![
        listing("Apple Inc.", "AAPL", "NSD"),
        listing("IBM", "IBM", "NYE"),
        listing("Imperial Oil", "IMO", "AMX"),
    ];
    assert_eq!(run(&input).len(), 3);
}

// =============================================================================
// Name and symbol stages
// =============================================================================

#[test]
fn class_and_series_shares_are_excluded_case_insensitively() {
    // Given: Names carrying class/series markers in any case
    let input = vec![
        listing("Acme Class A", "ACMA", "NYSE"),
        listing("acme class a common", "ACMB", "NYSE"),
        listing("Widget SERIES B Preferred", "WDGP", "NYSE"),
        listing("Acme Corp", "ACME", "NYSE"),
    ];

    // When: Filtering
    let kept = run(&input);

    // Then: Only the plain listing remains
    assert_eq!(symbols(&kept), ["ACME"]);
}

#[test]
fn funds_bonds_and_punctuated_names_are_excluded() {
    let input = vec![
        listing("Global ETF Trust", "GETF", "ARCA"),
        listing("Municipal Bond Income", "MBI", "NYSE"),
        listing("Vanguard Mutual Fund", "VMF", "NASDAQ"),
        listing("Bank 6.5% Notes", "BKN", "NYSE"),
        listing("Foo / Bar Holdings", "FBH", "NYSE"),
        listing("Acme Ordinary Shares", "ACO", "NASDAQ"),
        listing("Bondwell Industries", "BDW", "NYSE"),
    ];

    let kept = run(&input);

    // Alphabetic markers need word boundaries, so "Bondwell" stays.
    assert_eq!(symbols(&kept), ["BDW"]);
}

#[test]
fn symbols_with_markers_are_excluded() {
    let input = vec![
        listing("Berkshire Hathaway", "BRK/B", "NYSE"),
        listing("Bank Preferred", "BAC%", "NYSE"),
        listing("Berkshire Hathaway Inc", "BRK", "NYSE"),
    ];
    assert_eq!(symbols(&run(&input)), ["BRK"]);
}

#[test]
fn blank_names_are_excluded() {
    let mut unnamed = listing("", "NONM", "NYSE");
    unnamed.name = None;
    let input = vec![listing("   ", "BLNK", "NYSE"), unnamed];
    assert!(run(&input).is_empty());
}

#[test]
fn marker_matching_respects_word_boundaries() {
    let class_a = MarkerSet::new(&["class a"]).expect("compiles");
    assert!(class_a.matches("Acme Class A"));
    assert!(class_a.matches("ACME CLASS A SHARES"));
    assert!(!class_a.matches("Acme Class Action Group"));

    let percent = MarkerSet::new(&["%"]).expect("compiles");
    assert!(percent.matches("6.25%"));
    assert!(!MarkerSet::new(&[""]).expect("compiles").matches("anything"));
}

// =============================================================================
// Suffix stage
// =============================================================================

#[test]
fn ws_suffix_is_excluded_wherever_it_appears() {
    // Given: ".WS" at the end of the ticker or the name, in any case
    let input = vec![
        listing("Acme Warrants", "ACME.WS", "NYSE"),
        listing("Beta Holdings.ws", "BETA", "NYSE"),
        listing("Gamma Corp", "GAMMA", "NYSE"),
    ];

    // When: Filtering
    let kept = run(&input);

    // Then: Only the clean listing remains
    assert_eq!(symbols(&kept), ["GAMMA"]);
}

// =============================================================================
// Duplicate collapse
// =============================================================================

#[test]
fn warrant_ticker_is_dropped_when_its_base_is_present() {
    // Given: A base ticker with its warrant and unit counterparts
    let input = vec![
        listing("Acme Corp", "ABC", "NASDAQ"),
        listing("Acme Corp Warrant", "ABCW", "NASDAQ"),
        listing("Acme Corp Unit", "ABCU", "NASDAQ"),
        listing("Acme Corp Warrant", "ABC.W", "NASDAQ"),
    ];

    // When: Filtering
    let kept = run(&input);

    // Then: Only the base remains
    assert_eq!(symbols(&kept), ["ABC"]);
}

#[test]
fn lone_suffixed_ticker_is_kept() {
    // Given: A ticker ending in W whose base is not listed
    let input = vec![
        listing("Snow Holdings", "SNOW", "NYSE"),
        listing("Acme Corp Warrant", "ABCW", "NASDAQ"),
    ];

    // When: Filtering
    let kept = run(&input);

    // Then: Both stay, since neither has a base in the set
    assert_eq!(symbols(&kept), ["SNOW", "ABCW"]);
}

#[test]
fn repeated_keys_keep_the_first_occurrence() {
    // Given: The same venue-qualified ticker twice, and the same symbol on two venues
    let input = vec![
        listing("Apple Inc.", "AAPL", "NASDAQ").with_full_ticker("NASDAQ:AAPL"),
        listing("Apple Inc", "AAPL", "NASDAQ").with_full_ticker("NASDAQ:AAPL"),
        listing("Shell plc", "SHEL", "NYSE").with_full_ticker("NYSE:SHEL"),
        listing("Shell plc", "SHEL", "NASDAQ").with_full_ticker("NASDAQ:SHEL"),
    ];

    // When: Collapsing duplicates
    let kept = collapse_duplicates(input, &FilterConditions::default());

    // Then: Repeated keys are dropped, distinct venues kept
    assert_eq!(kept.len(), 3);
    assert_eq!(kept[0].name.as_deref(), Some("Apple Inc."));
    assert_eq!(kept[2].exchange.as_deref(), Some("NASDAQ"));
}

// =============================================================================
// Whole-filter properties
// =============================================================================

#[test]
fn survivors_keep_input_order() {
    let input = vec![
        listing("Zeta Corp", "ZETA", "NYSE"),
        listing("Drop Class B", "DRPB", "NYSE"),
        listing("Alpha Corp", "ALPH", "NASDAQ"),
        listing("Mid Corp", "MID", "AMEX"),
    ];
    assert_eq!(symbols(&run(&input)), ["ZETA", "ALPH", "MID"]);
}

#[test]
fn filtering_twice_changes_nothing() {
    // Given: A mixed listing
    let input = vec![
        listing("Acme Corp", "ABC", "NASDAQ"),
        listing("Acme Corp Warrant", "ABCW", "NASDAQ"),
        listing("Acme Corp Warrant Unit", "ABCWU", "NASDAQ"),
        listing("Lone Unit Corp", "LONU", "NYSE"),
        listing("Global ETF", "GETF", "ARCA"),
        listing("Beta Inc", "BETA", "nasdaq"),
        listing("Beta Inc", "BETA", "nasdaq"),
    ];

    // When: Filtering the output again
    let once = run(&input);
    let twice = run(&once);

    // Then: The second pass is a no-op
    assert_eq!(once, twice);
    assert_eq!(symbols(&once), ["ABC", "LONU", "BETA"]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(run(&[]).is_empty());
}

#[test]
fn custom_marker_tables_are_honored() {
    // Given: A rule table whose markers carry regex metacharacters
    let conditions = FilterConditions {
        otc_markers: &["Fund (II)", "+"],
        ..FilterConditions::default()
    };
    let input = vec![
        listing("Growth Fund (II)", "GFII", "NYSE"),
        listing("Growth Fund II", "GFTW", "NYSE"),
        listing("Acme+ Holdings", "ACMP", "NYSE"),
    ];

    // When: Compiling and applying the filter
    let filter = ListingFilter::new(conditions).expect("markers are matched literally");
    let kept = filter.apply(&input);

    // Then: Markers match as literal text, not as patterns
    assert_eq!(symbols(&kept), ["GFTW"]);
}
