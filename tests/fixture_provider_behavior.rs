//! Behavior-driven tests for the deterministic offline provider
//!
//! These tests drive the public operations end to end against
//! `FixtureProvider`, the same provider the CLI uses.

use baofin_core::{
    aggregate, fetch_family_report, Credentials, FixtureProvider, IndicatorFamily,
    ProviderConfigBuilder, ReportDate, SourceErrorKind, StockCode,
};

fn provider(as_of: &str) -> FixtureProvider {
    ProviderConfigBuilder::new()
        .with_as_of(ReportDate::parse(as_of).expect("valid date"))
        .build()
        .fixture_provider()
}

fn code() -> StockCode {
    StockCode::parse("600519").expect("valid code")
}

// =============================================================================
// Fixture Provider: Family Reports
// =============================================================================

#[test]
fn when_a_profit_report_is_requested_the_provider_column_layout_is_kept() {
    // Given: An offline provider with reports published through 2024
    let mut provider = provider("2024-12-31");

    // When: The profitability report for 2023Q4 is fetched
    let result = fetch_family_report(&mut provider, IndicatorFamily::Profit, &code(), "2023", 4)
        .expect("published report");

    // Then: One row comes back in the provider's column order
    assert_eq!(
        result.columns,
        [
            "code", "pubDate", "statDate", "roeAvg", "npMargin", "gpMargin", "netProfit",
            "epsTTM", "MBRevenue", "totalShare", "liqaShare"
        ]
    );
    let record = result.records().next().expect("one row");
    assert_eq!(record.get("code"), Some("sh.600519"));
    assert_eq!(record.get("statDate"), Some("2023-12-31"));
    assert_eq!(record.get("pubDate"), Some("2024-01-30"));
    assert!(!provider.is_logged_in());
}

#[test]
fn when_a_year_precedes_listing_the_report_is_not_found() {
    // Given: A year before any listing
    let mut provider = provider("2024-12-31");

    // When: A report for 1990 is fetched
    let error = fetch_family_report(&mut provider, IndicatorFamily::Dupont, &code(), "1990", 1)
        .expect_err("not listed yet");

    // Then: The no-record status surfaces as NoDataFound
    assert_eq!(error.kind(), SourceErrorKind::NoDataFound);
}

#[test]
fn when_a_quarter_ends_after_as_of_the_report_is_not_found() {
    // Given: Reports published only through mid 2023
    let mut provider = provider("2023-06-30");

    // When: The 2023Q3 report is fetched
    let error = fetch_family_report(&mut provider, IndicatorFamily::Growth, &code(), "2023", 3)
        .expect_err("not published yet");

    // Then: The empty result is classified as NoDataFound
    assert_eq!(error.kind(), SourceErrorKind::NoDataFound);
}

#[test]
fn when_as_of_falls_between_quarter_end_and_publication_the_report_is_withheld() {
    // Given: 2023Q4 closed on 2023-12-31 but is published on 2024-01-30
    let mut provider = provider("2024-01-10");

    // When: The 2023Q4 report is fetched before its publication date
    let error = fetch_family_report(&mut provider, IndicatorFamily::Profit, &code(), "2023", 4)
        .expect_err("not published yet");

    // Then: Nothing published after as_of is served
    assert_eq!(error.kind(), SourceErrorKind::NoDataFound);
}

#[test]
fn when_as_of_reaches_the_publication_date_the_report_is_served() {
    // Given: as_of equals the 2023Q4 publication date
    let mut provider = provider("2024-01-30");

    // When: The 2023Q4 report is fetched
    let result = fetch_family_report(&mut provider, IndicatorFamily::Profit, &code(), "2023", 4)
        .expect("published report");

    // Then: The served pubDate never exceeds as_of
    let record = result.records().next().expect("one row");
    assert_eq!(record.get("pubDate"), Some("2024-01-30"));
}

#[test]
fn when_quarter_is_out_of_range_no_session_is_opened() {
    // Given: An offline provider
    let mut provider = provider("2024-12-31");

    // When: Quarter 5 is requested
    let error = fetch_family_report(&mut provider, IndicatorFamily::Balance, &code(), "2023", 5)
        .expect_err("invalid quarter");

    // Then: InvalidInput is returned
    assert_eq!(error.kind(), SourceErrorKind::InvalidInput);
    assert!(!provider.is_logged_in());
}

#[test]
fn when_credentials_are_empty_login_fails() {
    // Given: An offline provider without credentials
    let mut provider = FixtureProvider::new(
        Credentials::new("", ""),
        ReportDate::parse("2024-12-31").expect("valid date"),
    );

    // When: Any report is fetched
    let error = fetch_family_report(&mut provider, IndicatorFamily::Profit, &code(), "2023", 1)
        .expect_err("login rejected");

    // Then: LoginFailure is returned
    assert_eq!(error.kind(), SourceErrorKind::LoginFailure);
}

// =============================================================================
// Fixture Provider: Aggregation
// =============================================================================

#[test]
fn when_every_family_is_published_records_merge_all_six_families() {
    // Given: Reports published through 2024
    let mut provider = provider("2024-12-31");

    // When: 2023 is aggregated
    let table = aggregate(&mut provider, &code(), "2023-01-01", "2023-12-31").expect("data");

    // Then: Four records, each with every family's columns
    assert_eq!(table.len(), 4);
    for record in &table {
        assert_eq!(record.keys().count(), 3 + 58);
        for family in IndicatorFamily::ALL {
            let key = format!("{}statDate", family.prefix());
            assert!(record.contains_key(&key), "missing {key}");
        }
    }
    assert_eq!(table.columns().len(), 61);
}

#[test]
fn when_as_of_cuts_the_range_only_published_quarters_remain() {
    // Given: Reports published through 2023-07-30 (Q2's publication date)
    let mut provider = provider("2023-07-30");

    // When: All of 2023 is aggregated
    let table = aggregate(&mut provider, &code(), "2023-01-01", "2023-12-31").expect("data");

    // Then: Only Q1 and Q2 survive, and no pubDate is after as_of
    let quarters: Vec<u8> = table.iter().map(|record| record.quarter()).collect();
    assert_eq!(quarters, [1, 2]);
    for record in &table {
        let published = record.get("profit_pubDate").expect("profit published");
        assert!(published.as_str().is_some_and(|date| date <= "2023-07-30"));
    }
}

#[test]
fn when_aggregation_is_repeated_the_output_is_identical() {
    // Given: Two providers with the same configuration
    let mut first = provider("2024-12-31");
    let mut second = provider("2024-12-31");

    // When: The same range is aggregated twice
    let a = aggregate(&mut first, &code(), "2022-01-01", "2022-12-31").expect("data");
    let b = aggregate(&mut second, &code(), "2022-01-01", "2022-12-31").expect("data");

    // Then: The serialized tables match
    assert_eq!(
        serde_json::to_string(&a).expect("serializes"),
        serde_json::to_string(&b).expect("serializes")
    );
}
