use time::Duration;
use tracing::debug;

use super::MemoryCursor;
use crate::config::Credentials;
use crate::remote::{ProviderFault, RemoteProvider, RemoteStatus, ResultCursor};
use crate::{FiscalQuarter, IndicatorFamily, RemoteQuery, ReportDate, StockCode};

const FIRST_LISTING_YEAR: i32 = 1995;
const LISTING_YEAR_SPREAD: u64 = 16;
const PUBLICATION_LAG_DAYS: i64 = 30;

/// Deterministic offline provider.
///
/// Every stock code gets a listing year derived from its seed; earlier years
/// answer "no record found". A report is published 30 days after its
/// quarter ends and is served only once that publication date is on or
/// before `as_of`.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    credentials: Credentials,
    as_of: ReportDate,
    logged_in: bool,
}

impl FixtureProvider {
    pub fn new(credentials: Credentials, as_of: ReportDate) -> Self {
        Self {
            credentials,
            as_of,
            logged_in: false,
        }
    }

    pub const fn as_of(&self) -> ReportDate {
        self.as_of
    }

    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// First fiscal year with published reports for `code`.
    pub fn listing_year(code: &StockCode) -> i32 {
        // Spread is far below i32::MAX, the cast cannot truncate.
        FIRST_LISTING_YEAR + (code_seed(code) % LISTING_YEAR_SPREAD) as i32
    }

    fn respond(&self, query: &RemoteQuery) -> Result<MemoryCursor, ProviderFault> {
        let period = query.period();
        if period.year() < Self::listing_year(query.code()) {
            return Ok(MemoryCursor::status_only(RemoteStatus::no_record()));
        }

        let family = query.family();
        let fields = columns(family);
        let statement_date = period
            .last_day()
            .map_err(|error| ProviderFault::Malformed(error.to_string()))?;

        let published = statement_date
            .checked_add(Duration::days(PUBLICATION_LAG_DAYS))
            .unwrap_or(statement_date);

        if published > self.as_of.into_inner() {
            return Ok(MemoryCursor::new(RemoteStatus::ok(), fields, Vec::new()));
        }

        let mut row = vec![
            query.code().to_string(),
            ReportDate::from_date(published).to_string(),
            ReportDate::from_date(statement_date).to_string(),
        ];
        let seed = code_seed(query.code());
        row.extend(
            (0..fields.len() - BASE_COLUMNS.len())
                .map(|index| metric_value(seed, family, period, index)),
        );

        Ok(MemoryCursor::new(RemoteStatus::ok(), fields, vec![row]))
    }
}

impl RemoteProvider for FixtureProvider {
    fn login(&mut self) -> Result<RemoteStatus, ProviderFault> {
        if !self.credentials.is_complete() {
            return Ok(RemoteStatus::new("10001001", "user id or password is empty"));
        }
        self.logged_in = true;
        debug!(user_id = %self.credentials.user_id, "fixture provider login");
        Ok(RemoteStatus::new("0", "login success!"))
    }

    fn logout(&mut self) -> Result<RemoteStatus, ProviderFault> {
        if !self.logged_in {
            return Err(ProviderFault::NotLoggedIn);
        }
        self.logged_in = false;
        Ok(RemoteStatus::new("0", "logout success!"))
    }

    fn query(
        &mut self,
        query: &RemoteQuery,
    ) -> Result<Box<dyn ResultCursor + '_>, ProviderFault> {
        if !self.logged_in {
            return Err(ProviderFault::NotLoggedIn);
        }
        Ok(Box::new(self.respond(query)?))
    }
}

const BASE_COLUMNS: [&str; 3] = ["code", "pubDate", "statDate"];

fn metrics(family: IndicatorFamily) -> &'static [&'static str] {
    match family {
        IndicatorFamily::Profit => &[
            "roeAvg",
            "npMargin",
            "gpMargin",
            "netProfit",
            "epsTTM",
            "MBRevenue",
            "totalShare",
            "liqaShare",
        ],
        IndicatorFamily::Operation => &[
            "NRTurnRatio",
            "NRTurnDays",
            "INVTurnRatio",
            "INVTurnDays",
            "CATurnRatio",
            "AssetTurnRatio",
        ],
        IndicatorFamily::Growth => &["YOYEquity", "YOYAsset", "YOYNI", "YOYEPSBasic", "YOYPNI"],
        IndicatorFamily::Balance => &[
            "currentRatio",
            "quickRatio",
            "cashRatio",
            "YOYLiability",
            "liabilityToAsset",
            "assetToEquity",
        ],
        IndicatorFamily::CashFlow => &[
            "CAToAsset",
            "NCAToAsset",
            "tangibleAssetToAsset",
            "ebitToInterest",
            "CFOToOR",
            "CFOToNP",
            "CFOToGr",
        ],
        IndicatorFamily::Dupont => &[
            "dupontROE",
            "dupontAssetStoEquity",
            "dupontAssetTurn",
            "dupontPnitoni",
            "dupontNitogr",
            "dupontTaxBurden",
            "dupontIntburden",
            "dupontEbittogr",
        ],
    }
}

fn columns(family: IndicatorFamily) -> Vec<String> {
    BASE_COLUMNS
        .iter()
        .chain(metrics(family))
        .map(|name| (*name).to_owned())
        .collect()
}

fn metric_value(seed: u64, family: IndicatorFamily, period: FiscalQuarter, index: usize) -> String {
    let mixed = seed
        .wrapping_mul(31)
        .wrapping_add(family as u64 * 97)
        .wrapping_add(period.year().unsigned_abs() as u64 * 4 + period.quarter() as u64)
        .wrapping_mul(index as u64 + 7);
    format!("{:.6}", (mixed % 100_000) as f64 / 100_000.0)
}

fn code_seed(code: &StockCode) -> u64 {
    code.as_str().bytes().fold(13_u64, |acc, byte| {
        acc.wrapping_mul(29).wrapping_add(byte as u64)
    })
}
