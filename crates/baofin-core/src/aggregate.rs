//! Quarterly financial indicator aggregation.
//!
//! For every quarter implied by a date range the engine queries the six
//! [`IndicatorFamily`] endpoints in a fixed order and merges the first row of
//! each successful family into one [`CompositeRecord`] under the family's
//! field prefix. Failed families are skipped; their absence from the record
//! is the failure signal.
//!
//! ```text
//! code + date range
//!        │
//!        ▼
//!   build_grid ──▶ 2023Q1, 2023Q2, ...
//!        │
//!        ▼  (one session)
//!   for quarter: profit → operation → growth → balance → cashflow → dupont
//!        │
//!        ▼
//!   AggregatedTable (quarters with at least one family)
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::grid::build_grid;
use crate::query::{QueryOutcome, RemoteQuery, ResultSet};
use crate::remote::RemoteProvider;
use crate::session::{with_session, Session};
use crate::{FiscalQuarter, IndicatorFamily, SourceError, StockCode};

const BASE_KEYS: [&str; 3] = ["code", "year", "quarter"];

/// Merged indicator fields for one stock and one quarter.
///
/// Always carries `code`, `year` and `quarter`; every other key is a
/// family-prefixed column. A `None` value means the remote row was shorter
/// than its column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRecord {
    code: StockCode,
    period: FiscalQuarter,
    fields: Vec<(String, Option<String>)>,
}

impl CompositeRecord {
    pub fn new(code: StockCode, period: FiscalQuarter) -> Self {
        Self {
            code,
            period,
            fields: Vec::new(),
        }
    }

    pub fn code(&self) -> &StockCode {
        &self.code
    }

    pub const fn period(&self) -> FiscalQuarter {
        self.period
    }

    pub fn year(&self) -> String {
        self.period.year_label()
    }

    pub const fn quarter(&self) -> u8 {
        self.period.quarter()
    }

    /// True once any family contributed a field.
    pub fn has_indicators(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Merge the first row of `result` under `family`'s prefix.
    pub fn merge_first_row(&mut self, family: IndicatorFamily, result: &ResultSet) {
        let Some(row) = result.first_row() else {
            return;
        };
        for (index, column) in result.columns.iter().enumerate() {
            let key = format!("{}{column}", family.prefix());
            self.insert(key, row.get(index).cloned());
        }
    }

    fn insert(&mut self, key: String, value: Option<String>) {
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// All keys, base keys first, then merged fields in merge order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        BASE_KEYS
            .into_iter()
            .chain(self.fields.iter().map(|(name, _)| name.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        BASE_KEYS.contains(&key) || self.fields.iter().any(|(name, _)| name == key)
    }

    /// Value of `key` as JSON, `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "code" => Some(Value::from(self.code.as_str())),
            "year" => Some(Value::from(self.year())),
            "quarter" => Some(Value::from(self.quarter())),
            _ => self
                .fields
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone().map_or(Value::Null, Value::from)),
        }
    }

    /// Merged field names only, without the base keys.
    pub fn indicator_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for CompositeRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(BASE_KEYS.len() + self.fields.len()))?;
        map.serialize_entry("code", self.code.as_str())?;
        map.serialize_entry("year", &self.year())?;
        map.serialize_entry("quarter", &self.quarter())?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Composite records ordered by ascending quarter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AggregatedTable {
    records: Vec<CompositeRecord>,
}

impl AggregatedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CompositeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompositeRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<CompositeRecord> {
        self.records
    }

    /// Union of keys across records in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for key in self.records.iter().flat_map(CompositeRecord::keys) {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.to_owned());
            }
        }
        columns
    }

    fn push(&mut self, record: CompositeRecord) {
        self.records.push(record);
    }
}

impl<'a> IntoIterator for &'a AggregatedTable {
    type Item = &'a CompositeRecord;
    type IntoIter = std::slice::Iter<'a, CompositeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Aggregate every indicator family for `code` across the quarters implied by
/// `start_date..=end_date`, inside one provider session.
///
/// # Errors
///
/// - `InvalidInput` when either date is malformed (before login)
/// - `LoginFailure` when the session cannot be established
/// - `NoDataFound` when no quarter produced any family data
pub fn aggregate<P>(
    provider: &mut P,
    code: &StockCode,
    start_date: &str,
    end_date: &str,
) -> Result<AggregatedTable, SourceError>
where
    P: RemoteProvider + ?Sized,
{
    info!(%code, start_date, end_date, "aggregating financial indicators");
    let grid = build_grid(start_date, end_date)?;

    let table = with_session(provider, |session| {
        let table = aggregate_grid(session, code, &grid);
        if table.is_empty() {
            warn!(%code, start_date, end_date, "no financial indicator data in range");
            return Err(SourceError::no_data(format!(
                "no financial indicator data found for {code} in range {start_date} to {end_date}"
            )));
        }
        Ok(table)
    })?;

    info!(%code, records = table.len(), "aggregated financial indicators");
    Ok(table)
}

/// Aggregate an already-built grid inside an open session.
///
/// Never fails: quarters without any family data are left out, and the
/// caller decides what an empty table means.
pub fn aggregate_grid<P>(
    session: &mut Session<'_, P>,
    code: &StockCode,
    grid: &[FiscalQuarter],
) -> AggregatedTable
where
    P: RemoteProvider + ?Sized,
{
    let mut table = AggregatedTable::default();
    for period in grid {
        match collect_quarter(session, code, *period) {
            Some(record) => table.push(record),
            None => debug!(%code, %period, "no indicator family returned data; quarter dropped"),
        }
    }
    table
}

fn collect_quarter<P>(
    session: &mut Session<'_, P>,
    code: &StockCode,
    period: FiscalQuarter,
) -> Option<CompositeRecord>
where
    P: RemoteProvider + ?Sized,
{
    let mut record = CompositeRecord::new(code.clone(), period);

    for family in IndicatorFamily::ALL {
        let query = RemoteQuery::for_quarter(family, code.clone(), period);
        match session.execute(&query) {
            QueryOutcome::Rows(result) => record.merge_first_row(family, &result),
            QueryOutcome::Failure(failure) => debug!(
                %family,
                %period,
                kind = ?failure.kind(),
                "skipping family: {}",
                failure.message()
            ),
        }
    }

    record.has_indicators().then_some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CompositeRecord {
        CompositeRecord::new(
            StockCode::parse("sh.600000").expect("valid code"),
            FiscalQuarter::new(2023, 2).expect("valid quarter"),
        )
    }

    fn result(columns: &[&str], row: &[&str]) -> ResultSet {
        ResultSet {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: vec![row.iter().map(|v| v.to_string()).collect()],
        }
    }

    #[test]
    fn merges_first_row_under_family_prefix() {
        let mut record = record();
        let mut rows = result(&["code", "roeAvg"], &["sh.600000", "0.05"]);
        rows.rows.push(vec!["sh.600000".into(), "0.99".into()]);

        record.merge_first_row(IndicatorFamily::Profit, &rows);

        assert_eq!(record.get("profit_roeAvg"), Some(Value::from("0.05")));
        assert_eq!(record.get("profit_code"), Some(Value::from("sh.600000")));
        assert!(!record.contains_key("roeAvg"));
        assert!(record.has_indicators());
    }

    #[test]
    fn short_rows_yield_null_fields() {
        let mut record = record();
        record.merge_first_row(
            IndicatorFamily::Dupont,
            &result(&["code", "dupontROE"], &["sh.600000"]),
        );
        assert_eq!(record.get("dupont_dupontROE"), Some(Value::Null));
        assert_eq!(record.get("growth_YOYNI"), None);
    }

    #[test]
    fn serializes_base_keys_first_in_merge_order() {
        let mut record = record();
        record.merge_first_row(IndicatorFamily::Growth, &result(&["YOYNI"], &["0.1"]));
        record.merge_first_row(IndicatorFamily::Balance, &result(&["currentRatio"], &["1.2"]));

        let json = serde_json::to_string(&record).expect("serializes");
        assert_eq!(
            json,
            r#"{"code":"sh.600000","year":"2023","quarter":2,"growth_YOYNI":"0.1","balance_currentRatio":"1.2"}"#
        );
    }

    #[test]
    fn empty_result_contributes_nothing() {
        let mut record = record();
        record.merge_first_row(IndicatorFamily::CashFlow, &ResultSet::default());
        assert!(!record.has_indicators());
        assert_eq!(record.keys().collect::<Vec<_>>(), ["code", "year", "quarter"]);
    }
}
