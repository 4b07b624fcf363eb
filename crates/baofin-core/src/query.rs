//! Remote query adapter.
//!
//! Runs one [`RemoteQuery`] against a provider, drains the returned cursor and
//! classifies the response into a [`QueryOutcome`]. Every failure path ends in
//! a classified [`QueryFailure`]; provider faults never escape this layer.

use std::fmt::{Display, Formatter};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::remote::{ProviderFault, RemoteProvider};
use crate::{FiscalQuarter, IndicatorFamily, SourceError, StockCode, ValidationError};

/// One remote operation bound to an indicator family and a reporting period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    family: IndicatorFamily,
    code: StockCode,
    period: FiscalQuarter,
}

impl RemoteQuery {
    /// Build a query from a 4-digit year label and a quarter number.
    pub fn new(
        family: IndicatorFamily,
        code: StockCode,
        year: &str,
        quarter: u8,
    ) -> Result<Self, ValidationError> {
        let period = FiscalQuarter::from_label(year, quarter)?;
        Ok(Self::for_quarter(family, code, period))
    }

    pub fn for_quarter(family: IndicatorFamily, code: StockCode, period: FiscalQuarter) -> Self {
        Self {
            family,
            code,
            period,
        }
    }

    pub const fn family(&self) -> IndicatorFamily {
        self.family
    }

    pub const fn operation(&self) -> &'static str {
        self.family.operation()
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
}

impl Display for RemoteQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(code={}, year={}, quarter={})",
            self.operation(),
            self.code,
            self.period.year_label(),
            self.period.quarter()
        )
    }
}

/// Fully drained result set, in the column order reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_row(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows as ordered column/value records.
    pub fn records(&self) -> impl Iterator<Item = RowRecord<'_>> {
        self.rows.iter().map(move |row| RowRecord {
            columns: &self.columns,
            values: row,
        })
    }
}

/// Borrowed view of one row, serialized as a flat column-to-value map.
#[derive(Debug, Clone, Copy)]
pub struct RowRecord<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl RowRecord<'_> {
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index).map(String::as_str)
    }
}

impl Serialize for RowRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (index, column) in self.columns.iter().enumerate() {
            map.serialize_entry(column, &self.values.get(index))?;
        }
        map.end()
    }
}

/// Failure classes a single remote call can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoDataFound,
    RemoteError,
}

/// Classified failure of one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    kind: FailureKind,
    message: String,
}

impl QueryFailure {
    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NoDataFound,
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::RemoteError,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<QueryFailure> for SourceError {
    fn from(value: QueryFailure) -> Self {
        match value.kind {
            FailureKind::NoDataFound => SourceError::no_data(value.message),
            FailureKind::RemoteError => SourceError::remote(value.message),
        }
    }
}

/// Normalized result of one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Rows(ResultSet),
    Failure(QueryFailure),
}

impl QueryOutcome {
    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }

    pub fn into_result(self) -> Result<ResultSet, SourceError> {
        match self {
            Self::Rows(result) => Ok(result),
            Self::Failure(failure) => Err(failure.into()),
        }
    }
}

/// Run `query` and classify the response.
///
/// Callers go through [`Session::execute`](crate::Session::execute) so the
/// provider is always logged in. Failures are logged at `debug` only; the
/// caller decides whether a failure is absorbed or escalated.
pub(crate) fn execute<P>(provider: &mut P, query: &RemoteQuery) -> QueryOutcome
where
    P: RemoteProvider + ?Sized,
{
    debug!(family = %query.family(), code = %query.code(), period = %query.period(), "running remote query");

    match drain(provider, query) {
        Ok(outcome) => outcome,
        Err(fault) => {
            debug!(%query, %fault, "unexpected provider fault");
            QueryOutcome::Failure(QueryFailure::remote(format!(
                "unexpected error fetching {} data for {}, {}: {fault}",
                query.family().label(),
                query.code(),
                query.period()
            )))
        }
    }
}

fn drain<P>(provider: &mut P, query: &RemoteQuery) -> Result<QueryOutcome, ProviderFault>
where
    P: RemoteProvider + ?Sized,
{
    let label = query.family().label();
    let mut cursor = provider.query(query)?;

    let status = cursor.status().clone();
    if !status.is_ok() {
        debug!(%query, code = %status.code, message = %status.message, "remote query returned non-OK status");
        let failure = if status.is_no_record() {
            QueryFailure::no_data(format!(
                "no {label} data found for {}, {}: {status}",
                query.code(),
                query.period()
            ))
        } else {
            QueryFailure::remote(format!("remote error fetching {label} data: {status}"))
        };
        return Ok(QueryOutcome::Failure(failure));
    }

    let columns = cursor.fields().to_vec();
    let mut rows = Vec::new();
    while cursor.advance()? {
        rows.push(cursor.row_data());
    }

    if rows.is_empty() {
        debug!(%query, "remote query returned an empty result set");
        return Ok(QueryOutcome::Failure(QueryFailure::no_data(format!(
            "no {label} data found for {}, {} (empty result set)",
            query.code(),
            query.period()
        ))));
    }

    debug!(%query, rows = rows.len(), "remote query succeeded");
    Ok(QueryOutcome::Rows(ResultSet { columns, rows }))
}
