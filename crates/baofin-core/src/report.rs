use tracing::{info, warn};

use crate::query::{RemoteQuery, ResultSet};
use crate::remote::RemoteProvider;
use crate::session::with_session;
use crate::{IndicatorFamily, SourceError, SourceErrorKind, StockCode};

/// Fetch one indicator family's full report for a single quarter.
///
/// Unlike [`aggregate`](crate::aggregate()), every row is returned in the
/// provider's column order and a failed call is surfaced to the caller.
pub fn fetch_family_report<P>(
    provider: &mut P,
    family: IndicatorFamily,
    code: &StockCode,
    year: &str,
    quarter: u8,
) -> Result<ResultSet, SourceError>
where
    P: RemoteProvider + ?Sized,
{
    let query = RemoteQuery::new(family, code.clone(), year, quarter)?;
    info!(%query, "fetching family report");

    let result = with_session(provider, |session| session.execute(&query).into_result())
        .inspect_err(|error| {
            // Login failures are already logged by the session guard.
            if error.kind() != SourceErrorKind::LoginFailure {
                warn!(%query, kind = ?error.kind(), "family report failed: {}", error.message());
            }
        })?;

    info!(%query, rows = result.len(), "fetched family report");
    Ok(result)
}
