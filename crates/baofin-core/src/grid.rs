use tracing::debug;

use crate::{FiscalQuarter, ReportDate, ValidationError};

/// Quarters implied by a `YYYY-MM-DD` date range, ascending.
///
/// Every quarter of every year in `[start.year, end.year]` whose first day is
/// on or before `end_date` is kept. The start date only selects the first
/// year: a quarter's report may be filed before the exact start date.
pub fn build_grid(start_date: &str, end_date: &str) -> Result<Vec<FiscalQuarter>, ValidationError> {
    let start = ReportDate::parse_field("start_date", start_date)?;
    let end = ReportDate::parse_field("end_date", end_date)?;

    let mut grid = Vec::new();
    for year in start.year()..=end.year() {
        for quarter in 1..=4 {
            let candidate = FiscalQuarter::new(year, quarter)?;
            if candidate.first_day()? > end.into_inner() {
                continue;
            }
            grid.push(candidate);
        }
    }
    grid.sort();

    debug!(%start, %end, quarters = grid.len(), "built quarter grid");
    Ok(grid)
}
