//! # Domain Models
//!
//! Validated value types shared by the query adapter and the aggregation
//! engine. Construction validates every invariant, so a value that exists is
//! safe to send to the remote provider.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockCode`] | Exchange-qualified code, normalized to `ex.NNNNNN` |
//! | [`IndicatorFamily`] | One of the six quarterly indicator families |
//! | [`FiscalQuarter`] | A (year, quarter) pair with calendar boundaries |
//! | [`ReportDate`] | Strict `YYYY-MM-DD` calendar date |

mod family;
mod quarter;
mod report_date;
mod stock_code;

pub use family::IndicatorFamily;
pub use quarter::FiscalQuarter;
pub use report_date::ReportDate;
pub use stock_code::StockCode;
