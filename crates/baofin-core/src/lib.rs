//! # Baofin Core
//!
//! Session-guarded queries over a remote financial-data provider and
//! quarterly financial indicator aggregation.
//!
//! ## Overview
//!
//! - **Session guard** bracketing every unit of remote work with login/logout
//! - **Query adapter** turning provider status codes and row cursors into a
//!   classified [`QueryOutcome`]
//! - **Quarter grid** derived from a reporting date range
//! - **Aggregation engine** merging six indicator families into one
//!   [`CompositeRecord`] per quarter
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregate`](mod@aggregate) | Composite records and the aggregation engine |
//! | [`config`] | Credentials and environment-driven configuration |
//! | [`domain`] | Validated value types (StockCode, FiscalQuarter, ...) |
//! | [`error`] | Validation errors |
//! | [`grid`] | Quarter grid builder |
//! | [`providers`] | Offline provider and the scripted test double |
//! | [`query`] | Remote query adapter and result sets |
//! | [`remote`] | Provider contract and source errors |
//! | [`report`] | Single-family report |
//! | [`session`] | Scoped provider session |
//!
//! ## Quick Start
//!
//! ```rust
//! use baofin_core::{aggregate, Credentials, FixtureProvider, ReportDate, StockCode};
//!
//! let as_of = ReportDate::parse("2024-12-31")?;
//! let mut provider = FixtureProvider::new(Credentials::default(), as_of);
//! let code = StockCode::parse("600000")?;
//!
//! let table = aggregate(&mut provider, &code, "2023-01-01", "2023-08-15")?;
//! for record in &table {
//!     println!("{} {}Q{}", record.code(), record.year(), record.quarter());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  CLI / Caller    │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Aggregation      │────▶│ Quarter Grid     │
//! │ Engine           │     └──────────────────┘
//! └────────┬─────────┘
//!          │  one Session per request
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Query Adapter    │────▶│ RemoteProvider   │
//! │ (QueryOutcome)   │     │ (login/query)    │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`SourceError`]. Only the engine-level outcome is
//! surfaced; per-family failures inside an aggregation are absorbed.
//!
//! ```rust
//! use baofin_core::{SourceError, SourceErrorKind};
//!
//! fn exit_code(error: &SourceError) -> u8 {
//!     match error.kind() {
//!         SourceErrorKind::InvalidInput => 2,
//!         SourceErrorKind::LoginFailure => 3,
//!         SourceErrorKind::NoDataFound => 4,
//!         SourceErrorKind::RemoteError => 5,
//!     }
//! }
//! # assert_eq!(exit_code(&SourceError::no_data("empty")), 4);
//! ```

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod error;
pub mod grid;
pub mod providers;
pub mod query;
pub mod remote;
pub mod report;
pub mod session;

// Aggregation engine
pub use aggregate::{aggregate, aggregate_grid, AggregatedTable, CompositeRecord};

// Configuration
pub use config::{Credentials, ProviderConfig, ProviderConfigBuilder};

// Domain models
pub use domain::{FiscalQuarter, IndicatorFamily, ReportDate, StockCode};

// Error types
pub use error::ValidationError;

// Quarter grid
pub use grid::build_grid;

// Providers (`ScriptedProvider` is a test double)
pub use providers::{FixtureProvider, MemoryCursor, ScriptedProvider, ScriptedResponse};

// Query adapter
pub use query::{FailureKind, QueryFailure, QueryOutcome, RemoteQuery, ResultSet, RowRecord};

// Provider contract
pub use remote::{
    ProviderFault, RemoteProvider, RemoteStatus, ResultCursor, SourceError, SourceErrorKind,
};

// Single-family report
pub use report::fetch_family_report;

// Session guard
pub use session::{with_session, Session, SessionState};
