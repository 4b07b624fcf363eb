//! Remote provider contract and normalized source errors.
//!
//! This module defines the boundary between baofin and the remote
//! financial-data provider. The provider speaks in status codes and row
//! cursors; everything above the query adapter speaks in [`SourceError`].
//!
//! # Contract
//!
//! | Item | Description |
//! |------|-------------|
//! | [`RemoteProvider::login`] | Establish the provider session |
//! | [`RemoteProvider::logout`] | Tear the provider session down |
//! | [`RemoteProvider::query`] | Run one operation, returning a [`ResultCursor`] |
//! | [`ResultCursor`] | Status, column metadata and a forward-only row cursor |

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::{RemoteQuery, ValidationError};

/// Status code reported by the provider for a successful call.
pub const STATUS_OK: &str = "0";

/// Status code the provider uses for "no record found".
pub const STATUS_NO_RECORD: &str = "10002";

const NO_RECORD_PATTERN: &str = "no record found";

/// Status code and message attached to every provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStatus {
    pub code: String,
    pub message: String,
}

impl RemoteStatus {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(STATUS_OK, "success")
    }

    pub fn no_record() -> Self {
        Self::new(STATUS_NO_RECORD, "no record found")
    }

    pub fn is_ok(&self) -> bool {
        self.code == STATUS_OK
    }

    /// True when a non-OK status means the provider simply holds no data.
    pub fn is_no_record(&self) -> bool {
        self.code == STATUS_NO_RECORD || self.message.to_lowercase().contains(NO_RECORD_PATTERN)
    }
}

impl Display for RemoteStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)
    }
}

/// Unclassified fault raised by a provider outside its status-code protocol.
///
/// Faults never leave the query adapter; they are wrapped into
/// [`SourceErrorKind::RemoteError`] with the query's context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFault {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no active session")]
    NotLoggedIn,
}

/// Forward-only cursor over one remote result set.
///
/// The cursor may fetch further pages while advancing; callers drain it
/// until [`advance`](ResultCursor::advance) returns `false`.
pub trait ResultCursor {
    /// Status reported for the whole call.
    fn status(&self) -> &RemoteStatus;

    /// Column names, valid for every row of this result set.
    fn fields(&self) -> &[String];

    /// Move to the next row. Returns `false` once exhausted.
    fn advance(&mut self) -> Result<bool, ProviderFault>;

    /// Raw field values of the current row.
    fn row_data(&self) -> Vec<String>;
}

/// Blocking remote provider contract.
///
/// Calls are synchronous; a provider serves one session at a time and the
/// [`Session`](crate::Session) guard holds it exclusively while active.
pub trait RemoteProvider {
    fn login(&mut self) -> Result<RemoteStatus, ProviderFault>;

    fn logout(&mut self) -> Result<RemoteStatus, ProviderFault>;

    fn query(&mut self, query: &RemoteQuery)
        -> Result<Box<dyn ResultCursor + '_>, ProviderFault>;
}

/// Normalized error classification seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidInput,
    LoginFailure,
    NoDataFound,
    RemoteError,
}

/// Structured error returned by every baofin operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn login_failure(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::LoginFailure,
            message: message.into(),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NoDataFound,
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RemoteError,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidInput => "source.invalid_input",
            SourceErrorKind::LoginFailure => "source.login_failure",
            SourceErrorKind::NoDataFound => "source.no_data",
            SourceErrorKind::RemoteError => "source.remote_error",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(value: ValidationError) -> Self {
        Self::invalid_input(value.to_string())
    }
}
