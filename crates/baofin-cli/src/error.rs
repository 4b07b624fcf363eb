use std::io::Write;

use baofin_core::{SourceError, SourceErrorKind, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(error) => match error.kind() {
                SourceErrorKind::InvalidInput => 2,
                SourceErrorKind::LoginFailure => 3,
                SourceErrorKind::NoDataFound => 4,
                SourceErrorKind::RemoteError => 5,
            },
            Self::Serialization(_) => 6,
            Self::Io(_) => 10,
        }
    }

    /// Print the error once on `stderr` and return its exit code.
    ///
    /// The error is not also logged, so it appears a single time whatever the
    /// log filter.
    pub fn report(&self, stderr: &mut impl Write) -> u8 {
        // Nothing more can be done if stderr itself is gone.
        let _ = writeln!(stderr, "error: {self}");
        self.exit_code()
    }
}
