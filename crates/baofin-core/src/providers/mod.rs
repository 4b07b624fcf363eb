//! # Remote Providers
//!
//! In-process implementations of [`RemoteProvider`](crate::RemoteProvider).
//!
//! | Provider | Use |
//! |----------|-----|
//! | [`FixtureProvider`] | Deterministic offline data seeded from the stock code |
//! | [`ScriptedProvider`] | Programmable responses with call accounting, for tests |
//!
//! [`ScriptedProvider`] and [`ScriptedResponse`] are test doubles. They can be
//! scripted to fault or panic and are never meant for a live caller.

mod fixture;
mod scripted;

pub use fixture::FixtureProvider;
pub use scripted::{ScriptedProvider, ScriptedResponse};

use crate::remote::{ProviderFault, RemoteStatus, ResultCursor};

/// Fully buffered [`ResultCursor`].
///
/// `fault_at` makes `advance` fail when it would move onto that row index,
/// which is how a connection dropping mid-drain looks to the adapter.
#[derive(Debug, Clone)]
pub struct MemoryCursor {
    status: RemoteStatus,
    fields: Vec<String>,
    rows: Vec<Vec<String>>,
    position: Option<usize>,
    fault_at: Option<usize>,
}

impl MemoryCursor {
    pub fn new(status: RemoteStatus, fields: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            status,
            fields,
            rows,
            position: None,
            fault_at: None,
        }
    }

    /// Non-OK response: no fields, no rows.
    pub fn status_only(status: RemoteStatus) -> Self {
        Self::new(status, Vec::new(), Vec::new())
    }

    pub fn with_fault_at(mut self, row: usize) -> Self {
        self.fault_at = Some(row);
        self
    }
}

impl ResultCursor for MemoryCursor {
    fn status(&self) -> &RemoteStatus {
        &self.status
    }

    fn fields(&self) -> &[String] {
        &self.fields
    }

    fn advance(&mut self) -> Result<bool, ProviderFault> {
        let next = self.position.map_or(0, |current| current + 1);
        if self.fault_at == Some(next) {
            return Err(ProviderFault::Transport(format!(
                "connection reset while reading row {next}"
            )));
        }
        if next >= self.rows.len() {
            return Ok(false);
        }
        self.position = Some(next);
        Ok(true)
    }

    fn row_data(&self) -> Vec<String> {
        self.position
            .and_then(|index| self.rows.get(index))
            .cloned()
            .unwrap_or_default()
    }
}
