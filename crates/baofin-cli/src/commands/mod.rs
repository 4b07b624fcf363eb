mod indicators;
mod normalize;
mod quarters;
mod report;

use std::io::Write;
use std::time::Instant;

use baofin_core::{CompositeRecord, FiscalQuarter, ProviderConfig, ResultSet, ValidationError};
use serde::{Serialize, Serializer};
use tracing::info;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::{CommandOutput, OutputMeta, QueryParams};

pub use normalize::NormalizedCode;

/// Rows produced by one command, kept typed so key order survives
/// serialization.
#[derive(Debug)]
pub enum Records {
    Indicators(Vec<CompositeRecord>),
    Report(ResultSet),
    Quarters(Vec<FiscalQuarter>),
    Codes(Vec<NormalizedCode>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Self::Indicators(records) => records.len(),
            Self::Report(result) => result.len(),
            Self::Quarters(quarters) => quarters.len(),
            Self::Codes(codes) => codes.len(),
        }
    }

    pub fn truncate(&mut self, limit: usize) {
        match self {
            Self::Indicators(records) => records.truncate(limit),
            Self::Report(result) => result.rows.truncate(limit),
            Self::Quarters(quarters) => quarters.truncate(limit),
            Self::Codes(codes) => codes.truncate(limit),
        }
    }

    /// Write one compact JSON record per line.
    pub fn write_lines<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        match self {
            Self::Indicators(records) => write_lines(writer, records),
            Self::Report(result) => write_lines(writer, result.records()),
            Self::Quarters(quarters) => write_lines(writer, quarters),
            Self::Codes(codes) => write_lines(writer, codes),
        }
    }
}

impl Serialize for Records {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Indicators(records) => serializer.collect_seq(records),
            Self::Report(result) => serializer.collect_seq(result.records()),
            Self::Quarters(quarters) => serializer.collect_seq(quarters),
            Self::Codes(codes) => serializer.collect_seq(codes),
        }
    }
}

fn write_lines<W, I>(writer: &mut W, items: I) -> Result<(), CliError>
where
    W: Write,
    I: IntoIterator,
    I::Item: Serialize,
{
    for item in items {
        serde_json::to_writer(&mut *writer, &item)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Output of one command before truncation.
pub struct CommandResult {
    pub dataset: &'static str,
    pub params: QueryParams,
    pub records: Records,
}

pub fn run(cli: &Cli, config: &ProviderConfig) -> Result<CommandOutput, CliError> {
    if cli.limit == 0 {
        return Err(ValidationError::InvalidLimit.into());
    }

    let started = Instant::now();
    let result = match &cli.command {
        Command::Indicators(args) => indicators::run(args, config)?,
        Command::Report(args) => report::run(args, config)?,
        Command::Quarters(args) => quarters::run(args)?,
        Command::NormalizeCode(args) => normalize::run(args)?,
    };

    let CommandResult {
        dataset,
        params,
        mut records,
    } = result;
    let total_rows = records.len();
    records.truncate(cli.limit);
    let returned_rows = records.len();

    let meta = OutputMeta {
        request_id: Uuid::new_v4(),
        dataset,
        params,
        total_rows,
        returned_rows,
        truncated: returned_rows < total_rows,
        latency_ms: elapsed_ms(started),
    };
    info!(request_id = %meta.request_id, dataset, total_rows, returned_rows, "command finished");

    Ok(CommandOutput { meta, records })
}

fn elapsed_ms(started: Instant) -> u64 {
    let elapsed = started.elapsed().as_millis();
    u64::try_from(elapsed).unwrap_or(u64::MAX)
}
