use std::io::{self, Write};

use baofin_core::IndicatorFamily;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::commands::Records;
use crate::error::CliError;

/// Request parameters echoed back in the output metadata.
#[derive(Debug, Default, Clone, Serialize)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<IndicatorFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Field order is fixed to keep JSON output deterministic.
#[derive(Debug, Serialize)]
pub struct OutputMeta {
    pub request_id: Uuid,
    pub dataset: &'static str,
    pub params: QueryParams,
    pub total_rows: usize,
    pub returned_rows: usize,
    pub truncated: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CommandOutput {
    pub meta: OutputMeta,
    #[serde(rename = "data")]
    pub records: Records,
}

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, output, format, pretty)?;
    handle.flush()?;
    Ok(())
}

pub fn write_output<W: Write>(
    writer: &mut W,
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json if pretty => serde_json::to_writer_pretty(&mut *writer, output)?,
        OutputFormat::Json => serde_json::to_writer(&mut *writer, output)?,
        OutputFormat::Ndjson => return output.records.write_lines(writer),
    }
    writer.write_all(b"\n")?;
    Ok(())
}
