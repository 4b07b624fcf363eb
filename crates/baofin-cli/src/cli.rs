//! CLI argument definitions for baofin.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `indicators` | Quarterly composite indicators over a date range |
//! | `report` | One indicator family for one quarter |
//! | `quarters` | Quarter grid implied by a date range (no remote calls) |
//! | `normalize-code` | Canonical `ex.NNNNNN` form of a stock code |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--limit` | `250` | Maximum rows written |
//! | `--as-of` | `BAOFIN_AS_OF` or today | Latest publication date served |
//! | `--log-level` | `BAOFIN_LOG` or `warn` | Log filter for stderr |
//!
//! # Examples
//!
//! ```bash
//! baofin indicators 600000 --start-date 2023-01-01 --end-date 2023-12-31 --pretty
//! baofin report dupont sz.000001 --year 2023 --quarter 2
//! baofin quarters --start-date 2022-11-20 --end-date 2023-04-01
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Baofin - quarterly financial indicators for A-share listings
#[derive(Debug, Parser)]
#[command(
    name = "baofin",
    author,
    version,
    about = "Quarterly financial indicators for A-share listings",
    long_about = "Baofin queries a financial-data provider inside one login session per request \
and merges profitability, operation, growth, balance sheet, cash flow and DuPont indicators \
into one record per quarter.\n\
\n\
Use 'baofin <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON document with metadata (default)
    /// - ndjson: One JSON record per line
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Maximum number of rows to write.
    #[arg(long, global = true, default_value_t = 250)]
    pub limit: usize,

    /// Latest publication date (YYYY-MM-DD) the offline provider serves.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Log filter for stderr output (e.g. `info`, `baofin_core=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document.
    Json,
    /// Newline-delimited JSON (one record per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge all six indicator families per quarter over a date range.
    ///
    /// # Examples
    ///
    ///   baofin indicators sh.600000 --start-date 2023-01-01 --end-date 2023-08-15
    Indicators(IndicatorsArgs),

    /// Fetch one indicator family for one quarter.
    ///
    /// Families: profit, operation, growth, balance, cashflow, dupont.
    ///
    /// # Examples
    ///
    ///   baofin report profit 600000 --year 2023 --quarter 4
    Report(ReportArgs),

    /// List the quarters a date range covers.
    Quarters(QuartersArgs),

    /// Print the canonical form of a stock code.
    NormalizeCode(NormalizeCodeArgs),
}

/// Arguments for the `indicators` command.
#[derive(Debug, Args)]
pub struct IndicatorsArgs {
    /// Stock code (e.g. sh.600000, 600000, 000001.SZ).
    pub code: String,

    /// Range start, YYYY-MM-DD.
    #[arg(long)]
    pub start_date: String,

    /// Range end, YYYY-MM-DD.
    #[arg(long)]
    pub end_date: String,
}

/// Arguments for the `report` command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Indicator family.
    pub family: String,

    /// Stock code.
    pub code: String,

    /// Four-digit reporting year.
    #[arg(long)]
    pub year: String,

    /// Quarter, 1 to 4.
    #[arg(long)]
    pub quarter: u8,
}

/// Arguments for the `quarters` command.
#[derive(Debug, Args)]
pub struct QuartersArgs {
    /// Range start, YYYY-MM-DD.
    #[arg(long)]
    pub start_date: String,

    /// Range end, YYYY-MM-DD.
    #[arg(long)]
    pub end_date: String,
}

/// Arguments for the `normalize-code` command.
#[derive(Debug, Args)]
pub struct NormalizeCodeArgs {
    /// Stock code in any accepted form.
    pub code: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_indicators_with_global_flags() {
        let cli = Cli::try_parse_from([
            "baofin",
            "indicators",
            "600000",
            "--start-date",
            "2023-01-01",
            "--end-date",
            "2023-08-15",
            "--format",
            "ndjson",
            "--limit",
            "2",
        ])
        .expect("valid arguments");

        assert_eq!(cli.format, OutputFormat::Ndjson);
        assert_eq!(cli.limit, 2);
        match cli.command {
            Command::Indicators(args) => {
                assert_eq!(args.code, "600000");
                assert_eq!(args.end_date, "2023-08-15");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
