use baofin_core::{fetch_family_report, IndicatorFamily, ProviderConfig, StockCode};

use crate::cli::ReportArgs;
use crate::error::CliError;
use crate::output::QueryParams;

use super::{CommandResult, Records};

pub fn run(args: &ReportArgs, config: &ProviderConfig) -> Result<CommandResult, CliError> {
    let family: IndicatorFamily = args.family.parse()?;
    let code = StockCode::parse(&args.code)?;
    let mut provider = config.fixture_provider();

    let result = fetch_family_report(&mut provider, family, &code, &args.year, args.quarter)?;

    Ok(CommandResult {
        dataset: family.operation(),
        params: QueryParams {
            code: Some(code.to_string()),
            family: Some(family),
            year: Some(args.year.clone()),
            quarter: Some(args.quarter),
            ..QueryParams::default()
        },
        records: Records::Report(result),
    })
}
