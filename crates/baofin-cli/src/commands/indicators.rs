use baofin_core::{aggregate, ProviderConfig, StockCode};

use crate::cli::IndicatorsArgs;
use crate::error::CliError;
use crate::output::QueryParams;

use super::{CommandResult, Records};

pub fn run(args: &IndicatorsArgs, config: &ProviderConfig) -> Result<CommandResult, CliError> {
    let code = StockCode::parse(&args.code)?;
    let mut provider = config.fixture_provider();

    let table = aggregate(&mut provider, &code, &args.start_date, &args.end_date)?;

    Ok(CommandResult {
        dataset: "financial_indicators",
        params: QueryParams {
            code: Some(code.to_string()),
            start_date: Some(args.start_date.clone()),
            end_date: Some(args.end_date.clone()),
            ..QueryParams::default()
        },
        records: Records::Indicators(table.into_records()),
    })
}
