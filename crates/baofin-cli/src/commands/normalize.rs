use baofin_core::StockCode;
use serde::Serialize;

use crate::cli::NormalizeCodeArgs;
use crate::error::CliError;
use crate::output::QueryParams;

use super::{CommandResult, Records};

#[derive(Debug, Serialize)]
pub struct NormalizedCode {
    input: String,
    code: StockCode,
    exchange: String,
    number: String,
}

pub fn run(args: &NormalizeCodeArgs) -> Result<CommandResult, CliError> {
    let code = StockCode::parse(&args.code)?;

    Ok(CommandResult {
        dataset: "stock_code",
        params: QueryParams {
            code: Some(args.code.clone()),
            ..QueryParams::default()
        },
        records: Records::Codes(vec![NormalizedCode {
            input: args.code.clone(),
            exchange: code.exchange().to_owned(),
            number: code.number().to_owned(),
            code,
        }]),
    })
}
