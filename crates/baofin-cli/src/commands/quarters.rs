use baofin_core::build_grid;

use crate::cli::QuartersArgs;
use crate::error::CliError;
use crate::output::QueryParams;

use super::{CommandResult, Records};

pub fn run(args: &QuartersArgs) -> Result<CommandResult, CliError> {
    let grid = build_grid(&args.start_date, &args.end_date)?;

    Ok(CommandResult {
        dataset: "quarter_grid",
        params: QueryParams {
            start_date: Some(args.start_date.clone()),
            end_date: Some(args.end_date.clone()),
            ..QueryParams::default()
        },
        records: Records::Quarters(grid),
    })
}
