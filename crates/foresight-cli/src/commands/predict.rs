use std::process::ExitCode;

use foresight_core::{ForecastController, Trigger};

use crate::cli::PredictArgs;
use crate::error::CliError;
use crate::output::{LoadingIndicator, Output};

use super::exit_code_for;

pub async fn run(
    args: &PredictArgs,
    controller: &ForecastController,
    output: Output,
) -> Result<ExitCode, CliError> {
    let indicator = LoadingIndicator::spawn(controller.subscribe(), output.shows_progress());

    let outcome = controller
        .on_trigger(&Trigger::Activate, &args.ticker)
        .await
        .unwrap_or_default();

    indicator.hide();
    output.print_page(&controller.page())?;
    Ok(ExitCode::from(exit_code_for(&outcome)))
}
