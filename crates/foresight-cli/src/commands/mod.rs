mod interactive;
mod predict;

use std::process::ExitCode;

use foresight_core::{
    ClientConfig, ForecastClient, ForecastController, ForecastErrorKind, UiState,
};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Output;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = ClientConfig::new(&cli.base_url)?.with_timeout_ms(cli.timeout_ms)?;
    debug!(base_url = config.base_url(), timeout_ms = ?config.timeout_ms(), "client configured");

    let controller = ForecastController::new(ForecastClient::new(config));
    let output = Output::new(cli.format, cli.pretty);

    match &cli.command {
        Command::Predict(args) => predict::run(args, &controller, output).await,
        Command::Interactive => interactive::run(&controller, output).await,
    }
}

/// Exit code for the state a submission ended in.
fn exit_code_for(state: &UiState) -> u8 {
    match state.error().map(|info| info.kind) {
        None => 0,
        Some(ForecastErrorKind::Validation) => 2,
        Some(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foresight_core::ErrorInfo;

    #[test]
    fn failures_map_to_distinct_exit_codes() {
        let validation = UiState::Failure(ErrorInfo::new(
            ForecastErrorKind::Validation,
            "Please enter a ticker symbol.",
        ));
        let transport = UiState::Failure(ErrorInfo::new(
            ForecastErrorKind::Transport,
            "connection failed",
        ));

        assert_eq!(exit_code_for(&UiState::Idle), 0);
        assert_eq!(exit_code_for(&validation), 2);
        assert_eq!(exit_code_for(&transport), 3);
    }
}
