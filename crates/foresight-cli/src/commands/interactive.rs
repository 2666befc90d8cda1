use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use foresight_core::{ForecastController, Trigger, CONFIRM_KEY};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::CliError;
use crate::output::{LoadingIndicator, Output};

const PROMPT: &str = "ticker> ";

/// Each stdin line is the ticker field's content at the moment Enter is pressed.
pub async fn run(controller: &ForecastController, output: Output) -> Result<ExitCode, CliError> {
    let indicator = LoadingIndicator::spawn(controller.subscribe(), output.shows_progress());
    let prompt = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if prompt {
            let mut stderr = std::io::stderr().lock();
            write!(stderr, "{PROMPT}")?;
            stderr.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if controller
            .on_trigger(&Trigger::key(CONFIRM_KEY), &line)
            .await
            .is_some()
        {
            indicator.hide();
            output.print_page(&controller.page())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
