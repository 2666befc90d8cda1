//! CLI argument definitions for foresight.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `predict` | Request one forecast and print it |
//! | `interactive` | Read tickers from stdin, one forecast per line |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `http://127.0.0.1:5001` | Forecast server (env `FORESIGHT_BASE_URL`) |
//! | `--timeout-ms` | transport default | Request timeout (env `FORESIGHT_TIMEOUT_MS`) |
//! | `--format` | `text` | Output format (text, json, html) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! foresight predict aapl
//! foresight predict MSFT --format json --pretty
//! foresight --base-url http://forecast.internal:5001 interactive
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use foresight_core::DEFAULT_BASE_URL;

/// Stock forecast client
///
/// Asks a foresight forecast server for the next-day price and dividend
/// outlook of a ticker and prints the result.
#[derive(Debug, Parser)]
#[command(name = "foresight", author, version, about = "Stock forecast client")]
pub struct Cli {
    /// Base url of the forecast server.
    #[arg(long, global = true, env = "FORESIGHT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in milliseconds. Unset leaves the transport default.
    #[arg(long, global = true, env = "FORESIGHT_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Output format for results.
    ///
    /// - text: aligned labels for terminals (default)
    /// - json: the rendered page as JSON
    /// - html: the result fragment used by the web page
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log request lifecycle at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Request a forecast for one ticker.
    ///
    /// # Examples
    ///
    ///   foresight predict AAPL
    ///   foresight predict " msft " --format html
    Predict(PredictArgs),

    /// Read tickers from stdin and request a forecast for each line.
    ///
    /// Every line counts as pressing Enter in the ticker field. Stops at
    /// end of input.
    Interactive,
}

/// Arguments for the `predict` command.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Ticker symbol; surrounding whitespace is ignored and case does not matter.
    pub ticker: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_uses_defaults() {
        let cli = Cli::try_parse_from(["foresight", "predict", "aapl"]).expect("valid args");

        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.timeout_ms, None);
        assert!(!cli.pretty);
        match cli.command {
            Command::Predict(args) => assert_eq!(args.ticker, "aapl"),
            Command::Interactive => panic!("expected predict"),
        }
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "foresight",
            "predict",
            "msft",
            "--format",
            "json",
            "--pretty",
            "--timeout-ms",
            "1500",
            "--base-url",
            "http://forecast.test:8080",
        ])
        .expect("valid args");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.pretty);
        assert_eq!(cli.timeout_ms, Some(1500));
        assert_eq!(cli.base_url, "http://forecast.test:8080");
    }

    #[test]
    fn blank_ticker_is_accepted_by_the_parser() {
        let cli = Cli::try_parse_from(["foresight", "predict", "  "]).expect("valid args");
        assert!(matches!(cli.command, Command::Predict(_)));
    }

    #[test]
    fn interactive_takes_no_arguments() {
        let cli = Cli::try_parse_from(["foresight", "-v", "interactive"]).expect("valid args");
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Interactive));
    }
}
