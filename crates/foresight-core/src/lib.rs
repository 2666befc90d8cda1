//! # Foresight Core
//!
//! Client side of the foresight stock forecast service: ask the forecast
//! endpoint about one ticker and turn the answer into something a user can
//! read.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | One `GET /predict/{TICKER}` round trip and outcome classification |
//! | [`config`] | Base url and timeout settings |
//! | [`controller`] | Submission lifecycle and shared display state |
//! | [`domain`] | Ticker and forecast wire types |
//! | [`error`] | Validation and forecast error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`render`] | Pure rendering from state to display regions |
//! | [`state`] | `UiState` and `ErrorInfo` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foresight_core::{ClientConfig, ForecastClient, ForecastController};
//!
//! # async fn demo() -> Result<(), foresight_core::ValidationError> {
//! let config = ClientConfig::new("http://127.0.0.1:5001")?;
//! let controller = ForecastController::new(ForecastClient::new(config));
//!
//! controller.submit("  aapl ").await;
//! print!("{}", controller.page().to_text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / page     │◀──── UiState (watch channel)
//! └────────┬────────┘              ▲
//!          │ Trigger               │
//!          ▼                       │
//! ┌─────────────────┐──────────────┘
//! │   Controller    │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ForecastClient  │────▶│ HTTP Client      │
//! └─────────────────┘     │ (reqwest/script) │
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every failure ends up as [`UiState::Failure`] carrying an [`ErrorInfo`];
//! nothing is retried.
//!
//! ```rust
//! use foresight_core::{ForecastError, ForecastErrorKind};
//!
//! fn describe(error: &ForecastError) -> &'static str {
//!     match error.kind() {
//!         ForecastErrorKind::Validation => "fix the input",
//!         ForecastErrorKind::ServerReported | ForecastErrorKind::ServerUnknown => "server said no",
//!         ForecastErrorKind::Transport => "could not reach the server",
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod render;
pub mod state;

pub use client::ForecastClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use controller::{ForecastController, Trigger, CONFIRM_KEY};
pub use domain::{Direction, Figure, Forecast, Ticker, NOT_APPLICABLE};
pub use error::{
    ForecastError, ForecastErrorKind, ValidationError, EMPTY_TICKER_MESSAGE,
    UNKNOWN_ERROR_MESSAGE,
};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, ScriptedHttpClient,
};
pub use render::{render, Page, ResultView, Tagged};
pub use state::{ErrorInfo, UiState};
