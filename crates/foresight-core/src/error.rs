use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::HttpError;

/// Message shown when the ticker input is blank after normalization.
pub const EMPTY_TICKER_MESSAGE: &str = "Please enter a ticker symbol.";

/// Message shown when the server fails without a usable `error` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Validation errors raised before anything reaches the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", EMPTY_TICKER_MESSAGE)]
    EmptyTicker,

    #[error("base url '{value}' is not an absolute http(s) url")]
    InvalidBaseUrl { value: String },

    #[error("timeout must be greater than zero milliseconds")]
    ZeroTimeout,
}

/// Error category used to pick how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastErrorKind {
    Validation,
    ServerReported,
    ServerUnknown,
    Transport,
}

impl ForecastErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::ServerReported => "server_reported",
            Self::ServerUnknown => "server_unknown",
            Self::Transport => "transport",
        }
    }
}

impl Display for ForecastErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single forecast round trip.
///
/// The `Display` output of every variant is the exact message shown to the
/// user after the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    ServerReported { status: u16, message: String },

    #[error("{}", UNKNOWN_ERROR_MESSAGE)]
    ServerUnknown { status: u16 },

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error(transparent)]
    MalformedBody(#[from] serde_json::Error),
}

impl ForecastError {
    pub const fn kind(&self) -> ForecastErrorKind {
        match self {
            Self::Validation(_) => ForecastErrorKind::Validation,
            Self::ServerReported { .. } => ForecastErrorKind::ServerReported,
            Self::ServerUnknown { .. } => ForecastErrorKind::ServerUnknown,
            Self::Transport(_) | Self::MalformedBody(_) => ForecastErrorKind::Transport,
        }
    }

    /// HTTP status of the failed response, when the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerReported { status, .. } | Self::ServerUnknown { status } => Some(*status),
            _ => None,
        }
    }
}
