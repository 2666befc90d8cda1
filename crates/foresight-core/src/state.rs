use serde::{Deserialize, Serialize};

use crate::domain::Forecast;
use crate::error::{ForecastError, ForecastErrorKind};

/// User-facing description of a failed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ForecastErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ForecastErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ForecastError> for ErrorInfo {
    fn from(error: &ForecastError) -> Self {
        Self::new(error.kind(), error.to_string())
    }
}

impl From<ForecastError> for ErrorInfo {
    fn from(error: ForecastError) -> Self {
        Self::from(&error)
    }
}

/// Display state owned by the controller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(Forecast),
    Failure(ErrorInfo),
}

impl UiState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn forecast(&self) -> Option<&Forecast> {
        match self {
            Self::Success(forecast) => Some(forecast),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Failure(info) => Some(info),
            _ => None,
        }
    }
}

impl From<Result<Forecast, ForecastError>> for UiState {
    fn from(outcome: Result<Forecast, ForecastError>) -> Self {
        match outcome {
            Ok(forecast) => Self::Success(forecast),
            Err(error) => Self::Failure(ErrorInfo::from(error)),
        }
    }
}
