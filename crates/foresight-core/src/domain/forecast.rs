use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Wire spelling of the "not applicable" sentinel.
pub const NOT_APPLICABLE: &str = "N/A";

/// Predicted movement as labelled by the forecast endpoint.
///
/// The set is open: unknown labels are kept verbatim in [`Direction::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    Up,
    Down,
    Flat,
    NotApplicable,
    Other(String),
}

impl Direction {
    pub fn label(&self) -> &str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Flat => "Flat",
            Self::NotApplicable => NOT_APPLICABLE,
            Self::Other(label) => label,
        }
    }

    /// Style tag derived from the label: the label, lower-cased.
    pub fn css_class(&self) -> String {
        self.label().to_lowercase()
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Up" => Self::Up,
            "Down" => Self::Down,
            "Flat" => Self::Flat,
            NOT_APPLICABLE => Self::NotApplicable,
            _ => Self::Other(value),
        }
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

/// Dividend-related number that the endpoint may replace with `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFigure", into = "RawFigure")]
pub enum Figure {
    Value(f64),
    NotApplicable,
}

impl Figure {
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::NotApplicable => None,
        }
    }

    pub const fn is_not_applicable(self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFigure {
    Number(f64),
    Text(String),
}

impl TryFrom<RawFigure> for Figure {
    type Error = String;

    fn try_from(raw: RawFigure) -> Result<Self, Self::Error> {
        match raw {
            RawFigure::Number(value) => Ok(Self::Value(value)),
            RawFigure::Text(text) if text == NOT_APPLICABLE => Ok(Self::NotApplicable),
            RawFigure::Text(text) => Err(format!(
                "expected a number or \"{NOT_APPLICABLE}\", found \"{text}\""
            )),
        }
    }
}

impl From<Figure> for RawFigure {
    fn from(value: Figure) -> Self {
        match value {
            Figure::Value(value) => Self::Number(value),
            Figure::NotApplicable => Self::Text(NOT_APPLICABLE.to_owned()),
        }
    }
}

/// Success body of `GET /predict/{TICKER}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Next_Trading_Day")]
    pub next_trading_day: String,
    #[serde(rename = "Price_Predicted")]
    pub price_direction: Direction,
    #[serde(rename = "Price_Confidence (%)")]
    pub price_confidence_percent: f64,
    #[serde(rename = "Forecasted_Close")]
    pub forecasted_close: f64,
    #[serde(rename = "Next_Dividend_Date")]
    pub next_dividend_date: String,
    #[serde(rename = "Div_Predicted")]
    pub dividend_direction: Direction,
    #[serde(rename = "Div_Confidence (%)")]
    pub dividend_confidence_percent: Figure,
    #[serde(rename = "Forecasted_Dividend")]
    pub forecasted_dividend: Figure,
    /// Sent by newer servers; older ones omit it.
    #[serde(
        rename = "Forecasted_Yield (%)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forecasted_yield_percent: Option<Figure>,
}
