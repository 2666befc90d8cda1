//! Pure rendering from [`UiState`] to display instructions.
//!
//! A [`Page`] describes the three display regions (result, error, loading
//! indicator). It can be written out as the HTML fragment used by the web
//! page, as plain text for a terminal, or serialized as JSON.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{Direction, Figure, Forecast, NOT_APPLICABLE};
use crate::state::UiState;

/// Contents of every display region for one state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub loader_visible: bool,
    pub result: Option<ResultView>,
    pub error: Option<String>,
}

/// Direction label together with its style tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagged {
    pub label: String,
    pub class: String,
}

impl From<&Direction> for Tagged {
    fn from(direction: &Direction) -> Self {
        Self {
            label: direction.label().to_owned(),
            class: direction.css_class(),
        }
    }
}

/// Formatted forecast, every value ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub ticker: String,
    pub next_trading_day: String,
    pub price_direction: Tagged,
    pub price_confidence: String,
    pub forecasted_close: String,
    pub next_dividend_date: String,
    pub dividend_direction: Tagged,
    pub dividend_confidence: String,
    pub forecasted_dividend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecasted_yield: Option<String>,
}

pub fn render(state: &UiState) -> Page {
    match state {
        UiState::Idle => Page::default(),
        UiState::Loading => Page {
            loader_visible: true,
            ..Page::default()
        },
        UiState::Success(forecast) => Page {
            result: Some(ResultView::from(forecast)),
            ..Page::default()
        },
        UiState::Failure(info) => Page {
            error: Some(format!("Error: {}", info.message)),
            ..Page::default()
        },
    }
}

/// `72` → `72%`, `41.27` → `41.27%`.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, switch to exponent form
/// (`1e+21%`, `5e-7%`) the way the page prints them.
pub fn percent(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        return String::from("0%");
    }
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exponent = format!("{value:e}");
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}%"),
            _ => format!("{exponent}%"),
        };
    }
    format!("{value}%")
}

/// Dollar amount with exactly two decimals.
///
/// Rounds the exact binary value, with exact halves going away from zero:
/// `0.125` → `$0.13`, while `1.005` (stored just below the half) → `$1.00`.
pub fn currency(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("${cents:.2}")
        }
        None => format!("${value:.2}"),
    }
}

fn figure(value: Figure, format: fn(f64) -> String) -> String {
    match value {
        Figure::Value(value) => format(value),
        Figure::NotApplicable => NOT_APPLICABLE.to_owned(),
    }
}

impl From<&Forecast> for ResultView {
    fn from(forecast: &Forecast) -> Self {
        Self {
            ticker: forecast.ticker.clone(),
            next_trading_day: forecast.next_trading_day.clone(),
            price_direction: Tagged::from(&forecast.price_direction),
            price_confidence: percent(forecast.price_confidence_percent),
            forecasted_close: currency(forecast.forecasted_close),
            next_dividend_date: forecast.next_dividend_date.clone(),
            dividend_direction: Tagged::from(&forecast.dividend_direction),
            dividend_confidence: figure(forecast.dividend_confidence_percent, percent),
            forecasted_dividend: figure(forecast.forecasted_dividend, currency),
            forecasted_yield: forecast
                .forecasted_yield_percent
                .map(|value| figure(value, percent)),
        }
    }
}

impl ResultView {
    pub fn heading(&self) -> String {
        format!("Forecast for {}", self.ticker)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, "<h3>{}</h3>", escape(&self.heading()));
        html.push_str("<div class=\"results-grid\">\n");

        html.push_str("<h4 class=\"grid-subtitle\">Price Forecast</h4>\n");
        push_row(&mut html, "Next Trading Day", &self.next_trading_day, None);
        push_row(
            &mut html,
            "Price Direction",
            &self.price_direction.label,
            Some(self.price_direction.class.as_str()),
        );
        push_row(&mut html, "Price Confidence", &self.price_confidence, None);
        push_row(
            &mut html,
            "Forecasted Close (per share)",
            &self.forecasted_close,
            None,
        );

        html.push_str("<div class=\"separator\"></div>\n");

        html.push_str("<h4 class=\"grid-subtitle\">Dividend Forecast</h4>\n");
        push_row(&mut html, "Next Dividend Date", &self.next_dividend_date, None);
        push_row(
            &mut html,
            "Dividend Direction",
            &self.dividend_direction.label,
            Some(self.dividend_direction.class.as_str()),
        );
        push_row(&mut html, "Dividend Confidence", &self.dividend_confidence, None);
        push_row(
            &mut html,
            "Forecasted Dividend (per share)",
            &self.forecasted_dividend,
            None,
        );

        html.push_str("</div>\n");
        html
    }

    pub fn to_text(&self) -> String {
        let mut rows = vec![
            ("Next Trading Day", self.next_trading_day.as_str()),
            ("Price Direction", self.price_direction.label.as_str()),
            ("Price Confidence", self.price_confidence.as_str()),
            ("Forecasted Close (per share)", self.forecasted_close.as_str()),
            ("Next Dividend Date", self.next_dividend_date.as_str()),
            ("Dividend Direction", self.dividend_direction.label.as_str()),
            ("Dividend Confidence", self.dividend_confidence.as_str()),
            (
                "Forecasted Dividend (per share)",
                self.forecasted_dividend.as_str(),
            ),
        ];
        if let Some(forecasted_yield) = &self.forecasted_yield {
            rows.push(("Forecasted Yield", forecasted_yield.as_str()));
        }

        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
        let mut text = self.heading();
        text.push('\n');
        for (label, value) in rows {
            let _ = writeln!(text, "  {:<width$} {value}", format!("{label}:"));
        }
        text
    }
}

impl Page {
    /// Result fragment or error text; empty when neither region has content.
    pub fn to_html(&self) -> String {
        match (&self.result, &self.error) {
            (Some(result), _) => result.to_html(),
            (None, Some(error)) => format!("<p class=\"error\">{}</p>\n", escape(error)),
            (None, None) => String::new(),
        }
    }

    pub fn to_text(&self) -> String {
        match (&self.result, &self.error) {
            (Some(result), _) => result.to_text(),
            (None, Some(error)) => format!("{error}\n"),
            (None, None) => String::new(),
        }
    }
}

fn push_row(html: &mut String, label: &str, value: &str, class: Option<&str>) {
    let _ = writeln!(
        html,
        "<div class=\"result-item\"><strong>{}:</strong></div>",
        escape(label)
    );
    match class {
        Some(class) => {
            let _ = writeln!(
                html,
                "<div class=\"result-item {}\">{}</div>",
                escape(class),
                escape(value)
            );
        }
        None => {
            let _ = writeln!(html, "<div class=\"result-item\">{}</div>", escape(value));
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
