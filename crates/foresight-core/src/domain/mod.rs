//! # Domain Models
//!
//! Types exchanged with the forecast endpoint.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Normalized (trimmed, upper-cased) ticker symbol |
//! | [`Forecast`] | Parsed success body of `GET /predict/{TICKER}` |
//! | [`Direction`] | Open set of predicted directions (`Up`, `Down`, ...) |
//! | [`Figure`] | Number or the `"N/A"` sentinel |

mod forecast;
mod ticker;

pub use forecast::{Direction, Figure, Forecast, NOT_APPLICABLE};
pub use ticker::Ticker;
