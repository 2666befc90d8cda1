//! One round trip to the forecast endpoint.
//!
//! Classifies the outcome into a [`Forecast`] or one of the
//! [`ForecastError`] variants; it never retries.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::domain::{Forecast, Ticker};
use crate::error::ForecastError;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};

/// Failure body sent alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Forecast endpoint client over a pluggable transport.
#[derive(Clone)]
pub struct ForecastClient {
    config: ClientConfig,
    http_client: Arc<dyn HttpClient>,
}

impl ForecastClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base_url}/predict/{TICKER}` with the ticker as one encoded path segment.
    pub fn endpoint_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/predict/{}",
            self.config.base_url(),
            urlencoding::encode(ticker.as_str())
        )
    }

    pub async fn fetch(&self, ticker: &Ticker) -> Result<Forecast, ForecastError> {
        let request = HttpRequest::get(self.endpoint_url(ticker))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms());

        let response = self.http_client.execute(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "forecast response received");

        if !response.is_success() {
            return Err(server_error(response.status, &response.body));
        }

        Ok(serde_json::from_str::<Forecast>(&response.body)?)
    }
}

fn server_error(status: u16, body: &str) -> ForecastError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => ForecastError::ServerReported { status, message },
        _ => ForecastError::ServerUnknown { status },
    }
}
