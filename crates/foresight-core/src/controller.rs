//! # Forecast Request Controller
//!
//! Drives one submission at a time through
//! `Idle → Loading → Success | Failure` and publishes every transition on a
//! [`tokio::sync::watch`] channel. Display code subscribes to that channel
//! and renders with [`crate::render::render`].
//!
//! Submissions are not serialized: a second call made while the first is in
//! flight runs independently and whichever response resolves last owns the
//! final state. Earlier requests are never cancelled.

use tokio::sync::watch;
use tracing::{debug, debug_span, Instrument};
use uuid::Uuid;

use crate::client::ForecastClient;
use crate::domain::Ticker;
use crate::error::ForecastError;
use crate::render::{render, Page};
use crate::state::{ErrorInfo, UiState};

/// Key that submits the ticker input.
pub const CONFIRM_KEY: &str = "Enter";

/// User action that may start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Button press or equivalent explicit action.
    Activate,
    /// Key released while the ticker input has focus.
    Key(String),
}

impl Trigger {
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    pub fn fires(&self) -> bool {
        match self {
            Self::Activate => true,
            Self::Key(key) => key == CONFIRM_KEY,
        }
    }
}

pub struct ForecastController {
    client: ForecastClient,
    state: watch::Sender<UiState>,
}

impl ForecastController {
    pub fn new(client: ForecastClient) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self { client, state }
    }

    pub fn client(&self) -> &ForecastClient {
        &self.client
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn page(&self) -> Page {
        render(&self.state.borrow())
    }

    /// Submit when the trigger fires; `None` means the event was ignored.
    pub async fn on_trigger(&self, trigger: &Trigger, input: &str) -> Option<UiState> {
        if !trigger.fires() {
            return None;
        }
        Some(self.submit(input).await)
    }

    /// Run one submission for the raw ticker input.
    ///
    /// Returns the state this submission wrote. With overlapping submissions
    /// the shared state may already have been replaced by the time this
    /// returns.
    pub async fn submit(&self, input: &str) -> UiState {
        let request_id = Uuid::new_v4();

        let ticker = match Ticker::parse(input) {
            Ok(ticker) => ticker,
            Err(error) => {
                debug!(%request_id, "ticker input is blank");
                let outcome = UiState::Failure(ErrorInfo::from(ForecastError::from(error)));
                self.state.send_replace(outcome.clone());
                return outcome;
            }
        };

        let span = debug_span!("forecast", %request_id, %ticker);
        self.request(ticker).instrument(span).await
    }

    async fn request(&self, ticker: Ticker) -> UiState {
        let _loading = LoadingGuard::show(&self.state);
        debug!(url = %self.client.endpoint_url(&ticker), "request started");

        let outcome = UiState::from(self.client.fetch(&ticker).await);
        match &outcome {
            UiState::Success(forecast) => {
                debug!(direction = %forecast.price_direction, "forecast received");
            }
            UiState::Failure(info) => {
                debug!(kind = %info.kind, message = %info.message, "forecast failed");
            }
            UiState::Idle | UiState::Loading => {}
        }

        self.state.send_replace(outcome.clone());
        outcome
    }
}

/// Shows the loading state for its lifetime.
///
/// On drop the state falls back to `Idle` if nothing replaced `Loading`,
/// which covers a submission future dropped mid-request.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<UiState>,
}

impl<'a> LoadingGuard<'a> {
    fn show(state: &'a watch::Sender<UiState>) -> Self {
        state.send_replace(UiState::Loading);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = UiState::Idle;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{ClientConfig, HttpResponse, ScriptedHttpClient};

    fn controller(http: Arc<ScriptedHttpClient>) -> ForecastController {
        ForecastController::new(ForecastClient::with_http_client(ClientConfig::default(), http))
    }

    #[test]
    fn only_enter_and_activation_fire() {
        assert!(Trigger::Activate.fires());
        assert!(Trigger::key("Enter").fires());
        assert!(!Trigger::key("enter").fires());
        assert!(!Trigger::key("a").fires());
        assert!(!Trigger::key("Tab").fires());
    }

    #[tokio::test]
    async fn ignored_keys_leave_the_state_alone() {
        let http = Arc::new(ScriptedHttpClient::new());
        let controller = controller(Arc::clone(&http));

        let outcome = controller.on_trigger(&Trigger::key("Shift"), "AAPL").await;

        assert!(outcome.is_none());
        assert_eq!(controller.state(), UiState::Idle);
        assert_eq!(http.request_count(), 0);
    }

    #[tokio::test]
    async fn guard_restores_idle_when_dropped_while_loading() {
        let (state, _) = watch::channel(UiState::Idle);
        {
            let _guard = LoadingGuard::show(&state);
            assert!(state.borrow().is_loading());
        }
        assert_eq!(*state.borrow(), UiState::Idle);
    }

    #[tokio::test]
    async fn guard_keeps_a_settled_outcome() {
        let http = Arc::new(
            ScriptedHttpClient::new().with_reply(Ok(HttpResponse::new(404, r#"{"error":"nope"}"#))),
        );
        let controller = controller(http);

        controller.submit("zz").await;

        let info = controller.state().error().cloned().expect("failure state");
        assert_eq!(info.message, "nope");
        assert!(!controller.page().loader_visible);
    }
}
