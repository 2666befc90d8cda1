//! Terminal rendering of controller pages.
//!
//! The result region goes to stdout and the error region to stderr; the
//! loading indicator is a transient stderr line shown only on a terminal.

use std::io::{IsTerminal, Stderr, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use foresight_core::{Page, UiState};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cli::OutputFormat;
use crate::error::CliError;

const LOADING_LINE: &str = "Loading forecast...";
const CLEAR_LINE: &str = "\r\x1b[2K";

#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    pretty: bool,
}

impl Output {
    pub const fn new(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    pub fn write_page(
        &self,
        page: &Page,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut *out, page)?;
                } else {
                    serde_json::to_writer(&mut *out, page)?;
                }
                writeln!(out)?;
            }
            OutputFormat::Html => out.write_all(page.to_html().as_bytes())?,
            OutputFormat::Text => {
                if let Some(result) = &page.result {
                    out.write_all(result.to_text().as_bytes())?;
                }
                if let Some(error) = &page.error {
                    writeln!(err, "{error}")?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn print_page(&self, page: &Page) -> Result<(), CliError> {
        self.write_page(page, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())
    }

    pub fn shows_progress(&self) -> bool {
        self.format == OutputFormat::Text && std::io::stderr().is_terminal()
    }
}

/// Mirrors the loading state of a controller onto a terminal line until dropped.
///
/// The watching task and [`LoadingIndicator::hide`] share the line under one
/// lock, and the task reads the state while holding it. After a submission
/// settles, `hide` leaves the line clear and nothing stale can redraw it.
pub struct LoadingIndicator<W: Write + Send + 'static = Stderr> {
    task: Option<JoinHandle<()>>,
    line: Arc<Mutex<LoadingLine<W>>>,
}

struct LoadingLine<W> {
    writer: W,
    visible: bool,
    stopped: bool,
}

impl<W: Write> LoadingLine<W> {
    fn show(&mut self) {
        if self.visible || self.stopped {
            return;
        }
        self.visible = true;
        let _ = write!(self.writer, "{LOADING_LINE}");
        let _ = self.writer.flush();
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        let _ = write!(self.writer, "{CLEAR_LINE}");
        let _ = self.writer.flush();
    }
}

impl LoadingIndicator {
    pub fn spawn(states: watch::Receiver<UiState>, enabled: bool) -> Self {
        Self::with_writer(states, enabled, std::io::stderr())
    }
}

impl<W: Write + Send + 'static> LoadingIndicator<W> {
    pub fn with_writer(mut states: watch::Receiver<UiState>, enabled: bool, writer: W) -> Self {
        let line = Arc::new(Mutex::new(LoadingLine {
            writer,
            visible: false,
            stopped: !enabled,
        }));
        if !enabled {
            return Self { task: None, line };
        }

        let watched = Arc::clone(&line);
        let task = tokio::spawn(async move {
            loop {
                {
                    let mut line = lock(&watched);
                    if states.borrow_and_update().is_loading() {
                        line.show();
                    } else {
                        line.hide();
                    }
                }
                if states.changed().await.is_err() {
                    break;
                }
            }
        });
        Self {
            task: Some(task),
            line,
        }
    }

    /// Clears the loading line now. Call once a submission has settled and
    /// before printing its page.
    pub fn hide(&self) {
        lock(&self.line).hide();
    }
}

impl<W: Write + Send + 'static> Drop for LoadingIndicator<W> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let mut line = lock(&self.line);
        line.stopped = true;
        line.hide();
    }
}

fn lock<W>(line: &Mutex<LoadingLine<W>>) -> MutexGuard<'_, LoadingLine<W>> {
    line.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;

    use foresight_core::{
        render, ClientConfig, Direction, ErrorInfo, Figure, Forecast, ForecastClient,
        ForecastController, ForecastErrorKind, HttpClient, HttpError, HttpRequest, HttpResponse,
        ScriptedHttpClient,
    };

    fn success_page() -> Page {
        render(&UiState::Success(Forecast {
            ticker: String::from("AAPL"),
            next_trading_day: String::from("2024-06-10"),
            price_direction: Direction::Up,
            price_confidence_percent: 72.0,
            forecasted_close: 189.5,
            next_dividend_date: String::from("2024-08-01"),
            dividend_direction: Direction::Down,
            dividend_confidence_percent: Figure::NotApplicable,
            forecasted_dividend: Figure::NotApplicable,
            forecasted_yield_percent: None,
        }))
    }

    fn failure_page() -> Page {
        render(&UiState::Failure(ErrorInfo::new(
            ForecastErrorKind::ServerReported,
            "Unknown ticker",
        )))
    }

    fn write(output: Output, page: &Page) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        output
            .write_page(page, &mut out, &mut err)
            .expect("writing to memory succeeds");
        (
            String::from_utf8(out).expect("utf-8"),
            String::from_utf8(err).expect("utf-8"),
        )
    }

    #[test]
    fn text_splits_result_and_error_regions() {
        let output = Output::new(OutputFormat::Text, false);

        let (out, err) = write(output, &success_page());
        assert!(out.starts_with("Forecast for AAPL\n"));
        assert!(out.contains("$189.50"));
        assert!(err.is_empty());

        let (out, err) = write(output, &failure_page());
        assert!(out.is_empty());
        assert_eq!(err, "Error: Unknown ticker\n");
    }

    #[test]
    fn json_serializes_the_whole_page() {
        let (out, _) = write(Output::new(OutputFormat::Json, false), &failure_page());
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");

        assert_eq!(value["error"], "Error: Unknown ticker");
        assert_eq!(value["loader_visible"], false);
        assert!(value["result"].is_null());
    }

    #[test]
    fn pretty_json_is_indented() {
        let (out, _) = write(Output::new(OutputFormat::Json, true), &success_page());
        assert!(out.contains("\n  \"result\": {"));
        assert!(out.contains("\"forecasted_close\": \"$189.50\""));
    }

    #[test]
    fn html_writes_the_fragment() {
        let (out, err) = write(Output::new(OutputFormat::Html, false), &success_page());
        assert!(out.starts_with("<h3>Forecast for AAPL</h3>"));
        assert!(out.contains("class=\"result-item up\""));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn disabled_indicator_spawns_nothing() {
        let (states, receiver) = watch::channel(UiState::Idle);
        let buffer = SharedBuffer::default();
        let indicator = LoadingIndicator::with_writer(receiver, false, buffer.clone());
        assert!(indicator.task.is_none());

        states.send_replace(UiState::Loading);
        tokio::task::yield_now().await;
        drop(indicator);
        assert!(buffer.contents().is_empty());
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf-8")
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Answers after giving other tasks a turn, like a real round trip.
    struct SlowHttpClient(ScriptedHttpClient);

    impl HttpClient for SlowHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            Box::pin(async move {
                tokio::task::yield_now().await;
                self.0.execute(request).await
            })
        }
    }

    #[tokio::test]
    async fn loading_line_is_cleared_before_the_page_is_printed() {
        let http = ScriptedHttpClient::new().with_reply(Ok(HttpResponse::new(
            404,
            r#"{"error":"Unknown ticker"}"#,
        )));
        let controller = ForecastController::new(ForecastClient::with_http_client(
            ClientConfig::default(),
            Arc::new(SlowHttpClient(http)),
        ));
        let stderr = SharedBuffer::default();
        let indicator = LoadingIndicator::with_writer(controller.subscribe(), true, stderr.clone());

        controller.submit("nope").await;
        assert_eq!(stderr.contents(), LOADING_LINE, "line drawn while in flight");

        indicator.hide();
        Output::new(OutputFormat::Text, false)
            .write_page(&controller.page(), &mut Vec::new(), &mut stderr.clone())
            .expect("writing to memory succeeds");
        drop(indicator);

        let contents = stderr.contents();
        let (_, settled) = contents.rsplit_once(CLEAR_LINE).expect("line cleared");
        assert_eq!(settled, "Error: Unknown ticker\n");
    }

    #[tokio::test]
    async fn dropping_the_indicator_clears_a_visible_line() {
        let (states, receiver) = watch::channel(UiState::Idle);
        let stderr = SharedBuffer::default();
        let indicator = LoadingIndicator::with_writer(receiver, true, stderr.clone());

        states.send_replace(UiState::Loading);
        while stderr.contents().is_empty() {
            tokio::task::yield_now().await;
        }
        drop(indicator);

        assert_eq!(stderr.contents(), format!("{LOADING_LINE}{CLEAR_LINE}"));
    }

    #[tokio::test]
    async fn hide_without_a_visible_line_writes_nothing() {
        let (_states, receiver) = watch::channel(UiState::Idle);
        let stderr = SharedBuffer::default();
        let indicator = LoadingIndicator::with_writer(receiver, true, stderr.clone());

        tokio::task::yield_now().await;
        indicator.hide();

        assert!(stderr.contents().is_empty());
    }
}
