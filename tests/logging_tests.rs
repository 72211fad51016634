//! Log levels emitted by the call pipeline.
//!
//! Rate limits and not-found outcomes are normal operation and stay below
//! `error`; other provider failures are logged once at `error` with the body.
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use serial_test::serial;
use url::Url;

use twelvedata_sdk::transport::TransportFuture;
use twelvedata_sdk::*;

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("twelvedata_sdk") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

/// Install the capturing logger (once per binary) and clear earlier records.
fn capture() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    LOGGER.records.lock().unwrap().clear();
}

fn error_records() -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message.clone())
        .collect()
}

struct FixedBody(&'static str);

impl Transport for FixedBody {
    fn get<'a>(&'a self, _url: &'a Url) -> TransportFuture<'a> {
        let response: Result<HttpResponse, TransportError> =
            Ok(HttpResponse::ok(self.0.as_bytes(), Credits::new(10, 1)));
        Box::pin(async move { response })
    }
}

async fn time_series_with(body: &'static str) -> ApiResponse<TimeSeries> {
    let api = TwelveDataApi::with_transport(Config::new("log-key"), FixedBody(body));
    api.get_time_series(&TimeSeriesRequest::new("AAPL", "1day"))
        .await
}

#[tokio::test]
#[serial]
async fn rate_limit_is_not_logged_as_error() {
    capture();

    let response = time_series_with(
        r#"{"code":429,"message":"You have run out of API credits for the current minute.","status":"error"}"#,
    )
    .await;

    assert_eq!(response.result.unwrap_err().kind(), ErrorKind::TooManyRequests);
    assert!(error_records().is_empty(), "{:?}", error_records());
}

#[tokio::test]
#[serial]
async fn not_found_forms_are_not_logged_as_error() {
    let bodies = [
        "[]",
        r#"{"code":400,"message":"**symbol** not found: FOO. Please specify it correctly according to API Documentation.","status":"error"}"#,
        r#"{"code":404,"message":"Not Found","status":"error"}"#,
    ];
    for body in bodies {
        capture();

        let response = time_series_with(body).await;

        assert_eq!(response.result.unwrap_err().kind(), ErrorKind::NotFound, "{body}");
        assert!(error_records().is_empty(), "{body}: {:?}", error_records());
    }
}

#[tokio::test]
#[serial]
async fn expected_outcomes_still_leave_a_debug_trace() {
    capture();

    let _ = time_series_with("[]").await;

    let records = LOGGER.records.lock().unwrap();
    assert!(records
        .iter()
        .any(|(level, message)| *level == Level::Debug && message.contains("expected_error")));
}

#[tokio::test]
#[serial]
async fn forbidden_is_logged_once_with_body() {
    capture();
    let body = r#"{"code":403,"message":"/time_series is not allowed for this key","status":"error"}"#;

    let response = time_series_with(body).await;

    assert_eq!(response.result.unwrap_err().kind(), ErrorKind::Forbidden);
    let errors = error_records();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains(body), "{}", errors[0]);
}

#[tokio::test]
#[serial]
async fn unmarshal_failure_is_logged_once_with_body() {
    capture();
    let body = "<html>maintenance</html>";

    let response = time_series_with(body).await;

    assert_eq!(response.result.unwrap_err().kind(), ErrorKind::Unmarshal);
    let errors = error_records();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains(body), "{}", errors[0]);
}

#[tokio::test]
#[serial]
async fn api_key_never_reaches_the_log() {
    capture();

    let _ = time_series_with(r#"{"code":403,"message":"denied","status":"error"}"#).await;
    let _ = time_series_with("[]").await;

    let records = LOGGER.records.lock().unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|(_, message)| !message.contains("log-key")));
}
