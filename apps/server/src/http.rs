//! HTTP surface: one scheduler-triggered check endpoint plus liveness.

use crate::run::{run_check, RunError, RunReport};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use dealwatch_alerts::{Notifier, SeenStore, SmtpMailer};
use dealwatch_feeds::WootClient;
use std::sync::Arc;
use tracing::error;

/// Everything a check run needs, shared across requests.
pub struct AppState {
    pub source: WootClient,
    pub store: SeenStore,
    pub notifier: Notifier<SmtpMailer>,
    pub keywords: Vec<String>,
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/check", get(check))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// The scheduler trigger: runs one check and reports 200 or 500.
async fn check(State(state): State<SharedState>) -> (StatusCode, String) {
    let result = run_check(
        &state.source,
        &state.store,
        &state.notifier,
        &state.keywords,
    )
    .await;
    run_response(result)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a run outcome onto the HTTP response the scheduler sees.
fn run_response(result: Result<RunReport, RunError>) -> (StatusCode, String) {
    match result {
        Ok(report) if report.notified > 0 => (
            StatusCode::OK,
            format!("Found and notified about {} new deals", report.notified),
        ),
        Ok(_) => (
            StatusCode::OK,
            "No new matching deals found".to_string(),
        ),
        Err(err) => {
            error!(error = %err, "Check run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Check run failed: {err}"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealwatch_feeds::FeedError;
    use pretty_assertions::assert_eq;

    fn report(notified: usize) -> RunReport {
        RunReport {
            fetched: 10,
            matched: notified,
            notified,
            seen_total: notified,
        }
    }

    #[test]
    fn test_success_with_notifications_is_200() {
        let (status, body) = run_response(Ok(report(2)));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Found and notified about 2 new deals");
    }

    #[test]
    fn test_success_without_notifications_is_200() {
        let (status, body) = run_response(Ok(report(0)));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "No new matching deals found");
    }

    #[test]
    fn test_any_failure_is_500() {
        let err = RunError::Network(FeedError::BadStatus(503));
        let (status, body) = run_response(Err(err));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("HTTP 503"));
    }
}
