//! Bill impact analysis trigger.
//!
//! The backend analyses a bill as a background job and gives no completion
//! signal. The client waits a fixed delay and refetches the bill list once;
//! impacts that are not ready by then show up on the next manual refresh.

use ps_types::Bill;
use std::time::Duration;

use crate::api::{ApiError, ParliaScopeApi};

/// Queue an analysis of `raw_text` for `bill_id`, wait `delay`, then fetch
/// the bill list exactly once.
///
/// # Errors
/// A failed trigger is returned immediately and no refetch is made. A failed
/// refetch is returned as-is.
pub async fn analyze_and_refresh<A>(
    api: &A,
    token: Option<&str>,
    bill_id: i64,
    raw_text: &str,
    delay: Duration,
) -> Result<Vec<Bill>, ApiError>
where
    A: ParliaScopeApi + ?Sized,
{
    let accepted = api.analyze_bill(token, bill_id, raw_text).await?;
    tracing::info!(
        bill_id,
        message = %accepted.message,
        delay_secs = delay.as_secs(),
        "bill analysis queued"
    );

    tokio::time::sleep(delay).await;

    api.list_bills(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockParliaScopeClient;
    use serde_json::json;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn refetches_once_after_delay() {
        let api = MockParliaScopeClient::new();
        api.push_json(
            "analyze_bill",
            json!({"message": "Bill analysis started in the background. Impacts will appear shortly."}),
        );
        api.push_json(
            "list_bills",
            json!([{
                "id": 3,
                "title": "Finance Bill 2025",
                "impacts": [{"id": 1, "archetype": "Student", "description": "HELB levy rises", "sentiment": "Negative"}]
            }]),
        );

        let started = Instant::now();
        let bills = analyze_and_refresh(
            &api,
            Some("tok"),
            3,
            "An Act of Parliament to amend the law relating to taxes",
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
        assert_eq!(api.call_count("analyze_bill"), 1);
        assert_eq!(api.call_count("list_bills"), 1);
        assert!(bills[0].is_analyzed());

        let calls = api.calls();
        assert_eq!(calls[0].endpoint, "analyze_bill");
        assert_eq!(calls[1].endpoint, "list_bills");
        assert_eq!(calls[1].token.as_deref(), Some("tok"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_trigger_skips_refetch() {
        let api = MockParliaScopeClient::new();
        api.push_error(
            "analyze_bill",
            ApiError::Http {
                status: 404,
                detail: Some("Bill not found".into()),
            },
        );

        let started = Instant::now();
        let err = analyze_and_refresh(&api, None, 99, "text", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Bill not found");
        assert_eq!(api.call_count("list_bills"), 0);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
