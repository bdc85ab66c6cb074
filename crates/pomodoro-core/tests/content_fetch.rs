//! Quote/date fetches against mock HTTP endpoints.

use std::sync::Arc;

use mockito::{Server, ServerGuard};
use pomodoro_core::content::{self, ContentField};
use pomodoro_core::storage::EndpointsConfig;
use pomodoro_core::{
    ActivationId, ContentClient, FetchError, Phase, SessionContext, TimerController, TimerEngine,
};
use tokio::sync::mpsc;

fn client_for(server: &ServerGuard) -> ContentClient {
    ContentClient::new(&EndpointsConfig {
        quote_url: format!("{}/api/quote", server.url()),
        date_url: format!("{}/date", server.url()),
    })
    .unwrap()
}

async fn json_mock(
    server: &mut ServerGuard,
    path: &str,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn both_fetches_succeed() {
    let mut server = Server::new_async().await;
    let quote =
        json_mock(&mut server, "/api/quote", 200, r#"{"id": 7, "quote": "Stay focused."}"#).await;
    let date = json_mock(&mut server, "/date", 200, r#"{"date": "Monday, November 3"}"#).await;

    let content = content::fetch_display_content(&client_for(&server)).await;

    assert_eq!(content.quote, "Stay focused.");
    assert_eq!(content.date, "Monday, November 3");
    quote.assert_async().await;
    date.assert_async().await;
}

#[tokio::test]
async fn failed_date_leaves_quote_intact() {
    let mut server = Server::new_async().await;
    let _quote =
        json_mock(&mut server, "/api/quote", 200, r#"{"id": 1, "quote": "Onward."}"#).await;
    let _date = json_mock(&mut server, "/date", 503, r#"{"error": "down"}"#).await;

    let content = content::fetch_display_content(&client_for(&server)).await;

    assert_eq!(content.quote, "Onward.");
    assert_eq!(content.date, "");
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let mut server = Server::new_async().await;
    // id missing
    let _quote = json_mock(&mut server, "/api/quote", 200, r#"{"quote": "no id"}"#).await;
    // date is not a string
    let _date = json_mock(&mut server, "/date", 200, r#"{"date": 20251103}"#).await;
    let client = client_for(&server);

    assert!(matches!(client.fetch_quote().await, Err(FetchError::Decode { .. })));
    assert!(matches!(client.fetch_date().await, Err(FetchError::Decode { .. })));

    let content = content::fetch_display_content(&client).await;
    assert!(content.quote.is_empty());
    assert!(content.date.is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let mut server = Server::new_async().await;
    let _quote =
        json_mock(&mut server, "/api/quote", 404, r#"{"id": 1, "quote": "ignored"}"#).await;
    let client = client_for(&server);

    match client.fetch_quote().await {
        Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn network_failure_leaves_timer_untouched() {
    // Nothing listens on port 1.
    let client = ContentClient::new(&EndpointsConfig {
        quote_url: "http://127.0.0.1:1/api/quote".into(),
        date_url: "http://127.0.0.1:1/date".into(),
    })
    .unwrap();
    assert!(matches!(client.fetch_quote().await, Err(FetchError::Transport { .. })));

    let mut ctl = TimerController::new(
        TimerEngine::default(),
        Arc::new(SessionContext::new()),
        ActivationId::first(),
    );
    ctl.start();

    let (tx, mut rx) = mpsc::unbounded_channel();
    ctl.request_content(&client, &tx);
    drop(tx);
    // Both tasks finish without sending anything.
    assert!(rx.recv().await.is_none());

    assert_eq!(ctl.content().quote, "");
    assert_eq!(ctl.content().date, "");
    assert_eq!(ctl.engine().remaining_secs(), 1500);
    assert_eq!(ctl.engine().phase(), Phase::Running);
}

#[tokio::test]
async fn late_results_for_closed_view_are_dropped() {
    let mut server = Server::new_async().await;
    let _quote =
        json_mock(&mut server, "/api/quote", 200, r#"{"id": 2, "quote": "Late quote"}"#).await;
    let _date = json_mock(&mut server, "/date", 200, r#"{"date": "Tuesday"}"#).await;
    let client = client_for(&server);
    let sessions = Arc::new(SessionContext::new());

    let first = ActivationId::first();
    let old_view = TimerController::new(TimerEngine::default(), sessions.clone(), first);
    let (tx, mut rx) = mpsc::unbounded_channel();
    old_view.request_content(&client, &tx);
    drop(old_view);

    let mut new_view = TimerController::new(TimerEngine::default(), sessions, first.next());
    drop(tx);

    let mut applied = 0;
    while let Some(update) = rx.recv().await {
        assert_eq!(update.activation, first);
        assert!(matches!(update.field, ContentField::Quote(_) | ContentField::Date(_)));
        if new_view.apply_content(update) {
            applied += 1;
        }
    }

    assert_eq!(applied, 0);
    assert!(new_view.content().quote.is_empty());
    assert!(new_view.content().date.is_empty());
}
