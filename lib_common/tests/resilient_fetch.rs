mod support;

use lib_common::retrieve::{FetchError, ResilientClient, Route};
use serde_json::json;
use std::time::Duration;
use support::{Fixture, FixtureServer, Hit};

fn client(server: &FixtureServer, timeout: Duration) -> ResilientClient {
    ResilientClient::new(server.proxy_base(), timeout)
}

#[tokio::test]
async fn direct_success_makes_one_request() {
    let server = FixtureServer::start().await;
    server.direct("/ticker", Fixture::Json(json!({"lastPrice": "1.0"})));

    let body = client(&server, Duration::from_secs(5))
        .fetch_json(&server.url("/ticker"), Route::DirectFirst)
        .await
        .unwrap();

    assert_eq!(body["lastPrice"], "1.0");
    assert_eq!(server.hits(), vec![Hit::Direct("/ticker".into())]);
}

#[tokio::test]
async fn server_error_falls_back_to_relay() {
    let server = FixtureServer::start().await;
    server.direct("/ticker", Fixture::Status(500));
    server.relayed("/ticker", Fixture::Json(json!({"via": "relay"})));

    let body = client(&server, Duration::from_secs(5))
        .fetch_json(&server.url("/ticker"), Route::DirectFirst)
        .await
        .unwrap();

    assert_eq!(body["via"], "relay");
    assert_eq!(
        server.hits(),
        vec![Hit::Direct("/ticker".into()), Hit::Relayed("/ticker".into())]
    );
}

#[tokio::test]
async fn both_attempts_failing_reports_the_relay_error() {
    let server = FixtureServer::start().await;
    server.direct("/ticker", Fixture::Status(503));
    server.relayed("/ticker", Fixture::Status(502));

    let err = client(&server, Duration::from_secs(5))
        .fetch_json(&server.url("/ticker"), Route::DirectFirst)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 502, .. }), "got {err:?}");
    assert_eq!(server.hits().len(), 2);
}

#[tokio::test]
async fn relay_only_never_goes_direct() {
    let server = FixtureServer::start().await;
    server.direct("/chart", Fixture::Json(json!({"via": "direct"})));
    server.relayed("/chart", Fixture::Json(json!({"via": "relay"})));

    let body = client(&server, Duration::from_secs(5))
        .fetch_json(&server.url("/chart"), Route::RelayOnly)
        .await
        .unwrap();

    assert_eq!(body["via"], "relay");
    assert_eq!(server.hits(), vec![Hit::Relayed("/chart".into())]);
}

#[tokio::test]
async fn slow_direct_times_out_then_relay_answers() {
    let server = FixtureServer::start().await;
    server.direct("/slow", Fixture::Delayed(Duration::from_secs(3), json!({"via": "direct"})));
    server.relayed("/slow", Fixture::Json(json!({"via": "relay"})));

    let started = std::time::Instant::now();
    let body = client(&server, Duration::from_millis(200))
        .fetch_json(&server.url("/slow"), Route::DirectFirst)
        .await
        .unwrap();

    assert_eq!(body["via"], "relay");
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn timeout_on_relay_only_is_a_timeout_error() {
    let server = FixtureServer::start().await;
    server.relayed("/slow", Fixture::Delayed(Duration::from_secs(3), json!({})));

    let err = client(&server, Duration::from_millis(200))
        .fetch_json(&server.url("/slow"), Route::RelayOnly)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { timeout_ms: 200, .. }), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = FixtureServer::start().await;
    server.direct("/fng", Fixture::Body("{not json"));
    server.relayed("/fng", Fixture::Body("<html>rate limited</html>"));

    let err = client(&server, Duration::from_secs(5))
        .fetch_json(&server.url("/fng"), Route::DirectFirst)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
    assert_eq!(
        server.hits(),
        vec![Hit::Direct("/fng".into()), Hit::Relayed("/fng".into())]
    );
}
