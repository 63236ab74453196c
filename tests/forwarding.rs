//! Forwarder round-trips against in-process upstreams.

use std::collections::HashMap;
use std::time::Duration;

use edge_router::event::{EventBody, InboundEvent};
use edge_router::forward::{ForwardError, UrlForwarder};

mod common;

use common::{start_echo_upstream, start_slow_upstream, test_forwarder, EchoReport};

fn report(body: &str) -> EchoReport {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_query_parameters_append_to_existing_query() {
    let upstream = start_echo_upstream().await;
    let forwarder = test_forwarder();

    let mut event = InboundEvent::for_path("/proxy");
    event.query_string_parameters = Some(HashMap::from([("a".to_string(), "1".to_string())]));

    let outcome = forwarder
        .forward(&event, &format!("http://{upstream}/api?base=0"))
        .await
        .unwrap();

    let seen = report(&outcome.body);
    assert_eq!(seen.query.get("base").unwrap(), "0");
    assert_eq!(seen.query.get("a").unwrap(), "1");
}

#[tokio::test]
async fn test_text_body_is_sent_verbatim() {
    let upstream = start_echo_upstream().await;
    let forwarder = test_forwarder();

    let mut event = InboundEvent::for_path("/proxy");
    event.http_method = Some("PUT".into());
    event.body = Some(EventBody::Text("raw text, not json".into()));

    let outcome = forwarder
        .forward(&event, &format!("http://{upstream}/submit"))
        .await
        .unwrap();

    let seen = report(&outcome.body);
    assert_eq!(seen.method, "PUT");
    assert_eq!(seen.body, "raw text, not json");
}

#[tokio::test]
async fn test_structured_body_is_serialized_to_json() {
    let upstream = start_echo_upstream().await;
    let forwarder = test_forwarder();

    let mut event = InboundEvent::for_path("/proxy");
    event.body = Some(EventBody::Structured(serde_json::json!({"a": 1})));

    let outcome = forwarder
        .forward(&event, &format!("http://{upstream}/submit"))
        .await
        .unwrap();

    assert_eq!(report(&outcome.body).body, r#"{"a":1}"#);
}

#[tokio::test]
async fn test_upstream_response_headers_are_captured() {
    let upstream = common::start_status_upstream(201, "created").await;
    let forwarder = test_forwarder();

    let outcome = forwarder
        .forward(
            &InboundEvent::for_path("/proxy"),
            &format!("http://{upstream}/"),
        )
        .await
        .unwrap();

    assert_eq!(outcome.status, 201);
    assert_eq!(outcome.body, "created");
    assert_eq!(outcome.headers.get("x-upstream").unwrap(), "yes");
    assert!(!outcome.headers.contains_key("content-length"));
    assert!(!outcome.headers.contains_key("transfer-encoding"));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let upstream = start_slow_upstream(Duration::from_secs(5)).await;
    let forwarder =
        UrlForwarder::new(Duration::from_millis(300), Duration::from_millis(300)).unwrap();

    let err = forwarder
        .forward(
            &InboundEvent::for_path("/proxy"),
            &format!("http://{upstream}/"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::Timeout(_)));
}

#[tokio::test]
async fn test_unparseable_target_is_rejected() {
    let forwarder = test_forwarder();

    let err = forwarder
        .forward(&InboundEvent::for_path("/proxy"), "not a url at all")
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::BadTarget(_)));
}
