//! Inbound event and response data model.
//!
//! # Responsibilities
//! - Represent one unit of work (HTTP-trigger style event)
//! - Represent the normalized outbound response
//! - Distinguish text bodies from structured (JSON) bodies
//!
//! # Design Decisions
//! - Field names serialize in the HTTP-trigger event shape
//!   (`httpMethod`, `rawPath`, `queryStringParameters`)
//! - An event is owned by exactly one dispatch call; nothing here is shared
//! - Bodies received over the wire stay as text; structured bodies exist for
//!   events constructed programmatically, so payload bytes are never rewritten

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of an inbound event: raw text, or an already-structured value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EventBody {
    Text(String),
    Structured(serde_json::Value),
}

impl EventBody {
    /// Wire encoding of the body: text verbatim, structured values as their
    /// canonical JSON text.
    pub fn to_wire(&self) -> String {
        match self {
            EventBody::Text(text) => text.clone(),
            EventBody::Structured(value) => value.to_string(),
        }
    }
}

/// One inbound request, as handed to the router.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundEvent {
    /// HTTP method. Forwarding defaults to `POST` when absent.
    pub http_method: Option<String>,

    /// Request path exactly as received; doubles as the route store key.
    pub raw_path: String,

    /// Header name to value mapping.
    pub headers: HashMap<String, String>,

    /// Query parameter name to value mapping, when the request carried any.
    pub query_string_parameters: Option<HashMap<String, String>>,

    /// Optional request body.
    pub body: Option<EventBody>,
}

impl InboundEvent {
    /// Event for `path` with no method, headers, query, or body.
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            raw_path: path.into(),
            ..Self::default()
        }
    }
}

/// The normalized HTTP response returned for every dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_body_wire_encoding_is_verbatim() {
        let body = EventBody::Text("plain payload".into());
        assert_eq!(body.to_wire(), "plain payload");
    }

    #[test]
    fn test_structured_body_wire_encoding_is_json() {
        let body = EventBody::Structured(serde_json::json!({"a": 1}));
        assert_eq!(body.to_wire(), r#"{"a":1}"#);
    }

    #[test]
    fn test_event_deserializes_from_trigger_shape() {
        let event: InboundEvent = serde_json::from_str(
            r#"{
                "httpMethod": "GET",
                "rawPath": "/hello",
                "headers": {"accept": "text/plain"},
                "queryStringParameters": null,
                "body": null
            }"#,
        )
        .unwrap();

        assert_eq!(event.http_method.as_deref(), Some("GET"));
        assert_eq!(event.raw_path, "/hello");
        assert_eq!(event.headers.get("accept").unwrap(), "text/plain");
        assert!(event.query_string_parameters.is_none());
        assert!(event.body.is_none());
    }

    #[test]
    fn test_event_body_accepts_string_or_object() {
        let text: InboundEvent =
            serde_json::from_str(r#"{"rawPath": "/a", "body": "hello"}"#).unwrap();
        assert_eq!(text.body, Some(EventBody::Text("hello".into())));

        let structured: InboundEvent =
            serde_json::from_str(r#"{"rawPath": "/a", "body": {"k": "v"}}"#).unwrap();
        assert_eq!(
            structured.body,
            Some(EventBody::Structured(serde_json::json!({"k": "v"})))
        );
    }
}
