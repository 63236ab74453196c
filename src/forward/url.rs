//! Outbound request construction and execution.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::event::InboundEvent;
use crate::forward::ForwardError;
use crate::routing::DispatchOutcome;

/// Inbound header names never copied onto the upstream request.
///
/// `host` would break the new connection's virtual-host routing, anything
/// containing `amzn` is platform-injected tracing that must not leak to third
/// parties, and `content-length` is recomputed for the rebuilt body.
fn strips_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "host" || name == "content-length" || name.contains("amzn")
}

/// Upstream response headers dropped when buffering.
///
/// Hop-by-hop framing headers describe the upstream connection, not the
/// buffered body handed back to the caller.
fn strips_response_header(name: &str) -> bool {
    matches!(name, "connection" | "transfer-encoding" | "content-length")
}

/// Forwards inbound events to upstream HTTP(S) URLs.
pub struct UrlForwarder {
    client: reqwest::Client,
    timeout: Duration,
}

impl UrlForwarder {
    /// Build a forwarder whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|err| ForwardError::Transport(err.to_string()))?;
        Ok(Self { client, timeout })
    }

    /// Mirror the event onto `target` and buffer the upstream response.
    ///
    /// Every inbound query parameter is appended to the target URL; inbound
    /// headers are copied minus the stripped set; the method is used verbatim,
    /// defaulting to POST when the event carries none.
    pub async fn forward(
        &self,
        event: &InboundEvent,
        target: &str,
    ) -> Result<DispatchOutcome, ForwardError> {
        let mut url = Url::parse(target).map_err(|err| {
            tracing::error!(target = %target, error = %err, "Target URL is unusable");
            ForwardError::BadTarget(target.to_string())
        })?;

        if let Some(params) = &event.query_string_parameters {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }

        let method = event
            .http_method
            .as_deref()
            .and_then(|m| Method::from_bytes(m.as_bytes()).ok())
            .unwrap_or(Method::POST);

        let mut request = self.client.request(method, url);
        for (name, value) in &event.headers {
            if !strips_header(name) {
                request = request.header(name.as_str(), value.as_str());
            }
        }
        if let Some(body) = &event.body {
            request = request.body(body.to_wire());
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(target = %target, error = %err, "Error forwarding to URL");
            if err.is_timeout() {
                ForwardError::Timeout(self.timeout)
            } else {
                ForwardError::Transport(err.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if strips_response_header(name.as_str()) {
                continue;
            }
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        // Accumulates however many chunks the transport delivers.
        let body = response.text().await.map_err(|err| {
            tracing::error!(target = %target, error = %err, "Error reading upstream body");
            ForwardError::Body(err.to_string())
        })?;

        Ok(DispatchOutcome {
            status,
            body,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_header_is_stripped() {
        assert!(strips_header("host"));
        assert!(strips_header("Host"));
    }

    #[test]
    fn test_amzn_headers_are_stripped() {
        assert!(strips_header("x-amzn-trace-id"));
        assert!(strips_header("X-Amzn-RequestId"));
        assert!(strips_header("amzn-anything"));
    }

    #[test]
    fn test_content_length_is_stripped() {
        assert!(strips_header("content-length"));
    }

    #[test]
    fn test_ordinary_headers_pass() {
        assert!(!strips_header("accept"));
        assert!(!strips_header("authorization"));
        assert!(!strips_header("x-correlation-id"));
    }

    #[test]
    fn test_framing_response_headers_are_dropped() {
        assert!(strips_response_header("transfer-encoding"));
        assert!(strips_response_header("connection"));
        assert!(!strips_response_header("content-type"));
    }
}
