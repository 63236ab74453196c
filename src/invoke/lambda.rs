//! AWS Lambda function invoker.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;

use crate::config::{CredentialPolicy, InvokerConfig};
use crate::event::InboundEvent;
use crate::invoke::{FunctionInvoker, InvokeError};
use crate::routing::DispatchOutcome;

/// Invoker backed by the AWS Lambda API.
///
/// The base SDK configuration (region, endpoint, ambient credential chain) is
/// loaded once at startup; under the caller policy each invocation overlays
/// the credentials the caller supplied on the request.
pub struct LambdaInvoker {
    base: SdkConfig,
    policy: CredentialPolicy,
    timeout: Duration,
}

impl LambdaInvoker {
    /// Load the ambient SDK configuration and build an invoker.
    pub async fn from_env(config: &InvokerConfig, timeout: Duration) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        Self {
            base: loader.load().await,
            policy: config.credential_policy,
            timeout,
        }
    }

    fn client_for(&self, event: &InboundEvent) -> Result<aws_sdk_lambda::Client, InvokeError> {
        match self.policy {
            CredentialPolicy::Ambient => Ok(aws_sdk_lambda::Client::new(&self.base)),
            CredentialPolicy::Caller => {
                let (id, key) = caller_credentials(event)?;
                let config = aws_sdk_lambda::config::Builder::from(&self.base)
                    .credentials_provider(Credentials::from_keys(id, key, None))
                    .build();
                Ok(aws_sdk_lambda::Client::from_conf(config))
            }
        }
    }
}

#[async_trait]
impl FunctionInvoker for LambdaInvoker {
    async fn invoke(
        &self,
        event: &InboundEvent,
        function_id: &str,
    ) -> Result<DispatchOutcome, InvokeError> {
        let result = async {
            let client = self.client_for(event)?;

            let mut call = client
                .invoke()
                .function_name(function_id)
                .invocation_type(InvocationType::RequestResponse);
            if let Some(body) = &event.body {
                call = call.payload(Blob::new(body.to_wire().into_bytes()));
            }

            let output = tokio::time::timeout(self.timeout, call.send())
                .await
                .map_err(|_| InvokeError::Timeout(self.timeout))?
                .map_err(|err| InvokeError::Transport(err.to_string()))?;

            if let Some(reason) = output.function_error() {
                return Err(InvokeError::Function(reason.to_string()));
            }

            let status = match output.status_code() {
                0 => 200,
                code => u16::try_from(code).unwrap_or(200),
            };
            let payload = output.payload().map(|blob| blob.as_ref().to_vec());
            outcome_from_payload(status, payload.as_deref().unwrap_or_default())
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(function = %function_id, error = %err, "Error forwarding to function");
        }
        result
    }
}

/// Read the caller-supplied invocation credentials from the query parameters.
pub fn caller_credentials(event: &InboundEvent) -> Result<(String, String), InvokeError> {
    let params = event
        .query_string_parameters
        .as_ref()
        .ok_or(InvokeError::MissingCredentials)?;
    let id = params.get("id").ok_or(InvokeError::MissingCredentials)?;
    let key = params.get("key").ok_or(InvokeError::MissingCredentials)?;
    Ok((id.clone(), key.clone()))
}

/// Shape a function's response payload into a dispatch outcome.
///
/// A payload object carrying a string `body` (and optionally a `headers`
/// map) is treated as a proxy-style response and contributes both; any other
/// valid JSON payload becomes the outcome body in its canonical encoding.
pub fn outcome_from_payload(status: u16, payload: &[u8]) -> Result<DispatchOutcome, InvokeError> {
    if payload.is_empty() {
        return Ok(DispatchOutcome::new(status, String::new()));
    }

    let value: serde_json::Value =
        serde_json::from_slice(payload).map_err(|err| InvokeError::Payload(err.to_string()))?;

    if let Some(object) = value.as_object() {
        if let Some(body) = object.get("body").and_then(|v| v.as_str()) {
            let mut outcome = DispatchOutcome::new(status, body.to_string());
            if let Some(headers) = object.get("headers").and_then(|v| v.as_object()) {
                for (name, header_value) in headers {
                    if let Some(text) = header_value.as_str() {
                        outcome.headers.insert(name.clone(), text.to_string());
                    }
                }
            }
            return Ok(outcome);
        }
    }

    Ok(DispatchOutcome::new(status, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn event_with_query(pairs: &[(&str, &str)]) -> InboundEvent {
        let mut event = InboundEvent::for_path("/fn");
        event.query_string_parameters = Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        );
        event
    }

    #[test]
    fn test_caller_credentials_read_from_query() {
        let event = event_with_query(&[("id", "AKID"), ("key", "SECRET")]);
        let (id, key) = caller_credentials(&event).unwrap();
        assert_eq!(id, "AKID");
        assert_eq!(key, "SECRET");
    }

    #[test]
    fn test_missing_credentials_are_an_error() {
        let event = InboundEvent::for_path("/fn");
        assert!(matches!(
            caller_credentials(&event),
            Err(InvokeError::MissingCredentials)
        ));

        let only_id = event_with_query(&[("id", "AKID")]);
        assert!(matches!(
            caller_credentials(&only_id),
            Err(InvokeError::MissingCredentials)
        ));
    }

    #[test]
    fn test_proxy_shaped_payload_contributes_body_and_headers() {
        let payload = br#"{"body":"hello","headers":{"Content-Type":"text/html"}}"#;
        let outcome = outcome_from_payload(200, payload).unwrap();
        assert_eq!(outcome.body, "hello");
        assert_eq!(outcome.headers.get("Content-Type").unwrap(), "text/html");
    }

    #[test]
    fn test_bare_payload_becomes_canonical_json_body() {
        let outcome = outcome_from_payload(200, br#"{"result": 7}"#).unwrap();
        assert_eq!(outcome.body, r#"{"result":7}"#);
        assert!(outcome.headers.is_empty());
    }

    #[test]
    fn test_empty_payload_is_an_empty_body() {
        let outcome = outcome_from_payload(204, b"").unwrap();
        assert_eq!(outcome.status, 204);
        assert_eq!(outcome.body, "");
    }

    #[test]
    fn test_unparseable_payload_is_an_error() {
        assert!(matches!(
            outcome_from_payload(200, b"<not json>"),
            Err(InvokeError::Payload(_))
        ));
    }
}
