//! Dispatch outcome and response normalization.

use std::collections::HashMap;

use crate::event::HttpResponse;

/// Intermediate result of handling one destination.
///
/// Exactly one outcome is produced per dispatch; the normalization step turns
/// it into the final response.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl DispatchOutcome {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Build the final response. Outcomes that supply no headers get the
    /// JSON content-type default.
    pub fn into_response(self) -> HttpResponse {
        let headers = if self.headers.is_empty() {
            HashMap::from([("Content-Type".to_string(), "application/json".to_string())])
        } else {
            self.headers
        };
        HttpResponse {
            status_code: self.status,
            headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_default_to_json() {
        let response = DispatchOutcome::new(404, "no route").into_response();
        assert_eq!(response.status_code, 404);
        assert_eq!(
            response.headers.get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_supplied_headers_are_kept_verbatim() {
        let response = DispatchOutcome::new(200, "hi")
            .with_header("Content-Type", "text/plain")
            .into_response();
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
        assert_eq!(response.body, "hi");
    }
}
