//! Response rendering.
//!
//! # Responsibilities
//! - Turn the router's normalized `HttpResponse` into a wire response
//! - Never fail: unrenderable headers degrade to a plain 500

use axum::body::Body;
use axum::http::{Response, StatusCode};

use crate::event::HttpResponse;

/// Render a normalized response onto the wire.
pub fn render(response: HttpResponse) -> Response<Body> {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(Body::from(response.body)) {
        Ok(rendered) => rendered,
        Err(err) => {
            tracing::error!(error = %err, "Dispatch outcome could not be rendered");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("router error"))
                .expect("static fallback response")
        }
    }
}
