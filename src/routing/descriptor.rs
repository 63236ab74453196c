//! Stored route descriptor parsing.
//!
//! # Responsibilities
//! - Decode the `{"kind": ..., "data": ...}` value stored per path
//! - Distinguish "no route" (stored JSON null) from malformed values
//! - Reject unrecognized destination kinds explicitly

use thiserror::Error;

/// Destination a stored route names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDescriptor {
    /// Inline literal body, served directly with no external call.
    Literal(String),

    /// Fully-qualified URL to proxy the request to.
    Url(String),

    /// Identifier of a remote function to invoke synchronously.
    Function(String),
}

impl RouteDescriptor {
    /// Label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            RouteDescriptor::Literal(_) => "string",
            RouteDescriptor::Url(_) => "url",
            RouteDescriptor::Function(_) => "arn",
        }
    }
}

/// Ways a stored value can fail to be a usable descriptor.
///
/// Any of these is a routing configuration defect, surfaced to the caller as
/// a server error rather than not-found.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("stored value is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stored value is not an object")]
    NotAnObject,

    #[error("descriptor is missing field `{0}`")]
    MissingField(&'static str),

    #[error("descriptor field `{0}` is not a string")]
    NotAString(&'static str),

    #[error("unrecognized destination kind `{0}`")]
    UnknownKind(String),
}

/// Parse a stored route value.
///
/// `Ok(None)` means the management process stored JSON `null` for the path,
/// an explicit "no route" that callers treat exactly like an absent key.
pub fn parse(raw: &[u8]) -> Result<Option<RouteDescriptor>, DescriptorError> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    if value.is_null() {
        return Ok(None);
    }

    let object = value.as_object().ok_or(DescriptorError::NotAnObject)?;
    let kind = object
        .get("kind")
        .ok_or(DescriptorError::MissingField("kind"))?
        .as_str()
        .ok_or(DescriptorError::NotAString("kind"))?;
    let data = object
        .get("data")
        .ok_or(DescriptorError::MissingField("data"))?
        .as_str()
        .ok_or(DescriptorError::NotAString("data"))?;

    match kind {
        "string" => Ok(Some(RouteDescriptor::Literal(data.to_string()))),
        "url" => Ok(Some(RouteDescriptor::Url(data.to_string()))),
        "arn" => Ok(Some(RouteDescriptor::Function(data.to_string()))),
        other => Err(DescriptorError::UnknownKind(other.to_string())),
    }
}
