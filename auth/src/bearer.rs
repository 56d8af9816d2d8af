use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

/// Scheme prefix expected in the Authorization header, including its separator.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error type for bearer credential extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,
}

/// Extract the raw bearer token from request headers.
///
/// The header must start with `Bearer `; everything after the prefix is
/// returned verbatim. Token shape is left to whichever codec consumes it.
///
/// # Errors
/// * `MissingHeader` - No Authorization header present
/// * `MalformedHeader` - Header is not visible ASCII or lacks the Bearer prefix
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?;

    let value = value.to_str().map_err(|_| BearerError::MalformedHeader)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::MalformedHeader)
}
