use std::borrow::Cow;

use reqwest::Url;
use validator::{Validate, ValidationError};

use crate::client::ApiError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate()
        .map_err(|err| ApiError::Validation(err.to_string()))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("must not be blank"));
        return Err(err);
    }
    Ok(())
}

// Upstream base URL must be absolute http(s)
pub fn validate_base_url(uri: &str) -> Result<Url, String> {
    let url = Url::parse(uri).map_err(|e| format!("Invalid API_BASE_URL {uri}: {e}"))?;
    if !["http", "https"].contains(&url.scheme()) {
        return Err(format!("API_BASE_URL must use http or https, got {}", url.scheme()));
    }
    Ok(url)
}

/// An id placed into an upstream path as a single segment. Dot segments
/// would be resolved away by the URL parser, so they are refused.
pub fn path_id(id: &str) -> Result<&str, ApiError> {
    match id.trim() {
        "" | "." | ".." => Err(ApiError::Validation(format!("Invalid id {:?}", id))),
        _ => Ok(id),
    }
}
