//! Authentication headers sent on every gateway request

use crate::config::Credentials;
use crate::{PixError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Header carrying the secret API key
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the public key
pub const PUBLIC_KEY_HEADER: &str = "x-public-key";
/// Header repeating the secret API key
pub const SECRET_KEY_HEADER: &str = "x-secret-key";

/// Build the five headers the gateway expects.
///
/// Empty credentials still produce every header, each with an empty value.
/// Fails only when a key contains bytes that cannot appear in a header value.
pub fn build_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(5);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(API_KEY_HEADER),
        sensitive_value(&credentials.api_key)?,
    );
    headers.insert(
        AUTHORIZATION,
        sensitive_value(&format!("Bearer {}", credentials.api_key))?,
    );
    headers.insert(
        HeaderName::from_static(PUBLIC_KEY_HEADER),
        sensitive_value(&credentials.public_key)?,
    );
    headers.insert(
        HeaderName::from_static(SECRET_KEY_HEADER),
        sensitive_value(&credentials.api_key)?,
    );

    Ok(headers)
}

fn sensitive_value(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| PixError::config(format!("Credential is not a valid header value: {}", e)))?;
    header.set_sensitive(true);
    Ok(header)
}
