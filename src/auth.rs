use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::fmt;
use thiserror::Error;

use crate::error::AppError;

/// Scheme token expected in front of the key. Matched case-sensitively.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Reasons an `Authorization` header did not yield an API key.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("no authorization header included")]
    NoAuthHeader,

    #[error("malformed authorization header")]
    MalformedHeader,
}

/// Pulls the key out of an `Authorization: ApiKey <key>` header.
///
/// Only the first `Authorization` value is read. The header is split on its
/// first space and everything after it is returned untouched, so
/// `ApiKey  abc` yields `" abc"` and `ApiKey ` yields an empty key.
pub fn get_api_key(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::NoAuthHeader),
    };

    let value = std::str::from_utf8(value.as_bytes()).map_err(|_| AuthError::MalformedHeader)?;

    match value.split_once(' ') {
        Some((scheme, key)) if scheme == API_KEY_SCHEME => Ok(key.to_string()),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// API key supplied by the caller.
///
/// Usable as a handler argument. Behind [`require_api_key`] it is taken from
/// the request extensions, otherwise it is parsed from the headers directly.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(pub String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(key) = parts.extensions.get::<ApiKey>() {
            return Ok(key.clone());
        }

        Ok(ApiKey(get_api_key(&parts.headers)?))
    }
}

/// Middleware that rejects requests without a well-formed
/// `Authorization: ApiKey <key>` header and hands the key on to the handler.
pub async fn require_api_key(mut request: Request, next: Next) -> Result<Response, AppError> {
    let key = match get_api_key(request.headers()) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(reason = %e, "Rejected request without usable API key");
            return Err(e.into());
        }
    };

    tracing::debug!(key_len = key.chars().count(), "API key extracted");

    request.extensions_mut().insert(ApiKey(key));
    Ok(next.run(request).await)
}
