//! API middleware for authentication.

use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Rejects requests whose `X-API-Key` header does not match the configured
/// key.
///
/// Returns 401 when the header is missing and 403 when it is wrong.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Err(err) = state.gate.check(extract_api_key(request.headers())) {
        warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            err
        );
        return err.into_response();
    }

    next.run(request).await
}

/// Value of the API key header. A header that is not valid UTF-8 yields an
/// empty key, which never matches.
fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .map(|value| value.to_str().unwrap_or_default())
}
