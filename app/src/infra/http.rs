//! Shared reqwest plumbing for outbound API clients.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Response};

/// Upper bound on response body characters carried into error details.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Build a client whose every request is bounded by `timeout` and carries
/// `headers`.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration, headers: HeaderMap) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .user_agent(concat!("tfdeploy/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Cut a response body down to [`MAX_ERROR_BODY_CHARS`] characters.
#[must_use]
pub fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

/// `HTTP <status>: <truncated body>` for a non-success response.
pub async fn failure_detail(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = truncate_body(&body);
    if body.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {body}", status.as_u16())
    }
}

/// Human detail for a transport-level failure.
#[must_use]
pub fn transport_detail(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.to_string()
    }
}
