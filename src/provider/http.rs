use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::{FailureKind, VibeError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_client(timeout: Duration) -> Result<Client, VibeError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .use_rustls_tls()
        .build()
        .map_err(|e| VibeError::Config(format!("failed to build HTTP client: {e}")))
}

/// Quota markers in the provider's structured error envelope. Only the
/// machine-readable fields are read; `error.message` can echo user input.
/// Gemini reports `status: RESOURCE_EXHAUSTED`, OpenAI-compatible backends
/// report `code: rate_limit_exceeded` or `insufficient_quota`.
fn mentions_quota(body: &str) -> bool {
    let Ok(v) = serde_json::from_str::<Value>(body) else {
        return false;
    };
    ["status", "code", "type"]
        .iter()
        .filter_map(|field| v.pointer(&format!("/error/{field}")).and_then(Value::as_str))
        .map(str::to_ascii_lowercase)
        .any(|marker| {
            marker == "resource_exhausted" || marker.contains("rate_limit") || marker.contains("quota")
        })
}

/// Map a non-success HTTP response onto a failure kind.
pub fn classify_status(status: StatusCode, body: &str) -> FailureKind {
    if status == StatusCode::TOO_MANY_REQUESTS || mentions_quota(body) {
        FailureKind::Quota
    } else if status.is_server_error() {
        FailureKind::Transient
    } else {
        FailureKind::Other
    }
}

pub fn classify_transport(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() || err.is_connect() || err.is_request() {
        FailureKind::Transient
    } else if err.status().map(|s| s == StatusCode::TOO_MANY_REQUESTS).unwrap_or(false) {
        FailureKind::Quota
    } else {
        FailureKind::Other
    }
}

/// Send a JSON body and return the raw success body. Failures are classified,
/// never retried.
pub async fn post_json<B: Serialize + ?Sized>(
    provider: &str,
    request: RequestBuilder,
    body: &B,
) -> Result<String, VibeError> {
    let resp = request.json(body).send().await.map_err(|e| {
        VibeError::provider(provider, classify_transport(&e), format!("request failed: {e}"))
    })?;

    let status = resp.status();
    let text = resp.text().await.map_err(|e| {
        VibeError::provider(provider, classify_transport(&e), format!("reading body failed: {e}"))
    })?;

    debug!(provider, status = status.as_u16(), bytes = text.len(), "provider responded");

    if !status.is_success() {
        return Err(VibeError::provider(
            provider,
            classify_status(status, &text),
            format!("HTTP {status}: {text}"),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_requests_is_quota() {
        assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS, ""), FailureKind::Quota);
    }

    #[test]
    fn structured_quota_markers_are_quota_whatever_the_status() {
        let gemini = r#"{"error":{"code":403,"message":"You exceeded your current quota","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(classify_status(StatusCode::FORBIDDEN, gemini), FailureKind::Quota);

        let groq = r#"{"error":{"message":"Rate limit reached for model","type":"tokens","code":"rate_limit_exceeded"}}"#;
        assert_eq!(classify_status(StatusCode::BAD_REQUEST, groq), FailureKind::Quota);

        let openai = r#"{"error":{"message":"billing","type":"insufficient_quota","code":null}}"#;
        assert_eq!(classify_status(StatusCode::BAD_REQUEST, openai), FailureKind::Quota);
    }

    #[test]
    fn quota_words_in_free_text_do_not_trigger_fail_over() {
        let echoed = r#"{"error":{"code":400,"message":"Invalid value: 'show my quota and rate limit'","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(classify_status(StatusCode::BAD_REQUEST, echoed), FailureKind::Other);
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, "Rate limit reached for model"),
            FailureKind::Other
        );
    }

    #[test]
    fn server_errors_are_transient_and_others_are_other() {
        assert_eq!(classify_status(StatusCode::SERVICE_UNAVAILABLE, "overloaded"), FailureKind::Transient);
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED, "bad key"), FailureKind::Other);
        assert_eq!(classify_status(StatusCode::BAD_REQUEST, "invalid model"), FailureKind::Other);
    }
}
