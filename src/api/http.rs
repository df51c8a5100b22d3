//! HTTP utilities for IBM Cloud REST API calls

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull a readable message out of an API error body.
///
/// IBM Cloud services answer errors with `{"errors": [{"code", "message"}], "trace"}`;
/// anything else falls back to the sanitized body.
pub(crate) fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let first = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|v| v.as_array())
        .and_then(|errors| errors.first());

    if let Some(first) = first {
        let message = first.get("message").and_then(|v| v.as_str()).unwrap_or("");
        let code = first.get("code").and_then(|v| v.as_str());
        let trace = parsed
            .as_ref()
            .and_then(|v| v.get("trace"))
            .and_then(|v| v.as_str());

        let mut out = match code {
            Some(code) => format!("{} ({})", message, code),
            None => message.to_string(),
        };
        if let Some(trace) = trace {
            out.push_str(&format!(" [trace: {}]", trace));
        }
        return out;
    }

    if body.is_empty() {
        return "empty response body".to_string();
    }
    sanitize_for_log(body)
}

/// Failure of a single GET
#[derive(Debug)]
pub enum RequestError {
    /// No response was received
    Transport(String),
    /// Response with a non-success status
    Status { status: StatusCode, message: String },
    /// Success status with an undecodable body
    Decode(String),
}

/// HTTP client wrapper for IBM Cloud API calls
#[derive(Clone, Debug)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("vpcshare/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request and parse the JSON body
    pub async fn get(
        &self,
        url: &str,
        token: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Value, RequestError> {
        let request_id = uuid::Uuid::new_v4();
        tracing::debug!("GET {} (request {})", url, request_id);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("X-Request-ID", request_id.to_string())
            .query(query)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::debug!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(RequestError::Status {
                status,
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_api_errors() {
        let body =
            r#"{"errors":[{"code":"not_found","message":"Share not found"}],"trace":"abc-123"}"#;
        assert_eq!(
            error_message(body),
            "Share not found (not_found) [trace: abc-123]"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "empty response body");
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }
}
