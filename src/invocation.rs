//! Serverless invocation handler
//!
//! Template handler: echoes a greeting, the current time, the deployment
//! environment and a preview of the incoming event. Replace `handle` with
//! real logic.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

pub const GREETING: &str = "hello from lambda";
pub const APP_ENV_VAR: &str = "APP_ENV";
pub const DEFAULT_APP_ENV: &str = "dev";
/// Characters of the event text echoed back in `eventPreview`
pub const PREVIEW_CHARS: usize = 200;

/// The record returned to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON text of an [`InvocationResult`]
    pub body: String,
}

/// Payload serialized into the response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub message: String,
    pub timestamp: String,
    pub env: EnvSnapshot,
    pub event_preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvSnapshot {
    #[serde(rename = "APP_ENV")]
    pub app_env: String,
}

/// Build the response for `event`, reporting `app_env` as the environment.
///
/// A body that fails to serialize is returned as an error for the runtime to
/// report.
pub fn handle(event: &Value, app_env: &str) -> serde_json::Result<InvocationResponse> {
    let result = InvocationResult {
        message: GREETING.to_string(),
        timestamp: utc_timestamp(),
        env: EnvSnapshot {
            app_env: app_env.to_string(),
        },
        event_preview: preview(&event.to_string(), PREVIEW_CHARS),
    };

    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    Ok(InvocationResponse {
        status_code: 200,
        headers,
        body: json_text(&result)?,
    })
}

/// [`handle`] with `APP_ENV` read from the process environment
pub fn handle_from_env(event: &Value) -> serde_json::Result<InvocationResponse> {
    handle(event, &resolve_app_env(|key| std::env::var(key).ok()))
}

/// `APP_ENV` from `lookup`, or `"dev"` when unset
pub fn resolve_app_env<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(APP_ENV_VAR).unwrap_or_else(|| DEFAULT_APP_ENV.to_string())
}

/// First `limit` characters of `text`, cut on a char boundary
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Current UTC time, ISO-8601 with microseconds and a `Z` suffix
fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

fn json_text<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}
