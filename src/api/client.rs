//! REST Client
//!
//! Blocking reqwest client for the broker management API.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::Value;

use super::{ApiError, ApiResult, HttpClient};

/// Broker REST client using HTTP basic auth
pub struct RestClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl RestClient {
    pub fn new(base_url: &str, username: &str, password: &str, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HttpClient for RestClient {
    fn send(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.username, Some(&self.password));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| ApiError::Transport(e.to_string()))?;
        let result = decode_response(status, &text);

        match &result {
            Ok(_) => tracing::debug!(%method, %url, status, "request completed"),
            Err(e) => tracing::warn!(%method, %url, status, error = %e, "request rejected"),
        }
        result
    }
}

/// Turn a raw response into the payload the screen works with.
///
/// Bodies shaped `{"code": n, ...}` with `n != 0` are rejections, and a `data`
/// member is unwrapped.
pub fn decode_response(status: u16, text: &str) -> ApiResult<Value> {
    let success = (200..300).contains(&status);

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(e) if success => return Err(ApiError::Decode(e.to_string())),
            Err(_) => Value::Null,
        }
    };

    if !success {
        return Err(ApiError::Rejected { status, message: extract_message(&body) });
    }

    unwrap_envelope(status, body)
}

fn unwrap_envelope(status: u16, body: Value) -> ApiResult<Value> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    let code = map.get("code").and_then(Value::as_i64);
    if code.is_some_and(|c| c != 0) {
        let message = map.get("message").and_then(Value::as_str).map(str::to_string);
        return Err(ApiError::Rejected { status, message });
    }

    Ok(map.remove("data").unwrap_or(Value::Object(map)))
}

fn extract_message(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(str::to_string)
}
