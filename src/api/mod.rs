//! API Module
//!
//! HTTP access to the broker's `/apps` resource.

pub mod client;
pub mod models;

use reqwest::{Method, Url};
use serde_json::Value;
use thiserror::Error;

/// API errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message supplied by the server, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Collection endpoint for application records
pub const APPS_PATH: &str = "/apps";

/// Path of a single application record, with the id percent-encoded as one segment
pub fn app_path(app_id: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost") else {
        return format!("{}/{}", APPS_PATH, app_id);
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(APPS_PATH.trim_start_matches('/')).push(app_id);
    }
    url.path().to_string()
}

/// HTTP client port used by the screen.
///
/// Calls block the calling thread; the screen runs them on worker threads.
pub trait HttpClient: Send + Sync {
    fn send(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Value>;
}

// Re-exports
pub use client::RestClient;
pub use models::AppRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_path() {
        assert_eq!(app_path("a1"), "/apps/a1");
        assert_eq!(app_path("svc-01_x.y"), "/apps/svc-01_x.y");
    }

    #[test]
    fn test_app_path_encodes_reserved_characters() {
        assert_eq!(app_path("a/b"), "/apps/a%2Fb");
        assert_eq!(app_path("a?b#c"), "/apps/a%3Fb%23c");
        assert_eq!(app_path("50%"), "/apps/50%25");
        assert_eq!(app_path("a b"), "/apps/a%20b");
    }

    #[test]
    fn test_error_message() {
        let rejected = ApiError::Rejected { status: 400, message: Some("duplicate id".to_string()) };
        assert_eq!(rejected.message(), Some("duplicate id"));

        let blank = ApiError::Rejected { status: 500, message: Some(String::new()) };
        assert_eq!(blank.message(), None);

        assert_eq!(ApiError::Transport("refused".to_string()).message(), None);
        assert_eq!(ApiError::Decode("eof".to_string()).message(), None);
    }
}
