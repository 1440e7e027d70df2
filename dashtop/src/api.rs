//! Minimal HTTP client for the admin API (read-only GET + JSON).

use std::time::Duration;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{ActivityStats, DailyCount, ServerStatus};

pub type ApiResult<T> = Result<T, ApiError>;

/// Whole-request deadline; kept under the status poll interval.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

const MAX_ERROR_BODY: usize = 160;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, reset).
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response.
    #[error("HTTP {0}: {1}")]
    Http(u16, String),
    /// Body did not match the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Absolute URLs pass through so chart configs can point at other hosts
    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.url_for(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "request failed");
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "non-success status");
            return Err(ApiError::Http(status.as_u16(), error_summary(&body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            warn!(%url, error = %e, "failed to decode body");
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn server_status(&self) -> ApiResult<ServerStatus> {
        self.get_json("/api/server-status", &[]).await
    }

    pub async fn daily_counts(&self, path: &str, days: u32) -> ApiResult<Vec<DailyCount>> {
        self.get_json(path, &[("days", days.to_string())]).await
    }

    pub async fn activity_stats(&self, path: &str, days: u32) -> ApiResult<ActivityStats> {
        self.get_json(path, &[("days", days.to_string())]).await
    }
}

/// Short panel text for an error body: the `detail`/`message`/`error` string
/// of a JSON body, otherwise the body with whitespace collapsed and capped.
pub fn error_summary(body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = v.get(key).and_then(|d| d.as_str()) {
                return text.to_string();
            }
        }
    }
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX_ERROR_BODY {
        let cut: String = flat.chars().take(MAX_ERROR_BODY).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

/// Anything that can produce a status snapshot; the poller only sees this.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> BoxFuture<'_, ApiResult<ServerStatus>>;
}

impl StatusSource for ApiClient {
    fn fetch_status(&self) -> BoxFuture<'_, ApiResult<ServerStatus>> {
        Box::pin(self.server_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_handles_slashes_and_absolute_paths() {
        let c = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(c.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            c.url_for("/api/recent-users"),
            "http://127.0.0.1:8000/api/recent-users"
        );
        assert_eq!(
            c.url_for("api/recent-users"),
            "http://127.0.0.1:8000/api/recent-users"
        );
        assert_eq!(
            c.url_for("https://stats.example/api/x"),
            "https://stats.example/api/x"
        );
    }

    #[test]
    fn error_bodies_are_summarised() {
        assert_eq!(error_summary(r#"{"detail":"Not authenticated"}"#), "Not authenticated");
        assert_eq!(error_summary(r#"{"error": "db down", "code": 7}"#), "db down");
        assert_eq!(error_summary("  bad\n  gateway "), "bad gateway");
        assert_eq!(error_summary(""), "");

        let page = format!("<html><body>{}</body></html>", "x".repeat(500));
        let short = error_summary(&page);
        assert_eq!(short.chars().count(), MAX_ERROR_BODY + 1);
        assert!(short.starts_with("<html><body>xxx"));
        assert!(short.ends_with('…'));
    }

    #[test]
    fn default_timeout_is_below_poll_interval() {
        let c = ApiClient::new("http://127.0.0.1:8000");
        assert_eq!(c.timeout(), REQUEST_TIMEOUT);
        assert!(REQUEST_TIMEOUT < crate::widgets::status::POLL_INTERVAL);
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            ApiError::Http(503, "down".into()).to_string(),
            "HTTP 503: down"
        );
        assert!(ApiError::Decode("eof".into())
            .to_string()
            .starts_with("malformed response"));
    }
}
