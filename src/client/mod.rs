use std::future::Future;

use log::trace;
use serde_json::Value;
use thiserror::Error;

use crate::models::Snapshot;

#[cfg(test)]
pub(crate) mod fake;
pub mod http;

pub use http::HttpTransport;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("Response does not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),
}

impl ApiError {
    /// Schema mismatches point at an API/version disagreement rather than a
    /// transient fault.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, ApiError::Schema(_))
    }
}

/// The two HTTP verbs the dashboard needs, against absolute URLs.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// PUT `body` as `application/json`. The response body is not consulted.
    fn put_json(&self, url: &str, body: &Value) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Typed access to the adapter: `GET <root>` for the snapshot and
/// `PUT <root><path>` for control requests.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    root: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        Self { transport, root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL of a resource below the adapter root.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path.trim_start_matches('/'))
    }

    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let body = self.transport.get(&self.root).await?;
        trace!("Snapshot body: {} bytes", body.len());
        decode_snapshot(&body)
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.transport.put_json(&self.url(path), body).await
    }
}

pub fn decode_snapshot(body: &str) -> Result<Snapshot, ApiError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeTransport;
    use crate::models::fixtures;
    use serde_json::json;

    #[test]
    fn test_urls() {
        let client = ApiClient::new(FakeTransport::default(), "http://pscu:8888/api/0.1/lpdpower");
        assert_eq!(client.root(), "http://pscu:8888/api/0.1/lpdpower/");
        assert_eq!(client.url(""), "http://pscu:8888/api/0.1/lpdpower/");
        assert_eq!(client.url("fan"), "http://pscu:8888/api/0.1/lpdpower/fan");
        assert_eq!(
            client.url("/quad/quads/1/channels/2"),
            "http://pscu:8888/api/0.1/lpdpower/quad/quads/1/channels/2"
        );
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let transport = FakeTransport::serving(fixtures::snapshot_json(4, 11, 2));
        let client = ApiClient::new(transport, "http://pscu/api/0.1/lpdpower/");

        let snapshot = client.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.quad.quads.len(), 4);
        assert_eq!(client.transport().gets(), vec!["http://pscu/api/0.1/lpdpower/".to_string()]);
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_reported() {
        let transport = FakeTransport::serving(json!({"quad": {}}));
        let client = ApiClient::new(transport, "http://pscu/api/0.1/lpdpower/");

        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[tokio::test]
    async fn test_put_goes_below_root() {
        let client = ApiClient::new(FakeTransport::default(), "http://pscu/api/0.1/lpdpower/");

        client.put("fan", &json!({"target": 40.0})).await.unwrap();

        assert_eq!(
            client.transport().puts(),
            vec![("http://pscu/api/0.1/lpdpower/fan".to_string(), json!({"target": 40.0}))]
        );
    }
}
