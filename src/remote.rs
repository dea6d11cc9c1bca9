//! Client for the Ditto REST API.

use std::future::Future;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{
    Client,
    StatusCode,
};
use thiserror::Error;

use crate::config::ApiKey;
use crate::types::ProjectTranslations;

/// Public Ditto API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.dittowords.com";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode project response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of project translations.
pub trait ProjectFetcher {
    /// Fetches the flat key → entry mapping of one project.
    fn fetch_project(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<ProjectTranslations, FetchError>> + Send;
}

/// [`ProjectFetcher`] backed by the Ditto HTTP API.
#[derive(Debug, Clone)]
pub struct DittoClient {
    /// Base URL without trailing slash.
    base_url: String,
    api_key: ApiKey,
    client: Client,
}

impl DittoClient {
    /// Builds a client for `base_url`, or [`DEFAULT_BASE_URL`] when `None`.
    ///
    /// # Errors
    /// Returns `FetchError::Client` when the HTTP client cannot be built.
    pub fn new(api_key: ApiKey, base_url: Option<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let trimmed_len = base_url.trim_end_matches('/').len();
        base_url.truncate(trimmed_len);

        Ok(Self { base_url, api_key, client })
    }

    #[must_use]
    pub fn project_url(&self, project_id: &str) -> String {
        format!("{}/v1/projects/{project_id}", self.base_url)
    }
}

impl ProjectFetcher for DittoClient {
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectTranslations, FetchError> {
        let url = self.project_url(project_id);
        tracing::debug!(%url, "Fetching project");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "structured")])
            .header(AUTHORIZATION, self.api_key.expose())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let translations: ProjectTranslations = serde_json::from_slice(&bytes)?;
        tracing::debug!(project = project_id, keys = translations.len(), "Fetched project");

        Ok(translations)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn api_key() -> ApiKey {
        ApiKey::from_value(Some("key".to_string())).unwrap()
    }

    #[rstest]
    #[case::default(None, "https://api.dittowords.com/v1/projects/abc")]
    #[case::custom(Some("http://localhost:8080"), "http://localhost:8080/v1/projects/abc")]
    #[case::trailing_slash(Some("http://localhost:8080//"), "http://localhost:8080/v1/projects/abc")]
    fn test_project_url(#[case] base_url: Option<&str>, #[case] expected: &str) {
        let client = DittoClient::new(api_key(), base_url.map(str::to_string)).unwrap();

        assert_eq!(client.project_url("abc"), expected);
    }

    #[rstest]
    fn test_debug_does_not_leak_api_key() {
        let client =
            DittoClient::new(ApiKey::from_value(Some("top-secret".to_string())).unwrap(), None)
                .unwrap();

        assert!(!format!("{client:?}").contains("top-secret"));
    }
}
