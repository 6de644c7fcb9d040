//! REST implementation of the run catalog and media source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::CatalogError;
use super::models::api::{ApiFeatureRef, ApiPage, ApiRun, ApiTestNode};
use super::models::{FeatureNode, MediaBody, Run, RunId, TestId};
use super::{MediaSource, RunCatalog};

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for [`HttpRunCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCatalogConfig {
    /// Base URL of the results server (e.g. `https://results.example.com/`).
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub token: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    /// Constructs configuration for the given base URL with default timeout
    /// and no token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Catalog backed by the results server's REST API.
#[derive(Debug, Clone)]
pub struct HttpRunCatalog {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpRunCatalog {
    /// Builds a catalog client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when the base URL cannot be
    /// parsed or cannot carry path segments, and
    /// [`CatalogError::Configuration`] when the HTTP client cannot be built.
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let base = Url::parse(&config.base_url)
            .map_err(|error| CatalogError::InvalidUrl(format!("{}: {error}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(config.base_url));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| CatalogError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            base,
            token: config.token,
        })
    }

    /// Builds an endpoint URL from path segments below the base URL.
    ///
    /// Segments are percent-encoded, so identifiers containing `/` or
    /// spaces address a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_text(&self, operation: &str, url: Url) -> Result<String, CatalogError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_owned());
            return Err(CatalogError::Api {
                operation: operation.to_owned(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
    ) -> Result<T, CatalogError> {
        let body = self.get_text(operation, url).await?;
        serde_json::from_str(&body).map_err(|error| CatalogError::decode(operation, &error))
    }

    async fn list_feature_ids(&self, run_id: &RunId) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint(&["rest", "runs", run_id.as_str(), "features"])?;
        let page: ApiPage<ApiFeatureRef> = self.get_json("run features", url).await?;
        Ok(page.content.into_iter().map(ApiFeatureRef::into_id).collect())
    }

    async fn feature_tree(&self, feature_id: &str) -> Result<Vec<FeatureNode>, CatalogError> {
        let mut url = self.endpoint(&["rest", "tests"])?;
        url.query_pairs_mut()
            .append_pair("id", feature_id)
            .append_pair("deep-populate", "true");
        let page: ApiPage<ApiTestNode> = self.get_json("feature tests", url).await?;
        Ok(page.content.into_iter().map(FeatureNode::from).collect())
    }
}

#[async_trait]
impl RunCatalog for HttpRunCatalog {
    async fn list_runs(&self, project: &str) -> Result<Vec<Run>, CatalogError> {
        let mut url = self.endpoint(&["rest", "runs"])?;
        url.query_pairs_mut().append_pair("projectId", project);
        let page: ApiPage<ApiRun> = self.get_json("runs", url).await?;
        let runs = page
            .content
            .into_iter()
            .map(Run::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(project, runs = runs.len(), "listed runs");
        Ok(runs)
    }

    async fn fetch_tree(&self, run_id: &RunId) -> Result<Vec<FeatureNode>, CatalogError> {
        let feature_ids = self.list_feature_ids(run_id).await?;
        let mut tree = Vec::with_capacity(feature_ids.len());
        for feature_id in &feature_ids {
            tree.extend(self.feature_tree(feature_id).await?);
        }
        tracing::debug!(run_id = %run_id, features = tree.len(), "fetched run tree");
        Ok(tree)
    }
}

#[async_trait]
impl MediaSource for HttpRunCatalog {
    async fn fetch_media_body(&self, test_id: &TestId) -> Result<MediaBody, CatalogError> {
        let url = self.endpoint(&["rest", "medias", test_id.as_str()])?;
        let body = self.get_text("media", url).await?;
        // Some servers wrap the encoded body in a JSON string.
        let encoded = serde_json::from_str::<String>(&body).unwrap_or(body);
        Ok(MediaBody::new(encoded))
    }
}
