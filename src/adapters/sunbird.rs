//! HTTP adapter for Sunbird-style content APIs.
//!
//! Endpoints:
//! - POST /api/content/v1/search
//! - GET  /api/course/v1/hierarchy/{identifier}
//! - GET  /api/content/v1/read/{identifier}
//! - GET  /api/framework/v1/read/{framework_id}
//!
//! Every response is wrapped in `{"result": {...}}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{ApiError, ContentApi, SearchRequest};
use crate::domain::{ContentItem, FrameworkFilter};

const SEARCH_PATH: [&str; 4] = ["api", "content", "v1", "search"];
const HIERARCHY_PATH: [&str; 4] = ["api", "course", "v1", "hierarchy"];
const READ_PATH: [&str; 4] = ["api", "content", "v1", "read"];
const FRAMEWORK_PATH: [&str; 4] = ["api", "framework", "v1", "read"];

/// Response envelope shared by all endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentResult {
    #[serde(default)]
    content: Option<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct FrameworkResult {
    #[serde(default)]
    framework: Option<Value>,
}

/// Sunbird content API client
pub struct SunbirdClient {
    /// API root, e.g. `https://host/` or `https://host/interface`
    base_url: Url,
    /// Bearer token from the session, if logged in
    access_token: Option<String>,
    /// HTTP client
    client: reqwest::Client,
}

impl SunbirdClient {
    /// Create a client for an API root.
    ///
    /// `timeout` applies to every request; `None` means no timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            access_token: None,
            client: builder.build()?,
        })
    }

    /// Attach a bearer token to every request
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Build an endpoint URL from path segments
    fn endpoint(&self, path: &[&str], identifier: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(path);
            if let Some(id) = identifier {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.result)
    }

    async fn get_content(
        &self,
        path: &[&str],
        identifier: &str,
    ) -> Result<Option<ContentItem>, ApiError> {
        let url = self.endpoint(path, Some(identifier))?;
        debug!(%url, "GET content");
        let result: Option<ContentResult> = self.send(self.request(Method::GET, url)).await?;
        Ok(result.and_then(|r| r.content))
    }
}

/// Build the search payload.
///
/// Filter fields go into `request.filters` next to the content type; the
/// content type is written last so a filter field cannot replace it.
pub fn search_body(request: &SearchRequest) -> Value {
    let mut filters = Map::new();
    if let Some(values) = &request.filters {
        for (field, selected) in &values.fields {
            filters.insert(field.clone(), json!(selected));
        }
    }
    let content_type = json!([request.content_type]);
    filters.insert("primaryCategory".to_string(), content_type);

    let mut body = Map::new();
    body.insert("filters".to_string(), Value::Object(filters));
    if let Some(query) = &request.query {
        body.insert("query".to_string(), json!(query));
    }
    if let Some(sort) = request.filters.as_ref().and_then(|f| f.sort) {
        body.insert("sort_by".to_string(), json!({ "name": sort.to_string() }));
    }

    json!({ "request": body })
}

#[async_trait]
impl ContentApi for SunbirdClient {
    fn name(&self) -> &str {
        "sunbird"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ContentItem>, ApiError> {
        let url = self.endpoint(&SEARCH_PATH, None)?;
        debug!(%url, content_type = %request.content_type, "POST search");
        let result: Option<SearchResult> = self
            .send(self.request(Method::POST, url).json(&search_body(request)))
            .await?;
        Ok(result.map(|r| r.content).unwrap_or_default())
    }

    async fn hierarchy(&self, identifier: &str) -> Result<Option<ContentItem>, ApiError> {
        self.get_content(&HIERARCHY_PATH, identifier).await
    }

    async fn read(&self, identifier: &str) -> Result<ContentItem, ApiError> {
        let content = self.get_content(&READ_PATH, identifier).await?;
        content.ok_or_else(|| ApiError::Decode(format!("no content for {}", identifier)))
    }

    async fn mark_read(&self, identifier: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&READ_PATH, Some(identifier))?;
        debug!(%url, "GET read (tracking)");
        let _: Option<Value> = self.send(self.request(Method::GET, url)).await?;
        Ok(())
    }

    async fn framework(&self, framework_id: &str) -> Result<FrameworkFilter, ApiError> {
        let url = self.endpoint(&FRAMEWORK_PATH, Some(framework_id))?;
        debug!(%url, "GET framework");
        let result: Option<FrameworkResult> = self.send(self.request(Method::GET, url)).await?;
        let framework = result.and_then(|r| r.framework).map(FrameworkFilter);
        framework.ok_or_else(|| ApiError::Decode(format!("no framework {}", framework_id)))
    }
}
