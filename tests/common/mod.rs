//! Scripted in-memory content backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use shiksha::adapters::{ApiError, ContentApi, SearchRequest};
use shiksha::domain::{ContentItem, FrameworkFilter};

/// A call received by the fake backend
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(SearchRequest),
    Hierarchy(String),
    Read(String),
    MarkRead(String),
    Framework(String),
}

/// Content backend answering from fixed tables
#[derive(Default)]
pub struct FakeApi {
    /// Search results per content type
    pub search_results: HashMap<String, Vec<ContentItem>>,
    /// Delay per content type, to control response order
    pub search_delays: HashMap<String, Duration>,
    pub items: HashMap<String, ContentItem>,
    pub framework: Option<FrameworkFilter>,
    pub fail_all: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, content_type: &str, items: Vec<ContentItem>) -> Self {
        self.search_results.insert(content_type.to_string(), items);
        self
    }

    pub fn with_search_delay(mut self, content_type: &str, delay: Duration) -> Self {
        self.search_delays.insert(content_type.to_string(), delay);
        self
    }

    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.items.insert(item.identifier.clone(), item);
        self
    }

    pub fn with_framework(mut self, framework: FrameworkFilter) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_all {
            return Err(ApiError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentApi for FakeApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ContentItem>, ApiError> {
        self.record(Call::Search(request.clone()))?;
        if let Some(delay) = self.search_delays.get(&request.content_type) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self
            .search_results
            .get(&request.content_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn hierarchy(&self, identifier: &str) -> Result<Option<ContentItem>, ApiError> {
        self.record(Call::Hierarchy(identifier.to_string()))?;
        Ok(self.items.get(identifier).cloned())
    }

    async fn read(&self, identifier: &str) -> Result<ContentItem, ApiError> {
        self.record(Call::Read(identifier.to_string()))?;
        self.items
            .get(identifier)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("{} not found", identifier),
            })
    }

    async fn mark_read(&self, identifier: &str) -> Result<(), ApiError> {
        self.record(Call::MarkRead(identifier.to_string()))
    }

    async fn framework(&self, framework_id: &str) -> Result<FrameworkFilter, ApiError> {
        self.record(Call::Framework(framework_id.to_string()))?;
        self.framework
            .clone()
            .ok_or_else(|| ApiError::Decode("no framework".to_string()))
    }
}

/// Mime type of a course (not playable)
pub const COLLECTION: &str = "application/vnd.ekstep.content-collection";

pub fn item(identifier: &str, name: &str, mime_type: &str) -> ContentItem {
    ContentItem::new(identifier, name, mime_type)
}
