//! Adapter interfaces for the content backend.
//!
//! Pages never talk HTTP directly; they go through [`ContentApi`], which
//! the Sunbird client implements and tests replace with scripted fakes.

pub mod sunbird;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{ContentItem, FilterValues, FrameworkFilter};

// Re-export the HTTP adapter
pub use sunbird::SunbirdClient;

/// Errors from the content backend.
///
/// Pages log these and fall back to what they already show; the kinds
/// only matter for diagnostics.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Parameters of a content search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// "Course" or "Learning Resource"
    pub content_type: String,

    /// Free-text query, already trimmed
    pub query: Option<String>,

    /// Filter values from the filter panel
    pub filters: Option<FilterValues>,
}

impl SearchRequest {
    /// Search for a content type with no query or filters
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            query: None,
            filters: None,
        }
    }

    /// Set the free-text query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the filter values
    pub fn with_filters(mut self, filters: FilterValues) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// The external content service
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Search content by type, query and filters
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ContentItem>, ApiError>;

    /// Fetch an item with its nested children
    async fn hierarchy(&self, identifier: &str) -> Result<Option<ContentItem>, ApiError>;

    /// Fetch the metadata of a single item
    async fn read(&self, identifier: &str) -> Result<ContentItem, ApiError>;

    /// Record that the user opened an item in the player
    async fn mark_read(&self, identifier: &str) -> Result<(), ApiError>;

    /// Fetch a framework taxonomy used to populate filter options
    async fn framework(&self, framework_id: &str) -> Result<FrameworkFilter, ApiError>;
}
