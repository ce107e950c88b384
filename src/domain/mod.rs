//! Domain types for the content client.
//!
//! This module contains the core data structures:
//! - Content: items returned by the content APIs, tabs, playable mime types
//! - Filter: filter values, panel options and the framework taxonomy

pub mod content;
pub mod filter;

// Re-export commonly used types
pub use content::{is_playable, ContentItem, Tab, PLAYABLE_MIME_TYPES};
pub use filter::{FilterOptions, FilterSelection, FilterValues, FrameworkFilter, SortOrder};
