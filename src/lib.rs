//! shiksha - educational content browser
//!
//! A client for browsing learning content served by a Sunbird-style
//! content API: a list page with tabs, search and filters, and a details
//! page for a single item.
//!
//! # Architecture
//!
//! Pages are explicit state machines:
//! - User events go into `handle`, which returns a fetch ticket (or nothing)
//! - A `Browser` executes tickets against a `ContentApi`
//! - Responses go back into `complete`; superseded ones are discarded
//! - Views are plain data, rendered by the CLI
//!
//! # Modules
//!
//! - `adapters`: Content backend interface and the HTTP client
//! - `core`: Page state machines, routing, session, fetch execution
//! - `domain`: Data structures (ContentItem, Tab, filters)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Search learning resources
//! shiksha browse --tab content --query fractions -f subject=Mathematics
//!
//! # Open a card
//! shiksha open do_123 --mime-type application/pdf
//!
//! # Show details of an item
//! shiksha details do_456
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::adapters::{ApiError, ContentApi, SearchRequest, SunbirdClient};
pub use crate::core::{
    Browser, CardActivation, Completion, ContentDetailsPage, ContentListPage, ListEvent, ListView,
    Route, SessionContext, StalePolicy,
};
pub use crate::domain::{ContentItem, FilterOptions, FilterValues, FrameworkFilter, Tab};
