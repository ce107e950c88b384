//! Page logic.
//!
//! This module contains:
//! - Fetch: request ids, load states and the stale-response policy
//! - Router: navigation targets
//! - Session: tokens, stores and logout
//! - ListPage / DetailsPage: the two page state machines
//! - Browser: runs page fetches against the content backend

pub mod browser;
pub mod details_page;
pub mod fetch;
pub mod list_page;
pub mod router;
pub mod session;

// Re-export commonly used types
pub use browser::Browser;
pub use details_page::{ContentDetailsPage, DetailsContent, DetailsView};
pub use fetch::{Completion, LoadState, RequestId, StalePolicy};
pub use list_page::{CardActivation, CardView, ContentListPage, ListEvent, ListRequest, ListView};
pub use router::Route;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionContext, SessionStore};
