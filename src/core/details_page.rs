//! Content details page.
//!
//! Shows one item's poster, description and tags, with a single action
//! to start the content. Until the route yields an identifier the page
//! renders a placeholder and fetches nothing.

use anyhow::Result;
use tracing::{debug, error, info};

use crate::adapters::ApiError;
use crate::domain::content::{DETAILS_PLACEHOLDER_DESCRIPTION, DETAILS_PLACEHOLDER_IMAGE};
use crate::domain::ContentItem;

use super::fetch::{Completion, Generation, LoadState, Response, StalePolicy, Ticket};
use super::router::Route;
use super::session::SessionContext;

/// Top bar title
pub const PAGE_TITLE: &str = "Shiksha";

/// Title next to the back arrow
pub const BACK_TITLE: &str = "Course Details";

/// Text shown before the identifier is known
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Label of the start action
pub const START_LABEL: &str = "Join Now/Start Course";

/// Ticket for a details fetch; the request is the identifier
pub type DetailsTicket = Ticket<String>;

pub type DetailsResponse = Response<ContentItem, ApiError>;

/// Rendered details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsContent {
    pub identifier: String,
    /// Empty until the metadata arrives
    pub name: String,
    pub poster: String,
    pub description: String,
    /// Keyword chips, display only
    pub tags: Vec<String>,
    pub loading: bool,
    pub start_label: &'static str,
    pub start_route: Route,
}

/// What the page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsView {
    /// No identifier yet
    Placeholder(&'static str),
    Content(DetailsContent),
}

/// State of the content details page
#[derive(Debug, Clone)]
pub struct ContentDetailsPage {
    identifier: Option<String>,
    details: Option<ContentItem>,
    state: LoadState,
    generation: Generation,
    stale_policy: StalePolicy,
}

impl ContentDetailsPage {
    pub fn new(stale_policy: StalePolicy) -> Self {
        Self {
            identifier: None,
            details: None,
            state: LoadState::Idle,
            generation: Generation::new(),
            stale_policy,
        }
    }

    /// Route identifier changed (or became known after hydration).
    ///
    /// Fetches once per distinct identifier; `None` or a repeat of the
    /// current identifier fetches nothing.
    pub fn set_identifier(&mut self, identifier: Option<String>) -> Option<DetailsTicket> {
        let identifier = identifier.filter(|id| !id.is_empty());
        if identifier == self.identifier {
            return None;
        }

        self.identifier = identifier.clone();
        self.details = None;

        match identifier {
            Some(identifier) => {
                let id = self.generation.issue();
                self.state = LoadState::Loading;
                info!(request = %id, %identifier, "Fetching content details");
                Some(Ticket {
                    id,
                    request: identifier,
                })
            }
            None => {
                self.generation.invalidate();
                self.state = LoadState::Idle;
                None
            }
        }
    }

    /// Take the identifier from a `/content-details/{identifier}` route
    pub fn navigate(&mut self, route: &Route) -> Option<DetailsTicket> {
        match route {
            Route::ContentDetails(id) => self.set_identifier(Some(id.clone())),
            _ => self.set_identifier(None),
        }
    }

    /// Apply a fetch result
    pub fn complete(&mut self, response: DetailsResponse) -> Completion {
        // Nothing to show results for once the identifier is gone
        let current = self.identifier.is_some();
        if !current || !self.generation.accepts(response.id, self.stale_policy) {
            debug!(request = %response.id, "Discarding superseded details response");
            return Completion::Discarded;
        }

        match response.result {
            Ok(item) => {
                self.details = Some(item);
                self.state = LoadState::Success;
                Completion::Applied
            }
            Err(e) => {
                error!(request = %response.id, "Failed to fetch content: {}", e);
                self.state = LoadState::Failure;
                Completion::Failed
            }
        }
    }

    pub fn view(&self) -> DetailsView {
        let Some(identifier) = &self.identifier else {
            return DetailsView::Placeholder(LOADING_PLACEHOLDER);
        };
        let details = self.details.as_ref();

        DetailsView::Content(DetailsContent {
            identifier: identifier.clone(),
            name: details.map(|d| d.name.clone()).unwrap_or_default(),
            poster: details
                .and_then(ContentItem::poster)
                .unwrap_or(DETAILS_PLACEHOLDER_IMAGE)
                .to_string(),
            description: details
                .and_then(ContentItem::description_text)
                .unwrap_or(DETAILS_PLACEHOLDER_DESCRIPTION)
                .to_string(),
            tags: details.map(|d| d.keywords.clone()).unwrap_or_default(),
            loading: self.state.is_loading(),
            start_label: START_LABEL,
            start_route: Route::Start(identifier.clone()),
        })
    }

    /// The start/continue action
    pub fn start(&self) -> Option<Route> {
        self.identifier.clone().map(Route::Start)
    }

    /// The back arrow
    pub fn back(&self) -> Route {
        Route::Back
    }

    /// Logout from the top bar menu
    pub async fn logout(&self, session: &mut SessionContext) -> Result<Route> {
        session.logout().await
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn details(&self) -> Option<&ContentItem> {
        self.details.as_ref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(identifier: &str, name: &str) -> ContentItem {
        ContentItem::new(identifier, name, "application/pdf")
    }

    #[test]
    fn test_placeholder_without_identifier() {
        let mut page = ContentDetailsPage::new(StalePolicy::Discard);
        assert!(page.set_identifier(None).is_none());
        assert!(page.set_identifier(Some(String::new())).is_none());
        assert_eq!(page.view(), DetailsView::Placeholder("Loading..."));
        assert_eq!(page.start(), None);
        assert_eq!(page.state(), LoadState::Idle);
    }

    #[test]
    fn test_fetches_once_per_identifier() {
        let mut page = ContentDetailsPage::new(StalePolicy::Discard);
        let ticket = page.set_identifier(Some("do_1".into())).unwrap();
        assert_eq!(ticket.request, "do_1");
        assert!(page.set_identifier(Some("do_1".into())).is_none());

        let ticket = page.set_identifier(Some("do_2".into())).unwrap();
        assert_eq!(ticket.request, "do_2");
    }

    #[test]
    fn test_fallbacks_and_tags() {
        let mut page = ContentDetailsPage::new(StalePolicy::Discard);
        let route = Route::ContentDetails("do_1".into());
        let ticket = page.navigate(&route).unwrap();

        match page.view() {
            DetailsView::Content(content) => {
                assert!(content.loading);
                assert_eq!(content.name, "");
                assert_eq!(content.poster, DETAILS_PLACEHOLDER_IMAGE);
            }
            other => panic!("unexpected view {:?}", other),
        }

        let item = item("do_1", "Geometry")
            .with_description("")
            .with_keywords(vec!["shapes".into(), "angles".into()]);
        let completion = page.complete(Response::new(ticket.id, Ok(item)));
        assert_eq!(completion, Completion::Applied);

        match page.view() {
            DetailsView::Content(content) => {
                assert!(!content.loading);
                assert_eq!(content.name, "Geometry");
                assert_eq!(content.poster, DETAILS_PLACEHOLDER_IMAGE);
                assert_eq!(content.description, "No description available");
                assert_eq!(content.tags, vec!["shapes", "angles"]);
                assert_eq!(content.start_route.path(), "/details/do_1");
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_failure_keeps_page_without_details() {
        let mut page = ContentDetailsPage::new(StalePolicy::Discard);
        let ticket = page.set_identifier(Some("do_1".into())).unwrap();
        let completion = page.complete(Response::new(
            ticket.id,
            Err(ApiError::Status {
                status: 404,
                body: "not found".into(),
            }),
        ));

        assert_eq!(completion, Completion::Failed);
        assert_eq!(page.state(), LoadState::Failure);
        assert!(page.details().is_none());
        assert_eq!(page.start(), Some(Route::Start("do_1".into())));
        assert_eq!(page.back(), Route::Back);
    }

    #[test]
    fn test_stale_details_discarded() {
        let mut page = ContentDetailsPage::new(StalePolicy::Discard);
        let first = page.set_identifier(Some("do_1".into())).unwrap();
        let second = page.set_identifier(Some("do_2".into())).unwrap();

        let late = page.complete(Response::new(first.id, Ok(item("do_1", "One"))));
        assert_eq!(late, Completion::Discarded);
        assert_eq!(page.state(), LoadState::Loading);

        page.complete(Response::new(second.id, Ok(item("do_2", "Two"))));
        assert_eq!(page.details().map(|d| d.name.as_str()), Some("Two"));
    }

    #[test]
    fn test_response_after_leaving_details_is_dropped() {
        for policy in [StalePolicy::Discard, StalePolicy::LastWriteWins] {
            let mut page = ContentDetailsPage::new(policy);
            let route = Route::ContentDetails("do_1".into());
            let ticket = page.navigate(&route).unwrap();
            assert!(page.navigate(&Route::Home).is_none());

            let completion = page.complete(Response::new(ticket.id, Ok(item("do_1", "One"))));

            assert_eq!(completion, Completion::Discarded, "{}", policy);
            assert_eq!(page.state(), LoadState::Idle);
            assert!(page.details().is_none());
            assert_eq!(page.view(), DetailsView::Placeholder("Loading..."));
        }
    }

    #[test]
    fn test_returning_to_same_identifier_fetches_again() {
        let mut page = ContentDetailsPage::new(StalePolicy::Discard);
        let route = Route::ContentDetails("do_1".into());
        let first = page.navigate(&route).unwrap();
        page.navigate(&Route::Home);
        let second = page.navigate(&route).unwrap();

        let late = page.complete(Response::new(first.id, Ok(item("do_1", "Old"))));
        assert_eq!(late, Completion::Discarded);

        page.complete(Response::new(second.id, Ok(item("do_1", "New"))));
        assert_eq!(page.details().map(|d| d.name.as_str()), Some("New"));
    }
}
