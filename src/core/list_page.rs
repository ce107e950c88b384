//! Content list page: tabs, search, filters and the card grid.
//!
//! The page is a plain state machine. [`ContentListPage::handle`] applies
//! a user event and, when the event needs data, returns a ticket. The
//! caller executes the ticket (see [`crate::core::Browser`]) and feeds
//! the response back through [`ContentListPage::complete`].

use tracing::{debug, error, info};

use crate::adapters::{ApiError, SearchRequest};
use crate::domain::content::{CARD_PLACEHOLDER_DESCRIPTION, CARD_PLACEHOLDER_IMAGE};
use crate::domain::{is_playable, ContentItem, FilterValues, Tab};

use super::fetch::{Completion, Generation, LoadState, Response, StalePolicy, Ticket};
use super::router::Route;

/// Top bar title
pub const PAGE_TITLE: &str = "Shiksha: Home";

/// Search box placeholder
pub const SEARCH_PLACEHOLDER: &str = "Search content..";

/// Events the list page reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Page shown for the first time (or shown again)
    Mount,

    /// Tab bar selection
    SelectTab(Tab),

    /// Search box edited; does not fetch
    EditSearch(String),

    /// Search icon pressed
    SubmitSearch,

    /// Filter panel applied; replaces the previous filter values
    ApplyFilters(FilterValues),
}

/// Data the list page asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    /// Search by tab type, query and filters
    Search(SearchRequest),

    /// Single-item lookup when the route pins an identifier
    Hierarchy { identifier: String },
}

pub type ListTicket = Ticket<ListRequest>;

/// Result of a list fetch. `Ok(None)` means nothing came back and the
/// grid keeps what it shows.
pub type ListResponse = Response<Option<Vec<ContentItem>>, ApiError>;

/// What activating a card will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardActivation {
    /// Track the read, then open the player
    Play { identifier: String },

    /// Look up the hierarchy, then open the details page
    OpenDetails { identifier: String },
}

impl CardActivation {
    /// Branch on the playable mime type allow-list
    pub fn classify(identifier: &str, mime_type: &str) -> Self {
        let identifier = identifier.to_string();
        if is_playable(mime_type) {
            CardActivation::Play { identifier }
        } else {
            CardActivation::OpenDetails { identifier }
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            CardActivation::Play { identifier } | CardActivation::OpenDetails { identifier } => {
                identifier
            }
        }
    }
}

/// Backend work done for an activation
#[derive(Debug, Clone, PartialEq)]
pub enum Activated {
    /// Read tracked
    Played { identifier: String },

    /// Hierarchy fetched (possibly empty)
    Detailed {
        identifier: String,
        content: Option<ContentItem>,
    },
}

/// One card in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub identifier: String,
    pub mime_type: String,
    pub title: String,
    pub image: String,
    pub content: String,
    /// Footer label (the item's content type)
    pub actions: String,
}

impl CardView {
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            identifier: item.identifier.clone(),
            mime_type: item.mime_type.clone(),
            title: item.name.trim().to_string(),
            image: item.poster().unwrap_or(CARD_PLACEHOLDER_IMAGE).to_string(),
            content: item
                .description_text()
                .unwrap_or(CARD_PLACEHOLDER_DESCRIPTION)
                .to_string(),
            actions: item.content_type.clone(),
        }
    }
}

/// What the tab body shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Grid(Vec<CardView>),
}

/// Navigation drawer entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerItem {
    pub text: &'static str,
    pub route: Route,
}

/// Navigation drawer entries
pub fn drawer_items() -> Vec<DrawerItem> {
    vec![
        DrawerItem {
            text: "Home",
            route: Route::Home,
        },
        DrawerItem {
            text: "Page2",
            route: Route::Page2,
        },
        DrawerItem {
            text: "Content",
            route: Route::Content { identifier: None },
        },
    ]
}

/// State of the content list page
#[derive(Debug, Clone)]
pub struct ContentListPage {
    /// `identifier` from the route query; switches fetches to hierarchy lookups
    route_identifier: Option<String>,
    tab: Tab,
    search_text: String,
    /// Query of the last submitted search
    applied_query: Option<String>,
    filters: FilterValues,
    items: Vec<ContentItem>,
    state: LoadState,
    /// Card activation in flight
    activating: bool,
    selected: Option<ContentItem>,
    generation: Generation,
    stale_policy: StalePolicy,
}

impl ContentListPage {
    /// Create the page for the `identifier` route query (if any)
    pub fn new(route_identifier: Option<String>, stale_policy: StalePolicy) -> Self {
        Self {
            route_identifier: route_identifier.filter(|id| !id.is_empty()),
            tab: Tab::default(),
            search_text: String::new(),
            applied_query: None,
            filters: FilterValues::default(),
            items: Vec::new(),
            state: LoadState::Idle,
            activating: false,
            selected: None,
            generation: Generation::new(),
            stale_policy,
        }
    }

    /// Start on a given tab. Meant for setting up the page before `Mount`.
    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Start with a submitted query. Meant for setting up the page before `Mount`.
    pub fn with_query(mut self, query: &str) -> Self {
        self.search_text = query.to_string();
        let trimmed = query.trim();
        self.applied_query = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Start with applied filters. Meant for setting up the page before `Mount`.
    pub fn with_filters(mut self, filters: FilterValues) -> Self {
        self.filters = filters;
        self
    }

    /// Create the page from a `/content` route
    pub fn from_route(route: &Route, stale_policy: StalePolicy) -> Self {
        let identifier = match route {
            Route::Content { identifier } => identifier.clone(),
            _ => None,
        };
        Self::new(identifier, stale_policy)
    }

    /// Apply a user event. Returns the fetch to run, if the event needs one.
    pub fn handle(&mut self, event: ListEvent) -> Option<ListTicket> {
        match event {
            ListEvent::Mount => self.issue(),
            ListEvent::SelectTab(tab) => {
                if tab == self.tab {
                    return None;
                }
                self.tab = tab;
                self.issue()
            }
            ListEvent::EditSearch(text) => {
                self.search_text = text;
                None
            }
            ListEvent::SubmitSearch => {
                let query = self.search_text.trim();
                if query.is_empty() {
                    // Blank submit only matters when it clears an applied query
                    if self.applied_query.take().is_none() {
                        return None;
                    }
                } else {
                    self.applied_query = Some(query.to_string());
                }
                self.issue()
            }
            ListEvent::ApplyFilters(filters) => {
                self.filters = filters;
                self.issue()
            }
        }
    }

    /// Request matching the current page state
    pub fn current_request(&self) -> ListRequest {
        if let Some(identifier) = &self.route_identifier {
            return ListRequest::Hierarchy {
                identifier: identifier.clone(),
            };
        }

        let mut request = SearchRequest::new(self.tab.search_type());
        request.query = self.applied_query.clone();
        if !self.filters.is_empty() {
            request.filters = Some(self.filters.clone());
        }
        ListRequest::Search(request)
    }

    fn issue(&mut self) -> Option<ListTicket> {
        let id = self.generation.issue();
        self.state = LoadState::Loading;
        let request = self.current_request();
        info!(request = %id, tab = %self.tab, "Fetching content");
        Some(Ticket { id, request })
    }

    /// Apply a fetch result
    pub fn complete(&mut self, response: ListResponse) -> Completion {
        if !self.generation.accepts(response.id, self.stale_policy) {
            debug!(request = %response.id, "Discarding superseded content response");
            return Completion::Discarded;
        }

        match response.result {
            Ok(Some(items)) => {
                self.items = items;
                self.state = LoadState::Success;
                Completion::Applied
            }
            Ok(None) => {
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

    /// Start activating a card. The grid shows the loading indicator
    /// until [`ContentListPage::finish_activation`] is called.
    pub fn activate(&mut self, identifier: &str, mime_type: &str) -> CardActivation {
        self.activating = true;
        CardActivation::classify(identifier, mime_type)
    }

    /// Finish a card activation, returning where to navigate
    pub fn finish_activation(&mut self, result: Result<Activated, ApiError>) -> Option<Route> {
        self.activating = false;
        match result {
            Ok(Activated::Played { identifier }) => Some(Route::Player(identifier)),
            Ok(Activated::Detailed {
                identifier,
                content,
            }) => {
                self.selected = content;
                Some(Route::ContentDetails(identifier))
            }
            Err(e) => {
                error!("Failed to fetch content: {}", e);
                None
            }
        }
    }

    /// What the tab body shows
    pub fn view(&self) -> ListView {
        if self.state.is_loading() || self.activating {
            return ListView::Loading;
        }
        ListView::Grid(self.items.iter().map(CardView::from_item).collect())
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn applied_query(&self) -> Option<&str> {
        self.applied_query.as_deref()
    }

    pub fn filters(&self) -> &FilterValues {
        &self.filters
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Hierarchy of the last composite item opened
    pub fn selected_content(&self) -> Option<&ContentItem> {
        self.selected.as_ref()
    }

    pub fn route_identifier(&self) -> Option<&str> {
        self.route_identifier.as_deref()
    }
}
