//! Executes page tickets against the content backend.
//!
//! Pages decide *what* to fetch; the browser does the fetching and hands
//! results back. Each fetch is independent, so callers that want to run
//! several at once can call the `fetch_*` methods concurrently and
//! complete the page in whatever order the responses arrive.

use std::sync::Arc;

use tracing::{error, instrument, warn};

use crate::adapters::{ApiError, ContentApi};
use crate::domain::FilterOptions;

use super::details_page::{ContentDetailsPage, DetailsResponse, DetailsTicket};
use super::fetch::{Completion, Response};
use super::list_page::{
    Activated, CardActivation, ContentListPage, ListEvent, ListRequest, ListResponse, ListTicket,
};
use super::router::Route;

/// Runs page fetches against a [`ContentApi`]
#[derive(Clone)]
pub struct Browser {
    api: Arc<dyn ContentApi>,
}

impl Browser {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn ContentApi {
        self.api.as_ref()
    }

    /// Execute a list ticket
    #[instrument(skip(self, ticket), fields(request = %ticket.id, backend = self.api.name()))]
    pub async fn fetch_list(&self, ticket: ListTicket) -> ListResponse {
        let result = match &ticket.request {
            ListRequest::Search(request) => self.api.search(request).await.map(Some),
            ListRequest::Hierarchy { identifier } => self
                .api
                .hierarchy(identifier)
                .await
                .map(|item| item.map(|item| vec![item])),
        };
        Response::new(ticket.id, result)
    }

    /// Execute a details ticket
    #[instrument(skip(self, ticket), fields(request = %ticket.id, identifier = %ticket.request))]
    pub async fn fetch_details(&self, ticket: DetailsTicket) -> DetailsResponse {
        let result = self.api.read(&ticket.request).await;
        Response::new(ticket.id, result)
    }

    /// Do the backend work for a card activation
    #[instrument(skip(self), fields(identifier = activation.identifier()))]
    pub async fn run_activation(&self, activation: CardActivation) -> Result<Activated, ApiError> {
        match activation {
            CardActivation::Play { identifier } => {
                self.api.mark_read(&identifier).await?;
                Ok(Activated::Played { identifier })
            }
            CardActivation::OpenDetails { identifier } => {
                let content = self.api.hierarchy(&identifier).await?;
                Ok(Activated::Detailed {
                    identifier,
                    content,
                })
            }
        }
    }

    /// Apply an event to the list page and run the fetch it asks for.
    ///
    /// Returns `None` when the event needed no fetch.
    pub async fn dispatch(
        &self,
        page: &mut ContentListPage,
        event: ListEvent,
    ) -> Option<Completion> {
        let ticket = page.handle(event)?;
        let response = self.fetch_list(ticket).await;
        Some(page.complete(response))
    }

    /// Activate a card on the list page. Returns the route to navigate
    /// to, or `None` if the backend call failed.
    pub async fn open_card(
        &self,
        page: &mut ContentListPage,
        identifier: &str,
        mime_type: &str,
    ) -> Option<Route> {
        let activation = page.activate(identifier, mime_type);
        let result = self.run_activation(activation).await;
        page.finish_activation(result)
    }

    /// Point the details page at a route and load it
    pub async fn show_details(
        &self,
        page: &mut ContentDetailsPage,
        route: &Route,
    ) -> Option<Completion> {
        let ticket = page.navigate(route)?;
        let response = self.fetch_details(ticket).await;
        Some(page.complete(response))
    }

    /// Filter panel options. Falls back to the built-in options when no
    /// framework is configured or the taxonomy fetch fails.
    pub async fn filter_options(&self, framework_id: Option<&str>) -> FilterOptions {
        let Some(framework_id) = framework_id.filter(|id| !id.is_empty()) else {
            return FilterOptions::default();
        };

        match self.api.framework(framework_id).await {
            Ok(framework) => FilterOptions::from_framework(&framework),
            Err(e) => {
                error!(%framework_id, "Failed to fetch framework: {}", e);
                warn!("Using built-in filter options");
                FilterOptions::default()
            }
        }
    }
}
