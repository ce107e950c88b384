//! Content Details Page Integration Tests
//!
//! Tests for loading details through the browser, fallbacks, the start
//! and back actions, logout, and filter panel options.

mod common;

use std::sync::Arc;

use common::{item, Call, FakeApi};
use serde_json::json;
use shiksha::core::{
    Browser, Completion, ContentDetailsPage, DetailsView, LoadState, MemorySessionStore, Route,
    Session, SessionContext, StalePolicy,
};
use shiksha::domain::{FilterOptions, FrameworkFilter};

fn details(page: &ContentDetailsPage) -> shiksha::core::DetailsContent {
    match page.view() {
        DetailsView::Content(content) => content,
        DetailsView::Placeholder(text) => panic!("unexpected placeholder {:?}", text),
    }
}

#[tokio::test]
async fn test_details_load_once_per_identifier() {
    let photosynthesis = item("do_42", "Photosynthesis", "application/pdf")
        .with_poster("/posters/leaf.png")
        .with_description("How plants make food")
        .with_keywords(vec!["biology".to_string(), "plants".to_string()]);
    let api = Arc::new(FakeApi::new().with_item(photosynthesis));
    let browser = Browser::new(api.clone());
    let mut page = ContentDetailsPage::new(StalePolicy::Discard);
    let route = Route::parse("/content-details/do_42").unwrap();

    let completion = browser.show_details(&mut page, &route).await;
    assert_eq!(completion, Some(Completion::Applied));

    // Same identifier again: no second fetch
    assert_eq!(browser.show_details(&mut page, &route).await, None);
    assert_eq!(api.calls(), vec![Call::Read("do_42".into())]);

    let content = details(&page);
    assert_eq!(content.name, "Photosynthesis");
    assert_eq!(content.poster, "/posters/leaf.png");
    assert_eq!(content.description, "How plants make food");
    assert_eq!(content.tags, vec!["biology", "plants"]);
    assert!(!content.loading);
    assert_eq!(content.start_label, "Join Now/Start Course");
}

#[tokio::test]
async fn test_details_fallbacks_for_missing_fields() {
    let api = Arc::new(FakeApi::new().with_item(item("do_7", "Bare", "video/mp4")));
    let browser = Browser::new(api);
    let mut page = ContentDetailsPage::new(StalePolicy::Discard);

    browser
        .show_details(&mut page, &Route::ContentDetails("do_7".into()))
        .await;

    let content = details(&page);
    assert_eq!(content.poster, "/assets/images/default_hori.png");
    assert_eq!(content.description, "No description available");
    assert!(content.tags.is_empty());
}

#[tokio::test]
async fn test_details_failure_keeps_empty_page() {
    let browser = Browser::new(Arc::new(FakeApi::new().failing()));
    let mut page = ContentDetailsPage::new(StalePolicy::Discard);

    let completion = browser
        .show_details(&mut page, &Route::ContentDetails("do_7".into()))
        .await;

    assert_eq!(completion, Some(Completion::Failed));
    assert_eq!(page.state(), LoadState::Failure);
    let content = details(&page);
    assert_eq!(content.name, "");
    assert_eq!(content.description, "No description available");
}

#[tokio::test]
async fn test_non_details_route_shows_placeholder() {
    let browser = Browser::new(Arc::new(FakeApi::new()));
    let mut page = ContentDetailsPage::new(StalePolicy::Discard);

    assert_eq!(browser.show_details(&mut page, &Route::Home).await, None);
    assert_eq!(page.view(), DetailsView::Placeholder("Loading..."));
}

#[tokio::test]
async fn test_start_and_back_routes() {
    let api = FakeApi::new().with_item(item("do 1", "Spaced", "application/pdf"));
    let browser = Browser::new(Arc::new(api));
    let mut page = ContentDetailsPage::new(StalePolicy::Discard);

    browser
        .show_details(&mut page, &Route::ContentDetails("do 1".into()))
        .await;

    let start = page.start().unwrap();
    assert_eq!(start, Route::Start("do 1".into()));
    assert_eq!(start.path(), "/details/do%201");
    assert_eq!(page.back(), Route::Back);
}

#[tokio::test]
async fn test_logout_from_details_page() {
    let tokens = Session::new("token", Some("refresh".into()));
    let store = Arc::new(MemorySessionStore::new(tokens));
    let mut session = SessionContext::load(store.clone(), "https://auth.example.org/login")
        .await
        .unwrap();
    let page = ContentDetailsPage::new(StalePolicy::Discard);

    let route = page.logout(&mut session).await.unwrap();

    assert_eq!(
        route,
        Route::External("https://auth.example.org/login".into())
    );
    assert!(!store.snapshot().is_authenticated());
    assert_eq!(store.snapshot().refresh_token, None);
}

#[tokio::test]
async fn test_filter_options_from_framework() {
    let framework = FrameworkFilter(json!({
        "categories": [
            {
                "code": "subject",
                "terms": [{"name": "Physics"}, {"name": "Physics"}, {"name": "Chemistry"}]
            },
            {"code": "gradeLevel", "terms": [{"name": "Class 5"}]}
        ]
    }));
    let api = Arc::new(FakeApi::new().with_framework(framework));
    let browser = Browser::new(api.clone());

    let options = browser.filter_options(Some("pos-framework")).await;

    assert_eq!(options.get("subject").unwrap(), ["Physics", "Chemistry"]);
    assert_eq!(options.get("gradeLevel").unwrap(), ["Class 5"]);
    assert!(options.get("contentType").is_some());
    assert_eq!(api.calls(), vec![Call::Framework("pos-framework".into())]);
}

#[tokio::test]
async fn test_filter_options_fall_back_to_defaults() {
    let api = Arc::new(FakeApi::new().failing());
    let browser = Browser::new(api.clone());

    let defaults = FilterOptions::default();

    assert_eq!(browser.filter_options(None).await, defaults);
    assert!(api.calls().is_empty());

    assert_eq!(browser.filter_options(Some("missing")).await, defaults);
    assert_eq!(api.calls().len(), 1);
}
