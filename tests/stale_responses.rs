//! Stale Response Tests
//!
//! Two list fetches in flight at once, answered out of order. With the
//! default policy the superseded response is dropped; with
//! `LastWriteWins` the late response overwrites the newer one, which is
//! kept as a regression target for that mode.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{item, FakeApi, COLLECTION};
use shiksha::core::list_page::ListResponse;
use shiksha::core::{
    Browser, Completion, ContentDetailsPage, ContentListPage, ListEvent, Route, StalePolicy,
};
use shiksha::domain::Tab;
use tokio::sync::mpsc;

fn slow_courses_api() -> FakeApi {
    let courses = vec![item("do_course", "Course", COLLECTION)];
    let videos = vec![item("do_video", "Video", "video/mp4")];
    FakeApi::new()
        .with_search("Course", courses)
        .with_search("Learning Resource", videos)
        .with_search_delay("Course", Duration::from_millis(200))
}

/// Mount on Courses, switch to Content right away, and complete the page
/// in the order the responses arrive. Returns the completions in that order.
async fn race_tab_switch(page: &mut ContentListPage) -> Vec<Completion> {
    let browser = Browser::new(Arc::new(slow_courses_api()));
    let (tx, mut rx) = mpsc::channel::<ListResponse>(2);

    let first = page.handle(ListEvent::Mount).unwrap();
    let second = page.handle(ListEvent::SelectTab(Tab::Content)).unwrap();

    for ticket in [first, second] {
        let browser = browser.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = browser.fetch_list(ticket).await;
            let _ = tx.send(response).await;
        });
    }
    drop(tx);

    let mut completions = Vec::new();
    while let Some(response) = rx.recv().await {
        completions.push(page.complete(response));
    }
    completions
}

#[tokio::test]
async fn test_discard_keeps_results_of_active_tab() {
    let mut page = ContentListPage::new(None, StalePolicy::Discard);

    let completions = race_tab_switch(&mut page).await;

    assert_eq!(completions, [Completion::Applied, Completion::Discarded]);
    assert_eq!(page.tab(), Tab::Content);
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].identifier, "do_video");
}

#[tokio::test]
async fn test_last_write_wins_shows_previous_tab_results() {
    let mut page = ContentListPage::new(None, StalePolicy::LastWriteWins);

    let completions = race_tab_switch(&mut page).await;

    assert_eq!(completions, [Completion::Applied, Completion::Applied]);
    assert_eq!(page.tab(), Tab::Content);
    // The late Courses response overwrote the Content results
    assert_eq!(page.items()[0].identifier, "do_course");
}

#[tokio::test]
async fn test_details_ignores_response_for_previous_identifier() {
    let api = Arc::new(
        FakeApi::new()
            .with_item(item("do_a", "First", "application/pdf"))
            .with_item(item("do_b", "Second", "application/pdf")),
    );
    let browser = Browser::new(api);
    let mut page = ContentDetailsPage::new(StalePolicy::Discard);

    let first = page
        .navigate(&Route::ContentDetails("do_a".into()))
        .unwrap();
    let second = page
        .navigate(&Route::ContentDetails("do_b".into()))
        .unwrap();

    let late = browser.fetch_details(first).await;
    let current = browser.fetch_details(second).await;

    assert_eq!(page.complete(current), Completion::Applied);
    assert_eq!(page.complete(late), Completion::Discarded);
    assert_eq!(page.details().map(|d| d.identifier.as_str()), Some("do_b"));
}
