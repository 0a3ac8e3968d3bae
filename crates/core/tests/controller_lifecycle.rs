//! Search controller lifecycle integration tests.
//!
//! These tests exercise the debounce/de-duplication/cancellation pipeline
//! end to end against a mock feed client. They run under a paused tokio
//! clock, so the 300 ms debounce window elapses deterministically and
//! "slow" backend responses are simulated without real waiting.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use photofeed_core::testing::{fixtures, MockFeedClient};
use photofeed_core::{FeedClient, SearchController, SearchError, SearchState};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn controller_over(client: &Arc<MockFeedClient>) -> SearchController {
    SearchController::new(Arc::clone(client) as Arc<dyn FeedClient>, DEBOUNCE)
}

/// Wait until the published state satisfies `pred`, returning it.
///
/// Loops over `changed()` so intermediate transitions the watch channel
/// coalesces are not a problem. The timeout fails fast under the paused
/// clock instead of hanging a broken test.
async fn wait_for<F>(rx: &mut watch::Receiver<SearchState>, pred: F) -> SearchState
where
    F: Fn(&SearchState) -> bool,
{
    timeout(Duration::from_secs(5), async {
        loop {
            let current = rx.borrow_and_update().clone();
            if pred(&current) {
                return current;
            }
            rx.changed().await.expect("controller driver stopped");
        }
    })
    .await
    .expect("timed out waiting for state")
}

#[tokio::test(start_paused = true)]
async fn starts_idle_with_empty_projections() {
    let client = Arc::new(MockFeedClient::new());
    let controller = controller_over(&client);

    assert_eq!(controller.current_state(), SearchState::Idle);
    assert!(controller.items().is_empty());
    assert!(!controller.is_loading());
    assert!(controller.current_error().is_none());
    assert_eq!(client.search_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn burst_within_debounce_window_fetches_only_last_query() {
    let client = Arc::new(MockFeedClient::new());
    client
        .set_items(vec![fixtures::feed_item(
            "Good dog",
            "https://www.flickr.com/photos/a/1/",
        )])
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("c");
    controller.submit_query("ca");
    controller.submit_query("cats");
    controller.submit_query("dogs");

    let loaded = wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;
    assert_eq!(loaded.items().len(), 1);

    let queries = client.recorded_queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].query, "dogs");
}

#[tokio::test(start_paused = true)]
async fn identical_consecutive_queries_fetch_once() {
    let client = Arc::new(MockFeedClient::new());
    client
        .set_items(vec![fixtures::feed_item(
            "Sleepy cat",
            "https://www.flickr.com/photos/a/1/",
        )])
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;

    // Same text again, after the first one settled.
    controller.submit_query("cats");
    tokio::time::sleep(DEBOUNCE * 3).await;

    assert_eq!(client.search_count().await, 1);
    assert!(matches!(
        controller.current_state(),
        SearchState::Loaded(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn dedup_resets_after_intervening_value() {
    let client = Arc::new(MockFeedClient::new());
    client
        .set_items(vec![fixtures::feed_item(
            "Sleepy cat",
            "https://www.flickr.com/photos/a/1/",
        )])
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;

    controller.submit_query("");
    wait_for(&mut states, |s| *s == SearchState::Idle).await;

    // "cats" is no longer the previous forwarded value, so it fetches again.
    controller.submit_query("cats");
    wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;

    let queries = client.recorded_queries().await;
    assert_eq!(queries.len(), 2);
    assert!(queries.iter().all(|q| q.query == "cats"));
}

#[tokio::test(start_paused = true)]
async fn empty_query_collapses_to_idle_and_cancels_fetch() {
    let client = Arc::new(MockFeedClient::new());
    client
        .set_items(vec![fixtures::feed_item(
            "Sleepy cat",
            "https://www.flickr.com/photos/a/1/",
        )])
        .await;
    client.set_response_delay(Duration::from_millis(500)).await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    wait_for(&mut states, |s| *s == SearchState::Loading).await;

    // Clear while the fetch is still sleeping in the mock backend.
    controller.submit_query("");
    wait_for(&mut states, |s| *s == SearchState::Idle).await;

    // Long past the point the cats fetch would have settled.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.current_state(), SearchState::Idle);

    // The cats fetch started exactly once and nothing else did.
    assert_eq!(client.search_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn empty_query_clears_failed_state() {
    let client = Arc::new(MockFeedClient::new());
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    // No items configured: the fetch settles as EmptyResults.
    controller.submit_query("cats");
    wait_for(&mut states, |s| matches!(s, SearchState::Failed(_))).await;

    controller.submit_query("");
    let state = wait_for(&mut states, |s| *s == SearchState::Idle).await;
    assert_eq!(state, SearchState::Idle);
    assert!(controller.current_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn superseding_query_cancels_previous_fetch() {
    let client = Arc::new(MockFeedClient::new());
    client.set_response_delay(Duration::from_millis(500)).await;
    client
        .set_query_handler(|query| {
            let link = format!("https://www.flickr.com/photos/a/{}/", query);
            Some(vec![fixtures::feed_item(query, &link)])
        })
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    wait_for(&mut states, |s| *s == SearchState::Loading).await;

    // Supersede while the cats fetch is mid-response.
    controller.submit_query("dogs");
    let loaded = wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;
    assert_eq!(loaded.items()[0].title, "dogs");

    // Both fetches started, only the later one published.
    let queries = client.recorded_queries().await;
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].query, "cats");
    assert_eq!(queries[1].query, "dogs");

    // The cancelled cats fetch never resurfaces.
    tokio::time::sleep(Duration::from_secs(2)).await;
    let settled = controller.current_state();
    assert_eq!(settled.items()[0].title, "dogs");
}

#[tokio::test(start_paused = true)]
async fn stale_completion_never_overrides_later_query() {
    let client = Arc::new(MockFeedClient::new());
    // The response delay equals the debounce window, so a cats completion
    // and the dogs forwarding land in the same instant: whichever way the
    // driver polls them, the cats outcome must not survive past dogs.
    client.set_response_delay(DEBOUNCE).await;
    client
        .set_query_handler(|query| {
            if query == "cats" {
                // cats settles as a failure (zero items).
                Some(Vec::new())
            } else {
                let link = format!("https://www.flickr.com/photos/a/{}/", query);
                Some(vec![fixtures::feed_item(query, &link)])
            }
        })
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    wait_for(&mut states, |s| *s == SearchState::Loading).await;

    controller.submit_query("dogs");
    let loaded = wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;
    assert_eq!(loaded.items()[0].title, "dogs");

    // Nothing from the cats fetch may arrive afterwards.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.current_state(), loaded);
    assert!(controller.current_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn zero_items_map_to_empty_results_failure() {
    let client = Arc::new(MockFeedClient::new());
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    let failed = wait_for(&mut states, |s| matches!(s, SearchState::Failed(_))).await;

    assert_eq!(failed, SearchState::Failed(SearchError::EmptyResults));
    assert_eq!(controller.current_error(), Some(SearchError::EmptyResults));
    assert!(controller.items().is_empty());
}

#[tokio::test(start_paused = true)]
async fn transport_error_maps_to_failed_network() {
    let client = Arc::new(MockFeedClient::new());
    client
        .set_next_error(SearchError::Network("connection reset".into()))
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    let failed = wait_for(&mut states, |s| matches!(s, SearchState::Failed(_))).await;

    let err = failed.error().cloned().expect("failed state carries error");
    assert_eq!(err, SearchError::Network("connection reset".into()));
    assert_eq!(
        err.recovery_suggestion(),
        "Check your internet connection and try again"
    );
}

#[tokio::test(start_paused = true)]
async fn states_progress_loading_then_terminal() {
    let client = Arc::new(MockFeedClient::new());
    client.set_response_delay(Duration::from_millis(100)).await;
    client
        .set_items(vec![fixtures::feed_item(
            "Sleepy cat",
            "https://www.flickr.com/photos/a/1/",
        )])
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");

    // The delayed response keeps Loading observable before the terminal
    // state lands.
    let first = wait_for(&mut states, |s| *s != SearchState::Idle).await;
    assert_eq!(first, SearchState::Loading);
    assert!(controller.is_loading());

    let second = wait_for(&mut states, |s| *s != SearchState::Loading).await;
    assert!(matches!(second, SearchState::Loaded(_)));
    assert_eq!(controller.items().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn retry_is_a_new_submission() {
    let client = Arc::new(MockFeedClient::new());
    client
        .set_items(vec![fixtures::feed_item(
            "Sleepy cat",
            "https://www.flickr.com/photos/a/1/",
        )])
        .await;
    client
        .set_next_error(SearchError::Network("flaky".into()))
        .await;
    let controller = controller_over(&client);
    let mut states = controller.subscribe();

    controller.submit_query("cats");
    wait_for(&mut states, |s| matches!(s, SearchState::Failed(_))).await;

    // No automatic retry: the failed state sits until a new submission.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(matches!(
        controller.current_state(),
        SearchState::Failed(_)
    ));
    assert_eq!(client.search_count().await, 1);

    // The UI retries by clearing and re-submitting the same text.
    controller.submit_query("");
    wait_for(&mut states, |s| *s == SearchState::Idle).await;
    controller.submit_query("cats");
    wait_for(&mut states, |s| matches!(s, SearchState::Loaded(_))).await;
    assert_eq!(client.search_count().await, 2);
}
