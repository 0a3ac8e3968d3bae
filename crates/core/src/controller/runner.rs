//! Search controller implementation.
//!
//! A single driver task owns the whole pipeline: raw input arrives over an
//! unbounded channel, sits in a debounce window that restarts on every
//! keystroke, and is forwarded once the window elapses. Forwarded values
//! are de-duplicated against the previous forwarded value, bump a
//! generation token, and abort the fetch they supersede. Fetch completions
//! come back tagged with their token; a completion whose token no longer
//! matches the latest generation is discarded, so a superseded fetch can
//! never overwrite state produced by a later one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::feed::{FeedClient, FeedItem, SearchError};

use super::SearchState;

/// Default debounce interval applied to raw query input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type FetchOutcome = Result<Vec<FeedItem>, SearchError>;

/// Debounced, cancellable search over a [`FeedClient`].
///
/// All state writes happen on the driver task; the controller handle only
/// enqueues input and reads the published state.
pub struct SearchController {
    query_tx: mpsc::UnboundedSender<String>,
    state_rx: watch::Receiver<SearchState>,
    driver: JoinHandle<()>,
}

impl SearchController {
    /// Spawn a controller over `client` with the given debounce interval.
    pub fn new(client: Arc<dyn FeedClient>, debounce: Duration) -> Self {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::Idle);
        let driver = tokio::spawn(drive(client, debounce, query_rx, state_tx));

        Self {
            query_tx,
            state_rx,
            driver,
        }
    }

    /// Spawn a controller using the configured debounce interval.
    pub fn from_config(client: Arc<dyn FeedClient>, config: &SearchConfig) -> Self {
        Self::new(client, config.debounce())
    }

    /// Enqueue a raw query. Never blocks; scheduling is the only side
    /// effect, the work happens on the driver task.
    pub fn submit_query(&self, text: impl Into<String>) {
        // Send only fails once the driver has stopped; dropping the query
        // is fine then.
        let _ = self.query_tx.send(text.into());
    }

    /// Latest published state.
    pub fn current_state(&self) -> SearchState {
        self.state_rx.borrow().clone()
    }

    /// Observe state transitions.
    ///
    /// The receiver always holds the latest published state and wakes
    /// `changed()` on every transition.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_rx.clone()
    }

    /// Items of the latest `Loaded` state, empty otherwise.
    pub fn items(&self) -> Vec<FeedItem> {
        self.state_rx.borrow().items().to_vec()
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(*self.state_rx.borrow(), SearchState::Loading)
    }

    /// Error of the latest `Failed` state, if any.
    pub fn current_error(&self) -> Option<SearchError> {
        self.state_rx.borrow().error().cloned()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Raw input waiting out its debounce window.
struct PendingInput {
    text: String,
    deadline: Instant,
}

async fn drive(
    client: Arc<dyn FeedClient>,
    debounce: Duration,
    mut query_rx: mpsc::UnboundedReceiver<String>,
    state_tx: watch::Sender<SearchState>,
) {
    // Completions come back over this channel tagged with the generation
    // they were issued under. The driver keeps one sender alive so recv
    // never settles to None.
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, FetchOutcome)>();

    let mut pending: Option<PendingInput> = None;
    let mut last_forwarded: Option<String> = None;
    let mut generation: u64 = 0;
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        let deadline = pending.as_ref().map(|p| p.deadline);

        tokio::select! {
            raw = query_rx.recv() => match raw {
                Some(text) => {
                    // Restart the debounce window on every raw input.
                    pending = Some(PendingInput {
                        text,
                        deadline: Instant::now() + debounce,
                    });
                }
                None => break,
            },

            _ = sleep_until_deadline(deadline), if deadline.is_some() => {
                let Some(input) = pending.take() else { continue };

                if last_forwarded.as_deref() == Some(input.text.as_str()) {
                    debug!(query = %input.text, "dropping duplicate query");
                    continue;
                }
                last_forwarded = Some(input.text.clone());

                // Supersede: anything still in flight belongs to an older
                // effective query now.
                generation += 1;
                if let Some(handle) = in_flight.take() {
                    handle.abort();
                }

                if input.text.is_empty() {
                    let _ = state_tx.send(SearchState::Idle);
                } else {
                    let _ = state_tx.send(SearchState::Loading);
                    in_flight = Some(tokio::spawn(fetch(
                        Arc::clone(&client),
                        input.text,
                        generation,
                        done_tx.clone(),
                    )));
                }
            }

            Some((issued, outcome)) = done_rx.recv() => {
                if issued != generation {
                    debug!(
                        issued_generation = issued,
                        current_generation = generation,
                        "discarding stale fetch completion"
                    );
                    continue;
                }
                in_flight = None;

                let next = match outcome {
                    Ok(items) => SearchState::Loaded(items),
                    Err(err) => SearchState::Failed(err),
                };
                let _ = state_tx.send(next);
            }
        }
    }

    // Controller handle is gone; nothing may publish after this point.
    if let Some(handle) = in_flight.take() {
        handle.abort();
    }
}

/// Sleep until the debounce deadline. The select branch is disabled when
/// no input is pending.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

async fn fetch(
    client: Arc<dyn FeedClient>,
    query: String,
    generation: u64,
    done_tx: mpsc::UnboundedSender<(u64, FetchOutcome)>,
) {
    debug!(backend = client.name(), query = %query, "starting fetch");

    let outcome = match client.search(&query).await {
        // Zero items is a user-facing failure, not a valid empty result.
        Ok(page) if page.items.is_empty() => Err(SearchError::EmptyResults),
        Ok(page) => Ok(page.items),
        Err(err) => {
            warn!(backend = client.name(), query = %query, error = %err, "fetch failed");
            Err(err)
        }
    };

    let _ = done_tx.send((generation, outcome));
}
