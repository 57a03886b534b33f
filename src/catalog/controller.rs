//! Paginated collection controller.
//!
//! Owns the pagination cursor and the materialized ordered collection for
//! one list screen. `load_next_page` is the single entry point: it is a
//! no-op unless the controller is idle with pages remaining, so at most one
//! page fetch is ever outstanding per instance and merges never race. Fetch
//! work runs on a spawned task holding only a weak back-reference, so a
//! torn-down controller is never mutated after the fact.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{FetchResult, NetworkError};
use crate::models::{PageResponse, Title};

use super::client::CatalogClient;

/// Receives ordered-collection updates and fetch failures.
///
/// Invoked only from the controller's fetch-completion context, after state
/// mutation has finished. The sink is never consulted for correctness.
pub trait CollectionSink: Send + Sync {
    /// A new snapshot of the full ordered collection is available.
    fn on_collection_updated(&self, items: &[Title]);

    /// A page fetch failed. Cancellations are absorbed and never reported.
    fn on_fetch_failed(&self, error: &NetworkError);
}

/// Pagination cursor state, observable for rendering decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// The next page the controller will request (1-based, only increases)
    pub next_page: u32,
    /// Total pages reported by the most recent response
    pub total_pages: u32,
    /// Whether a page fetch is currently outstanding
    pub is_loading: bool,
}

struct ControllerState {
    next_page: u32,
    total_pages: u32,
    is_loading: bool,
    items: Vec<Title>,
    /// Handle of the outstanding fetch task, held until it completes or is
    /// superseded
    task: Option<JoinHandle<()>>,
    /// Identifies the fetch currently entitled to apply its result
    generation: u64,
}

/// Controller for one paginated list.
///
/// The scroll-side caller invokes [`load_next_page`](Self::load_next_page)
/// whenever its near-end threshold is crossed; the controller is the sole
/// arbiter of eligibility (idle vs loading vs exhausted).
///
/// # Example
///
/// ```ignore
/// use marquee::catalog::{CatalogClient, PageController};
///
/// let controller = PageController::new(client, sink);
/// controller.load_next_page(); // fetches page 1, then notifies the sink
/// ```
pub struct PageController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    client: CatalogClient,
    sink: Arc<dyn CollectionSink>,
    state: Mutex<ControllerState>,
}

impl PageController {
    /// Create a controller starting at page 1.
    pub fn new(client: CatalogClient, sink: Arc<dyn CollectionSink>) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                client,
                sink,
                state: Mutex::new(ControllerState {
                    next_page: 1,
                    total_pages: 1,
                    is_loading: false,
                    items: Vec::new(),
                    task: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Request the next page, if eligible.
    ///
    /// Returns `true` when a fetch was started; `false` when the call was a
    /// no-op because a fetch is already outstanding or the feed is
    /// exhausted. Must be called from within a tokio runtime.
    pub fn load_next_page(&self) -> bool {
        let (page, generation) = {
            let mut state = self.inner.state.lock().unwrap();
            if state.is_loading {
                debug!("load_next_page ignored: fetch already outstanding");
                return false;
            }
            if state.next_page > state.total_pages {
                debug!(
                    next_page = state.next_page,
                    total_pages = state.total_pages,
                    "load_next_page ignored: feed exhausted"
                );
                return false;
            }
            // A handle can linger here if a prior fetch was superseded
            // between its completion check and ours
            if let Some(stale) = state.task.take() {
                stale.abort();
            }
            state.is_loading = true;
            state.generation += 1;
            (state.next_page, state.generation)
        };

        let client = self.inner.client.clone();
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let result = client.fetch_popular(page).await;
            // Upgrade only at completion: the fetch must not keep a
            // dismissed controller alive, and a failed upgrade means there
            // is no state left to mutate
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.apply_fetch_result(generation, page, result);
        });

        self.inner.state.lock().unwrap().task = Some(handle);
        true
    }

    /// Whether more pages remain in the feed.
    pub fn has_more(&self) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.next_page <= state.total_pages
    }

    /// Whether a page fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().unwrap().is_loading
    }

    /// The current pagination cursor state.
    pub fn page_state(&self) -> PageState {
        let state = self.inner.state.lock().unwrap();
        PageState {
            next_page: state.next_page,
            total_pages: state.total_pages,
            is_loading: state.is_loading,
        }
    }

    /// A snapshot of the materialized ordered collection.
    pub fn items(&self) -> Vec<Title> {
        self.inner.state.lock().unwrap().items.clone()
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        if let Some(task) = self.inner.state.lock().unwrap().task.take() {
            task.abort();
        }
    }
}

impl ControllerInner {
    fn apply_fetch_result(
        &self,
        generation: u64,
        page: u32,
        result: FetchResult<PageResponse>,
    ) {
        match result {
            Ok(response) => {
                let snapshot = {
                    let mut state = self.state.lock().unwrap();
                    if state.generation != generation {
                        return;
                    }
                    // The cursor never moves backwards, even if the server
                    // answers with an earlier page than requested
                    state.next_page = state.next_page.max(response.page + 1);
                    state.total_pages = response.total_pages.max(1);

                    let existing: HashSet<i64> = state.items.iter().map(|t| t.id).collect();
                    let incoming = response.results.len();
                    let fresh: Vec<Title> = response
                        .results
                        .into_iter()
                        .filter(|t| !existing.contains(&t.id))
                        .collect();
                    if fresh.len() < incoming {
                        debug!(
                            page,
                            dropped = incoming - fresh.len(),
                            "filtered items already present in the collection"
                        );
                    }
                    state.items.extend(fresh);
                    state.is_loading = false;
                    state.task = None;
                    state.items.clone()
                };
                self.sink.on_collection_updated(&snapshot);
            }
            Err(NetworkError::Cancelled) => {
                // Absorbed: never reported to the sink, state untouched
                // apart from releasing the loading gate
                let mut state = self.state.lock().unwrap();
                if state.generation != generation {
                    return;
                }
                state.is_loading = false;
                state.task = None;
            }
            Err(err) => {
                {
                    let mut state = self.state.lock().unwrap();
                    if state.generation != generation {
                        return;
                    }
                    state.is_loading = false;
                    state.task = None;
                }
                warn!(page, code = err.error_code(), error = %err, "page fetch failed");
                self.sink.on_fetch_failed(&err);
            }
        }
    }
}
