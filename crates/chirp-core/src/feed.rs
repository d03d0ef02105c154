//! Incremental feed loading.
//!
//! [`FeedController`] presents an ever-growing, duplicate-free sequence of
//! posts pulled page by page from a [`PageSource`]. It is driven from two
//! directions: the view calls [`FeedController::load_first_page`] once the
//! session has resolved, and reports sentinel visibility through
//! [`FeedController::on_sentinel_visible`] to pull further pages.
//!
//! ```text
//! Idle ──► Loading ──► Ready ──► LoadingMore ──► Ready
//!                        │                  └──► Exhausted
//!                        └──────────────────────► Exhausted
//! ```
//!
//! Page loads are serialized by rejection: a load requested while another is
//! in flight returns [`LoadOutcome::Skipped`] without touching the network.
//! State is only mutated under a lock that is never held across an await,
//! and every completion is checked against a generation counter so results
//! that arrive after a reset are dropped.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};

use crate::Result;
use crate::model::{Post, SessionState};
use crate::traits::PageSource;
use crate::types::{PostId, UserId};

/// Loading phase of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing loaded yet.
    Idle,
    /// First page in flight.
    Loading,
    /// At least one page loaded and more are available.
    Ready,
    /// A further page is in flight.
    LoadingMore,
    /// The backend reported no continuation. Terminal until reset.
    Exhausted,
}

/// What a load call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and merged.
    Loaded {
        /// Page number that was fetched.
        page: u32,
        /// Number of new posts merged into the sequence.
        added: usize,
    },
    /// No request was issued.
    Skipped(SkipReason),
    /// The page arrived after a reset and was dropped.
    Discarded,
}

/// Why a load call issued no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The session has not resolved yet.
    SessionResolving,
    /// Another page load is in flight.
    InFlight,
    /// The first page has not loaded yet.
    NotReady,
    /// No further pages exist.
    Exhausted,
    /// The feed was closed.
    Closed,
}

#[derive(Debug)]
struct FeedState {
    posts: Vec<Post>,
    phase: FeedPhase,
    /// Last page merged; 1 before anything is loaded.
    page: u32,
    generation: u64,
    /// Viewer the current contents were loaded for; `None` until bound.
    viewer: Option<Option<UserId>>,
    closed: bool,
}

impl FeedState {
    fn new() -> Self {
        Self {
            posts: Vec::new(),
            phase: FeedPhase::Idle,
            page: 1,
            generation: 0,
            viewer: None,
            closed: false,
        }
    }

    fn reset(&mut self) {
        self.posts.clear();
        self.phase = FeedPhase::Idle;
        self.page = 1;
        self.generation += 1;
    }

    fn phase_after(has_more: bool) -> FeedPhase {
        if has_more {
            FeedPhase::Ready
        } else {
            FeedPhase::Exhausted
        }
    }

    /// Appends `items` in order, skipping ids already present.
    fn append(&mut self, items: Vec<Post>) -> usize {
        let mut seen: HashSet<PostId> = self.posts.iter().map(|p| p.id).collect();
        let before = self.posts.len();
        self.posts.extend(items.into_iter().filter(|p| seen.insert(p.id)));
        self.posts.len() - before
    }
}

/// Paginated, append-only view over a [`PageSource`].
#[derive(Debug)]
pub struct FeedController<S> {
    source: S,
    state: Mutex<FeedState>,
}

impl<S: PageSource> FeedController<S> {
    /// Create an idle controller over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(FeedState::new()),
        }
    }

    /// Returns the underlying page source.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Binds the feed to the viewer in `session`.
    ///
    /// Returns true if the viewer differs from the one the contents were
    /// loaded for, in which case all pagination state was reset. Does nothing
    /// while the session is still resolving.
    pub fn observe_session(&self, session: &SessionState) -> bool {
        if !session.is_resolved() {
            return false;
        }
        let viewer = session.viewer_id();
        let mut state = self.state();
        match state.viewer {
            Some(current) if current == viewer => false,
            None => {
                state.viewer = Some(viewer);
                false
            }
            Some(_) => {
                debug!(viewer = ?viewer, "Viewer changed, resetting feed");
                state.reset();
                state.viewer = Some(viewer);
                true
            }
        }
    }

    /// Load page 1, replacing the current contents.
    ///
    /// Skipped while `session` is resolving or while another load is in
    /// flight. On failure the previous phase is restored and the error is
    /// returned.
    #[instrument(skip(self, session))]
    pub async fn load_first_page(&self, session: &SessionState) -> Result<LoadOutcome> {
        if !session.is_resolved() {
            debug!("Session not resolved, deferring feed load");
            return Ok(LoadOutcome::Skipped(SkipReason::SessionResolving));
        }
        self.observe_session(session);

        let (generation, previous) = {
            let mut state = self.state();
            if state.closed {
                return Ok(LoadOutcome::Skipped(SkipReason::Closed));
            }
            if matches!(state.phase, FeedPhase::Loading | FeedPhase::LoadingMore) {
                return Ok(LoadOutcome::Skipped(SkipReason::InFlight));
            }
            let previous = state.phase;
            state.phase = FeedPhase::Loading;
            (state.generation, previous)
        };

        debug!("Loading first feed page");
        let result = self.source.fetch_page(1).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!("Feed reset while loading, dropping first page");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let has_more = page.has_more();
                state.posts.clear();
                let added = state.append(page.items);
                state.page = 1;
                state.phase = FeedState::phase_after(has_more);
                debug!(added, has_more, "First feed page loaded");
                Ok(LoadOutcome::Loaded { page: 1, added })
            }
            Err(err) => {
                state.phase = previous;
                Err(err)
            }
        }
    }

    /// Load the page after the last one merged.
    ///
    /// A no-op unless the feed is `Ready`: in particular it never issues a
    /// request while another page is in flight, after the feed is exhausted,
    /// or before the first page has loaded.
    #[instrument(skip(self))]
    pub async fn load_next_page(&self) -> Result<LoadOutcome> {
        let (generation, next) = {
            let mut state = self.state();
            if state.closed {
                return Ok(LoadOutcome::Skipped(SkipReason::Closed));
            }
            match state.phase {
                FeedPhase::Ready => {}
                FeedPhase::Loading | FeedPhase::LoadingMore => {
                    return Ok(LoadOutcome::Skipped(SkipReason::InFlight));
                }
                FeedPhase::Exhausted => {
                    return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
                }
                FeedPhase::Idle => return Ok(LoadOutcome::Skipped(SkipReason::NotReady)),
            }
            state.phase = FeedPhase::LoadingMore;
            (state.generation, state.page + 1)
        };

        debug!(page = next, "Loading next feed page");
        let result = self.source.fetch_page(next).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!(page = next, "Feed reset while loading, dropping page");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let has_more = page.has_more();
                let added = state.append(page.items);
                state.page = next;
                state.phase = FeedState::phase_after(has_more);
                debug!(page = next, added, has_more, "Feed page loaded");
                Ok(LoadOutcome::Loaded { page: next, added })
            }
            Err(err) => {
                state.phase = FeedPhase::Ready;
                Err(err)
            }
        }
    }

    /// Visibility signal from the view: the end-of-list sentinel is on screen.
    pub async fn on_sentinel_visible(&self) -> Result<LoadOutcome> {
        self.load_next_page().await
    }

    /// Prepend a post the viewer just created.
    ///
    /// Any existing copy with the same id is removed first.
    pub fn insert_local(&self, post: Post) {
        let mut state = self.state();
        state.posts.retain(|p| p.id != post.id);
        state.posts.insert(0, post);
    }

    /// Replace the post with the same id. Returns false if it is not present.
    pub fn apply_update(&self, post: Post) -> bool {
        let mut state = self.state();
        match state.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post;
                true
            }
            None => false,
        }
    }

    /// Empty the feed and return it to `Idle` with the cursor at page 1.
    ///
    /// Any page still in flight is dropped when it arrives.
    pub fn reset(&self) {
        self.state().reset();
    }

    /// Stop the feed for good, e.g. when its view goes away. In-flight
    /// results are dropped and further loads are skipped.
    pub fn close(&self) {
        let mut state = self.state();
        state.reset();
        state.closed = true;
    }

    /// Snapshot of the merged sequence.
    pub fn posts(&self) -> Vec<Post> {
        self.state().posts.clone()
    }

    /// Number of posts merged so far.
    pub fn len(&self) -> usize {
        self.state().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().posts.is_empty()
    }

    pub fn phase(&self) -> FeedPhase {
        self.state().phase
    }

    /// Last page merged (1 before anything is loaded).
    pub fn page(&self) -> u32 {
        self.state().page
    }

    /// Returns false once the backend has reported the last page.
    pub fn has_more(&self) -> bool {
        self.state().phase != FeedPhase::Exhausted
    }
}
