//! Gallery pagination controller.
//!
//! A small state machine over Idle, Loading, and Exhausted that owns the
//! visible item list. Page loads are two-phase: `begin_page` hands out the
//! cursor to fetch (and is the debounce guard: it returns `None` while a
//! fetch is in flight or after exhaustion), `complete_page` merges the
//! result. Each reset bumps an epoch so a fetch that completes after the
//! consumer moved on cannot touch current state.

use std::collections::HashSet;

use pixloft_core::models::{MediaItem, PageCursor};

/// Pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryState {
    Idle,
    Loading,
    Exhausted,
}

/// Where freshly arriving items land relative to the existing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    Prepend,
    Append,
}

/// A page fetch the controller has agreed to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub epoch: u64,
    pub cursor: PageCursor,
}

/// Result of one page fetch, as delivered back to the controller.
#[derive(Debug)]
pub enum PageOutcome {
    Loaded(Vec<MediaItem>),
    Failed,
}

/// What `complete_page` did with a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Page merged; `exhausted` reports whether this was the final page.
    Merged { added: usize, exhausted: bool },
    /// The fetch failed; the visible list was cleared.
    Cleared,
    /// The delivery belonged to a superseded epoch and was discarded.
    Stale,
}

/// Controller for incremental gallery loading.
#[derive(Debug, Clone)]
pub struct GalleryController {
    owner_id: String,
    limit: usize,
    offset: usize,
    state: GalleryState,
    epoch: u64,
    items: Vec<MediaItem>,
    seen: HashSet<String>,
}

impl GalleryController {
    pub fn new(owner_id: impl Into<String>, limit: usize) -> Self {
        Self {
            owner_id: owner_id.into(),
            limit,
            offset: 0,
            state: GalleryState::Idle,
            epoch: 0,
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn state(&self) -> GalleryState {
        self.state
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Ask to load the next page.
    ///
    /// Returns the cursor to fetch when the controller is Idle; returns
    /// `None` while Loading or after Exhausted, which is what debounces
    /// repeated visibility triggers.
    pub fn begin_page(&mut self) -> Option<PageRequest> {
        match self.state {
            GalleryState::Idle => {
                self.state = GalleryState::Loading;
                Some(PageRequest {
                    epoch: self.epoch,
                    cursor: PageCursor {
                        owner_id: self.owner_id.clone(),
                        limit: self.limit,
                        offset: self.offset,
                    },
                })
            }
            GalleryState::Loading | GalleryState::Exhausted => None,
        }
    }

    /// Deliver the outcome of a fetch started by `begin_page`.
    ///
    /// On success the page is merged (dedup by id, first-seen order), the
    /// offset advances by one limit, and a short page makes exhaustion
    /// permanent. On failure the list is cleared and the controller returns
    /// to Idle; nothing is retried automatically.
    pub fn complete_page(&mut self, epoch: u64, outcome: PageOutcome) -> Completion {
        if epoch != self.epoch || self.state != GalleryState::Loading {
            return Completion::Stale;
        }

        match outcome {
            PageOutcome::Loaded(page) => {
                let exhausted = page.len() < self.limit;
                let added = self.append_new(page);
                self.offset += self.limit;
                self.state = if exhausted {
                    GalleryState::Exhausted
                } else {
                    GalleryState::Idle
                };
                Completion::Merged { added, exhausted }
            }
            PageOutcome::Failed => {
                self.items.clear();
                self.seen.clear();
                self.state = GalleryState::Idle;
                Completion::Cleared
            }
        }
    }

    /// Feed a freshly uploaded item into the visible list without a reload.
    /// Duplicates are ignored; the first-seen entry keeps its position.
    pub fn insert_new(&mut self, item: MediaItem, policy: MergePolicy) -> bool {
        if !self.seen.insert(item.id.clone()) {
            return false;
        }
        match policy {
            MergePolicy::Prepend => self.items.insert(0, item),
            MergePolicy::Append => self.items.push(item),
        }
        true
    }

    /// Drop an item from the visible list after deletion.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.seen.remove(id) {
            return false;
        }
        self.items.retain(|item| item.id != id);
        true
    }

    /// Start over for (possibly) another owner: empty list, offset zero,
    /// exhaustion forgotten. In-flight fetches from before the reset are
    /// discarded when they complete.
    pub fn reset(&mut self, owner_id: impl Into<String>) {
        self.owner_id = owner_id.into();
        self.offset = 0;
        self.state = GalleryState::Idle;
        self.epoch += 1;
        self.items.clear();
        self.seen.clear();
    }

    fn append_new(&mut self, page: Vec<MediaItem>) -> usize {
        let mut added = 0;
        for item in page {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item);
                added += 1;
            }
        }
        added
    }
}
