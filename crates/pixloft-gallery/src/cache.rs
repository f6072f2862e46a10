//! Local gallery cache.
//!
//! Persists the last known item list per owner as a small JSON file so the
//! gallery can render something immediately on startup while the first page
//! loads. The cache is advisory: a missing, unreadable, or corrupt file
//! simply yields an empty cache, and a cached list for a different owner is
//! discarded rather than shown.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pixloft_core::error::AppError;
use pixloft_core::models::MediaItem;

use crate::pagination::MergePolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    owner_id: String,
    items: Vec<MediaItem>,
}

/// On-disk snapshot of the visible gallery for one owner.
#[derive(Debug, Clone)]
pub struct GalleryCache {
    path: PathBuf,
    owner_id: String,
    items: Vec<MediaItem>,
}

impl GalleryCache {
    /// Load the cache for `owner_id` from `path`.
    ///
    /// Never fails: anything that prevents reading a snapshot for this
    /// owner (no file yet, unreadable file, malformed JSON, snapshot
    /// belonging to someone else) produces an empty cache.
    pub fn open(path: impl Into<PathBuf>, owner_id: impl Into<String>) -> Self {
        let path = path.into();
        let owner_id = owner_id.into();
        let items = read_snapshot(&path)
            .filter(|file| file.owner_id == owner_id)
            .map(|file| file.items)
            .unwrap_or_default();
        Self {
            path,
            owner_id,
            items,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merge freshly fetched items into the cached list, keeping the
    /// first-seen entry for every id. `Append` puts fresh items behind the
    /// cached ones (page loads), `Prepend` ahead of them (new uploads).
    pub fn merge(&mut self, incoming: Vec<MediaItem>, policy: MergePolicy) {
        let current = std::mem::take(&mut self.items);
        self.items = match policy {
            MergePolicy::Append => merge_by_id(current, incoming),
            MergePolicy::Prepend => {
                let seen: std::collections::HashSet<String> =
                    current.iter().map(|item| item.id.clone()).collect();
                let mut merged: Vec<MediaItem> = incoming
                    .into_iter()
                    .filter(|item| !seen.contains(&item.id))
                    .collect();
                merged.extend(current);
                merged
            }
        };
    }

    /// Replace the cached list wholesale.
    pub fn replace(&mut self, items: Vec<MediaItem>) {
        self.items = items;
    }

    /// Switch the cache to another owner, discarding any cached items that
    /// belonged to the previous one.
    pub fn invalidate_for(&mut self, owner_id: impl Into<String>) {
        let owner_id = owner_id.into();
        if owner_id != self.owner_id {
            self.owner_id = owner_id;
            self.items.clear();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Write the snapshot back to disk, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = CacheFile {
            owner_id: self.owner_id.clone(),
            items: self.items.clone(),
        };
        let payload = serde_json::to_vec_pretty(&file)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

fn read_snapshot(path: &Path) -> Option<CacheFile> {
    let raw = fs::read(path).ok()?;
    serde_json::from_slice(&raw).ok()
}

/// Merge two item lists by id. `existing` keeps its order; entries of
/// `incoming` whose id was already present are dropped, the rest are
/// appended in incoming order.
pub fn merge_by_id(existing: Vec<MediaItem>, incoming: Vec<MediaItem>) -> Vec<MediaItem> {
    let mut merged = existing;
    let seen: std::collections::HashSet<String> =
        merged.iter().map(|item| item.id.clone()).collect();
    for item in incoming {
        if !seen.contains(&item.id) {
            merged.push(item);
        }
    }
    merged
}
