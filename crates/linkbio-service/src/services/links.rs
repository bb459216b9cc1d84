//! Link collection manager - pure local operations
//!
//! An ordered in-memory collection of one profile's links. Entries move
//! through Draft -> Active <-> Inactive -> Deleted; a draft becomes active
//! the moment it is inserted locally and is confirmed in place once the
//! store assigns a real id. All operations here are synchronous and free of
//! I/O; remote orchestration lives in the synchronizer.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use linkbio_core::entities::Link;
use linkbio_core::error::DomainError;
use linkbio_core::traits::LinkPatch;
use linkbio_core::value_objects::LinkKey;

use super::error::{ServiceError, ServiceResult};

/// Ordered local collection of one profile's links
#[derive(Debug, Clone)]
pub struct LinkCollection {
    items: Vec<Link>,
    profile_id: Uuid,
    next_draft_seq: u64,
}

impl LinkCollection {
    /// Create an empty collection for a profile
    pub fn new(profile_id: Uuid) -> Self {
        Self {
            items: Vec::new(),
            profile_id,
            next_draft_seq: 1,
        }
    }

    /// Replace the whole collection with freshly fetched rows
    pub fn replace_all(&mut self, links: Vec<Link>) {
        self.items = links;
    }

    /// The links in display order
    pub fn items(&self) -> &[Link] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn profile_id(&self) -> Uuid {
        self.profile_id
    }

    /// Look up an entry by key
    pub fn get(&self, key: &LinkKey) -> Option<&Link> {
        self.items.iter().find(|l| &l.key == key)
    }

    /// Insert a draft at the tail. Title and url are trimmed; empty values
    /// are rejected before any state changes.
    pub fn insert_draft(
        &mut self,
        title: &str,
        url: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> ServiceResult<LinkKey> {
        let title = title.trim();
        let url = url.trim();
        if title.is_empty() {
            return Err(DomainError::EmptyField { field: "title" }.into());
        }
        if url.is_empty() {
            return Err(DomainError::EmptyField { field: "url" }.into());
        }

        let seq = self.next_draft_seq;
        self.next_draft_seq += 1;

        let position = i32::try_from(self.items.len())
            .map_err(|_| ServiceError::validation("too many links"))?;
        let draft = Link::new_draft(
            seq,
            self.profile_id,
            title.to_string(),
            url.to_string(),
            scheduled_at,
            position,
        );
        let key = draft.key;
        self.items.push(draft);

        Ok(key)
    }

    /// Replace a confirmed draft in place, preserving its list position.
    ///
    /// Returns false if the draft is no longer present (it was removed while
    /// persistence was in flight); the caller owns the compensating delete.
    pub fn confirm_draft(&mut self, draft_key: &LinkKey, mut persisted: Link) -> bool {
        let Some(slot) = self.items.iter_mut().find(|l| &l.key == draft_key) else {
            return false;
        };
        // Keep the locally assigned position; the stored row may carry a
        // stale one if a reorder raced the insert.
        persisted.position = slot.position;
        *slot = persisted;
        true
    }

    /// Remove an entry unconditionally. Returns the removed link, if any.
    pub fn remove(&mut self, key: &LinkKey) -> Option<Link> {
        let index = self.items.iter().position(|l| &l.key == key)?;
        Some(self.items.remove(index))
    }

    /// Merge a field patch into an entry. Returns false for unknown keys.
    pub fn merge_update(&mut self, key: &LinkKey, patch: &LinkPatch) -> bool {
        let Some(link) = self.items.iter_mut().find(|l| &l.key == key) else {
            return false;
        };

        if let Some(title) = &patch.title {
            link.title = title.clone();
        }
        if let Some(url) = &patch.url {
            link.url = url.clone();
        }
        if let Some(icon) = &patch.icon {
            link.icon = (!icon.is_empty()).then(|| icon.clone());
        }
        if let Some(position) = patch.position {
            link.position = position;
        }
        if let Some(is_active) = patch.is_active {
            link.is_active = is_active;
        }
        if patch.clear_schedule {
            link.scheduled_at = None;
        } else if let Some(at) = patch.scheduled_at {
            link.scheduled_at = Some(at);
        }

        true
    }

    /// Rebuild the collection in the order given by `keys` and rewrite
    /// positions to a dense 0..N-1.
    ///
    /// Keys not present in the collection are skipped; entries not named
    /// keep their relative order at the tail. Callers send complete lists,
    /// the tolerance only guards against racing mutations.
    pub fn replace_order(&mut self, keys: &[LinkKey]) {
        let mut reordered = Vec::with_capacity(self.items.len());
        for key in keys {
            if let Some(index) = self.items.iter().position(|l| &l.key == key) {
                reordered.push(self.items.remove(index));
            }
        }
        reordered.append(&mut self.items);

        for (position, link) in reordered.iter_mut().enumerate() {
            link.position = position as i32;
        }
        self.items = reordered;
    }
}
