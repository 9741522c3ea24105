//! Notification collection persistence over the key-value slot.
//!
//! # Responsibility
//! - Load and store the whole notification collection as one JSON slot.
//! - Apply single read-transform-write mutations on that collection.
//!
//! # Invariants
//! - An absent slot loads as an empty collection, not as an error.
//! - Storage keeps insertion order; only `list_for_user` sorts.
//! - Every mutation rewrites the entire slot (last writer wins).

use crate::model::notification::Notification;
use crate::store::{KeyValueStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the serialized notification collection for all users.
pub const NOTIFICATIONS_SLOT_KEY: &str = "notifications";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while loading or persisting the notification collection.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    CorruptPayload(serde_json::Error),
}

impl RepoError {
    /// Stable code used in diagnostic log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_unavailable",
            Self::CorruptPayload(_) => "corrupt_payload",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::CorruptPayload(err) => write!(f, "corrupt notification payload: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::CorruptPayload(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::CorruptPayload(value)
    }
}

/// Whole-collection repository over an injected key-value store.
pub struct NotificationRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NotificationRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the full collection in insertion order.
    pub fn load_all(&self) -> RepoResult<Vec<Notification>> {
        match self.store.get(NOTIFICATIONS_SLOT_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the full collection.
    pub fn store_all(&self, notifications: &[Notification]) -> RepoResult<()> {
        let payload = serde_json::to_string(notifications)?;
        self.store.set(NOTIFICATIONS_SLOT_KEY, &payload)?;
        Ok(())
    }

    /// Appends one notification at the end of the collection.
    pub fn append(&self, notification: Notification) -> RepoResult<()> {
        let mut all = self.load_all()?;
        all.push(notification);
        self.store_all(&all)
    }

    /// Sets `read = true` on the record with `notification_id`.
    ///
    /// No-op when no record matches.
    pub fn mark_read(&self, notification_id: &str) -> RepoResult<()> {
        let mut all = self.load_all()?;
        if let Some(notification) = all.iter_mut().find(|n| n.id == notification_id) {
            notification.mark_read();
        }
        self.store_all(&all)
    }

    /// Sets `read = true` on every record belonging to `user_id`.
    pub fn mark_all_read(&self, user_id: &str) -> RepoResult<()> {
        let mut all = self.load_all()?;
        for notification in all.iter_mut().filter(|n| n.user_id == user_id) {
            notification.mark_read();
        }
        self.store_all(&all)
    }

    /// Removes the record with `notification_id`, keeping the relative
    /// order of the remaining records. No-op when no record matches.
    pub fn remove(&self, notification_id: &str) -> RepoResult<()> {
        let mut all = self.load_all()?;
        all.retain(|n| n.id != notification_id);
        self.store_all(&all)
    }

    /// Returns `user_id`'s records sorted by `created_at` descending.
    ///
    /// The sort is stable, so records created at the same instant keep
    /// their insertion order relative to each other.
    pub fn list_for_user(&self, user_id: &str) -> RepoResult<Vec<Notification>> {
        let mut list: Vec<Notification> = self
            .load_all()?
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Counts `user_id`'s unread records.
    pub fn unread_count(&self, user_id: &str) -> RepoResult<usize> {
        let count = self
            .load_all()?
            .iter()
            .filter(|n| n.user_id == user_id && n.is_unread())
            .count();
        Ok(count)
    }
}
