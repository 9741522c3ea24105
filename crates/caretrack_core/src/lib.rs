//! Core domain logic for CareTrack.
//! This crate is the single source of truth for notification behavior.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notification::{
    AppointmentDetails, NewNotification, Notification, NotificationKind,
};
pub use repo::notification_repo::{
    NotificationRepository, RepoError, RepoResult, NOTIFICATIONS_SLOT_KEY,
};
pub use service::notification_service::NotificationService;
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
