//! Domain model for the notification feed.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the stored JSON shape stable across app versions.
//!
//! # Invariants
//! - Every notification is identified by a stable unique `id`.
//! - Records are immutable after creation except for the `read` flag.

pub mod notification;
