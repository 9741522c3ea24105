//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the read-transform-write cycle over the notification slot.
//! - Isolate serialization and slot details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return typed errors; the fail-open policy lives one
//!   layer up in the service.

pub mod notification_repo;
