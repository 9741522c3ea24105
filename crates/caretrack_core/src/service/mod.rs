//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing APIs.
//! - Own the fail-open error policy for the notification feed.

pub mod notification_service;
