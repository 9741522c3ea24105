//! Notification domain model.
//!
//! # Responsibility
//! - Define the canonical notification record persisted in the local slot.
//! - Keep the wire shape compatible with the existing stored JSON payload.
//!
//! # Invariants
//! - `id` is unique across the whole stored collection, all users included.
//! - `read` only moves from `false` to `true`; it is never reset.
//! - `created_at` is assigned once at creation and never rewritten.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed set of notification categories.
///
/// Three appointment lifecycle events plus a generic bucket used for
/// booking announcements and anything without a dedicated category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AppointmentConfirmed,
    AppointmentCancelled,
    AppointmentReminder,
    General,
}

impl NotificationKind {
    /// Stable wire/display name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppointmentConfirmed => "appointment_confirmed",
            Self::AppointmentCancelled => "appointment_cancelled",
            Self::AppointmentReminder => "appointment_reminder",
            Self::General => "general",
        }
    }
}

/// One user-facing message record tied to an optional appointment.
///
/// Field renames preserve the camelCase JSON produced by earlier app
/// versions, so existing stored collections keep deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable unique id, UUID v4 in string form.
    pub id: String,
    /// Recipient. Sole partition key for every query.
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    pub message: String,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    /// Creation instant, serialized as an RFC 3339 string.
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Back-reference to an appointment. No referential integrity is
    /// enforced; the appointment may no longer exist.
    #[serde(
        rename = "appointmentId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub appointment_id: Option<String>,
}

impl Notification {
    /// Creates an unread notification stamped with the current instant.
    pub fn new(fields: NewNotification) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: fields.user_id,
            title: fields.title,
            message: fields.message,
            kind: fields.kind,
            read: false,
            created_at: OffsetDateTime::now_utc(),
            appointment_id: fields.appointment_id,
        }
    }

    /// Flips the read flag to `true`. There is no inverse operation.
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// Caller-supplied fields for creating a notification.
///
/// `id`, `read` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub appointment_id: Option<String>,
}

/// Appointment fields consumed only for message formatting.
///
/// This crate never reads or writes appointment state; these values are
/// copied into rendered notification text at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub appointment_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    /// Pre-formatted display date, e.g. `2026-03-14`.
    pub date: String,
    /// Pre-formatted display time, e.g. `10:30`.
    pub time: String,
    /// Cancellation reason, rendered only by the cancelled template.
    pub reason: Option<String>,
}
