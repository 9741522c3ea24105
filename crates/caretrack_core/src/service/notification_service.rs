//! Notification feed use-case service.
//!
//! # Responsibility
//! - Provide the caller-facing notification operations.
//! - Render human-readable content for appointment domain events.
//!
//! # Invariants
//! - Every public operation is fail-open: storage and decode failures are
//!   logged as diagnostic events and converted to a safe default. Callers
//!   never see an error from this type.
//! - The fail-open policy is appropriate for a non-critical feed only; do
//!   not reuse it for data a user cannot afford to lose silently.

use crate::model::notification::{
    AppointmentDetails, NewNotification, Notification, NotificationKind,
};
use crate::repo::notification_repo::{NotificationRepository, RepoError};
use crate::store::KeyValueStore;
use log::error;

/// Fail-open facade over the notification repository.
///
/// Construct with any [`KeyValueStore`]: the SQLite slot store in the app,
/// an in-memory store in tests.
pub struct NotificationService<S: KeyValueStore> {
    repo: NotificationRepository<S>,
}

impl<S: KeyValueStore> NotificationService<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: NotificationRepository::new(store),
        }
    }

    /// Returns `user_id`'s notifications, newest first.
    ///
    /// Empty on any storage or decode failure.
    pub fn list(&self, user_id: &str) -> Vec<Notification> {
        self.repo
            .list_for_user(user_id)
            .unwrap_or_else(|err| fail_open("list", err, Vec::new()))
    }

    /// Appends a new unread notification stamped with the current instant.
    pub fn create(&self, fields: NewNotification) {
        if let Err(err) = self.repo.append(Notification::new(fields)) {
            fail_open("create", err, ());
        }
    }

    /// Marks one notification as read. No-op when the id is unknown.
    pub fn mark_as_read(&self, notification_id: &str) {
        if let Err(err) = self.repo.mark_read(notification_id) {
            fail_open("mark_as_read", err, ());
        }
    }

    /// Marks every notification of `user_id` as read.
    pub fn mark_all_as_read(&self, user_id: &str) {
        if let Err(err) = self.repo.mark_all_read(user_id) {
            fail_open("mark_all_as_read", err, ());
        }
    }

    /// Deletes one notification. No-op when the id is unknown.
    pub fn delete(&self, notification_id: &str) {
        if let Err(err) = self.repo.remove(notification_id) {
            fail_open("delete", err, ());
        }
    }

    /// Counts `user_id`'s unread notifications. Zero on failure.
    pub fn unread_count(&self, user_id: &str) -> usize {
        self.repo
            .unread_count(user_id)
            .unwrap_or_else(|err| fail_open("unread_count", err, 0))
    }

    /// Notifies the patient that an appointment was confirmed.
    pub fn notify_appointment_confirmed(&self, user_id: &str, details: &AppointmentDetails) {
        self.create(NewNotification {
            user_id: user_id.to_string(),
            title: "Appointment Confirmed".to_string(),
            message: confirmed_message(details),
            kind: NotificationKind::AppointmentConfirmed,
            appointment_id: Some(details.appointment_id.clone()),
        });
    }

    /// Notifies the patient that an appointment was cancelled, including
    /// the reason when one was given.
    pub fn notify_appointment_cancelled(&self, user_id: &str, details: &AppointmentDetails) {
        self.create(NewNotification {
            user_id: user_id.to_string(),
            title: "Appointment Cancelled".to_string(),
            message: cancelled_message(details),
            kind: NotificationKind::AppointmentCancelled,
            appointment_id: Some(details.appointment_id.clone()),
        });
    }

    /// Notifies the doctor that a patient booked a new appointment.
    pub fn notify_new_appointment(&self, user_id: &str, details: &AppointmentDetails) {
        self.create(NewNotification {
            user_id: user_id.to_string(),
            title: "New Appointment".to_string(),
            message: new_appointment_message(details),
            kind: NotificationKind::General,
            appointment_id: Some(details.appointment_id.clone()),
        });
    }

    /// Reminds the patient of an upcoming appointment.
    pub fn notify_appointment_reminder(&self, user_id: &str, details: &AppointmentDetails) {
        self.create(NewNotification {
            user_id: user_id.to_string(),
            title: "Appointment Reminder".to_string(),
            message: reminder_message(details),
            kind: NotificationKind::AppointmentReminder,
            appointment_id: Some(details.appointment_id.clone()),
        });
    }
}

/// Single fail-open boundary: log a diagnostic event, return the default.
fn fail_open<T>(op: &str, err: RepoError, default: T) -> T {
    error!(
        "event=notification_op module=service status=error op={op} error_code={} error={err}",
        err.code()
    );
    default
}

fn confirmed_message(details: &AppointmentDetails) -> String {
    format!(
        "Your appointment with Dr. {} on {} at {} has been confirmed.",
        details.doctor_name, details.date, details.time
    )
}

fn cancelled_message(details: &AppointmentDetails) -> String {
    let mut message = format!(
        "Your appointment with Dr. {} on {} at {} has been cancelled.",
        details.doctor_name, details.date, details.time
    );
    if let Some(reason) = &details.reason {
        message.push_str(&format!(" Reason: {reason}"));
    }
    message
}

fn new_appointment_message(details: &AppointmentDetails) -> String {
    format!(
        "{} booked an appointment on {} at {}.",
        details.patient_name, details.date, details.time
    )
}

fn reminder_message(details: &AppointmentDetails) -> String {
    format!(
        "You have an appointment with Dr. {} on {} at {}.",
        details.doctor_name, details.date, details.time
    )
}

#[cfg(test)]
mod tests {
    use super::{cancelled_message, confirmed_message, new_appointment_message, reminder_message};
    use crate::model::notification::AppointmentDetails;

    fn details(reason: Option<&str>) -> AppointmentDetails {
        AppointmentDetails {
            appointment_id: "apt-1".to_string(),
            doctor_name: "Okafor".to_string(),
            patient_name: "Maya Chen".to_string(),
            date: "2026-09-03".to_string(),
            time: "10:30".to_string(),
            reason: reason.map(str::to_string),
        }
    }

    #[test]
    fn confirmed_message_names_doctor_date_and_time() {
        assert_eq!(
            confirmed_message(&details(None)),
            "Your appointment with Dr. Okafor on 2026-09-03 at 10:30 has been confirmed."
        );
    }

    #[test]
    fn cancelled_message_appends_reason_only_when_present() {
        assert_eq!(
            cancelled_message(&details(None)),
            "Your appointment with Dr. Okafor on 2026-09-03 at 10:30 has been cancelled."
        );
        assert_eq!(
            cancelled_message(&details(Some("double booking"))),
            "Your appointment with Dr. Okafor on 2026-09-03 at 10:30 has been cancelled. \
             Reason: double booking"
        );
    }

    #[test]
    fn new_appointment_message_is_addressed_to_the_doctor() {
        assert_eq!(
            new_appointment_message(&details(None)),
            "Maya Chen booked an appointment on 2026-09-03 at 10:30."
        );
    }

    #[test]
    fn reminder_message_names_doctor_date_and_time() {
        assert_eq!(
            reminder_message(&details(None)),
            "You have an appointment with Dr. Okafor on 2026-09-03 at 10:30."
        );
    }
}
