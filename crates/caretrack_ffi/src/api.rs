//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the notification feed operations to Dart via FRB.
//! - Keep error semantics simple for the UI: operations never throw.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Read operations return empty defaults on failure, matching the
//!   core's fail-open policy.

use caretrack_core::db::open_db;
use caretrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppointmentDetails, NewNotification, Notification, NotificationKind, NotificationService,
    SqliteKeyValueStore,
};
use log::error;
use std::path::PathBuf;
use std::sync::OnceLock;
use time::format_description::well_known::Rfc3339;

const STORE_DB_FILE_NAME: &str = "caretrack_store.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Notification record shape exposed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    /// Category label (`appointment_confirmed|appointment_cancelled|appointment_reminder|general`).
    pub kind: String,
    pub read: bool,
    /// Creation instant as an RFC 3339 string.
    pub created_at: String,
    pub appointment_id: Option<String>,
}

/// Generic action response envelope for feed mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedActionResponse {
    /// Whether the operation was dispatched to the store.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl FeedActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Appointment fields the UI supplies for domain-event notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentInput {
    pub appointment_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub reason: Option<String>,
}

/// Opens the notification store eagerly, applying pending migrations.
///
/// Feed operations open the store on demand; calling this once at app
/// startup moves the open/migrate cost off the first feed interaction.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Idempotent; safe to call on every app launch.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn open_store() -> FeedActionResponse {
    match open_db(resolve_store_db_path()) {
        Ok(_) => FeedActionResponse::success("Store ready."),
        Err(err) => FeedActionResponse::failure(format!("open_store failed: {err}")),
    }
}

/// Lists a user's notifications, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list on any failure.
#[flutter_rust_bridge::frb(sync)]
pub fn list_notifications(user_id: String) -> Vec<NotificationItem> {
    match with_notification_service(|service| service.list(&user_id)) {
        Ok(notifications) => notifications.into_iter().map(to_notification_item).collect(),
        Err(message) => {
            error!("event=ffi_call module=ffi status=error op=list_notifications error={message}");
            Vec::new()
        }
    }
}

/// Creates a notification with a caller-chosen category.
///
/// `kind` accepts the serialized category labels; unknown labels fail the
/// call without touching the store.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn create_notification(
    user_id: String,
    title: String,
    message: String,
    kind: String,
    appointment_id: Option<String>,
) -> FeedActionResponse {
    let Some(kind) = parse_kind(&kind) else {
        return FeedActionResponse::failure(format!("unknown notification kind `{kind}`"));
    };

    dispatch("create_notification", "Notification created.", |service| {
        service.create(NewNotification {
            user_id,
            title,
            message,
            kind,
            appointment_id,
        });
    })
}

/// Marks one notification as read. No-op for unknown ids.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn mark_notification_read(notification_id: String) -> FeedActionResponse {
    dispatch("mark_notification_read", "Notification marked read.", |service| {
        service.mark_as_read(&notification_id);
    })
}

/// Marks all of a user's notifications as read.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn mark_all_notifications_read(user_id: String) -> FeedActionResponse {
    dispatch("mark_all_notifications_read", "Notifications marked read.", |service| {
        service.mark_all_as_read(&user_id);
    })
}

/// Deletes one notification. No-op for unknown ids.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_notification(notification_id: String) -> FeedActionResponse {
    dispatch("delete_notification", "Notification deleted.", |service| {
        service.delete(&notification_id);
    })
}

/// Counts a user's unread notifications.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns 0 on any failure.
#[flutter_rust_bridge::frb(sync)]
pub fn unread_notification_count(user_id: String) -> u32 {
    match with_notification_service(|service| service.unread_count(&user_id)) {
        Ok(count) => u32::try_from(count).unwrap_or(u32::MAX),
        Err(message) => {
            error!(
                "event=ffi_call module=ffi status=error op=unread_notification_count error={message}"
            );
            0
        }
    }
}

/// Notifies a patient that an appointment was confirmed.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notify_appointment_confirmed(
    user_id: String,
    appointment: AppointmentInput,
) -> FeedActionResponse {
    let details = to_details(appointment);
    dispatch("notify_appointment_confirmed", "Notification created.", |service| {
        service.notify_appointment_confirmed(&user_id, &details);
    })
}

/// Notifies a patient that an appointment was cancelled.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notify_appointment_cancelled(
    user_id: String,
    appointment: AppointmentInput,
) -> FeedActionResponse {
    let details = to_details(appointment);
    dispatch("notify_appointment_cancelled", "Notification created.", |service| {
        service.notify_appointment_cancelled(&user_id, &details);
    })
}

/// Notifies a doctor that a patient booked a new appointment.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notify_new_appointment(
    user_id: String,
    appointment: AppointmentInput,
) -> FeedActionResponse {
    let details = to_details(appointment);
    dispatch("notify_new_appointment", "Notification created.", |service| {
        service.notify_new_appointment(&user_id, &details);
    })
}

/// Reminds a patient of an upcoming appointment.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notify_appointment_reminder(
    user_id: String,
    appointment: AppointmentInput,
) -> FeedActionResponse {
    let details = to_details(appointment);
    dispatch("notify_appointment_reminder", "Notification created.", |service| {
        service.notify_appointment_reminder(&user_id, &details);
    })
}

fn dispatch(
    op: &str,
    success_message: &str,
    f: impl FnOnce(&NotificationService<SqliteKeyValueStore<'_>>),
) -> FeedActionResponse {
    match with_notification_service(f) {
        Ok(()) => FeedActionResponse::success(success_message),
        Err(message) => FeedActionResponse::failure(format!("{op} failed: {message}")),
    }
}

fn with_notification_service<T>(
    f: impl FnOnce(&NotificationService<SqliteKeyValueStore<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_store_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("store DB open failed: {err}"))?;
    let service = NotificationService::new(SqliteKeyValueStore::new(&conn));
    Ok(f(&service))
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("CARETRACK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn to_notification_item(notification: Notification) -> NotificationItem {
    let created_at = notification.created_at.format(&Rfc3339).unwrap_or_default();
    NotificationItem {
        id: notification.id,
        user_id: notification.user_id,
        title: notification.title,
        message: notification.message,
        kind: notification.kind.as_str().to_string(),
        read: notification.read,
        created_at,
        appointment_id: notification.appointment_id,
    }
}

fn to_details(appointment: AppointmentInput) -> AppointmentDetails {
    AppointmentDetails {
        appointment_id: appointment.appointment_id,
        doctor_name: appointment.doctor_name,
        patient_name: appointment.patient_name,
        date: appointment.date,
        time: appointment.time,
        reason: appointment.reason,
    }
}

fn parse_kind(value: &str) -> Option<NotificationKind> {
    match value {
        "appointment_confirmed" => Some(NotificationKind::AppointmentConfirmed),
        "appointment_cancelled" => Some(NotificationKind::AppointmentCancelled),
        "appointment_reminder" => Some(NotificationKind::AppointmentReminder),
        "general" => Some(NotificationKind::General),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, create_notification, init_logging, list_notifications,
        mark_all_notifications_read, mark_notification_read, notify_appointment_confirmed,
        open_store, parse_kind, ping, unread_notification_count, AppointmentInput,
    };
    use caretrack_core::NotificationKind;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Feed mutations are whole-slot read-modify-write cycles, so parallel
    // test threads sharing the one store DB can lose each other's appends
    // even under distinct user ids. Every DB-touching test serializes on
    // this lock.
    static DB_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn open_store_is_idempotent_and_reports_ready() {
        let _guard = DB_LOCK.lock().unwrap();
        let first = open_store();
        assert!(first.ok, "{}", first.message);
        let second = open_store();
        assert!(second.ok, "{}", second.message);
    }

    #[test]
    fn parse_kind_covers_all_labels_and_rejects_unknown() {
        assert_eq!(
            parse_kind("appointment_confirmed"),
            Some(NotificationKind::AppointmentConfirmed)
        );
        assert_eq!(
            parse_kind("appointment_cancelled"),
            Some(NotificationKind::AppointmentCancelled)
        );
        assert_eq!(
            parse_kind("appointment_reminder"),
            Some(NotificationKind::AppointmentReminder)
        );
        assert_eq!(parse_kind("general"), Some(NotificationKind::General));
        assert_eq!(parse_kind("push"), None);
    }

    #[test]
    fn create_notification_rejects_unknown_kind_without_store_write() {
        let _guard = DB_LOCK.lock().unwrap();
        let user = unique_user("bad-kind");
        let response = create_notification(
            user.clone(),
            "title".to_string(),
            "message".to_string(),
            "push".to_string(),
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("unknown notification kind"));
        assert!(list_notifications(user).is_empty());
    }

    #[test]
    fn created_notification_round_trips_through_list() {
        let _guard = DB_LOCK.lock().unwrap();
        let user = unique_user("roundtrip");
        let created = create_notification(
            user.clone(),
            "Lab results".to_string(),
            "Your results are ready.".to_string(),
            "general".to_string(),
            None,
        );
        assert!(created.ok, "{}", created.message);

        let items = list_notifications(user.clone());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Lab results");
        assert_eq!(items[0].kind, "general");
        assert!(!items[0].read);
        assert!(!items[0].created_at.is_empty());
        assert_eq!(unread_notification_count(user), 1);
    }

    #[test]
    fn mark_read_flows_update_unread_count() {
        let _guard = DB_LOCK.lock().unwrap();
        let user = unique_user("mark-read");
        let appointment = AppointmentInput {
            appointment_id: "apt-9".to_string(),
            doctor_name: "Ruiz".to_string(),
            patient_name: "Ana Belo".to_string(),
            date: "2026-10-01".to_string(),
            time: "09:00".to_string(),
            reason: None,
        };

        let confirmed = notify_appointment_confirmed(user.clone(), appointment.clone());
        assert!(confirmed.ok, "{}", confirmed.message);
        let second = notify_appointment_confirmed(user.clone(), appointment);
        assert!(second.ok, "{}", second.message);
        assert_eq!(unread_notification_count(user.clone()), 2);

        let items = list_notifications(user.clone());
        assert_eq!(items.len(), 2);
        let marked = mark_notification_read(items[0].id.clone());
        assert!(marked.ok, "{}", marked.message);
        assert_eq!(unread_notification_count(user.clone()), 1);

        let all_marked = mark_all_notifications_read(user.clone());
        assert!(all_marked.ok, "{}", all_marked.message);
        assert_eq!(unread_notification_count(user), 0);
    }

    fn unique_user(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
