use caretrack_core::db::{open_db, open_db_in_memory};
use caretrack_core::{
    KeyValueStore, NewNotification, NotificationKind, NotificationService, SqliteKeyValueStore,
};

#[test]
fn absent_slot_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    assert_eq!(store.get("notifications").unwrap(), None);
}

#[test]
fn set_then_get_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("notifications", "[]").unwrap();
    assert_eq!(store.get("notifications").unwrap().as_deref(), Some("[]"));
}

#[test]
fn set_replaces_the_whole_slot_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("slot", "first").unwrap();
    store.set("slot", "second").unwrap();
    assert_eq!(store.get("slot").unwrap().as_deref(), Some("second"));
}

#[test]
fn slots_are_independent_per_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn notification_feed_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caretrack.db");

    {
        let conn = open_db(&path).unwrap();
        let service = NotificationService::new(SqliteKeyValueStore::new(&conn));
        service.create(NewNotification {
            user_id: "p1".to_string(),
            title: "Checkup booked".to_string(),
            message: "See you soon.".to_string(),
            kind: NotificationKind::General,
            appointment_id: Some("apt-1".to_string()),
        });
        assert_eq!(service.unread_count("p1"), 1);
    }

    let conn = open_db(&path).unwrap();
    let service = NotificationService::new(SqliteKeyValueStore::new(&conn));
    let listed = service.list("p1");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Checkup booked");
    assert_eq!(listed[0].appointment_id.as_deref(), Some("apt-1"));
    assert_eq!(service.unread_count("p1"), 1);
}
