//! Tests that settings records serialize to the shape the tag reads.

use quantcast::types::{Settings, SettingsEvent};
use quantcast::{EventQueue, SettingsField};
use serde_json::json;

#[test]
fn test_key_names_and_order() {
    let settings = Settings {
        qacct: Some("p-test".into()),
        event: Some(SettingsEvent::Click),
        labels: Some("event.event".into()),
        uid: Some("id".into()),
        revenue: Some("10.45".into()),
        orderid: Some("123".into()),
    };

    let json_str = serde_json::to_string(&settings).unwrap();

    assert_eq!(
        json_str,
        r#"{"qacct":"p-test","event":"click","labels":"event.event","uid":"id","revenue":"10.45","orderid":"123"}"#
    );
}

#[test]
fn test_initial_record_has_no_event_key() {
    let settings = Settings::for_account("p-test");

    let json = serde_json::to_value(&settings).unwrap();

    assert_eq!(json, json!({ "qacct": "p-test" }));
    assert!(json.get("event").is_none());
}

#[test]
fn test_numeric_fields_are_strings() {
    let settings = Settings {
        event: Some(SettingsEvent::Refresh),
        revenue: Some("99.99".into()),
        orderid: Some("780bc55".into()),
        ..Settings::for_account("p-test")
    };

    let json = serde_json::to_value(&settings).unwrap();

    assert!(json["revenue"].is_string());
    assert!(json["orderid"].is_string());
    assert_eq!(json["event"], "refresh");
}

#[test]
fn test_queue_serializes_as_array() {
    let mut queue = EventQueue::new();
    queue.patch_first(SettingsField::Uid, "u1");
    queue.push_initial(Settings::for_account("p-test"));
    queue.push(Settings {
        event: Some(SettingsEvent::Refresh),
        labels: Some("page.All.Default".into()),
        ..Settings::for_account("p-test")
    });

    let json: serde_json::Value = serde_json::from_str(&queue.to_json().unwrap()).unwrap();

    assert_eq!(
        json,
        json!([
            { "qacct": "p-test", "uid": "u1" },
            { "qacct": "p-test", "event": "refresh", "labels": "page.All.Default" }
        ])
    );
}

#[test]
fn test_settings_round_trip_from_tag_json() {
    let settings: Settings =
        serde_json::from_str(r#"{"qacct":"p-test","event":"refresh","uid":"id"}"#).unwrap();

    assert_eq!(settings.event, Some(SettingsEvent::Refresh));
    assert_eq!(settings.uid.as_deref(), Some("id"));
    assert_eq!(settings.labels, None);
}
