use planbook_core::{Activity, Bucket, PersistedState};
use serde_json::json;

#[test]
fn activity_serialization_uses_expected_wire_fields() {
    let mut activity = Activity::new("Plan the week", Bucket::Scheduled);
    activity.date = Some("2026-08-03".to_string());
    activity.time = Some("09:00".to_string());
    activity.duration_minutes = Some(30);
    activity.note = "Sunday review".to_string();
    activity.order_index = Some(2);

    let value = serde_json::to_value(&activity).unwrap();
    assert_eq!(value["id"], activity.id);
    assert_eq!(value["title"], "Plan the week");
    assert_eq!(value["bucket"], "scheduled");
    assert_eq!(value["date"], "2026-08-03");
    assert_eq!(value["time"], "09:00");
    assert_eq!(value["durationMinutes"], 30);
    assert_eq!(value["note"], "Sunday review");
    assert_eq!(value["isDone"], false);
    assert_eq!(value["orderIndex"], 2);

    let decoded: Activity = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, activity);
}

#[test]
fn nullable_fields_accept_null_and_absence() {
    let with_nulls = json!({
        "id": "a1",
        "title": "Stretch",
        "bucket": "anytime",
        "date": null,
        "time": null,
        "durationMinutes": null,
        "note": "",
        "isDone": false,
        "orderIndex": null,
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-01T08:00:00Z",
    });
    let decoded: Activity = serde_json::from_value(with_nulls).unwrap();
    assert_eq!(decoded.date, None);
    assert_eq!(decoded.order_index, None);

    let without_nullables = json!({
        "id": "a2",
        "title": "Stretch",
        "bucket": "anytime",
        "note": "",
        "isDone": false,
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-01T08:00:00Z",
    });
    let decoded: Activity = serde_json::from_value(without_nullables).unwrap();
    assert_eq!(decoded.time, None);
    assert_eq!(decoded.duration_minutes, None);
}

#[test]
fn missing_required_field_is_rejected() {
    let value = json!({
        "id": "a1",
        "title": "No note field",
        "bucket": "someday",
        "isDone": false,
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-01T08:00:00Z",
    });
    assert!(serde_json::from_value::<Activity>(value).is_err());
}

#[test]
fn negative_duration_is_rejected() {
    let value = json!({
        "id": "a1",
        "title": "Negative duration",
        "bucket": "anytime",
        "durationMinutes": -5,
        "note": "",
        "isDone": false,
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-01T08:00:00Z",
    });
    assert!(serde_json::from_value::<Activity>(value).is_err());
}

#[test]
fn unknown_bucket_value_is_rejected() {
    let value = json!({
        "id": "a1",
        "title": "Bad bucket",
        "bucket": "backlog",
        "note": "",
        "isDone": false,
        "createdAt": "2026-08-01T08:00:00Z",
        "updatedAt": "2026-08-01T08:00:00Z",
    });
    assert!(serde_json::from_value::<Activity>(value).is_err());
}

#[test]
fn state_with_malformed_timestamp_fails_validation() {
    let mut activity = Activity::new("Broken clock", Bucket::Anytime);
    activity.created_at = "last tuesday".to_string();

    let state = PersistedState {
        activities: vec![activity],
        ..PersistedState::default()
    };
    assert!(state.validate().is_err());
}
