use super::*;

#[test]
fn password_request_uses_snake_case_fields() {
    let body = UpdatePasswordRequest { current_password: "old", new_password: "new" };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({ "current_password": "old", "new_password": "new" })
    );
}

#[test]
fn zeroed_stats_use_camel_case_and_flat_change() {
    let value = serde_json::to_value(DashboardStats::zeroed()).unwrap();
    assert_eq!(value["activeTrends"], 0);
    assert_eq!(value["trendsChange"], "+0%");
    assert_eq!(value["opinionsAnalyzed"], 0);
    assert_eq!(value["skillsChange"], "+0%");
    assert_eq!(value["insightsChange"], "+0%");
}

#[test]
fn stats_missing_field_fails_to_parse() {
    let parsed = serde_json::from_value::<DashboardStats>(serde_json::json!({ "activeTrends": 3 }));
    assert!(parsed.is_err());
}

#[test]
fn profile_keeps_unknown_fields() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({
        "id": 7,
        "email": "ada@example.com",
        "created_at": "2024-01-02T03:04:05Z"
    }))
    .unwrap();
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.created_at.as_deref(), Some("2024-01-02T03:04:05Z"));
    assert_eq!(profile.extra.get("id"), Some(&serde_json::json!(7)));
}

#[test]
fn profile_display_name_falls_back_to_user() {
    let mut profile: UserProfile = serde_json::from_value(serde_json::json!({ "email": "ada@example.com" })).unwrap();
    assert_eq!(profile.display_name(), "ada");
    profile.email = String::new();
    assert_eq!(profile.display_name(), "User");
}

#[test]
fn activity_renames_type_field() {
    let feed: RecentActivities = serde_json::from_value(serde_json::json!({
        "activities": [
            { "id": "a2", "type": "opinion", "title": "AI ethics", "timestamp": "2024-05-02T00:00:00Z" },
            { "id": "a1", "type": "trend", "title": "Rust", "timestamp": "2024-05-01T00:00:00Z" }
        ]
    }))
    .unwrap();
    assert_eq!(feed.activities.len(), 2);
    assert_eq!(feed.activities[0].kind, "opinion");
    assert_eq!(feed.activities[1].title, "Rust");
}

#[test]
fn error_body_tolerates_missing_error() {
    let body: ErrorBody = serde_json::from_str("{}").unwrap();
    assert_eq!(body.error, None);
}
