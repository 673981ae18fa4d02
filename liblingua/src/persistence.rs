//! Rehydration and snapshot persistence
//!
//! The whole `AppState` is written as one JSON blob after every change. On
//! startup the blob is parsed leniently: each top-level field falls back to
//! its default on its own, so a blob written by an older or newer client
//! never prevents the application from starting.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::app::state::{default_achievements, default_study_groups};
use crate::app::AppState;
use crate::error::{Result, StorageError};
use crate::storage::KeyValueStorage;

/// Load the state stored under `key`, falling back to defaults
///
/// Never fails: an unreadable or corrupt blob is logged and replaced by the
/// default state.
pub fn load_state(storage: &dyn KeyValueStorage, key: &str) -> AppState {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No saved state, starting from defaults");
            return AppState::default();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read saved state, using defaults");
            return AppState::default();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => merge_with_defaults(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Corrupted saved state, using defaults");
            AppState::default()
        }
    }
}

/// Serialize the full state and overwrite the blob under `key`
pub fn save_state(storage: &dyn KeyValueStorage, key: &str, state: &AppState) -> Result<()> {
    let json = serde_json::to_string(state).map_err(StorageError::Serialize)?;
    storage.set_item(key, &json)
}

/// Build a state from a persisted JSON value, field by field
///
/// - `user` and `settings` are shallow-merged over the defaults
/// - list fields are taken only when the stored value is an array that
///   parses, otherwise the default list is used
/// - unknown fields are ignored
pub fn merge_with_defaults(value: Value) -> AppState {
    let defaults = AppState::default();
    let mut stored = match value {
        Value::Object(map) => map,
        other => {
            tracing::warn!(kind = json_kind(&other), "Saved state is not an object, using defaults");
            return defaults;
        }
    };

    AppState {
        user: merge_object(stored.remove("user"), defaults.user, "user"),
        lesson_progress: parse_list(stored.remove("lessonProgress"), Vec::new, "lessonProgress"),
        study_groups: parse_list(stored.remove("studyGroups"), default_study_groups, "studyGroups"),
        achievements: parse_list(stored.remove("achievements"), default_achievements, "achievements"),
        settings: merge_object(stored.remove("settings"), defaults.settings, "settings"),
        call_history: parse_list(stored.remove("callHistory"), Vec::new, "callHistory"),
    }
}

/// Overlay the stored object's keys on the default, then parse the result
fn merge_object<T>(stored: Option<Value>, default: T, field: &str) -> T
where
    T: serde::Serialize + DeserializeOwned,
{
    let overlay = match stored {
        None | Some(Value::Null) => return default,
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::warn!(field, kind = json_kind(&other), "Expected an object, using defaults");
            return default;
        }
    };

    let mut merged: Map<String, Value> = match serde_json::to_value(&default) {
        Ok(Value::Object(map)) => map,
        _ => return default,
    };
    merged.extend(overlay);

    match serde_json::from_value(Value::Object(merged)) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(field, error = %e, "Invalid saved field, using defaults");
            default
        }
    }
}

fn parse_list<T, F>(stored: Option<Value>, default: F, field: &str) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match stored {
        Some(value @ Value::Array(_)) => match serde_json::from_value(value) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(field, error = %e, "Invalid saved list, using defaults");
                default()
            }
        },
        None | Some(Value::Null) => default(),
        Some(other) => {
            tracing::warn!(field, kind = json_kind(&other), "Expected a list, using defaults");
            default()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{reduce, Action};
    use crate::storage::MemoryStorage;
    use serde_json::json;

    const KEY: &str = "linguaconnect-state";

    #[test]
    fn test_missing_blob_gives_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(load_state(&storage, KEY), AppState::default());
    }

    #[test]
    fn test_corrupt_json_gives_defaults() {
        let storage = MemoryStorage::new();
        storage.set_item(KEY, "{not json").unwrap();

        assert_eq!(load_state(&storage, KEY), AppState::default());
    }

    #[test]
    fn test_non_object_gives_defaults() {
        assert_eq!(merge_with_defaults(json!([1, 2, 3])), AppState::default());
        assert_eq!(merge_with_defaults(json!("state")), AppState::default());
        assert_eq!(merge_with_defaults(Value::Null), AppState::default());
    }

    #[test]
    fn test_partial_user_is_merged_over_defaults() {
        let state = merge_with_defaults(json!({
            "user": { "name": "Jamie", "streak": 12 }
        }));

        assert_eq!(state.user.name, "Jamie");
        assert_eq!(state.user.streak, 12);
        assert_eq!(state.user.email, "alex@example.com");
        assert_eq!(state.user.total_points, 1250);
        assert_eq!(state.study_groups, default_study_groups());
    }

    #[test]
    fn test_partial_settings_are_merged() {
        let state = merge_with_defaults(json!({
            "settings": { "darkMode": true, "fontSize": "large" }
        }));

        assert!(state.settings.dark_mode);
        assert!(state.settings.notifications);
        assert_eq!(state.settings.language, "English");
    }

    #[test]
    fn test_wrong_list_shapes_fall_back_per_field() {
        let state = merge_with_defaults(json!({
            "user": { "name": "Jamie" },
            "studyGroups": "oops",
            "achievements": { "id": "first-lesson" },
            "lessonProgress": [{ "lessonId": "l1", "completed": true, "score": 80 }],
            "callHistory": 7
        }));

        assert_eq!(state.user.name, "Jamie");
        assert_eq!(state.study_groups, default_study_groups());
        assert_eq!(state.achievements, default_achievements());
        assert_eq!(state.lesson_progress.len(), 1);
        assert_eq!(state.lesson_progress[0].completed_at, None);
        assert!(state.call_history.is_empty());
    }

    #[test]
    fn test_invalid_list_items_fall_back() {
        let state = merge_with_defaults(json!({
            "studyGroups": [{ "id": "9", "members": -3 }]
        }));

        assert_eq!(state.study_groups, default_study_groups());
    }

    #[test]
    fn test_invalid_user_field_falls_back_to_default_user() {
        let state = merge_with_defaults(json!({
            "user": { "streak": "many" },
            "settings": { "darkMode": true }
        }));

        assert_eq!(state.user, AppState::default().user);
        assert!(state.settings.dark_mode);
    }

    #[test]
    fn test_empty_group_list_is_kept() {
        let state = merge_with_defaults(json!({ "studyGroups": [] }));
        assert!(state.study_groups.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let storage = MemoryStorage::new();
        let mut state = AppState::default();
        state = reduce(
            state,
            Action::SetLessonScore {
                lesson_id: "lesson-1".to_string(),
                score: 72,
            },
        );
        state = reduce(state, Action::UnlockAchievement("week-streak".to_string()));
        state = reduce(state, Action::LeaveGroup("2".to_string()));

        save_state(&storage, KEY, &state).unwrap();
        assert_eq!(load_state(&storage, KEY), state);
    }

    #[test]
    fn test_saved_blob_uses_camel_case() {
        let storage = MemoryStorage::new();
        save_state(&storage, KEY, &AppState::default()).unwrap();

        let raw = storage.get_item(KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("lessonProgress").is_some());
        assert!(value.get("studyGroups").is_some());
        assert_eq!(value["user"]["totalPoints"], 1250);
        assert_eq!(value["studyGroups"][0]["isJoined"], true);
    }
}
