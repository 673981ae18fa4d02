//! Core types for LinguaConnect
//!
//! Field names serialize in camelCase so the persisted blob keeps the layout
//! the web client has always written to local storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Initials glyph or an image URL
    pub avatar: String,
    pub level: String,
    pub current_language: String,
    pub joined_date: String,
    /// Consecutive learning days
    pub streak: u32,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub lesson_id: String,
    pub completed: bool,
    /// Percentage, 0-100
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    pub id: String,
    /// Back-reference to the owning group
    pub group_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_country: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub avatar: String,
    #[serde(default)]
    pub is_me: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroup {
    pub id: String,
    pub name: String,
    pub language: String,
    pub level: String,
    pub members: u32,
    pub online: u32,
    pub description: String,
    pub country: String,
    /// Human display string ("now", "2 min ago")
    pub last_active: String,
    pub is_joined: bool,
    #[serde(default)]
    pub messages: Vec<GroupMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Completed,
    Missed,
}

impl std::fmt::Display for CallDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallDirection::Incoming => write!(f, "incoming"),
            CallDirection::Outgoing => write!(f, "outgoing"),
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Completed => write!(f, "completed"),
            CallStatus::Missed => write!(f, "missed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHistoryEntry {
    pub id: String,
    pub contact_name: String,
    #[serde(rename = "type")]
    pub direction: CallDirection,
    /// Display duration such as "12:34"
    pub duration: String,
    pub timestamp: DateTime<Utc>,
    pub status: CallStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub notifications: bool,
    pub sound_effects: bool,
    pub dark_mode: bool,
    /// Interface language
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            sound_effects: true,
            dark_mode: false,
            language: "English".to_string(),
        }
    }
}

// ============================================================================
// Action payloads
// ============================================================================

/// Fields for a group about to be created; the store assigns the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyGroup {
    pub name: String,
    pub language: String,
    pub level: String,
    pub members: u32,
    pub online: u32,
    pub description: String,
    pub country: String,
}

impl NewStudyGroup {
    pub(crate) fn into_group(self, id: String) -> StudyGroup {
        StudyGroup {
            id,
            name: self.name,
            language: self.language,
            level: self.level,
            members: self.members,
            online: self.online,
            description: self.description,
            country: self.country,
            last_active: "now".to_string(),
            is_joined: true,
            messages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroupMessage {
    pub group_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_country: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub avatar: String,
    #[serde(default)]
    pub is_me: bool,
}

impl NewGroupMessage {
    pub(crate) fn into_message(self, id: String) -> GroupMessage {
        GroupMessage {
            id,
            group_id: self.group_id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_country: self.user_country,
            message: self.message,
            timestamp: self.timestamp,
            avatar: self.avatar,
            is_me: self.is_me,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCallEntry {
    pub contact_name: String,
    #[serde(rename = "type")]
    pub direction: CallDirection,
    pub duration: String,
    pub timestamp: DateTime<Utc>,
    pub status: CallStatus,
}

impl NewCallEntry {
    pub(crate) fn into_entry(self, id: String) -> CallHistoryEntry {
        CallHistoryEntry {
            id,
            contact_name: self.contact_name,
            direction: self.direction,
            duration: self.duration,
            timestamp: self.timestamp,
            status: self.status,
        }
    }
}

/// Partial user profile; `Some` fields overwrite, `None` fields are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }

    pub fn apply(self, user: User) -> User {
        User {
            id: self.id.unwrap_or(user.id),
            name: self.name.unwrap_or(user.name),
            email: self.email.unwrap_or(user.email),
            avatar: self.avatar.unwrap_or(user.avatar),
            level: self.level.unwrap_or(user.level),
            current_language: self.current_language.unwrap_or(user.current_language),
            joined_date: self.joined_date.unwrap_or(user.joined_date),
            streak: self.streak.unwrap_or(user.streak),
            total_points: self.total_points.unwrap_or(user.total_points),
        }
    }
}

/// Partial settings; `Some` fields overwrite, `None` fields are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_effects: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }

    pub fn apply(self, settings: Settings) -> Settings {
        Settings {
            notifications: self.notifications.unwrap_or(settings.notifications),
            sound_effects: self.sound_effects.unwrap_or(settings.sound_effects),
            dark_mode: self.dark_mode.unwrap_or(settings.dark_mode),
            language: self.language.unwrap_or(settings.language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_entry_uses_type_key() {
        let entry = CallHistoryEntry {
            id: "call-1".to_string(),
            contact_name: "Maria".to_string(),
            direction: CallDirection::Outgoing,
            duration: "05:12".to_string(),
            timestamp: "2024-02-01T09:30:00Z".parse().unwrap(),
            status: CallStatus::Completed,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "outgoing");
        assert_eq!(json["contactName"], "Maria");
        assert_eq!(json["status"], "completed");
    }

    #[test]
    fn test_message_without_is_me_defaults_false() {
        let json = r#"{
            "id": "msg-1",
            "groupId": "1",
            "userId": "user-2",
            "userName": "Maria Rodriguez",
            "userCountry": "MX",
            "message": "Hola",
            "timestamp": "2024-01-15T10:00:00Z",
            "avatar": "MR"
        }"#;

        let message: GroupMessage = serde_json::from_str(json).unwrap();
        assert!(!message.is_me);
    }

    #[test]
    fn test_user_patch_only_overwrites_some_fields() {
        let user = User {
            id: "user-1".to_string(),
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            avatar: "A".to_string(),
            level: "Beginner".to_string(),
            current_language: "Spanish".to_string(),
            joined_date: "2024-01-15".to_string(),
            streak: 3,
            total_points: 100,
        };

        let patch = UserPatch {
            name: Some("Alex J".to_string()),
            streak: Some(9),
            ..UserPatch::default()
        };
        let updated = patch.apply(user.clone());

        assert_eq!(updated.name, "Alex J");
        assert_eq!(updated.streak, 9);
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.total_points, user.total_points);
    }

    #[test]
    fn test_settings_patch_is_empty() {
        assert!(SettingsPatch::default().is_empty());
        let patch = SettingsPatch {
            dark_mode: Some(true),
            ..SettingsPatch::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.apply(Settings::default()).dark_mode);
    }
}
