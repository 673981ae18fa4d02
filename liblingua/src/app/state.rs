//! Application state
//!
//! Immutable state structure. All state transitions happen through the
//! reducer (see `reducer.rs`).

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    Achievement, CallHistoryEntry, GroupMessage, LessonProgress, Settings, StudyGroup, User,
};

/// Root application state
///
/// This is the single source of truth for the entire application and the
/// exact shape written to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: User,

    /// One entry per lesson
    pub lesson_progress: Vec<LessonProgress>,

    pub study_groups: Vec<StudyGroup>,

    pub achievements: Vec<Achievement>,

    pub settings: Settings,

    /// Most recent call first, bounded by `CALL_HISTORY_LIMIT`
    pub call_history: Vec<CallHistoryEntry>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: default_user(),
            lesson_progress: Vec::new(),
            study_groups: default_study_groups(),
            achievements: default_achievements(),
            settings: Settings::default(),
            call_history: Vec::new(),
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, group_id: &str) -> Option<&StudyGroup> {
        self.study_groups.iter().find(|g| g.id == group_id)
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonProgress> {
        self.lesson_progress.iter().find(|p| p.lesson_id == lesson_id)
    }

    pub fn achievement(&self, achievement_id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == achievement_id)
    }

    pub fn joined_groups(&self) -> impl Iterator<Item = &StudyGroup> {
        self.study_groups.iter().filter(|g| g.is_joined)
    }

    /// Groups whose name or language contains `query`, ignoring case
    pub fn search_groups(&self, query: &str) -> Vec<&StudyGroup> {
        let needle = query.to_lowercase();
        self.study_groups
            .iter()
            .filter(|g| {
                g.name.to_lowercase().contains(&needle)
                    || g.language.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Default profile shown before the identity provider has answered
pub fn default_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "Alex Johnson".to_string(),
        email: "alex@example.com".to_string(),
        avatar: "AJ".to_string(),
        level: "Intermediate".to_string(),
        current_language: "Spanish".to_string(),
        joined_date: "2024-01-15".to_string(),
        streak: 5,
        total_points: 1250,
    }
}

pub fn default_study_groups() -> Vec<StudyGroup> {
    vec![
        StudyGroup {
            id: "1".to_string(),
            name: "Spanish Beginners 🇪🇸".to_string(),
            language: "Spanish".to_string(),
            level: "Beginner".to_string(),
            members: 12,
            online: 5,
            description: "Practice basic Spanish conversations and help each other learn!"
                .to_string(),
            country: "International".to_string(),
            last_active: "2 min ago".to_string(),
            is_joined: true,
            messages: vec![
                GroupMessage {
                    id: "msg-1".to_string(),
                    group_id: "1".to_string(),
                    user_id: "user-2".to_string(),
                    user_name: "Maria Rodriguez".to_string(),
                    user_country: "🇲🇽".to_string(),
                    message: "¡Hola everyone! How do you say \"I am excited to learn\" in Spanish?"
                        .to_string(),
                    timestamp: seed_time(9, 58),
                    avatar: "MR".to_string(),
                    is_me: false,
                },
                GroupMessage {
                    id: "msg-2".to_string(),
                    group_id: "1".to_string(),
                    user_id: "user-1".to_string(),
                    user_name: "Alex Johnson".to_string(),
                    user_country: "🇺🇸".to_string(),
                    message: "\"Estoy emocionado/a de aprender\" - the ending depends on your gender!"
                        .to_string(),
                    timestamp: seed_time(9, 59),
                    avatar: "AJ".to_string(),
                    is_me: true,
                },
            ],
        },
        StudyGroup {
            id: "2".to_string(),
            name: "French Conversation Club 🇫🇷".to_string(),
            language: "French".to_string(),
            level: "Intermediate".to_string(),
            members: 8,
            online: 3,
            description: "Daily French conversations for intermediate learners".to_string(),
            country: "International".to_string(),
            last_active: "5 min ago".to_string(),
            is_joined: true,
            messages: Vec::new(),
        },
    ]
}

pub fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: "first-lesson".to_string(),
            title: "First Steps".to_string(),
            description: "Complete your first lesson".to_string(),
            icon: "🎯".to_string(),
            unlocked: true,
            unlocked_at: Some(seed_time(10, 0)),
            progress: None,
            target: None,
        },
        Achievement {
            id: "week-streak".to_string(),
            title: "Week Warrior".to_string(),
            description: "Maintain a 7-day learning streak".to_string(),
            icon: "🔥".to_string(),
            unlocked: false,
            unlocked_at: None,
            progress: Some(5),
            target: Some(7),
        },
        Achievement {
            id: "social-butterfly".to_string(),
            title: "Social Butterfly".to_string(),
            description: "Join 3 study groups".to_string(),
            icon: "👥".to_string(),
            unlocked: false,
            unlocked_at: None,
            progress: Some(2),
            target: Some(3),
        },
    ]
}

// Seed data is pinned to the join date so two default trees compare equal.
fn seed_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
