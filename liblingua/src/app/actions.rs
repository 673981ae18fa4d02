//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.

use super::state::AppState;
use crate::types::{NewCallEntry, NewGroupMessage, NewStudyGroup, SettingsPatch, UserPatch};

/// Actions that trigger state transitions
///
/// Actions are plain data describing what should happen. The reducer
/// (see `reducer.rs`) is responsible for applying them to state. Actions
/// that name a group, lesson or achievement that does not exist are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === Lessons ===
    /// Record a quiz result, replacing any earlier result for the lesson
    SetLessonScore { lesson_id: String, score: u8 },

    // === Study groups ===
    JoinGroup(String),

    /// Leave a group. Clearing a selected-group pointer is up to the caller.
    LeaveGroup(String),

    CreateGroup(NewStudyGroup),

    /// Remove a group together with all of its messages
    DeleteGroup(String),

    /// Append a chat message to a group
    AddMessage {
        group_id: String,
        message: NewGroupMessage,
    },

    // === Achievements ===
    UnlockAchievement(String),

    // === Settings / profile ===
    UpdateSettings(SettingsPatch),

    /// Merge profile fields, e.g. from the identity provider
    UpdateUser(UserPatch),

    ResetStreak,
    IncrementStreak,

    // === Calls ===
    AddCallHistory(NewCallEntry),

    // === Rehydration ===
    /// Replace the whole state tree
    LoadState(Box<AppState>),
}

impl Action {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetLessonScore { .. } => "set_lesson_score",
            Action::JoinGroup(_) => "join_group",
            Action::LeaveGroup(_) => "leave_group",
            Action::CreateGroup(_) => "create_group",
            Action::DeleteGroup(_) => "delete_group",
            Action::AddMessage { .. } => "add_message",
            Action::UnlockAchievement(_) => "unlock_achievement",
            Action::UpdateSettings(_) => "update_settings",
            Action::UpdateUser(_) => "update_user",
            Action::ResetStreak => "reset_streak",
            Action::IncrementStreak => "increment_streak",
            Action::AddCallHistory(_) => "add_call_history",
            Action::LoadState(_) => "load_state",
        }
    }
}
