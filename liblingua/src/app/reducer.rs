//! Pure reducer function for state transitions
//!
//! The reducer is a function `(State, Action) -> State`. It never fails and
//! never touches storage; persisting the result is the store's job. The only
//! ambient inputs are the wall clock and the random id suffix.

use chrono::Utc;

use super::actions::Action;
use super::state::AppState;
use crate::ids;
use crate::quiz;
use crate::types::{Achievement, LessonProgress, StudyGroup, User};

/// Maximum number of calls kept in the history
pub const CALL_HISTORY_LIMIT: usize = 20;

/// Apply an action to the state and return the new state
///
/// Actions aimed at a group, lesson or achievement that does not exist
/// return the state unchanged.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::LoadState(loaded) => *loaded,

        // === Lessons ===
        Action::SetLessonScore { lesson_id, score } => set_lesson_score(state, lesson_id, score),

        // === Study groups ===
        Action::JoinGroup(group_id) => AppState {
            study_groups: update_group(state.study_groups, &group_id, |group| StudyGroup {
                is_joined: true,
                members: group.members.saturating_add(1),
                ..group
            }),
            ..state
        },

        Action::LeaveGroup(group_id) => AppState {
            study_groups: update_group(state.study_groups, &group_id, |group| StudyGroup {
                is_joined: false,
                members: group.members.saturating_sub(1),
                ..group
            }),
            ..state
        },

        Action::CreateGroup(fields) => {
            let mut study_groups = state.study_groups;
            study_groups.push(fields.into_group(ids::generate("group")));
            AppState {
                study_groups,
                ..state
            }
        }

        Action::DeleteGroup(group_id) => {
            let mut study_groups = state.study_groups;
            study_groups.retain(|g| g.id != group_id);
            AppState {
                study_groups,
                ..state
            }
        }

        Action::AddMessage { group_id, message } => AppState {
            study_groups: update_group(state.study_groups, &group_id, |group| {
                let mut messages = group.messages;
                messages.push(message.into_message(ids::generate("msg")));
                StudyGroup {
                    messages,
                    last_active: "now".to_string(),
                    ..group
                }
            }),
            ..state
        },

        // === Achievements ===
        Action::UnlockAchievement(achievement_id) => {
            let now = Utc::now();
            let achievements = state
                .achievements
                .into_iter()
                .map(|a| {
                    // Already unlocked keeps its original timestamp
                    if a.id == achievement_id && !a.unlocked {
                        Achievement {
                            unlocked: true,
                            unlocked_at: Some(now),
                            ..a
                        }
                    } else {
                        a
                    }
                })
                .collect();
            AppState {
                achievements,
                ..state
            }
        }

        // === Settings / profile ===
        Action::UpdateSettings(patch) => AppState {
            settings: patch.apply(state.settings),
            ..state
        },

        Action::UpdateUser(patch) => AppState {
            user: patch.apply(state.user),
            ..state
        },

        Action::ResetStreak => AppState {
            user: User {
                streak: 0,
                ..state.user
            },
            ..state
        },

        Action::IncrementStreak => AppState {
            user: User {
                streak: state.user.streak.saturating_add(1),
                ..state.user
            },
            ..state
        },

        // === Calls ===
        Action::AddCallHistory(fields) => {
            let mut call_history = Vec::with_capacity(CALL_HISTORY_LIMIT);
            call_history.push(fields.into_entry(ids::generate("call")));
            call_history.extend(
                state
                    .call_history
                    .into_iter()
                    .take(CALL_HISTORY_LIMIT - 1),
            );
            AppState {
                call_history,
                ..state
            }
        }
    }
}

fn set_lesson_score(state: AppState, lesson_id: String, score: u8) -> AppState {
    let score = score.min(100);
    let passed = quiz::is_passing(score);
    let entry = LessonProgress {
        lesson_id,
        completed: passed,
        score,
        completed_at: Some(Utc::now()),
    };

    let mut lesson_progress = state.lesson_progress;
    match lesson_progress
        .iter()
        .position(|p| p.lesson_id == entry.lesson_id)
    {
        Some(index) => lesson_progress[index] = entry,
        None => lesson_progress.push(entry),
    }

    let streak = if passed {
        state.user.streak.saturating_add(1)
    } else {
        state.user.streak
    };

    AppState {
        lesson_progress,
        user: User {
            total_points: state.user.total_points.saturating_add(quiz::points_for(score)),
            streak,
            ..state.user
        },
        ..state
    }
}

/// Replace the group with `group_id` by `f(group)`, leaving the rest as is
fn update_group<F>(groups: Vec<StudyGroup>, group_id: &str, f: F) -> Vec<StudyGroup>
where
    F: FnOnce(StudyGroup) -> StudyGroup,
{
    let mut update = Some(f);
    groups
        .into_iter()
        .map(|group| {
            if group.id == group_id {
                if let Some(update) = update.take() {
                    return update(group);
                }
            }
            group
        })
        .collect()
}
