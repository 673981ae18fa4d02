//! Properties of the reducer that must hold for any sequence of actions

use chrono::Utc;
use liblingua::app::CALL_HISTORY_LIMIT;
use liblingua::persistence::merge_with_defaults;
use liblingua::types::{
    CallDirection, CallStatus, NewCallEntry, NewGroupMessage, NewStudyGroup, SettingsPatch,
    UserPatch,
};
use std::collections::HashSet;
use liblingua::{reduce, Action, AppState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn call(contact: String) -> NewCallEntry {
    NewCallEntry {
        contact_name: contact,
        direction: CallDirection::Outgoing,
        duration: "02:30".to_string(),
        timestamp: Utc::now(),
        status: CallStatus::Missed,
    }
}

fn message(group_id: &str, text: &str) -> NewGroupMessage {
    NewGroupMessage {
        group_id: group_id.to_string(),
        user_id: "user-1".to_string(),
        user_name: "Alex Johnson".to_string(),
        user_country: "🇺🇸".to_string(),
        message: text.to_string(),
        timestamp: Utc::now(),
        avatar: "AJ".to_string(),
        is_me: true,
    }
}

fn score(lesson_id: &str, score: u8) -> Action {
    Action::SetLessonScore {
        lesson_id: lesson_id.to_string(),
        score,
    }
}

/// A random action drawn from every variant except `LoadState`
fn random_action(rng: &mut StdRng, step: usize) -> Action {
    let group_id = ["1", "2", "missing"][rng.gen_range(0..3)].to_string();
    match rng.gen_range(0..14) {
        0 => score(&format!("lesson-{}", rng.gen_range(0..5)), rng.gen_range(0..=100)),
        1 => Action::JoinGroup(group_id),
        2 | 3 => Action::LeaveGroup(group_id),
        4 => Action::AddMessage {
            message: message(&group_id, &format!("message {}", step)),
            group_id,
        },
        5 => Action::AddCallHistory(call(format!("contact-{}", step))),
        6 => Action::UnlockAchievement(
            ["first-lesson", "week-streak", "social-butterfly"][rng.gen_range(0..3)].to_string(),
        ),
        7 => Action::IncrementStreak,
        8 => Action::ResetStreak,
        9 => Action::CreateGroup(NewStudyGroup {
            name: format!("Group {}", step),
            language: "Korean".to_string(),
            level: "Beginner".to_string(),
            members: rng.gen_range(0..3),
            online: 0,
            description: String::new(),
            country: "International".to_string(),
        }),
        10 => Action::DeleteGroup(group_id),
        11 => Action::UpdateUser(UserPatch {
            name: Some(format!("Learner {}", step)),
            current_language: Some("Portuguese".to_string()),
            streak: rng.gen_bool(0.5).then(|| rng.gen_range(0..30)),
            ..UserPatch::default()
        }),
        12 => Action::UpdateSettings(SettingsPatch {
            dark_mode: Some(rng.gen_bool(0.5)),
            language: rng.gen_bool(0.3).then(|| "Spanish".to_string()),
            ..SettingsPatch::default()
        }),
        _ => Action::AddCallHistory(call(format!("contact-{}", step))),
    }
}

#[test]
fn test_call_history_bounded_and_newest_first() {
    let mut rng = StdRng::seed_from_u64(7);
    for run in 0..20 {
        let mut state = AppState::default();
        let mut last_contact = None;
        for step in 0..rng.gen_range(1..80) {
            let action = random_action(&mut rng, step);
            if let Action::AddCallHistory(entry) = &action {
                last_contact = Some(entry.contact_name.clone());
            }
            state = reduce(state, action);

            assert!(state.call_history.len() <= CALL_HISTORY_LIMIT, "run {}", run);
            if let Some(contact) = &last_contact {
                assert_eq!(&state.call_history[0].contact_name, contact);
            }
        }
    }
}

#[test]
fn test_members_never_negative_and_join_leave_consistent() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut state = AppState::default();

    for _ in 0..500 {
        let group_id = if rng.gen_bool(0.5) { "1" } else { "2" }.to_string();
        let before = state.group(&group_id).unwrap().members;
        let joining = rng.gen_bool(0.3);

        state = if joining {
            reduce(state, Action::JoinGroup(group_id.clone()))
        } else {
            reduce(state, Action::LeaveGroup(group_id.clone()))
        };

        let group = state.group(&group_id).unwrap();
        assert_eq!(group.is_joined, joining);
        if joining {
            assert_eq!(group.members, before + 1);
        } else {
            assert_eq!(group.members, before.saturating_sub(1));
        }
    }
}

#[test]
fn test_resubmitting_a_lesson_keeps_one_entry() {
    let state = reduce(AppState::default(), score("lesson-7", 95));
    let state = reduce(state, score("lesson-7", 30));

    let entries: Vec<_> = state
        .lesson_progress
        .iter()
        .filter(|p| p.lesson_id == "lesson-7")
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score, 30);
    assert!(!entries[0].completed);
}

#[test]
fn test_points_and_streak_for_every_score() {
    for value in 0..=100u8 {
        let before = AppState::default();
        let after = reduce(before.clone(), score("lesson-1", value));

        if value >= 70 {
            assert_eq!(after.user.streak, before.user.streak + 1, "score {}", value);
            assert_eq!(after.user.total_points, before.user.total_points + 50);
        } else {
            assert_eq!(after.user.streak, before.user.streak, "score {}", value);
            assert_eq!(after.user.total_points, before.user.total_points + 25);
        }
    }
}

#[test]
fn test_serialize_merge_round_trip() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = HashSet::new();
    for _ in 0..10 {
        let mut state = AppState::default();
        for step in 0..60 {
            let action = random_action(&mut rng, step);
            seen.insert(action.name());
            state = reduce(state, action);
        }

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(merge_with_defaults(value), state);
    }

    // Every variant except LoadState was exercised
    assert_eq!(seen.len(), 12, "covered: {:?}", seen);
}

#[test]
fn test_round_trip_after_deleting_every_group() {
    let mut state = AppState::default();
    state = reduce(state, Action::DeleteGroup("1".to_string()));
    state = reduce(state, Action::DeleteGroup("2".to_string()));
    state = reduce(
        state,
        Action::UpdateUser(UserPatch {
            name: Some("Sam Park".to_string()),
            ..UserPatch::default()
        }),
    );
    state = reduce(
        state,
        Action::UpdateSettings(SettingsPatch {
            sound_effects: Some(false),
            ..SettingsPatch::default()
        }),
    );
    assert!(state.study_groups.is_empty());

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(merge_with_defaults(value), state);
}

#[test]
fn test_scenario_first_passing_lesson() {
    let state = reduce(AppState::default(), score("lesson-1", 85));

    assert_eq!(state.lesson_progress.len(), 1);
    assert_eq!(state.lesson_progress[0].lesson_id, "lesson-1");
    assert!(state.lesson_progress[0].completed);
    assert_eq!(state.lesson_progress[0].score, 85);
    assert_eq!(state.user.total_points, 1300);
    assert_eq!(state.user.streak, 6);
}

#[test]
fn test_scenario_leave_twice() {
    let state = reduce(AppState::default(), Action::LeaveGroup("1".to_string()));
    let group = state.group("1").unwrap();
    assert!(!group.is_joined);
    assert_eq!(group.members, 11);

    let state = reduce(state, Action::LeaveGroup("1".to_string()));
    let group = state.group("1").unwrap();
    assert!(!group.is_joined);
    assert_eq!(group.members, 10);
}

#[test]
fn test_scenario_message_then_delete() {
    let state = reduce(
        AppState::default(),
        Action::AddMessage {
            group_id: "1".to_string(),
            message: message("1", "¿Qué tal?"),
        },
    );
    assert_eq!(state.group("1").unwrap().messages.len(), 3);

    let state = reduce(state, Action::DeleteGroup("1".to_string()));
    assert!(state.group("1").is_none());
    assert!(!serde_json::to_string(&state).unwrap().contains("¿Qué tal?"));
}
