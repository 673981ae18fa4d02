//! Progress figures derived from the state for the dashboard

use serde::Serialize;

use crate::app::AppState;
use crate::types::CallStatus;

/// Number of lessons in the course catalogue
pub const TOTAL_LESSONS: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub completed_lessons: usize,
    pub total_lessons: usize,
    /// Rounded share of completed lessons, 0-100
    pub progress_percentage: u8,
    /// Rounded mean of the recorded scores
    pub average_score: Option<u8>,
    pub joined_groups: usize,
    pub unlocked_achievements: usize,
    pub total_achievements: usize,
    pub streak: u32,
    pub total_points: u32,
    pub missed_calls: usize,
}

impl ProgressSummary {
    pub fn from_state(state: &AppState) -> Self {
        let completed_lessons = state.lesson_progress.iter().filter(|p| p.completed).count();
        let progress_percentage = ((completed_lessons as f64 / TOTAL_LESSONS as f64) * 100.0)
            .round()
            .min(100.0) as u8;

        let average_score = if state.lesson_progress.is_empty() {
            None
        } else {
            let sum: u32 = state.lesson_progress.iter().map(|p| u32::from(p.score)).sum();
            Some((sum as f64 / state.lesson_progress.len() as f64).round() as u8)
        };

        Self {
            completed_lessons,
            total_lessons: TOTAL_LESSONS,
            progress_percentage,
            average_score,
            joined_groups: state.joined_groups().count(),
            unlocked_achievements: state.achievements.iter().filter(|a| a.unlocked).count(),
            total_achievements: state.achievements.len(),
            streak: state.user.streak,
            total_points: state.user.total_points,
            missed_calls: state
                .call_history
                .iter()
                .filter(|c| c.status == CallStatus::Missed)
                .count(),
        }
    }
}
