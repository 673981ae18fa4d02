//! Quiz scoring
//!
//! A lesson is a short list of questions with one accepted answer each. The
//! resulting percentage is what gets recorded with `Action::SetLessonScore`.

/// Minimum score that counts a lesson as completed
pub const PASSING_SCORE: u8 = 70;

/// Points awarded for a passing attempt
pub const PASS_POINTS: u32 = 50;

/// Points awarded for any other attempt
pub const FAIL_POINTS: u32 = 25;

pub fn is_passing(score: u8) -> bool {
    score >= PASSING_SCORE
}

/// Points a single attempt is worth
pub fn points_for(score: u8) -> u32 {
    if is_passing(score) {
        PASS_POINTS
    } else {
        FAIL_POINTS
    }
}

/// Whether a single answer matches the accepted one, ignoring case
pub fn answer_matches(expected: &str, given: &str) -> bool {
    given.trim().to_lowercase() == expected.to_lowercase()
}

/// Score answers against the expected ones as a rounded percentage
///
/// Answers match when equal ignoring case. Unanswered questions count as
/// wrong, extra answers are ignored. An empty quiz scores 0.
pub fn score_answers(expected: &[&str], given: &[Option<&str>]) -> u8 {
    if expected.is_empty() {
        return 0;
    }

    let correct = expected
        .iter()
        .enumerate()
        .filter(|(i, want)| {
            given
                .get(*i)
                .copied()
                .flatten()
                .map(|got| answer_matches(want, got))
                .unwrap_or(false)
        })
        .count();

    ((correct as f64 / expected.len() as f64) * 100.0).round() as u8
}
