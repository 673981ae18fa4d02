//! Text and JSON rendering of store snapshots

use anyhow::Result;
use clap::ValueEnum;
use liblingua::lessons::{Lesson, LessonOverview};
use liblingua::stats::ProgressSummary;
use liblingua::types::{
    Achievement, CallHistoryEntry, LessonProgress, Settings, StudyGroup, User,
};
use liblingua::AppState;
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn print_message(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => println!("{}", serde_json::json!({ "message": message })),
    }
}

pub fn print_state(state: &AppState, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(state);
    }

    print_user_text(&state.user);

    println!();
    println!("Lessons ({})", state.lesson_progress.len());
    for progress in &state.lesson_progress {
        println!("  {}", lesson_line(progress));
    }

    println!();
    println!("Study groups ({})", state.study_groups.len());
    for group in &state.study_groups {
        println!("  {}", group_line(group));
    }

    println!();
    println!("Achievements");
    for achievement in &state.achievements {
        println!("  {}", achievement_line(achievement));
    }

    println!();
    print_settings_text(&state.settings);

    println!();
    println!("Calls ({})", state.call_history.len());
    for call in &state.call_history {
        println!("  {}", call_line(call));
    }
    Ok(())
}

pub fn print_stats(summary: &ProgressSummary, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(summary);
    }

    println!(
        "Lessons completed: {}/{} ({}%)",
        summary.completed_lessons, summary.total_lessons, summary.progress_percentage
    );
    match summary.average_score {
        Some(avg) => println!("Average score:     {}%", avg),
        None => println!("Average score:     -"),
    }
    println!("Streak:            {} days", summary.streak);
    println!("Points:            {}", summary.total_points);
    println!("Groups joined:     {}", summary.joined_groups);
    println!(
        "Achievements:      {}/{}",
        summary.unlocked_achievements, summary.total_achievements
    );
    println!("Missed calls:      {}", summary.missed_calls);
    Ok(())
}

pub fn print_lesson_result(progress: &LessonProgress, user: &User, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "lesson": progress,
            "streak": user.streak,
            "totalPoints": user.total_points,
        }));
    }

    if progress.completed {
        println!("Great job! You scored {}%", progress.score);
    } else {
        println!("You scored {}%. Try again to improve!", progress.score);
    }
    println!("Streak: {} days, points: {}", user.streak, user.total_points);
    Ok(())
}

pub fn print_lessons(lessons: &[LessonOverview], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(lessons);
    }

    for lesson in lessons {
        let result = match (lesson.score, lesson.completed) {
            (Some(score), true) => format!("passed {}%", score),
            (Some(score), false) => format!("failed {}%", score),
            (None, _) => "not started".to_string(),
        };
        println!(
            "{:<10} {:<18} {:<12} {:>6}  {} questions  {}",
            lesson.id,
            lesson.title,
            lesson.difficulty.to_string(),
            lesson.duration,
            lesson.question_count,
            result
        );
    }
    Ok(())
}

/// Questions only; the answer key stays hidden
pub fn print_lesson(lesson: &Lesson, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(lesson);
    }

    println!(
        "{}: {} ({}, {}, {} points)",
        lesson.id, lesson.title, lesson.difficulty, lesson.duration, lesson.points
    );
    println!("{}", lesson.description);
    println!("Topics: {}", lesson.topics.join(", "));
    for (number, question) in lesson.questions.iter().enumerate() {
        println!();
        println!("{}. {} [{}]", number + 1, question.question, question.kind);
        if !question.options.is_empty() {
            println!("   {}", question.options.join(" / "));
        }
    }
    Ok(())
}

/// Per-question feedback after a quiz
pub fn print_quiz_review(lesson: &Lesson, answers: &[Option<&str>]) {
    for (index, question) in lesson.questions.iter().enumerate() {
        match answers.get(index).copied().flatten() {
            Some(answer) if question.is_correct(answer) => {
                println!("{}. correct", index + 1);
            }
            given => {
                println!(
                    "{}. {} (answer: {}) {}",
                    index + 1,
                    given.map(|_| "wrong").unwrap_or("unanswered"),
                    question.correct_answer,
                    question.explanation
                );
            }
        }
    }
}

pub fn print_groups(groups: &[&StudyGroup], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(groups);
    }

    if groups.is_empty() {
        println!("No study groups found");
    }
    for group in groups {
        println!("{}", group_line(group));
    }
    Ok(())
}

pub fn print_achievements(achievements: &[Achievement], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(achievements);
    }
    for achievement in achievements {
        println!("{}", achievement_line(achievement));
    }
    Ok(())
}

pub fn print_settings(settings: &Settings, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(settings);
    }
    print_settings_text(settings);
    Ok(())
}

pub fn print_calls(calls: &[CallHistoryEntry], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(calls);
    }

    if calls.is_empty() {
        println!("No calls yet");
    }
    for call in calls {
        println!("{}", call_line(call));
    }
    Ok(())
}

pub fn print_user(user: &User, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(user);
    }
    print_user_text(user);
    Ok(())
}

fn print_user_text(user: &User) {
    println!("{} <{}> ({})", user.name, user.email, user.id);
    println!(
        "Level: {} | Learning: {} | Streak: {} days | Points: {}",
        user.level, user.current_language, user.streak, user.total_points
    );
}

fn print_settings_text(settings: &Settings) {
    println!(
        "Settings: notifications={} sound_effects={} dark_mode={} language={}",
        on_off(settings.notifications),
        on_off(settings.sound_effects),
        on_off(settings.dark_mode),
        settings.language
    );
}

fn lesson_line(progress: &LessonProgress) -> String {
    let status = if progress.completed { "passed" } else { "failed" };
    format!("{:<12} {:>3}%  {}", progress.lesson_id, progress.score, status)
}

fn group_line(group: &StudyGroup) -> String {
    let joined = if group.is_joined { "[joined]" } else { "        " };
    format!(
        "{} {:<8} {} ({} / {}) - {} members, {} online, {} messages, active {}",
        joined,
        group.id,
        group.name,
        group.language,
        group.level,
        group.members,
        group.online,
        group.messages.len(),
        group.last_active
    )
}

fn achievement_line(achievement: &Achievement) -> String {
    let mark = if achievement.unlocked { "[x]" } else { "[ ]" };
    let progress = match (achievement.progress, achievement.target) {
        (Some(progress), Some(target)) if !achievement.unlocked => format!(" ({}/{})", progress, target),
        _ => String::new(),
    };
    format!(
        "{} {:<18} {}{}",
        mark, achievement.id, achievement.title, progress
    )
}

fn call_line(call: &CallHistoryEntry) -> String {
    format!(
        "{}  {:<8} {:<9} {:>6}  {}",
        call.timestamp.format("%Y-%m-%d %H:%M"),
        call.direction.to_string(),
        call.status.to_string(),
        call.duration,
        call.contact_name
    )
}
