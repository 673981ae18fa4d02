//! lingua - Track lessons, study groups and calls from the command line

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use liblingua::identity::FileIdentity;
use liblingua::logging::LoggingConfig;
use liblingua::lessons::{self, Lesson};
use liblingua::stats::ProgressSummary;
use liblingua::types::{CallDirection, CallStatus, NewCallEntry, SettingsPatch, UserPatch};
use liblingua::validation::{self, NewGroupForm};
use liblingua::{Action, Config, FileStorage, LinguaError, Store};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "lingua")]
#[command(version, about = "Track lessons, study groups and calls for LinguaConnect")]
#[command(long_about = r#"Track lessons, study groups and calls for LinguaConnect.

Every command loads the saved state, applies one change and saves the
whole state again.

EXAMPLES:
    # Browse the lessons and record a score
    lingua lesson list
    lingua lesson score lesson-1 85

    # Take a quiz: read the questions, then answer them in order
    lingua lesson show lesson-2
    lingua quiz lesson-2 cinco 12

    # Study groups
    lingua group list --search spanish
    lingua group create --name "Italian Evenings" --language Italian
    lingua group leave 1
    lingua message 2 "Bonjour tout le monde !"

    # Dashboard figures as JSON
    lingua stats --format json

CONFIGURATION:
    ~/.config/lingua/config.toml, or the file named by LINGUA_CONFIG.
    Set LINGUA_IDENTITY to a JSON profile to sync the signed-in user.

EXIT CODES:
    0 - Success
    1 - Storage or configuration error
    3 - Invalid input
"#)]
struct Cli {
    /// Path to config file (defaults to LINGUA_CONFIG or ~/.config/lingua/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file describing the signed-in user
    #[arg(long, global = true, env = "LINGUA_IDENTITY", value_name = "FILE")]
    identity: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the full state
    Show,

    /// Show dashboard progress figures
    Stats,

    /// Lesson commands
    #[command(subcommand)]
    Lesson(LessonCommand),

    /// Answer a lesson's questions and record the score
    Quiz {
        lesson_id: String,

        /// Answers in question order (an empty string leaves a question unanswered)
        answers: Vec<String>,
    },

    /// Study group commands
    #[command(subcommand)]
    Group(GroupCommand),

    /// Send a message to a study group
    Message { group_id: String, text: String },

    /// Achievement commands
    #[command(subcommand)]
    Achievement(AchievementCommand),

    /// Change settings (prints them when no option is given)
    Settings(SettingsArgs),

    /// Call history commands
    #[command(subcommand)]
    Call(CallCommand),

    /// Profile commands
    #[command(subcommand)]
    User(UserCommand),

    /// Streak commands
    #[command(subcommand)]
    Streak(StreakCommand),

    /// Delete the saved state and start over
    Reset,
}

#[derive(Subcommand, Debug)]
enum LessonCommand {
    /// List the built-in lessons with your results
    List,
    /// Show a lesson's questions
    Show { lesson_id: String },
    /// Record a score (0-100) for any lesson
    Score {
        lesson_id: String,
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    /// List study groups
    List {
        /// Only groups whose name or language contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    Join { group_id: String },
    Leave { group_id: String },
    /// Delete a group and all of its messages
    Delete { group_id: String },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        language: String,
        #[arg(long)]
        level: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
enum AchievementCommand {
    List,
    Unlock { achievement_id: String },
}

#[derive(Args, Debug)]
struct SettingsArgs {
    #[arg(long)]
    notifications: Option<bool>,
    #[arg(long)]
    sound_effects: Option<bool>,
    #[arg(long)]
    dark_mode: Option<bool>,
    /// Interface language
    #[arg(long)]
    language: Option<String>,
}

#[derive(Subcommand, Debug)]
enum CallCommand {
    List,
    Add {
        contact: String,
        #[arg(long, value_enum, default_value_t = DirectionArg::Outgoing)]
        direction: DirectionArg,
        /// Display duration, e.g. 12:34
        #[arg(long, default_value = "00:00")]
        duration: String,
        #[arg(long, value_enum, default_value_t = StatusArg::Completed)]
        status: StatusArg,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        current_language: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum StreakCommand {
    Reset,
    Increment,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DirectionArg {
    Incoming,
    Outgoing,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Completed,
    Missed,
}

impl From<DirectionArg> for CallDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Incoming => CallDirection::Incoming,
            DirectionArg::Outgoing => CallDirection::Outgoing,
        }
    }
}

impl From<StatusArg> for CallStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Completed => CallStatus::Completed,
            StatusArg::Missed => CallStatus::Missed,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<LinguaError>()
            .map(LinguaError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    LoggingConfig::new(config.logging.format, config.logging.level.clone(), cli.verbose).init();

    let storage_dir = config.expanded_storage_path();
    tracing::debug!(dir = %storage_dir.display(), key = %config.storage.key, "Opening store");
    let mut store = Store::open(Box::new(FileStorage::new(storage_dir)), config.storage.key.clone());

    if let Some(path) = &cli.identity {
        store
            .sync_identity(&FileIdentity::new(path))
            .context("Failed to save synced profile")?;
    }

    execute(&mut store, cli.command, cli.format)
}

fn execute(store: &mut Store, command: Command, format: OutputFormat) -> Result<()> {
    match command {
        Command::Show => output::print_state(store.state(), format),

        Command::Stats => output::print_stats(&ProgressSummary::from_state(store.state()), format),

        Command::Lesson(LessonCommand::List) => {
            output::print_lessons(&lessons::overview(store.state()), format)
        }

        Command::Lesson(LessonCommand::Show { lesson_id }) => {
            output::print_lesson(require_lesson(&lesson_id)?, format)
        }

        Command::Lesson(LessonCommand::Score { lesson_id, score }) => {
            let score = validation::validate_score(score)?;
            record_score(store, lesson_id, score, format)
        }

        Command::Quiz { lesson_id, answers } => {
            let lesson = require_lesson(&lesson_id)?;
            if answers.len() > lesson.questions.len() {
                return Err(LinguaError::InvalidInput(format!(
                    "{} has {} questions, got {} answers",
                    lesson.id,
                    lesson.questions.len(),
                    answers.len()
                ))
                .into());
            }

            let given: Vec<Option<&str>> = answers
                .iter()
                .map(|a| Some(a.trim()).filter(|a| !a.is_empty()))
                .collect();
            if format == OutputFormat::Text {
                output::print_quiz_review(lesson, &given);
            }
            record_score(store, lesson_id, lesson.score(&given), format)
        }

        Command::Group(group) => execute_group(store, group, format),

        Command::Message { group_id, text } => {
            require_group(store, &group_id)?;
            let message = validation::compose_message(&store.state().user, &group_id, &text, Utc::now())?;
            store.dispatch(Action::AddMessage {
                group_id: group_id.clone(),
                message,
            })?;
            output::print_message("Message sent!", format);
            Ok(())
        }

        Command::Achievement(AchievementCommand::List) => {
            output::print_achievements(&store.state().achievements, format)
        }

        Command::Achievement(AchievementCommand::Unlock { achievement_id }) => {
            let already = match store.state().achievement(&achievement_id) {
                Some(achievement) => achievement.unlocked,
                None => {
                    return Err(LinguaError::InvalidInput(format!(
                        "No achievement with id '{}'",
                        achievement_id
                    ))
                    .into())
                }
            };
            store.dispatch(Action::UnlockAchievement(achievement_id.clone()))?;
            if already {
                output::print_message(&format!("'{}' was already unlocked", achievement_id), format);
            } else {
                output::print_message(&format!("Unlocked '{}'", achievement_id), format);
            }
            Ok(())
        }

        Command::Settings(args) => {
            let patch = SettingsPatch {
                notifications: args.notifications,
                sound_effects: args.sound_effects,
                dark_mode: args.dark_mode,
                language: args.language,
            };
            if !patch.is_empty() {
                store.dispatch(Action::UpdateSettings(patch))?;
            }
            output::print_settings(&store.state().settings, format)
        }

        Command::Call(CallCommand::List) => output::print_calls(&store.state().call_history, format),

        Command::Call(CallCommand::Add {
            contact,
            direction,
            duration,
            status,
        }) => {
            let contact = contact.trim().to_string();
            if contact.is_empty() {
                return Err(LinguaError::InvalidInput("Contact name cannot be empty".to_string()).into());
            }
            store.dispatch(Action::AddCallHistory(NewCallEntry {
                contact_name: contact,
                direction: direction.into(),
                duration,
                timestamp: Utc::now(),
                status: status.into(),
            }))?;
            output::print_calls(&store.state().call_history[..1], format)
        }

        Command::User(UserCommand::Show) => output::print_user(&store.state().user, format),

        Command::User(UserCommand::Update {
            name,
            email,
            avatar,
            level,
            current_language,
        }) => {
            let patch = UserPatch {
                name,
                email,
                avatar,
                level,
                current_language,
                ..UserPatch::default()
            };
            if patch.is_empty() {
                return Err(LinguaError::InvalidInput("Nothing to update".to_string()).into());
            }
            store.dispatch(Action::UpdateUser(patch))?;
            output::print_user(&store.state().user, format)
        }

        Command::Streak(StreakCommand::Reset) => {
            store.dispatch(Action::ResetStreak)?;
            output::print_user(&store.state().user, format)
        }

        Command::Streak(StreakCommand::Increment) => {
            store.dispatch(Action::IncrementStreak)?;
            output::print_user(&store.state().user, format)
        }

        Command::Reset => {
            store.reset()?;
            output::print_message("Saved state cleared", format);
            Ok(())
        }
    }
}

fn execute_group(store: &mut Store, command: GroupCommand, format: OutputFormat) -> Result<()> {
    match command {
        GroupCommand::List { search } => {
            let state = store.state();
            let groups = match search.as_deref() {
                Some(query) => state.search_groups(query),
                None => state.study_groups.iter().collect(),
            };
            output::print_groups(&groups, format)
        }

        GroupCommand::Join { group_id } => {
            require_group(store, &group_id)?;
            store.dispatch(Action::JoinGroup(group_id))?;
            output::print_message("Joined group successfully!", format);
            Ok(())
        }

        GroupCommand::Leave { group_id } => {
            require_group(store, &group_id)?;
            store.dispatch(Action::LeaveGroup(group_id))?;
            output::print_message("Left group successfully!", format);
            Ok(())
        }

        GroupCommand::Delete { group_id } => {
            require_group(store, &group_id)?;
            store.dispatch(Action::DeleteGroup(group_id))?;
            output::print_message("Group deleted successfully!", format);
            Ok(())
        }

        GroupCommand::Create {
            name,
            language,
            level,
            description,
        } => {
            let fields = validation::validate_new_group(NewGroupForm {
                name,
                language,
                level,
                description,
            })?;
            store.dispatch(Action::CreateGroup(fields))?;
            let created: Vec<_> = store.state().study_groups.last().into_iter().collect();
            output::print_groups(&created, format)
        }
    }
}

fn record_score(store: &mut Store, lesson_id: String, score: u8, format: OutputFormat) -> Result<()> {
    if lesson_id.trim().is_empty() {
        return Err(LinguaError::InvalidInput("Lesson id cannot be empty".to_string()).into());
    }
    store.dispatch(Action::SetLessonScore {
        lesson_id: lesson_id.clone(),
        score,
    })?;

    let state = store.state();
    match state.lesson(&lesson_id) {
        Some(progress) => output::print_lesson_result(progress, &state.user, format),
        None => Ok(()),
    }
}

fn require_lesson(lesson_id: &str) -> Result<&'static Lesson> {
    lessons::find(lesson_id)
        .ok_or_else(|| LinguaError::InvalidInput(format!("No lesson with id '{}'", lesson_id)).into())
}

/// Actions only ever name groups the user can see
fn require_group(store: &Store, group_id: &str) -> Result<()> {
    if store.state().group(group_id).is_none() {
        return Err(LinguaError::InvalidInput(format!("No study group with id '{}'", group_id)).into());
    }
    Ok(())
}
