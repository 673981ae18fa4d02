//! LinguaConnect - state store for a language-learning client
//!
//! This library holds the whole client state of the application (profile,
//! lesson progress, study groups, achievements, settings and call history)
//! behind an action-driven reducer, and persists it to a local key-value
//! storage after every change.

pub mod app;
pub mod config;
pub mod error;
pub mod identity;
pub mod ids;
pub mod lessons;
pub mod logging;
pub mod persistence;
pub mod quiz;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use app::{reduce, Action, AppState};
pub use config::Config;
pub use error::{LinguaError, Result};
pub use identity::{ExternalUser, IdentityProvider, NoIdentity};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::Store;
pub use types::{
    Achievement, CallDirection, CallHistoryEntry, CallStatus, GroupMessage, LessonProgress,
    Settings, StudyGroup, User,
};
