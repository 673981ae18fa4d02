//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//!
//! The rendering side never mutates state directly; it only builds actions
//! and hands them to the [`Store`](crate::store::Store).

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::{reduce, CALL_HISTORY_LIMIT};
pub use state::AppState;
