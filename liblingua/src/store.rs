//! Store: the application context
//!
//! `Store` owns the current state snapshot together with the storage it is
//! persisted to. It is constructed once at startup and handed to whatever
//! renders the state; that side only ever calls [`Store::dispatch`].
//!
//! # Example
//!
//! ```
//! use liblingua::{Action, MemoryStorage, Store};
//!
//! let mut store = Store::open(Box::new(MemoryStorage::new()), "linguaconnect-state");
//! store.dispatch(Action::JoinGroup("2".to_string()))?;
//! assert!(store.state().group("2").unwrap().is_joined);
//! # Ok::<(), liblingua::LinguaError>(())
//! ```

use crate::app::{reduce, Action, AppState};
use crate::error::Result;
use crate::identity::IdentityProvider;
use crate::persistence;
use crate::storage::KeyValueStorage;

pub struct Store {
    state: AppState,
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl Store {
    /// Rehydrate from `storage`, falling back to the default state
    pub fn open(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = persistence::load_state(storage.as_ref(), &key);
        tracing::debug!(backend = storage.backend_name(), key = %key, "Store opened");
        Self { state, storage, key }
    }

    /// Start from a known state without reading storage
    pub fn with_state(storage: Box<dyn KeyValueStorage>, key: impl Into<String>, state: AppState) -> Self {
        Self {
            state,
            storage,
            key: key.into(),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reduce `action` into the state and persist the new snapshot
    ///
    /// The snapshot is written only when the action changed something. The
    /// in-memory state advances even when the write fails; the write error
    /// is returned to the caller.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let name = action.name();
        let next = reduce(self.state.clone(), action);

        if next == self.state {
            tracing::debug!(action = name, "Action left state unchanged");
            return Ok(());
        }

        self.state = next;
        tracing::debug!(action = name, "State updated");
        self.persist()
    }

    /// Merge the signed-in user's profile, if the provider has one
    ///
    /// Returns whether a user was available.
    pub fn sync_identity(&mut self, provider: &dyn IdentityProvider) -> Result<bool> {
        match provider.current_user() {
            Some(user) => {
                tracing::info!(user_id = %user.id, "Syncing profile from identity provider");
                self.dispatch(Action::UpdateUser(user.to_user_patch()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the stored blob and go back to the default state
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        self.state = AppState::default();
        tracing::info!(key = %self.key, "Stored state cleared");
        Ok(())
    }

    /// Write the current snapshot to storage
    pub fn persist(&self) -> Result<()> {
        persistence::save_state(self.storage.as_ref(), &self.key, &self.state).map_err(|e| {
            tracing::error!(key = %self.key, error = %e, "Failed to persist state");
            e
        })
    }

    /// Flush and tear down, handing back the final state
    pub fn close(self) -> Result<AppState> {
        self.persist()?;
        Ok(self.state)
    }
}
