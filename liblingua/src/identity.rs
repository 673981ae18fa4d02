//! External identity collaborator
//!
//! The sign-in provider is optional. When it has a signed-in user, the store
//! merges that profile into its own `User` via `Action::UpdateUser`; when it
//! does not, nothing happens. The store never writes back to the provider.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::UserPatch;

/// Profile as reported by the sign-in provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalUser {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ExternalUser {
    /// Display name: full name, else "first last", else "User"
    pub fn display_name(&self) -> String {
        if let Some(full) = non_blank(&self.full_name) {
            return full.to_string();
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        if joined.is_empty() {
            "User".to_string()
        } else {
            joined.to_string()
        }
    }

    /// Avatar: image URL, else initials, else "U"
    pub fn avatar(&self) -> String {
        if let Some(url) = non_blank(&self.image_url) {
            return url.to_string();
        }
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| non_blank(part).and_then(|s| s.chars().next()))
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials.to_uppercase()
        }
    }

    /// Profile fields to merge into the local user
    pub fn to_user_patch(&self) -> UserPatch {
        UserPatch {
            id: Some(self.id.clone()),
            name: Some(self.display_name()),
            email: Some(
                non_blank(&self.email)
                    .unwrap_or("user@example.com")
                    .to_string(),
            ),
            avatar: Some(self.avatar()),
            ..UserPatch::default()
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Source of the currently signed-in user, if any
pub trait IdentityProvider {
    fn current_user(&self) -> Option<ExternalUser>;
}

/// Provider used when no sign-in service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIdentity;

impl IdentityProvider for NoIdentity {
    fn current_user(&self) -> Option<ExternalUser> {
        None
    }
}

/// Provider that always reports the same user
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub ExternalUser);

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<ExternalUser> {
        Some(self.0.clone())
    }
}

/// Provider backed by a JSON file written by the sign-in flow
///
/// A missing or unreadable file means nobody is signed in.
#[derive(Debug, Clone)]
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IdentityProvider for FileIdentity {
    fn current_user(&self) -> Option<ExternalUser> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "No identity available");
                return None;
            }
        };

        match serde_json::from_str::<ExternalUser>(&content) {
            Ok(user) if !user.id.trim().is_empty() => Some(user),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "Identity file has an empty id, ignoring");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Invalid identity file, ignoring");
                None
            }
        }
    }
}
