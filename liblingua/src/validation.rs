//! Input checks done before an action is built
//!
//! Anything rejected here is reported back to the user and never reaches
//! the store.

use chrono::{DateTime, Utc};

use crate::error::{LinguaError, Result};
use crate::types::{NewGroupMessage, NewStudyGroup, User};

/// Level assigned when the form leaves it empty
pub const DEFAULT_GROUP_LEVEL: &str = "Beginner";

/// Country label for groups created from the client
pub const DEFAULT_GROUP_COUNTRY: &str = "International";

/// Country flag attached to the user's own messages
pub const DEFAULT_USER_COUNTRY: &str = "🇺🇸";

/// What the "create group" form collects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGroupForm {
    pub name: String,
    pub language: String,
    pub level: Option<String>,
    pub description: String,
}

/// Check a create-group form and turn it into action fields
///
/// The creator is the only member, and is online.
pub fn validate_new_group(form: NewGroupForm) -> Result<NewStudyGroup> {
    let name = form.name.trim();
    let language = form.language.trim();
    if name.is_empty() || language.is_empty() {
        return Err(LinguaError::InvalidInput(
            "Please fill in all required fields".to_string(),
        ));
    }

    let level = form
        .level
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_GROUP_LEVEL);

    Ok(NewStudyGroup {
        name: name.to_string(),
        language: language.to_string(),
        level: level.to_string(),
        members: 1,
        online: 1,
        description: form.description.trim().to_string(),
        country: DEFAULT_GROUP_COUNTRY.to_string(),
    })
}

/// Trim a chat message, rejecting blank ones
pub fn validate_message(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LinguaError::InvalidInput("Message cannot be empty".to_string()));
    }
    Ok(text.to_string())
}

/// Narrow a raw score to a percentage
pub fn validate_score(score: i64) -> Result<u8> {
    match u8::try_from(score) {
        Ok(score) if score <= 100 => Ok(score),
        _ => Err(LinguaError::InvalidInput(format!(
            "Score must be between 0 and 100, got {}",
            score
        ))),
    }
}

/// Build a message authored by the current user
pub fn compose_message(
    user: &User,
    group_id: &str,
    text: &str,
    now: DateTime<Utc>,
) -> Result<NewGroupMessage> {
    let message = validate_message(text)?;
    Ok(NewGroupMessage {
        group_id: group_id.to_string(),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        user_country: DEFAULT_USER_COUNTRY.to_string(),
        message,
        timestamp: now,
        avatar: user.avatar.clone(),
        is_me: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;

    #[test]
    fn test_valid_group_form() {
        let form = NewGroupForm {
            name: "  Italian Evenings ".to_string(),
            language: "Italian".to_string(),
            level: None,
            description: "Casual chat".to_string(),
        };

        let group = validate_new_group(form).unwrap();
        assert_eq!(group.name, "Italian Evenings");
        assert_eq!(group.level, DEFAULT_GROUP_LEVEL);
        assert_eq!(group.members, 1);
        assert_eq!(group.online, 1);
        assert_eq!(group.country, "International");
    }

    #[test]
    fn test_group_form_requires_name_and_language() {
        let missing_name = NewGroupForm {
            name: "   ".to_string(),
            language: "Italian".to_string(),
            ..NewGroupForm::default()
        };
        let err = validate_new_group(missing_name).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("required fields"));

        let missing_language = NewGroupForm {
            name: "Italian Evenings".to_string(),
            ..NewGroupForm::default()
        };
        assert!(validate_new_group(missing_language).is_err());
    }

    #[test]
    fn test_message_validation() {
        assert_eq!(validate_message("  ciao \n").unwrap(), "ciao");
        assert!(validate_message(" \t ").is_err());
    }

    #[test]
    fn test_score_validation() {
        assert_eq!(validate_score(0).unwrap(), 0);
        assert_eq!(validate_score(100).unwrap(), 100);
        assert!(validate_score(101).is_err());
        assert!(validate_score(300).is_err());
        assert!(validate_score(-5).is_err());
        assert!(validate_score(i64::MAX).is_err());
    }

    #[test]
    fn test_compose_message_uses_profile() {
        let state = AppState::default();
        let now = Utc::now();

        let message = compose_message(&state.user, "2", " Bonjour ! ", now).unwrap();
        assert_eq!(message.group_id, "2");
        assert_eq!(message.user_id, "user-1");
        assert_eq!(message.user_name, "Alex Johnson");
        assert_eq!(message.avatar, "AJ");
        assert_eq!(message.message, "Bonjour !");
        assert_eq!(message.timestamp, now);
        assert!(message.is_me);
    }
}
