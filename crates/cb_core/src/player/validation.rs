//! Validation for player identity and character naming

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerValidationError {
    InvalidUsername(String),
    InvalidCharacterName(String),
}

impl fmt::Display for PlayerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerValidationError::InvalidUsername(msg) => write!(f, "Invalid username: {}", msg),
            PlayerValidationError::InvalidCharacterName(msg) => {
                write!(f, "Invalid character name: {}", msg)
            }
        }
    }
}

impl std::error::Error for PlayerValidationError {}

pub struct PlayerValidator;

impl PlayerValidator {
    /// Usernames: 3-20 characters, alphanumeric plus `_` and `-`.
    pub fn validate_username(username: &str) -> Result<(), PlayerValidationError> {
        if username.len() < 3 {
            return Err(PlayerValidationError::InvalidUsername(
                "must be at least 3 characters".to_string(),
            ));
        }
        if username.len() > 20 {
            return Err(PlayerValidationError::InvalidUsername(
                "cannot exceed 20 characters".to_string(),
            ));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(PlayerValidationError::InvalidUsername(
                "only letters, digits, '_' and '-' are allowed".to_string(),
            ));
        }
        Ok(())
    }

    /// Character names: 1-30 characters, letters, digits, spaces and `.-'`.
    pub fn validate_character_name(name: &str) -> Result<(), PlayerValidationError> {
        if name.trim().is_empty() {
            return Err(PlayerValidationError::InvalidCharacterName(
                "cannot be empty".to_string(),
            ));
        }
        if name.len() > 30 {
            return Err(PlayerValidationError::InvalidCharacterName(
                "cannot exceed 30 characters".to_string(),
            ));
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c.is_whitespace() || ".-'".contains(c)) {
            return Err(PlayerValidationError::InvalidCharacterName(
                "contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }
}
