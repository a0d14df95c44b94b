use once_cell::sync::Lazy;
use regex::Regex;
use rustrict::CensorStr;
use validator::ValidationError;

use crate::constants::{DEFAULT_PLAYER_NAME, MAX_PLAYER_NAME_LENGTH};

static PLAYER_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N} _.'-]+$").unwrap()
});

pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_PLAYER_NAME_LENGTH {
        return Err(ValidationError::new("invalid_player_name_length"));
    }
    if !PLAYER_NAME_RE.is_match(trimmed) {
        return Err(ValidationError::new("invalid_player_name_charset"));
    }
    Ok(())
}

/// Name as it should appear on the leaderboard: trimmed and censored, with a
/// default when the input does not validate.
pub fn sanitize_player_name(name: &str) -> String {
    let trimmed = name.trim();
    if validate_player_name(trimmed).is_err() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    if trimmed.is_inappropriate() {
        return trimmed.censor();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_player_name("Alice").is_ok());
        assert!(validate_player_name("  Mary-Jane O'Neil  ").is_ok());
        assert!(validate_player_name("Игрок 42").is_ok());
    }

    #[test]
    fn rejects_empty_overlong_and_bad_charset() {
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_name(&"x".repeat(25)).is_err());
        assert!(validate_player_name("<script>").is_err());
    }

    #[test]
    fn sanitize_falls_back_to_the_default_name() {
        assert_eq!(sanitize_player_name(""), DEFAULT_PLAYER_NAME);
        assert_eq!(sanitize_player_name("\t\n"), DEFAULT_PLAYER_NAME);
        assert_eq!(sanitize_player_name("  Alice "), "Alice");
    }
}
