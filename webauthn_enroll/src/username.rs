//! Username normalization
//!
//! Usernames stored in the session are raw strings captured at login. Before they
//! are used to look up a user or to fill the WebAuthn user entity they are cleaned:
//! surrounding whitespace is trimmed, ASCII letters are lower-cased and the result
//! must be 1 to 64 characters drawn from `a-z`, `0-9`, `.`, `_`, `@` and `-`.

use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_USERNAME_LEN: usize = 64;

/// A username that passed normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Normalize a raw username, returning `None` if the result is empty or invalid.
    pub fn clean(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().to_ascii_lowercase();

        if cleaned.is_empty() || cleaned.len() > MAX_USERNAME_LEN {
            return None;
        }

        if !cleaned.chars().all(is_allowed_char) {
            return None;
        }

        Some(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '@' | '-')
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_trims_and_lowercases() {
        let name = UserName::clean("  Alice.Smith@Example.com ").unwrap();
        assert_eq!(name.as_str(), "alice.smith@example.com");
    }

    #[test]
    fn test_clean_rejects_empty_and_whitespace() {
        assert_eq!(UserName::clean(""), None);
        assert_eq!(UserName::clean("   \t\n"), None);
    }

    #[test]
    fn test_clean_rejects_disallowed_characters() {
        assert_eq!(UserName::clean("bob smith"), None);
        assert_eq!(UserName::clean("bob/../admin"), None);
        assert_eq!(UserName::clean("bob<script>"), None);
        assert_eq!(UserName::clean("jürgen"), None);
    }

    #[test]
    fn test_clean_length_limit() {
        let max = "a".repeat(MAX_USERNAME_LEN);
        assert!(UserName::clean(&max).is_some());

        let too_long = "a".repeat(MAX_USERNAME_LEN + 1);
        assert_eq!(UserName::clean(&too_long), None);
    }

    #[test]
    fn test_display_matches_inner() {
        let name = UserName::clean("Carol").unwrap();
        assert_eq!(name.to_string(), "carol");
    }

    proptest! {
        #[test]
        fn prop_clean_is_idempotent(raw in "\\PC{0,80}") {
            if let Some(name) = UserName::clean(&raw) {
                let again = UserName::clean(name.as_str());
                prop_assert_eq!(again, Some(name));
            }
        }

        #[test]
        fn prop_valid_names_survive_padding(name in "[a-z0-9._@-]{1,64}") {
            let padded = format!("  {}  ", name.to_uppercase());
            let cleaned = UserName::clean(&padded);
            prop_assert_eq!(cleaned.map(|n| n.as_str().to_string()), Some(name));
        }
    }
}
