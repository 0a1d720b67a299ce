use std::{fmt, str::FromStr};

use non_empty_string::NonEmptyString;

use super::{AllocationEngine, ReviewScheduler, ValidationError};

/// An opaque key identifying one learner's session.
///
/// Keys are supplied by whatever authenticated the learner. They are limited
/// to ASCII letters, digits, `-`, `_` and `.`, and may not start with `.`, so
/// that a store can use them to name files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionKey(NonEmptyString);

impl SessionKey {
    /// Validate a session key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, starts with `.`, or contains any
    /// other character than ASCII letters, digits, `-`, `_` and `.`.
    pub fn new(key: String) -> Result<Self, ValidationError> {
        let valid = !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(ValidationError::InvalidSessionKey(key));
        }

        NonEmptyString::new(key)
            .map(Self)
            .map_err(ValidationError::InvalidSessionKey)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for SessionKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one learner is studying: scheduled reviews and the monthly
/// plan with its checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    key: SessionKey,
    /// Spaced-repetition reviews.
    pub reviews: ReviewScheduler,
    /// The monthly plan and its checklist.
    pub plan: AllocationEngine,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            reviews: ReviewScheduler::default(),
            plan: AllocationEngine::default(),
        }
    }

    /// The key this session is stored under.
    #[must_use]
    pub const fn key(&self) -> &SessionKey {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("alice"; "letters")]
    #[test_case("user-42_b.v2"; "mixed punctuation")]
    fn valid_keys(key: &str) {
        assert_eq!(SessionKey::from_str(key).unwrap().as_str(), key);
    }

    #[test_case(""; "empty")]
    #[test_case("../etc"; "path traversal")]
    #[test_case(".hidden"; "leading dot")]
    #[test_case("a/b"; "separator")]
    #[test_case("two words"; "whitespace")]
    fn invalid_keys(key: &str) {
        assert_eq!(
            SessionKey::from_str(key),
            Err(ValidationError::InvalidSessionKey(key.to_string()))
        );
    }
}
