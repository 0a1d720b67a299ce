use serde::{Deserialize, Serialize};

use super::ValidationError;

/// The accepted range of difficulty weights.
pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=3;

/// One row of the monthly study plan.
///
/// Names are not required to be unique. Operations addressing a subject by
/// name act on every row carrying that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Case-sensitive name of the subject.
    pub name: String,

    /// Relative study effort, used as the allocation weight.
    pub difficulty: u8,

    /// Monthly hours assigned to the subject.
    ///
    /// Holds the caller-supplied figure until the plan is allocated.
    pub allocated_hours: u32,
}

impl Subject {
    /// Create a validated subject row.
    ///
    /// The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the difficulty is outside
    /// [`DIFFICULTY_RANGE`].
    pub fn new(name: &str, difficulty: u8, hours: u32) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if !DIFFICULTY_RANGE.contains(&difficulty) {
            return Err(ValidationError::DifficultyOutOfRange(difficulty));
        }

        Ok(Self {
            name: name.to_string(),
            difficulty,
            allocated_hours: hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn new_keeps_supplied_hours() {
        let subject = Subject::new(" Physics ", 2, 12).unwrap();
        assert_eq!(
            subject,
            Subject {
                name: "Physics".to_string(),
                difficulty: 2,
                allocated_hours: 12,
            }
        );
    }

    #[test_case(0; "below range")]
    #[test_case(4; "above range")]
    #[test_case(u8::MAX; "far above range")]
    fn difficulty_outside_range_is_rejected(difficulty: u8) {
        assert_eq!(
            Subject::new("Physics", difficulty, 0),
            Err(ValidationError::DifficultyOutOfRange(difficulty))
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            Subject::new("  ", 1, 0),
            Err(ValidationError::EmptyField("name"))
        );
    }
}
