/// A request was rejected before any state changed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or only whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A difficulty weight outside `1..=3`.
    #[error("difficulty must be between 1 and 3, got {0}")]
    DifficultyOutOfRange(u8),

    /// An allocation was requested with a zero hour budget.
    #[error("the monthly hour budget must be greater than zero")]
    ZeroBudget,

    /// No subject row carries the given name.
    #[error("no subject named '{0}'")]
    UnknownSubject(String),

    /// An hour index outside `1..=allocated` for the subject.
    #[error("hour {hour} is out of range for '{subject}' (1..={allocated})")]
    HourOutOfRange {
        /// The subject the hour was addressed to.
        subject: String,
        /// The rejected hour index.
        hour: u32,
        /// The subject's current allocation.
        allocated: u32,
    },

    /// A review date would fall outside the supported calendar.
    #[error("review dates for {0} fall outside the supported calendar")]
    DateOutOfRange(chrono::NaiveDate),

    /// Stored review dates that are not the ones derived from the creation
    /// date.
    #[error("review dates do not follow the schedule for a topic created on {0}")]
    ReviewDatesMismatch(chrono::NaiveDate),

    /// A session key that cannot be used to address a session.
    #[error("invalid session key '{0}': use letters, digits, '-', '_' or '.'")]
    InvalidSessionKey(String),
}

/// An allocation could not be computed. The subject set is left unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AllocationError {
    /// There are no subjects to share the budget between.
    #[error("no subjects registered to allocate study time to")]
    NoSubjects,

    /// The difficulty weights sum to zero.
    #[error("the difficulty weights sum to zero, nothing to allocate by")]
    ZeroWeight,
}

/// Any error raised by the planning engine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`AllocationError`].
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
