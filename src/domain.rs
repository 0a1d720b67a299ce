//! Domain models for study planning.
//!
//! This module contains the scheduling and allocation engine: topics and
//! their spaced-repetition reviews, subjects and their weighted share of a
//! monthly budget, and the per-hour checklist.

/// Difficulty-weighted time allocation.
pub mod allocation;
pub use allocation::{AllocationEngine, Progress};

mod checklist;
pub use checklist::Checklist;

mod config;
pub use config::Config;

mod error;
pub use error::{AllocationError, PlanError, ValidationError};

pub mod schedule;
pub use schedule::ReviewScheduler;

mod session;
pub use session::{Session, SessionKey};

mod subject;
pub use subject::{DIFFICULTY_RANGE, Subject};

mod topic;
pub use topic::{INTERVALS, Topic};
