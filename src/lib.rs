//! Study Planning
//!
//! Spaced-repetition review scheduling and difficulty-weighted allocation of
//! a monthly study budget, with an hourly checklist to track progress.

pub mod domain;
pub use domain::{
    AllocationEngine, AllocationError, Checklist, Config, PlanError, Progress, ReviewScheduler,
    Session, SessionKey, Subject, Topic, ValidationError,
};

/// Persistence and export collaborators.
pub mod storage;
pub use storage::{Directory, MemoryStore, Snapshot, Store, StoreError};
