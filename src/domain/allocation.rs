//! Difficulty-weighted allocation of a monthly study budget.
//!
//! Each subject receives `total * difficulty / sum(difficulty)` hours using
//! truncating integer division. The allocated hours can therefore add up to
//! less than the budget; the shortfall is reported, never redistributed.

use std::fmt;

use super::{AllocationError, Checklist, PlanError, Subject, ValidationError};

/// Compute the allocation for every subject.
///
/// The returned subjects are in input order, with `allocated_hours` replaced.
///
/// # Errors
///
/// - [`ValidationError::ZeroBudget`] if `total_hours` is zero
/// - [`AllocationError::NoSubjects`] if `subjects` is empty
/// - [`AllocationError::ZeroWeight`] if the difficulties sum to zero
pub fn allocate(subjects: &[Subject], total_hours: u32) -> Result<Vec<Subject>, PlanError> {
    if total_hours == 0 {
        return Err(PlanError::Validation(ValidationError::ZeroBudget));
    }
    if subjects.is_empty() {
        return Err(AllocationError::NoSubjects.into());
    }

    let weight: u64 = subjects.iter().map(|s| u64::from(s.difficulty)).sum();
    if weight == 0 {
        return Err(AllocationError::ZeroWeight.into());
    }

    Ok(subjects
        .iter()
        .map(|subject| {
            let share = u64::from(total_hours) * u64::from(subject.difficulty) / weight;
            Subject {
                // a share never exceeds the budget it was cut from
                allocated_hours: u32::try_from(share).unwrap_or(total_hours),
                ..subject.clone()
            }
        })
        .collect())
}

/// Remove every subject named exactly `name`.
#[must_use]
pub fn remove_subject(name: &str, subjects: &[Subject]) -> Vec<Subject> {
    subjects
        .iter()
        .filter(|subject| subject.name != name)
        .cloned()
        .collect()
}

/// Progress through a subject's allocated hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Hours marked completed.
    pub completed: u32,
    /// Hours allocated.
    pub total: u32,
}

impl Progress {
    /// Whether every allocated hour is completed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// The monthly study plan: its subjects and their hour checklists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationEngine {
    subjects: Vec<Subject>,
    checklist: Checklist,
}

impl AllocationEngine {
    /// Create an engine over existing plan state.
    #[must_use]
    pub const fn new(subjects: Vec<Subject>, checklist: Checklist) -> Self {
        Self {
            subjects,
            checklist,
        }
    }

    /// Append a subject with a caller-supplied initial allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the difficulty is outside
    /// `1..=3`. Nothing is appended in that case.
    pub fn add_subject(
        &mut self,
        name: &str,
        difficulty: u8,
        hours: u32,
    ) -> Result<&Subject, ValidationError> {
        let subject = Subject::new(name, difficulty, hours)?;
        tracing::debug!(name = %subject.name, difficulty, hours, "added subject");
        self.subjects.push(subject);
        Ok(&self.subjects[self.subjects.len() - 1])
    }

    /// Recompute every subject's allocation from `total_hours`.
    ///
    /// Either every subject is updated or none is. Checklist entries beyond a
    /// subject's new allocation are dropped.
    ///
    /// # Errors
    ///
    /// See [`allocate`].
    pub fn allocate(&mut self, total_hours: u32) -> Result<&[Subject], PlanError> {
        let allocated = allocate(&self.subjects, total_hours).inspect_err(|e| {
            tracing::warn!("allocation of {total_hours}h not applied: {e}");
        })?;
        self.subjects = allocated;

        let names: Vec<String> = self.checklist.subjects().map(str::to_string).collect();
        for name in names {
            let limit = self.allocated_hours(&name).unwrap_or(0);
            self.checklist.truncate(&name, limit);
        }

        tracing::debug!(
            total_hours,
            unallocated = self.unallocated_hours(total_hours),
            "allocated study time"
        );
        Ok(&self.subjects)
    }

    /// Remove every subject named `name`, returning how many rows were
    /// removed.
    ///
    /// Names are trimmed before lookup, here and in every other method that
    /// addresses a subject by name. The checklist for `name` is forgotten
    /// along with the rows.
    pub fn remove_subject(&mut self, name: &str) -> usize {
        let name = name.trim();
        let before = self.subjects.len();
        self.subjects = remove_subject(name, &self.subjects);
        let removed = before - self.subjects.len();
        if removed > 0 {
            self.checklist.reset_subject(name);
        }
        tracing::debug!(name, removed, "removed subject");
        removed
    }

    /// The hours allocated to `name`.
    ///
    /// When several rows share the name, the largest allocation is returned.
    #[must_use]
    pub fn allocated_hours(&self, name: &str) -> Option<u32> {
        let name = name.trim();
        self.subjects
            .iter()
            .filter(|subject| subject.name == name)
            .map(|subject| subject.allocated_hours)
            .max()
    }

    /// Mark an hour of study as completed or pending.
    ///
    /// # Errors
    ///
    /// Returns an error if no subject is named `name`, or if `hour` is not in
    /// `1..=allocated_hours`.
    pub fn toggle_hour(&mut self, name: &str, hour: u32, value: bool) -> Result<(), ValidationError> {
        let name = name.trim();
        let allocated = self
            .allocated_hours(name)
            .ok_or_else(|| ValidationError::UnknownSubject(name.to_string()))?;

        if hour == 0 || hour > allocated {
            return Err(ValidationError::HourOutOfRange {
                subject: name.to_string(),
                hour,
                allocated,
            });
        }

        tracing::trace!(name, hour, value, "toggled hour");
        self.checklist.set(name, hour, value);
        Ok(())
    }

    /// Whether an hour is completed. Unknown entries are not.
    #[must_use]
    pub fn is_complete(&self, name: &str, hour: u32) -> bool {
        self.checklist.is_complete(name.trim(), hour)
    }

    /// Return every hour of `name` to pending.
    pub fn reset_subject(&mut self, name: &str) {
        self.checklist.reset_subject(name.trim());
    }

    /// Return every hour of every subject to pending.
    pub fn reset_all(&mut self) {
        for subject in &self.subjects {
            self.checklist.reset_subject(&subject.name);
        }
    }

    /// Completed and allocated hours for `name`.
    #[must_use]
    pub fn progress(&self, name: &str) -> Option<Progress> {
        let name = name.trim();
        self.allocated_hours(name).map(|total| Progress {
            completed: self.checklist.completed(name, total),
            total,
        })
    }

    /// Hours of `total_hours` not assigned to any subject.
    #[must_use]
    pub fn unallocated_hours(&self, total_hours: u32) -> u32 {
        let allocated: u64 = self
            .subjects
            .iter()
            .map(|subject| u64::from(subject.allocated_hours))
            .sum();
        u32::try_from(u64::from(total_hours).saturating_sub(allocated)).unwrap_or(total_hours)
    }

    /// The subjects, in insertion order.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// The checklist state.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Consume the engine, returning its subjects and checklist.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Subject>, Checklist) {
        (self.subjects, self.checklist)
    }
}
