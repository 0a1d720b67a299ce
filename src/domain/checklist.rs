//! Per-hour completion tracking.
//!
//! Each entry is keyed by subject name and hour index. An entry that has
//! never been set reads as not completed, so resetting a subject simply
//! forgets its entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Completion state of every study hour, grouped by subject name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    entries: BTreeMap<String, BTreeMap<u32, bool>>,
}

impl Checklist {
    /// Record the completion state of one hour.
    ///
    /// Range checks are the caller's responsibility; see
    /// [`AllocationEngine::toggle_hour`](super::AllocationEngine::toggle_hour).
    pub fn set(&mut self, subject: &str, hour: u32, completed: bool) {
        self.entries
            .entry(subject.to_string())
            .or_default()
            .insert(hour, completed);
    }

    /// Whether an hour has been marked completed.
    #[must_use]
    pub fn is_complete(&self, subject: &str, hour: u32) -> bool {
        self.entries
            .get(subject)
            .and_then(|hours| hours.get(&hour))
            .copied()
            .unwrap_or(false)
    }

    /// Forget every entry recorded for `subject`.
    pub fn reset_subject(&mut self, subject: &str) {
        self.entries.remove(subject);
    }

    /// Number of completed hours in `1..=limit`.
    #[must_use]
    pub fn completed(&self, subject: &str, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        self.entries.get(subject).map_or(0, |hours| {
            let count = hours
                .range(1..=limit)
                .filter(|(_, completed)| **completed)
                .count();
            u32::try_from(count).unwrap_or(u32::MAX)
        })
    }

    /// Drop entries for hours beyond `limit`.
    pub(crate) fn truncate(&mut self, subject: &str, limit: u32) {
        if let Some(hours) = self.entries.get_mut(subject) {
            hours.retain(|&hour, _| hour <= limit);
            if hours.is_empty() {
                self.entries.remove(subject);
            }
        }
    }

    /// Names of the subjects with recorded entries.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
