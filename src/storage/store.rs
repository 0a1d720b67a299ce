use std::{collections::HashMap, io};

use super::Snapshot;
use crate::domain::{Session, SessionKey};

/// An error raised by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying medium could not be read or written.
    #[error("failed to access session storage: {0}")]
    Io(#[from] io::Error),

    /// Stored data could not be parsed or serialized.
    #[error("malformed session data: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Loads and saves session state by key.
///
/// Implementations must round-trip every field of a [`Snapshot`]. Loading a
/// key that was never saved yields an empty snapshot.
pub trait Store {
    /// Load the state stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if stored state exists but cannot be read.
    fn load(&self, key: &SessionKey) -> Result<Snapshot, StoreError>;

    /// Replace the state stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&mut self, key: &SessionKey, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Load a whole session.
    ///
    /// # Errors
    ///
    /// See [`Store::load`].
    fn load_session(&self, key: SessionKey) -> Result<Session, StoreError> {
        let snapshot = self.load(&key)?;
        Ok(snapshot.into_session(key))
    }

    /// Save a whole session under its own key.
    ///
    /// # Errors
    ///
    /// See [`Store::save`].
    fn save_session(&mut self, session: &Session) -> Result<(), StoreError> {
        self.save(session.key(), &Snapshot::from(session))
    }
}

/// A [`Store`] holding sessions in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: HashMap<String, Snapshot>,
}

impl MemoryStore {
    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &SessionKey) -> Result<Snapshot, StoreError> {
        Ok(self.sessions.get(key.as_str()).cloned().unwrap_or_default())
    }

    fn save(&mut self, key: &SessionKey, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.sessions
            .insert(key.as_str().to_string(), snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn key(s: &str) -> SessionKey {
        s.parse().unwrap()
    }

    #[test]
    fn unknown_key_loads_empty() {
        let store = MemoryStore::default();
        assert_eq!(store.load(&key("alice")).unwrap(), Snapshot::default());
    }

    #[test]
    fn sessions_are_isolated() {
        let mut store = MemoryStore::default();
        let mut alice = store.load_session(key("alice")).unwrap();
        alice.plan.add_subject("Maths", 3, 10).unwrap();
        alice
            .reviews
            .schedule("Maths", "Sets", NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .unwrap();
        store.save_session(&alice).unwrap();

        let bob = store.load_session(key("bob")).unwrap();
        assert!(bob.plan.subjects().is_empty());
        assert!(bob.reviews.topics().is_empty());

        assert_eq!(store.load_session(key("alice")).unwrap(), alice);
        assert_eq!(store.len(), 1);
    }
}
