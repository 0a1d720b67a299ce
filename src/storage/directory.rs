//! A filesystem backed store of sessions
//!
//! A planner directory keeps its configuration and one YAML file per session
//! under a `.study` folder:
//!
//! ```text
//! .study/
//! ├── config.toml
//! └── sessions/
//!     └── {session-key}.yaml
//! ```

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use super::{Snapshot, Store, StoreError};
use crate::domain::{Config, SessionKey};

/// Name of the folder holding planner state.
pub const STATE_DIR: &str = ".study";

/// A filesystem backed store of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    /// The root of the planner directory.
    root: PathBuf,
}

impl Directory {
    /// Opens a planner directory at the given path.
    ///
    /// Nothing is read or created until a session is loaded or saved.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The root of the planner directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join("config.toml")
    }

    /// Whether the directory has been initialised.
    #[must_use]
    pub fn is_initialised(&self) -> bool {
        self.root.join(STATE_DIR).is_dir()
    }

    /// Loads the configuration, falling back to defaults if it is missing or
    /// invalid.
    #[must_use]
    pub fn config(&self) -> Config {
        Config::load(&self.config_path()).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Config::default()
        })
    }

    /// Path of the file holding the given session.
    #[must_use]
    pub fn session_path(&self, key: &SessionKey) -> PathBuf {
        self.root
            .join(STATE_DIR)
            .join("sessions")
            .join(format!("{key}.yaml"))
    }
}

impl Store for Directory {
    fn load(&self, key: &SessionKey) -> Result<Snapshot, StoreError> {
        let path = self.session_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No session file at {}, starting empty", path.display());
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Loaded session from {}", path.display());
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&mut self, key: &SessionKey, snapshot: &Snapshot) -> Result<(), StoreError> {
        let path = self.session_path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_yaml::to_writer(&mut writer, snapshot)?;
        writer.flush()?;

        tracing::debug!("Saved session to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::{Session, Subject};

    fn setup_temp_directory() -> (TempDir, Directory) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let path = tmp.path().to_path_buf();
        (tmp, Directory::new(path))
    }

    fn key(s: &str) -> SessionKey {
        s.parse().unwrap()
    }

    #[test]
    fn missing_session_loads_empty() {
        let (_tmp, dir) = setup_temp_directory();
        assert_eq!(dir.load(&key("alice")).unwrap(), Snapshot::default());
        assert!(!dir.is_initialised());
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let (_tmp, mut dir) = setup_temp_directory();
        let mut session = Session::new(key("alice"));
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        session.reviews.schedule("Maths", "Algebra", today).unwrap();
        session.reviews.schedule("Maths", "Algebra", today).unwrap();
        session.reviews.schedule("Biology, Cells", "Mitosis \"M\"", today).unwrap();
        session.plan.add_subject("Maths", 3, 0).unwrap();
        session.plan.add_subject("Art", 1, 0).unwrap();
        session.plan.allocate(41).unwrap();
        session.plan.toggle_hour("Maths", 2, true).unwrap();
        session.plan.toggle_hour("Maths", 3, false).unwrap();

        dir.save_session(&session).unwrap();
        let loaded = dir.load_session(key("alice")).unwrap();

        assert_eq!(loaded, session);
        assert!(dir.session_path(&key("alice")).exists());
    }

    #[test]
    fn unvalidated_rows_survive_storage() {
        let (_tmp, mut dir) = setup_temp_directory();
        let snapshot = Snapshot {
            subjects: vec![Subject {
                name: "Legacy".to_string(),
                difficulty: 0,
                allocated_hours: 3,
            }],
            ..Snapshot::default()
        };

        dir.save(&key("legacy"), &snapshot).unwrap();

        assert_eq!(dir.load(&key("legacy")).unwrap(), snapshot);
    }

    #[test]
    fn malformed_session_is_an_error() {
        let (_tmp, dir) = setup_temp_directory();
        let path = dir.session_path(&key("alice"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "_version: '1'\ntopics: 7\n").unwrap();

        assert!(matches!(
            dir.load(&key("alice")),
            Err(StoreError::Yaml(_))
        ));
    }

    #[test]
    fn config_falls_back_to_default() {
        let (_tmp, dir) = setup_temp_directory();
        assert_eq!(dir.config(), Config::default());
    }

    #[test]
    fn config_is_read_from_state_dir() {
        let (_tmp, dir) = setup_temp_directory();
        std::fs::create_dir_all(dir.root().join(STATE_DIR)).unwrap();
        let mut config = Config::default();
        config.set_checklist_columns(3);
        config.save(&dir.config_path()).unwrap();

        assert!(dir.is_initialised());
        assert_eq!(dir.config().checklist_columns(), 3);
    }
}
