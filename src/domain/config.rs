use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a study planner directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The session used when none is given on the command line or in the
    /// environment.
    default_session: String,

    /// How many hours are shown per row of a checklist.
    checklist_columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_session: default_session(),
            checklist_columns: default_checklist_columns(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the default session key.
    #[must_use]
    pub fn default_session(&self) -> &str {
        &self.default_session
    }

    /// Sets the default session key.
    pub fn set_default_session(&mut self, session: String) {
        self.default_session = session;
    }

    /// Returns the number of checklist hours per row.
    #[must_use]
    pub const fn checklist_columns(&self) -> usize {
        self.checklist_columns
    }

    /// Sets the number of checklist hours per row.
    ///
    /// Zero is treated as one.
    pub fn set_checklist_columns(&mut self, columns: usize) {
        self.checklist_columns = columns.max(1);
    }
}

fn default_session() -> String {
    "default".to_string()
}

const fn default_checklist_columns() -> usize {
    5
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_session")]
        default_session: String,

        #[serde(default = "default_checklist_columns")]
        checklist_columns: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_session,
                checklist_columns,
            } => Self {
                default_session,
                checklist_columns: checklist_columns.max(1),
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_session: config.default_session,
            checklist_columns: config.checklist_columns,
        }
    }
}
