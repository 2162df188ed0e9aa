use serde::{Deserialize, Serialize};

use crate::kernel::constants::DEFAULT_PATH_SEPARATOR;

/// Tunables shared by every store an owner opens.
///
/// Serializable so a host can embed it in its own configuration file;
/// missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Separator splitting hierarchical keys into path segments.
    pub path_separator: char,
    /// Indent flat-object files instead of writing them on one line.
    pub pretty_json: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR,
            pretty_json: true,
        }
    }
}
