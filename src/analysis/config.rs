//! Validation settings.
//!
//! Carried over the wire as the server's initialization options and mapped
//! onto CLI flags; both diagnostics classes are on by default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Report references whose target file does not exist.
    pub file_exist_errors: bool,

    /// Report workflow/action files stored under the wrong directory.
    pub file_placement_errors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_exist_errors: true,
            file_placement_errors: true,
        }
    }
}

impl Settings {
    /// Read settings from the client's initialization options, falling back
    /// to defaults when options are absent or not in the expected shape.
    pub fn from_initialization_options(options: Option<serde_json::Value>) -> Self {
        options
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }
}
