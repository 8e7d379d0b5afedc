//! CLI configuration from an optional YAML file plus environment
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{GroupMode, Role, SortField};

/// Configuration for the CLI: where the task API lives, who the acting
/// user is, and board defaults.
///
/// Everything is optional; with no file and no environment the CLI runs
/// in demo mode against the seeded in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Base URL of the task API. Unset means demo mode.
    pub api_url: Option<String>,
    /// Bearer token for the task API.
    pub api_token: Option<String>,
    /// The acting user's ID, passed explicitly into assignee-filter
    /// resolution.
    pub user_id: Option<u64>,
    /// The acting user's role; members are always scoped to their own
    /// tasks.
    pub role: Option<Role>,
    /// Default bucketing mode for `board`.
    pub group_by: Option<GroupMode>,
    /// Default sort field for `board` and `list`.
    pub sort: Option<SortField>,
}

impl BoardConfig {
    /// File the CLI looks for in the working directory.
    pub const FILE_NAME: &'static str = "taskboard.yaml";

    /// Loads configuration: the YAML file when present, then environment
    /// overrides (`TASKBOARD_URL`, `TASKBOARD_TOKEN`). A missing file is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, String> {
        let path = Path::new(Self::FILE_NAME);
        let mut config =
            if path.exists() { Self::from_file(path)? } else { Self::default() };
        config.apply_env();
        Ok(config)
    }

    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TASKBOARD_URL") {
            if !url.is_empty() {
                self.api_url = Some(url);
            }
        }
        if let Ok(token) = std::env::var("TASKBOARD_TOKEN") {
            if !token.is_empty() {
                self.api_token = Some(token);
            }
        }
    }
}
