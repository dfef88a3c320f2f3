use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::models::settings::Settings;

/// Environment variable that relocates both the config and data directories.
pub const HOME_ENV_VAR: &str = "RUST_PLANNER_HOME";

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "planner.db";

/// Where the application keeps its configuration and database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Use `RUST_PLANNER_HOME` when set, otherwise the platform directories.
    pub fn resolve() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::rooted_at(PathBuf::from(home)));
        }

        let dirs = ProjectDirs::from("com", "Ken24T", "RustPlanner")
            .context("Could not determine a home directory for configuration")?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Keep everything under a single directory.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.to_path_buf(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// The database location, honouring `database_path` from settings.
    pub fn database_file(&self, settings: &Settings) -> PathBuf {
        settings
            .database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATABASE_FILE))
    }
}
