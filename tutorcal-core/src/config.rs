//! Global tutorcal configuration.
//!
//! Read from ~/.config/tutorcal/config.toml when that file exists, with
//! `TUTORCAL_*` environment variables layered on top. Nothing is written:
//! a missing file simply means every key takes its default.
//!
//! ```toml
//! # Where users and session requests are stored
//! sessions_file = "~/tutorcal/sessions.toml"
//!
//! # Who to show the calendar for when --user is not given
//! default_user = "@johndoe"
//! ```

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{TutorCalError, TutorCalResult};

static DEFAULT_SESSIONS_FILE: &str = "~/tutorcal/sessions.toml";

fn default_sessions_file() -> PathBuf {
    PathBuf::from(DEFAULT_SESSIONS_FILE)
}

#[derive(Debug, Deserialize, Clone)]
pub struct TutorCalConfig {
    #[serde(default = "default_sessions_file")]
    pub sessions_file: PathBuf,

    /// Username to view the calendar as when none is given
    pub default_user: Option<String>,
}

impl Default for TutorCalConfig {
    fn default() -> Self {
        TutorCalConfig {
            sessions_file: default_sessions_file(),
            default_user: None,
        }
    }
}

impl TutorCalConfig {
    pub fn config_path() -> TutorCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TutorCalError::Config("Could not determine config directory".into()))?
            .join("tutorcal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> TutorCalResult<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        tracing::debug!(sessions_file = %config.sessions_file.display(), "loaded config");
        Ok(config)
    }

    /// Load from `path` if it exists, then apply `TUTORCAL_*` overrides.
    pub fn load_from(path: &Path) -> TutorCalResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("TUTORCAL"))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| TutorCalError::Config(format!("{}: {e}", path.display())))
    }

    /// Sessions file path with `~` expanded.
    pub fn sessions_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.sessions_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }
}
