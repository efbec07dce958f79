//! Configuration loading and management.

use std::path::{Path, PathBuf};

use activity_core::ConfidenceFilter;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Time zone used to render start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

const ENV_PREFIX: &str = "ACTIVITY_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Filter selected when a session starts.
    pub default_filter: ConfidenceFilter,
    /// Time zone for the STARTED column.
    pub time_zone: DisplayZone,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::layered(dirs_config_path().as_deref(), config_path, ENV_PREFIX).extract()
    }

    /// Builds the provider stack: defaults, `config_dir/config.toml`,
    /// `config_path`, then `env_prefix` variables.
    fn layered(config_dir: Option<&Path>, config_path: Option<&Path>, env_prefix: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = config_dir {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ACTIVITY_*)
        figment.merge(Env::prefixed(env_prefix))
    }
}

/// Returns the platform-specific config directory for activity.
///
/// On Linux: `~/.config/activity`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("activity"))
}
