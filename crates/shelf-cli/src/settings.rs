//! Settings file.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/com.shelf.shelf/
//! - Windows: %APPDATA%/shelf/shelf/config/
//! - Linux: ~/.config/shelf/
//!
//! A missing or unreadable file falls back to defaults. Command-line flags
//! override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shelf_api::ApiConfig;
use shelf_core::{DEFAULT_PAGE_SIZE, LoadOptions};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "shelf";
const APP_NAME: &str = "shelf";
const CONFIG_FILENAME: &str = "settings.toml";

/// All persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub loader: LoadOptions,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Books per page.
    pub page_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Platform default settings path, if the platform has a config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// The explicit path when given, else the platform default.
pub fn resolve_settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(default_settings_path)
}

/// Load settings from `path`.
///
/// Returns default settings if:
/// - no path is known
/// - the file doesn't exist
/// - the file cannot be read or parsed
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        tracing::warn!("could not determine settings path, using defaults");
        return Settings::default();
    };

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to parse settings, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

/// Save settings to `path`, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let content = settings.to_toml()?;
    fs::write(path, content).with_context(|| format!("write settings {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}

impl Settings {
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize settings")
    }
}
