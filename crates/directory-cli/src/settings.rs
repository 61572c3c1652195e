//! Settings loaded from a TOML file.
//!
//! Settings live in the platform config folder:
//! - macOS: ~/Library/Application Support/com.company-directory.Company-Directory/
//! - Windows: %APPDATA%/company-directory/Company Directory/config/
//! - Linux: ~/.config/companydirectory/
//!
//! A missing or unparseable file falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use directory_model::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS, SortKey};
use directory_persistence::{FileStore, default_durable_dir, default_session_dir};
use directory_query::EngineConfig;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "company-directory";
const APP_NAME: &str = "Company Directory";
const CONFIG_FILENAME: &str = "settings.toml";

/// Source used when none is configured.
pub const DEFAULT_SOURCE: &str = "data/companies.json";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL or file path of the companies document.
    pub source: String,
    pub page_size: usize,
    pub search_debounce_ms: u64,
    /// Sort order used when `--sort` is not given.
    pub default_sort: String,
    /// Overrides the platform data folder for durable storage.
    pub data_dir: Option<PathBuf>,
    /// Overrides the temp folder for session storage.
    pub session_dir: Option<PathBuf>,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            default_sort: SortKey::default().as_str().to_string(),
            data_dir: None,
            session_dir: None,
            http_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            page_size: self.page_size.max(1),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    /// Unknown values fall back to name order.
    pub fn default_sort(&self) -> SortKey {
        SortKey::parse_lenient(&self.default_sort)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Durable storage folder, if one can be determined.
    pub fn durable_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(default_durable_dir)
    }

    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(default_session_dir)
    }

    /// File storage under the configured folders.
    ///
    /// Falls back to the session folder for durable data when no data
    /// folder can be determined.
    pub fn file_store(&self) -> FileStore {
        let session_dir = self.session_dir();
        let durable_dir = self.durable_dir().unwrap_or_else(|| {
            tracing::warn!("could not determine data folder, favorites will not survive a reboot");
            session_dir.clone()
        });
        FileStore::in_dirs(&durable_dir, &session_dir)
    }
}

/// Path of the settings file in the platform config folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit`, or from the platform config folder.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };
    load_settings_from(&path)
}

/// Load settings from a specific file.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "could not parse settings, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "could not read settings, using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.engine_config(), EngineConfig::default());
        assert_eq!(settings.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str("page_size = 10\n").unwrap();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.source, DEFAULT_SOURCE);
        assert_eq!(settings.search_debounce_ms, 300);
    }

    #[test]
    fn zero_page_size_is_raised() {
        let settings = Settings {
            page_size: 0,
            ..Settings::default()
        };
        assert_eq!(settings.engine_config().page_size, 1);
    }
}
