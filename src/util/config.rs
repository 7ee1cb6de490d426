use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{info, warn};

use crate::infra::api::DEFAULT_BASE_URL;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "CargoBookingDesk";
const APP_NAME: &str = "CargoBookingDesk";
const SETTINGS_FILE: &str = "settings.json";

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Read-only settings; the file is optional and never written by the app.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Pause between a successful booking and the form reset.
    pub reset_delay_ms: u64,
    /// Catalog JSON to use instead of the embedded one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            reset_delay_ms: 2000,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Settings for this process, read from disk on first use.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match settings_file() {
        Some(path) => load_config_or_default(&path),
        None => {
            warn!("no configuration directory available; using default settings");
            AppConfig::default()
        }
    })
}

/// `Ok(None)` when the file does not exist.
pub fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

pub fn load_config_or_default(path: &Path) -> AppConfig {
    match load_config(path) {
        Ok(Some(config)) => {
            info!(path = %path.display(), "loaded settings");
            config
        }
        Ok(None) => AppConfig::default(),
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable settings: {err}");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        assert!(load_config(&path).unwrap().is_none());
        assert_eq!(load_config_or_default(&path), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "api_base_url": "https://cargo.example/api/" }"#).unwrap();

        let config = load_config_or_default(&path);
        assert_eq!(config.api_base_url, "https://cargo.example/api/");
        assert_eq!(config.reset_delay(), Duration::from_secs(2));
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn malformed_file_is_reported_and_defaults_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ api_base_url: ").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Serde(_))));
        assert_eq!(load_config_or_default(&path), AppConfig::default());
    }
}
