use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{FileSource, HttpSource, ResourceSource};
use crate::error::{Error, Result};
use crate::weather::API_BASE;

pub const CONFIG_ENV: &str = "FITTRACK_CONFIG";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `workouts.json`, `routines.json` and `members.json`.
    pub data_dir: PathBuf,
    /// When set, catalogs are fetched over HTTP relative to this URL instead.
    pub base_url: Option<String>,
    pub storage_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub font_path: Option<PathBuf>,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: String,
    pub lat: f64,
    pub lon: f64,
    /// `metric` or `imperial`, passed straight to the provider.
    pub units: String,
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("data"),
            base_url: None,
            storage_dir: default_storage_dir(),
            request_timeout_secs: 30,
            font_path: None,
            weather: WeatherConfig::default(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        // Lima, Peru
        WeatherConfig {
            api_key: String::new(),
            lat: -12.0464,
            lon: -77.0428,
            units: "metric".to_string(),
            api_base: API_BASE.to_string(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("fittrack"))
        .unwrap_or_else(|| PathBuf::from(".fittrack"))
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("fittrack").join("config.toml"))
}

impl AppConfig {
    /// Reads the config from `FITTRACK_CONFIG` or the default location.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => AppConfig::default(),
        };

        if let Ok(key) = env::var(API_KEY_ENV) {
            config.weather.api_key = key;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            location: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text, &path.display().to_string())
    }

    pub fn from_toml(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: origin.to_string(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resource_source(&self) -> Arc<dyn ResourceSource> {
        match &self.base_url {
            Some(url) => Arc::new(HttpSource::new(url.clone(), self.request_timeout())),
            None => Arc::new(FileSource::new(self.data_dir.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            base_url = "https://example.com/site"

            [weather]
            api_key = "abc"
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://example.com/site"));
        assert_eq!(config.weather.api_key, "abc");
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.api_base, API_BASE);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let err = AppConfig::from_toml("request_timeout_secs = \"soon\"", "inline").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/srv/fittrack\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/fittrack"));
    }
}
