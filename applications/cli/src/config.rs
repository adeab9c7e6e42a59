//! Player configuration
use crate::error::{CliError, Result};
use groove_catalog::{
    CatalogProvider, DirectoryCatalogProvider, JsonCatalogProvider, ScanConfig,
    DEFAULT_ROOT_PLAYLIST,
};
use groove_playback::{RepeatMode, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "groove.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GrooveConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_source")]
    pub source: CatalogSource,

    /// JSON catalog file or music directory, depending on `source`
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default = "default_root_playlist_name")]
    pub root_playlist_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Json,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default)]
    pub repeat: RepeatMode,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl GrooveConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `groove.toml`; an explicit path must
    /// exist. Environment variables prefixed with `GROOVE_` override the
    /// file, with `__` between section and key (`GROOVE_PLAYBACK__VOLUME`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process env
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                // Load from config file if it exists
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with GROOVE_)
        settings = settings.add_source(
            config::Environment::with_prefix("GROOVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "Volume must be between 0 and 1, got {}",
                volume
            )));
        }

        if self.catalog.root_playlist_name.trim().is_empty() {
            return Err(CliError::Config(
                "Root playlist name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Point the catalog at a JSON file
    pub fn use_json_catalog(&mut self, path: PathBuf) {
        self.catalog.source = CatalogSource::Json;
        self.catalog.path = path;
    }

    /// Point the catalog at a music directory
    pub fn use_directory_catalog(&mut self, path: PathBuf) {
        self.catalog.source = CatalogSource::Directory;
        self.catalog.path = path;
    }

    /// Catalog provider described by the `catalog` section
    pub fn catalog_provider(&self) -> Box<dyn CatalogProvider> {
        let name = self.catalog.root_playlist_name.clone();
        match self.catalog.source {
            CatalogSource::Json => Box::new(
                JsonCatalogProvider::new(self.catalog.path.clone()).with_flat_playlist_name(name),
            ),
            CatalogSource::Directory => {
                let scan = ScanConfig {
                    root_playlist_name: name,
                    ..ScanConfig::default()
                };
                Box::new(DirectoryCatalogProvider::with_config(
                    self.catalog.path.clone(),
                    scan,
                ))
            }
        }
    }

    /// Session settings from the `playback` section
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            volume: self.playback.volume,
            repeat: self.playback.repeat,
            shuffled: self.playback.shuffle,
            shuffle_seed: self.playback.shuffle_seed,
        }
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        source: default_source(),
        path: default_path(),
        root_playlist_name: default_root_playlist_name(),
    }
}

fn default_source() -> CatalogSource {
    CatalogSource::Directory
}

fn default_path() -> PathBuf {
    PathBuf::from("./music")
}

fn default_root_playlist_name() -> String {
    DEFAULT_ROOT_PLAYLIST.to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
        repeat: RepeatMode::Off,
        shuffle: false,
        shuffle_seed: None,
    }
}

fn default_volume() -> f32 {
    1.0
}

impl Default for GrooveConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            playback: default_playback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_without_sources() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groove.toml");
        fs::write(&path, "").unwrap();

        let config = GrooveConfig::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(config, GrooveConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groove.toml");
        fs::write(
            &path,
            r#"
[catalog]
source = "json"
path = "/srv/music/catalog.json"

[playback]
volume = 0.5
repeat = "all"
shuffle = true
shuffle_seed = 9
"#,
        )
        .unwrap();

        let config = GrooveConfig::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(config.catalog.source, CatalogSource::Json);
        assert_eq!(config.catalog.path, PathBuf::from("/srv/music/catalog.json"));
        assert_eq!(config.catalog.root_playlist_name, "Library");

        let session = config.session_config();
        assert_eq!(session.volume, 0.5);
        assert_eq!(session.repeat, RepeatMode::All);
        assert!(session.shuffled);
        assert_eq!(session.shuffle_seed, Some(9));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groove.toml");
        fs::write(&path, "[playback]\nvolume = 0.5\n").unwrap();

        let config = GrooveConfig::load_with_env(
            Some(&path),
            env(&[
                ("GROOVE_PLAYBACK__VOLUME", "0.25"),
                ("GROOVE_CATALOG__ROOT_PLAYLIST_NAME", "Singles"),
            ]),
        )
        .unwrap();
        assert_eq!(config.playback.volume, 0.25);
        assert_eq!(config.catalog.root_playlist_name, "Singles");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = GrooveConfig::load_with_env(Some(Path::new("/nonexistent/groove.toml")), env(&[]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn out_of_range_volume_is_invalid() {
        let mut config = GrooveConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_pick_provider() {
        let mut config = GrooveConfig::default();
        config.use_json_catalog(PathBuf::from("/tmp/catalog.json"));
        assert!(config.catalog_provider().describe().starts_with("file "));

        config.use_directory_catalog(PathBuf::from("/tmp/music"));
        assert!(config.catalog_provider().describe().starts_with("directory "));
    }
}
