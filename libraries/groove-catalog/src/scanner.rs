//! Playlist folder scanner
//!
//! ```text
//! music/
//! ├── intro.mp3          → playlist "Library" (root files)
//! ├── Jazz/
//! │   ├── cover.jpg      → playlist cover
//! │   ├── naima.flac
//! │   └── so what.mp3
//! └── Rock/
//!     └── ...
//! ```
use crate::artwork;
use crate::error::{CatalogError, Result};
use crate::provider::CatalogProvider;
use crate::reader::read_track;
use groove_core::{Catalog, Playlist, TrackId};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Default name of the playlist holding files directly under the root
pub const DEFAULT_ROOT_PLAYLIST: &str = "Library";

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Supported audio file extensions (lowercase)
    pub extensions: Vec<String>,

    /// Name of the playlist built from files directly under the root
    pub root_playlist_name: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".to_string(),
                "flac".to_string(),
                "wav".to_string(),
                "aac".to_string(),
            ],
            root_playlist_name: DEFAULT_ROOT_PLAYLIST.to_string(),
        }
    }
}

/// Builds a catalog from a music directory, one playlist per sub-directory
#[derive(Debug, Clone)]
pub struct DirectoryCatalogProvider {
    root: PathBuf,
    config: ScanConfig,
}

impl DirectoryCatalogProvider {
    /// Create a provider for `root` with default configuration
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, ScanConfig::default())
    }

    /// Create a provider with custom configuration
    pub fn with_config(root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Music root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if file is a supported audio format
    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.config.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Immediate children of `dir`, sorted by file name
    fn children(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            children.push(entry?.into_path());
        }
        Ok(children)
    }

    /// Build a playlist from the supported files directly inside `dir`
    ///
    /// Track ids are 1-based positions in file-name order.
    fn scan_playlist(&self, name: String, dir: &Path) -> Result<Playlist> {
        let files: Vec<PathBuf> = Self::children(dir)?
            .into_iter()
            .filter(|path| path.is_file() && self.is_supported_file(path))
            .collect();

        let tracks = files
            .iter()
            .enumerate()
            .map(|(index, path)| read_track(path, TrackId::from(index as u64 + 1)))
            .collect::<Vec<_>>();

        let cover_art = artwork::folder_cover(dir)
            .or_else(|| tracks.iter().find_map(|t| t.cover_art.clone()));

        debug!("Scanned playlist '{}': {} tracks", name, tracks.len());

        let mut playlist = Playlist::new(name, tracks);
        playlist.cover_art = cover_art;
        Ok(playlist)
    }
}

impl CatalogProvider for DirectoryCatalogProvider {
    fn try_load(&self) -> Result<Catalog> {
        if !self.root.exists() {
            return Err(CatalogError::NotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(CatalogError::WrongKind {
                path: self.root.clone(),
                expected: "directory",
            });
        }

        let mut playlists = Vec::new();

        let root_playlist =
            self.scan_playlist(self.config.root_playlist_name.clone(), &self.root)?;
        if !root_playlist.is_empty() {
            playlists.push(root_playlist);
        }

        for dir in Self::children(&self.root)?
            .into_iter()
            .filter(|path| path.is_dir())
        {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                debug!("Skipping non UTF-8 directory {}", dir.display());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            playlists.push(self.scan_playlist(name.to_string(), &dir)?);
        }

        let catalog = Catalog::new(playlists)?;
        info!(
            "Scanned {}: {} playlists, {} tracks",
            self.root.display(),
            catalog.len(),
            catalog.track_count()
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        let provider = DirectoryCatalogProvider::new("/music");
        assert!(provider.is_supported_file(Path::new("a.mp3")));
        assert!(provider.is_supported_file(Path::new("a.FLAC")));
        assert!(provider.is_supported_file(Path::new("a.Wav")));
        assert!(!provider.is_supported_file(Path::new("a.ogg")));
        assert!(!provider.is_supported_file(Path::new("mp3")));
    }

    #[test]
    fn missing_root_is_not_found() {
        let provider = DirectoryCatalogProvider::new("/nonexistent/music");
        assert!(matches!(
            provider.try_load(),
            Err(CatalogError::NotFound(_))
        ));
        assert!(provider.load().is_empty());
    }
}
