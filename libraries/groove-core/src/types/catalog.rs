//! Catalog type

use super::playlist::Playlist;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered collection of playlists
///
/// Loaded once at session start and read-only afterwards; a reload replaces
/// the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    playlists: Vec<Playlist>,
}

impl Catalog {
    /// Build a catalog, validating identity constraints
    ///
    /// Playlist names must be unique, and track ids must be unique within
    /// each playlist.
    pub fn new(playlists: Vec<Playlist>) -> Result<Self> {
        let mut names = HashSet::new();

        for playlist in &playlists {
            if !names.insert(playlist.name.as_str()) {
                return Err(CoreError::duplicate(format!(
                    "playlist '{}'",
                    playlist.name
                )));
            }

            let mut ids = HashSet::new();
            for track in &playlist.tracks {
                if !ids.insert(&track.id) {
                    return Err(CoreError::duplicate(format!(
                        "track id '{}' in playlist '{}'",
                        track.id, playlist.name
                    )));
                }
            }
        }

        Ok(Self { playlists })
    }

    /// Empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// All playlists in catalog order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Look up a playlist by name
    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    /// Look up a playlist by name, failing with `NotFound`
    pub fn require_playlist(&self, name: &str) -> Result<&Playlist> {
        self.playlist(name)
            .ok_or_else(|| CoreError::not_found("Playlist", name))
    }

    /// First playlist in catalog order
    pub fn first(&self) -> Option<&Playlist> {
        self.playlists.first()
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Whether the catalog has no playlists
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Total number of tracks across all playlists
    pub fn track_count(&self) -> usize {
        self.playlists.iter().map(Playlist::len).sum()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let playlists = Vec::<Playlist>::deserialize(deserializer)?;
        Catalog::new(playlists).map_err(serde::de::Error::custom)
    }
}
