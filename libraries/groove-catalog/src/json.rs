//! JSON catalog documents
//!
//! Accepts the document shape served by the tracks endpoint of the web
//! player: an array of playlists
//!
//! ```json
//! [{ "name": "Rock",
//!    "coverArt": null,
//!    "tracks": [{ "id": 1, "title": "Intro", "artist": "The Band",
//!                 "album": "Live", "year": 1999, "duration": 125,
//!                 "url": "/music/rock/intro.mp3", "coverArt": null }] }]
//! ```
//!
//! A bare array of tracks is also accepted and becomes a single playlist.
use crate::error::{CatalogError, Result};
use crate::provider::CatalogProvider;
use crate::scanner::DEFAULT_ROOT_PLAYLIST;
use groove_core::types::{UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_YEAR};
use groove_core::{Catalog, Playlist, SourceLocator, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Numeric-or-text JSON scalar (ids and years)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(u64),
    Text(String),
}

impl Scalar {
    /// Digits-only text serializes back as a number
    fn from_text(text: &str) -> Self {
        text.parse()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(text.to_string()))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackRecord {
    id: Scalar,
    title: String,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    album: Option<String>,
    #[serde(default)]
    year: Option<Scalar>,
    #[serde(default)]
    duration: f64,
    url: String,
    #[serde(default)]
    cover_art: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistRecord {
    name: String,
    #[serde(default)]
    tracks: Vec<TrackRecord>,
    #[serde(default)]
    cover_art: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Playlists(Vec<PlaylistRecord>),
    Tracks(Vec<TrackRecord>),
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        Track {
            id: TrackId::new(record.id.to_string()),
            title: record.title,
            artist: record.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: record.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            year: record
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
            duration_secs: whole_seconds(record.duration),
            source: SourceLocator::new(record.url),
            cover_art: record.cover_art,
        }
    }
}

impl From<&Track> for TrackRecord {
    fn from(track: &Track) -> Self {
        TrackRecord {
            id: Scalar::from_text(track.id.as_str()),
            title: track.title.clone(),
            artist: Some(track.artist.clone()),
            album: Some(track.album.clone()),
            year: Some(Scalar::from_text(&track.year)),
            duration: f64::from(track.duration_secs),
            url: track.source.to_string(),
            cover_art: track.cover_art.clone(),
        }
    }
}

/// Floor to whole seconds; negative and non-finite values are unknown (0)
fn whole_seconds(duration: f64) -> u32 {
    if duration.is_finite() && duration > 0.0 {
        duration.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Parse a catalog document
///
/// A bare track array becomes one playlist named `flat_playlist_name`.
pub fn parse_catalog(json: &str, flat_playlist_name: &str) -> Result<Catalog> {
    let document: Document = serde_json::from_str(json)?;

    let playlists = match document {
        Document::Playlists(records) => records
            .into_iter()
            .map(|record| {
                let tracks = record.tracks.into_iter().map(Track::from).collect();
                let mut playlist = Playlist::new(record.name, tracks);
                playlist.cover_art = record.cover_art;
                playlist
            })
            .collect(),
        Document::Tracks(records) if records.is_empty() => Vec::new(),
        Document::Tracks(records) => {
            debug!("Flat track list, wrapping in '{}'", flat_playlist_name);
            let tracks: Vec<Track> = records.into_iter().map(Track::from).collect();
            let cover_art = tracks.iter().find_map(|t| t.cover_art.clone());
            let mut playlist = Playlist::new(flat_playlist_name, tracks);
            playlist.cover_art = cover_art;
            vec![playlist]
        }
    };

    Ok(Catalog::new(playlists)?)
}

/// Serialize a catalog into the playlist-array document shape
pub fn to_json_string(catalog: &Catalog) -> Result<String> {
    let records: Vec<PlaylistRecord> = catalog
        .playlists()
        .iter()
        .map(|playlist| PlaylistRecord {
            name: playlist.name.clone(),
            tracks: playlist.tracks.iter().map(TrackRecord::from).collect(),
            cover_art: playlist.cover_art.clone(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

/// Loads the catalog from a JSON file
#[derive(Debug, Clone)]
pub struct JsonCatalogProvider {
    path: PathBuf,
    flat_playlist_name: String,
}

impl JsonCatalogProvider {
    /// Create a provider reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flat_playlist_name: DEFAULT_ROOT_PLAYLIST.to_string(),
        }
    }

    /// Name used when the document is a bare track array
    #[must_use]
    pub fn with_flat_playlist_name(mut self, name: impl Into<String>) -> Self {
        self.flat_playlist_name = name.into();
        self
    }

    /// Catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for JsonCatalogProvider {
    fn try_load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }
        if !self.path.is_file() {
            return Err(CatalogError::WrongKind {
                path: self.path.clone(),
                expected: "file",
            });
        }

        let json = std::fs::read_to_string(&self.path)?;
        parse_catalog(&json, &self.flat_playlist_name)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
