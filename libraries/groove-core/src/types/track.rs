//! Track type

use super::ids::{SourceLocator, TrackId};
use serde::{Deserialize, Serialize};

/// Artist label used when a track carries no artist information
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album label used when a track carries no album information
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Year label used when a track carries no release year
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// A playable track
///
/// Immutable once loaded into a catalog. `duration_secs == 0` means the
/// duration is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Identifier, unique within the owning playlist
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Release year as free text
    pub year: String,

    /// Duration in whole seconds (0 = unknown)
    pub duration_secs: u32,

    /// Playable source, consumed by the output adapter
    pub source: SourceLocator,

    /// Cover art reference (URL, path or data URI)
    pub cover_art: Option<String>,
}

impl Track {
    /// Create a track with placeholder metadata
    pub fn new(id: TrackId, title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            year: UNKNOWN_YEAR.to_string(),
            duration_secs: 0,
            source: SourceLocator::new(source),
            cover_art: None,
        }
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the release year
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Set the duration in whole seconds
    #[must_use]
    pub fn with_duration_secs(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Set the cover art reference
    #[must_use]
    pub fn with_cover_art(mut self, cover_art: impl Into<String>) -> Self {
        self.cover_art = Some(cover_art.into());
        self
    }

    /// Whether the duration is known
    pub fn has_known_duration(&self) -> bool {
        self.duration_secs > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_track_uses_placeholders() {
        let track = Track::new(TrackId::from(1), "Song", "/music/song.mp3");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.year, UNKNOWN_YEAR);
        assert_eq!(track.duration_secs, 0);
        assert!(!track.has_known_duration());
        assert!(track.cover_art.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let track = Track::new(TrackId::from(2), "Song", "/music/song.mp3")
            .with_artist("Artist")
            .with_album("Album")
            .with_year("1999")
            .with_duration_secs(180)
            .with_cover_art("/covers/a.jpg");

        assert_eq!(track.artist, "Artist");
        assert_eq!(track.album, "Album");
        assert_eq!(track.year, "1999");
        assert!(track.has_known_duration());
        assert_eq!(track.cover_art.as_deref(), Some("/covers/a.jpg"));
    }
}
