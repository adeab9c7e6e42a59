//! Playlist type

use super::ids::TrackId;
use super::track::Track;
use serde::{Deserialize, Serialize};

/// Named, ordered sequence of tracks
///
/// Track order is catalog order and never changes after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist name, unique within a catalog
    pub name: String,

    /// Tracks in catalog order
    pub tracks: Vec<Track>,

    /// Cover art reference
    pub cover_art: Option<String>,
}

impl Playlist {
    /// Create a playlist without cover art
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
            cover_art: None,
        }
    }

    /// Set the cover art reference
    #[must_use]
    pub fn with_cover_art(mut self, cover_art: impl Into<String>) -> Self {
        self.cover_art = Some(cover_art.into());
        self
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Catalog position of a track
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let playlist = Playlist::new(
            "Mix",
            vec![
                Track::new(TrackId::from(1), "A", "a.mp3"),
                Track::new(TrackId::from(2), "B", "b.mp3"),
            ],
        );

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.track(&TrackId::from(2)).map(|t| t.title.as_str()), Some("B"));
        assert_eq!(playlist.position_of(&TrackId::from(2)), Some(1));
        assert!(playlist.track(&TrackId::from(3)).is_none());
    }
}
