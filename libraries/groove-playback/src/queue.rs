//! Active queue resolution
//!
//! The active queue is derived, never edited: it is recomputed from the
//! selected playlist, the search query and the shuffle flag whenever one of
//! them changes.
//!
//! ```text
//! Playlist tracks (catalog order)
//!        │  search filter (order preserved)
//!        ▼
//! Filtered tracks
//!        │  shuffled? Fisher-Yates : verbatim
//!        ▼
//! Active queue
//! ```

use crate::search::SearchQuery;
use crate::shuffle::shuffle_in_place;
use groove_core::{Catalog, Playlist, Track, TrackId};
use rand::Rng;

/// Ordered tracks eligible for next/previous navigation
///
/// Entries are catalog positions within the selected playlist, so the queue
/// stays valid for as long as the catalog it was resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveQueue {
    /// Selected playlist the entries point into
    playlist: Option<String>,

    /// Catalog positions, in play order
    entries: Vec<usize>,
}

impl ActiveQueue {
    /// Queue with nothing selected
    pub fn empty() -> Self {
        Self::default()
    }

    /// Name of the playlist this queue was resolved from
    pub fn playlist_name(&self) -> Option<&str> {
        self.playlist.as_deref()
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue has no tracks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog positions in play order
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    fn source<'a>(&self, catalog: &'a Catalog) -> Option<&'a Playlist> {
        self.playlist.as_deref().and_then(|name| catalog.playlist(name))
    }

    /// Tracks in play order
    pub fn tracks<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Track> {
        let Some(playlist) = self.source(catalog) else {
            return Vec::new();
        };

        self.entries
            .iter()
            .filter_map(|&position| playlist.tracks.get(position))
            .collect()
    }

    /// Track at a queue index
    pub fn track_at<'a>(&self, catalog: &'a Catalog, index: usize) -> Option<&'a Track> {
        let position = *self.entries.get(index)?;
        self.source(catalog)?.tracks.get(position)
    }

    /// Queue index of a track from a given playlist
    ///
    /// Returns `None` when the track belongs to a different playlist or was
    /// filtered out.
    pub fn index_of(&self, catalog: &Catalog, playlist: &str, id: &TrackId) -> Option<usize> {
        if self.playlist.as_deref() != Some(playlist) {
            return None;
        }

        let source = self.source(catalog)?;
        self.entries
            .iter()
            .position(|&position| source.tracks.get(position).is_some_and(|t| &t.id == id))
    }

    /// Queue index of a specific track from a given playlist
    ///
    /// Matches on id and source locator, so a track that was replaced by a
    /// different file under the same id (after a catalog reload) is not in
    /// the queue.
    pub fn position_of(&self, catalog: &Catalog, playlist: &str, track: &Track) -> Option<usize> {
        let index = self.index_of(catalog, playlist, &track.id)?;
        let queued = self.track_at(catalog, index)?;
        (queued.source == track.source).then_some(index)
    }

    /// Index after `from`, wrapping to the start
    ///
    /// `None` as `from` means "before the start" and lands on index 0.
    pub fn next_index(&self, from: Option<usize>) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        Some(match from {
            Some(index) => (index + 1) % len,
            None => 0,
        })
    }

    /// Index before `from`, wrapping to the end
    ///
    /// `None` as `from` lands on the last index.
    pub fn previous_index(&self, from: Option<usize>) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        Some(match from {
            Some(index) => (index % len + len - 1) % len,
            None => len - 1,
        })
    }

    /// Whether `index` is the last queue index
    pub fn is_last(&self, index: usize) -> bool {
        !self.is_empty() && index == self.len() - 1
    }
}

/// Derive the active queue
///
/// 1. Base sequence: the selected playlist's tracks (empty if none).
/// 2. Search filter, preserving catalog order.
/// 3. Shuffled: uniform random permutation; otherwise verbatim.
pub fn resolve<R: Rng + ?Sized>(
    catalog: &Catalog,
    selected: Option<&str>,
    query: &SearchQuery,
    shuffled: bool,
    rng: &mut R,
) -> ActiveQueue {
    let Some(playlist) = selected.and_then(|name| catalog.playlist(name)) else {
        return ActiveQueue::empty();
    };

    let mut entries = query.matching_indices(&playlist.tracks);
    if shuffled {
        shuffle_in_place(&mut entries, rng);
    }

    ActiveQueue {
        playlist: Some(playlist.name.clone()),
        entries,
    }
}
