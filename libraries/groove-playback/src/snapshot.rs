//! Read-only session snapshots for presentation layers
//!
//! A snapshot is an owned copy of everything a UI needs to render one frame.
//! Presentation code never holds references into the session.

use crate::types::{RepeatMode, TransportState};
use serde::{Deserialize, Serialize};

/// Complete view of a session at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Every catalog playlist, in catalog order
    pub playlists: Vec<PlaylistSummary>,

    /// Selected playlist name
    pub selected_playlist: Option<String>,

    /// Search query as typed
    pub search_query: String,

    /// Whether the active queue is shuffled
    pub shuffled: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Active queue rows in play order
    pub queue: Vec<QueueRow>,

    /// Current track, if any
    pub now_playing: Option<NowPlaying>,

    /// Transport state
    pub state: TransportState,

    /// Elapsed seconds in the current track
    pub elapsed: f64,

    /// Elapsed time as `m:ss`
    pub elapsed_label: String,

    /// Seek bar fill in [0, 1]
    pub progress: f64,

    /// Volume level (0.0 - 1.0)
    pub volume: f32,

    /// Whether the volume is at zero
    pub muted: bool,
}

/// Playlist list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Playlist name
    pub name: String,

    /// Number of tracks
    pub track_count: usize,

    /// Cover art reference
    pub cover_art: Option<String>,

    /// Whether this playlist is selected
    pub selected: bool,
}

/// Track list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRow {
    /// 1-based position in the active queue
    pub position: usize,

    /// Track id
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration in seconds (0 = unknown)
    pub duration: u32,

    /// Duration as `m:ss`
    pub duration_label: String,

    /// Cover art reference
    pub cover_art: Option<String>,

    /// Whether this row is the current track
    pub is_current: bool,
}

/// Current track details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Playlist the track was started from
    pub playlist: String,

    /// Track id
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Duration in seconds (0 = unknown)
    pub duration: u32,

    /// Duration as `m:ss`
    pub duration_label: String,

    /// Cover art reference
    pub cover_art: Option<String>,

    /// Whether the track is still part of the active queue
    pub in_queue: bool,
}

/// Why the track list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyState {
    /// A search query filtered everything out
    NoMatches,

    /// The selected playlist (or catalog) has no tracks
    NoTracks,
}

impl EmptyState {
    /// User-facing message
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoMatches => "No matching songs found",
            Self::NoTracks => "No songs found",
        }
    }
}

impl SessionSnapshot {
    /// Empty-state reason when the queue has no rows
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.queue.is_empty() {
            return None;
        }

        if self.search_query.is_empty() {
            Some(EmptyState::NoTracks)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Duration label of the current track, `0:00` when idle
    pub fn duration_label(&self) -> &str {
        self.now_playing
            .as_ref()
            .map(|n| n.duration_label.as_str())
            .unwrap_or("0:00")
    }
}

/// Seek bar fill for `elapsed` seconds of a `duration`-second track
///
/// Unknown durations divide by one second. The result is clamped to [0, 1].
pub fn progress_fraction(elapsed: f64, duration: u32) -> f64 {
    let divisor = if duration > 0 { f64::from(duration) } else { 1.0 };
    let fraction = elapsed / divisor;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_proportional() {
        assert_eq!(progress_fraction(90.0, 180), 0.5);
        assert_eq!(progress_fraction(0.0, 180), 0.0);
        assert_eq!(progress_fraction(180.0, 180), 1.0);
    }

    #[test]
    fn progress_with_unknown_duration_saturates() {
        assert_eq!(progress_fraction(0.5, 0), 0.5);
        assert_eq!(progress_fraction(12.0, 0), 1.0);
    }

    #[test]
    fn empty_state_messages() {
        assert_eq!(EmptyState::NoMatches.message(), "No matching songs found");
        assert_eq!(EmptyState::NoTracks.message(), "No songs found");
    }
}
