//! Session Events
//!
//! Event-based communication for presentation-layer synchronization.
//! Events are queued by the session at key points and drained by the UI:
//! - Transport state changes (idle/paused/playing)
//! - Track changes
//! - Queue re-resolution
//! - Position updates, volume, shuffle and repeat changes
//! - Output failures

use crate::types::{RepeatMode, TransportState};
use serde::{Deserialize, Serialize};

/// Events emitted by a playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Current track changed (or restarted)
    TrackChanged {
        /// ID of the new current track
        track_id: String,
        /// ID of the previous current track (if any)
        previous_track_id: Option<String>,
    },

    /// Current track reached its end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Position changed
    PositionUpdate {
        /// Elapsed seconds
        elapsed: f64,
        /// Track duration in seconds (0 = unknown)
        duration: u32,
    },

    /// Active queue was re-resolved
    QueueChanged {
        /// Selected playlist
        playlist: Option<String>,
        /// New queue length
        length: usize,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0 - 1.0)
        level: f32,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// Whether the queue is shuffled
        shuffled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new repeat mode
        mode: RepeatMode,
    },

    /// Output device rejected a command or failed to load media
    Error {
        /// Error message
        message: String,
    },
}
