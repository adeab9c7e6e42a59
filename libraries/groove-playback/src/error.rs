//! Error types for playback management

use groove_core::{CoreError, TrackId};
use thiserror::Error;

/// Playback errors
///
/// None of these are fatal. Navigation errors are returned with the session
/// left exactly as it was; output errors leave the session not playing.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Active queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Requested track is not part of the active queue
    #[error("Track not in active queue: {0}")]
    TrackNotInQueue(TrackId),

    /// Queue position out of range
    #[error("Queue index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Output adapter rejected a command
    #[error("Output error: {0}")]
    Output(String),

    /// Catalog lookup failed
    #[error(transparent)]
    Catalog(#[from] CoreError),
}

impl PlaybackError {
    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
