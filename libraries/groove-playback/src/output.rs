//! Platform-agnostic output adapter contract
//!
//! Abstracts the single audio output device (an HTML audio element, a CPAL
//! stream, a test recorder, ...). The session is the adapter's only caller.
//!
//! Commands are fire-and-forget: the device reports what actually happened
//! later through [`OutputEvent`]s, each stamped with the [`LoadTicket`] of
//! the load it belongs to so that events from a superseded load can be
//! recognized and dropped.

use crate::error::Result;
use groove_core::{SourceLocator, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one `load` request
///
/// The load id increases with every load issued by a session, so two loads
/// of the same track (a restart) still get distinct tickets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    /// Monotonic load counter
    pub load_id: u64,

    /// Track being loaded
    pub track_id: TrackId,
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.load_id, self.track_id)
    }
}

/// Asynchronous signal from the output device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    /// Load this event belongs to
    pub ticket: LoadTicket,

    /// What happened
    pub kind: OutputEventKind,
}

/// Kind of output device signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputEventKind {
    /// Playback position changed (seconds)
    TimeUpdate(f64),

    /// Media reached its end
    Ended,

    /// Device started or stopped playing
    PlayStateChanged(bool),

    /// Media could not be loaded or played
    LoadFailed(String),
}

impl OutputEvent {
    /// Position update event
    pub fn time_update(ticket: LoadTicket, seconds: f64) -> Self {
        Self {
            ticket,
            kind: OutputEventKind::TimeUpdate(seconds),
        }
    }

    /// End-of-media event
    pub fn ended(ticket: LoadTicket) -> Self {
        Self {
            ticket,
            kind: OutputEventKind::Ended,
        }
    }

    /// Play/pause acknowledgement
    pub fn play_state_changed(ticket: LoadTicket, is_playing: bool) -> Self {
        Self {
            ticket,
            kind: OutputEventKind::PlayStateChanged(is_playing),
        }
    }

    /// Load failure event
    pub fn load_failed(ticket: LoadTicket, reason: impl Into<String>) -> Self {
        Self {
            ticket,
            kind: OutputEventKind::LoadFailed(reason.into()),
        }
    }
}

/// Commands accepted by the output device
///
/// Implementations must not block; an `Err` means the command was rejected
/// outright (the session then stops playing and reports it).
#[cfg_attr(test, mockall::automock)]
pub trait OutputAdapter {
    /// Replace the current media with `source`
    fn load(&mut self, ticket: &LoadTicket, source: &SourceLocator) -> Result<()>;

    /// Start or resume playback of the loaded media
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Move the playback position (seconds)
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Set output volume in [0, 1]
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

impl<T: OutputAdapter + ?Sized> OutputAdapter for Box<T> {
    fn load(&mut self, ticket: &LoadTicket, source: &SourceLocator) -> Result<()> {
        (**self).load(ticket, source)
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) -> Result<()> {
        (**self).pause()
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        (**self).seek(seconds)
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        (**self).set_volume(volume)
    }
}

/// Output that accepts and discards every command
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl OutputAdapter for NullOutput {
    fn load(&mut self, _ticket: &LoadTicket, _source: &SourceLocator) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn seek(&mut self, _seconds: f64) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }
}
