//! Groove Player - Playback Session
//!
//! Platform-agnostic playback session for Groove Player.
//!
//! This crate provides:
//! - Active queue resolution (playlist → search filter → optional shuffle)
//! - Fisher-Yates shuffle with a seedable random source
//! - Transport state machine (select, play/pause, next/previous, seek)
//! - Repeat modes (Off, All, One) applied at end of track
//! - Volume control with binary mute
//! - Stale output-event rejection via load tickets
//!
//! # Architecture
//!
//! `groove-playback` never touches audio hardware. The single output device
//! is reached through the [`OutputAdapter`] trait; the device reports back
//! through [`OutputEvent`]s which the host feeds into
//! [`PlaybackSession::handle_output_event`].
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use groove_core::{Catalog, Playlist, Track, TrackId};
//! use groove_playback::{NullOutput, PlaybackSession, TransportState};
//!
//! let rock = Playlist::new(
//!     "Rock",
//!     vec![
//!         Track::new(TrackId::from(1), "Intro", "/music/rock/intro.mp3"),
//!         Track::new(TrackId::from(2), "Outro", "/music/rock/outro.mp3"),
//!     ],
//! );
//! let catalog = Catalog::new(vec![rock]).unwrap();
//!
//! let mut session = PlaybackSession::with_defaults(catalog, NullOutput);
//! session.select_playlist("Rock").unwrap();
//! session.select_track(&TrackId::from(1)).unwrap();
//! assert_eq!(session.state(), TransportState::Playing);
//!
//! session.next().unwrap();
//! assert_eq!(session.current_track().unwrap().title, "Outro");
//!
//! session.toggle_play().unwrap();
//! assert_eq!(session.state(), TransportState::Paused);
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use groove_core::Catalog;
//! use groove_playback::{NullOutput, PlaybackSession, RepeatMode, SessionConfig};
//!
//! let config = SessionConfig {
//!     shuffle_seed: Some(7),
//!     ..SessionConfig::default()
//! };
//! let mut session = PlaybackSession::new(Catalog::empty(), NullOutput, config);
//!
//! session.toggle_shuffle();
//! assert_eq!(session.toggle_repeat(), RepeatMode::All);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod output;
pub mod queue;
pub mod search;
mod session;
pub mod shuffle;
pub mod snapshot;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use output::{LoadTicket, NullOutput, OutputAdapter, OutputEvent, OutputEventKind};
pub use queue::ActiveQueue;
pub use search::{filter, SearchQuery};
pub use session::PlaybackSession;
pub use snapshot::{EmptyState, NowPlaying, PlaylistSummary, QueueRow, SessionSnapshot};
pub use types::{RepeatMode, SessionConfig, TransportState};
pub use volume::Volume;
