//! Groove Player Core
//!
//! Platform-agnostic catalog types, formatting helpers and error handling for
//! Groove Player.
//!
//! This crate provides the data model shared by every other crate in the
//! workspace:
//! - **Domain Types**: `Track`, `Playlist`, `Catalog` and their identifiers
//! - **Formatting**: `format_time` for `m:ss` duration labels
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use groove_core::{Catalog, Playlist, Track, TrackId};
//!
//! let track = Track::new(TrackId::from(1), "Intro", "/music/rock/intro.mp3")
//!     .with_artist("The Band")
//!     .with_duration_secs(125);
//!
//! let playlist = Playlist::new("Rock", vec![track]);
//! let catalog = Catalog::new(vec![playlist]).unwrap();
//!
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(groove_core::format_time(125.0), "2:05");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod types;

pub use error::{CoreError, Result};
pub use format::format_time;
pub use types::{Catalog, Playlist, SourceLocator, Track, TrackId};
