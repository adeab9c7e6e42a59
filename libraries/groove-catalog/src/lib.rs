//! Groove Player Catalog
//!
//! Catalog providers for Groove Player.
//!
//! This crate provides:
//! - JSON catalog documents (playlist arrays or bare track arrays)
//! - Playlist folder scanning with tag reading (MP3, FLAC, WAV, AAC)
//! - Embedded and folder cover art as inline data URIs
//!
//! Loading never takes the player down: [`CatalogProvider::load`] logs any
//! failure and hands back an empty catalog.
//!
//! # Example
//!
//! ```rust,no_run
//! use groove_catalog::{CatalogProvider, DirectoryCatalogProvider, JsonCatalogProvider};
//!
//! // One playlist per sub-directory of the music root
//! let catalog = DirectoryCatalogProvider::new("/music").load();
//!
//! // Or a catalog file
//! let catalog = JsonCatalogProvider::new("/music/catalog.json").load();
//! println!("{} playlists", catalog.len());
//! ```

#![forbid(unsafe_code)]

pub mod artwork;
mod error;
mod json;
mod provider;
mod reader;
mod scanner;

pub use error::{CatalogError, Result};
pub use json::{parse_catalog, to_json_string, JsonCatalogProvider};
pub use provider::CatalogProvider;
pub use reader::{file_title, read_track};
pub use scanner::{DirectoryCatalogProvider, ScanConfig, DEFAULT_ROOT_PLAYLIST};
