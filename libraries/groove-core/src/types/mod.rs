mod catalog;
mod ids;
mod playlist;
mod track;

pub use catalog::Catalog;
pub use ids::{SourceLocator, TrackId};
pub use playlist::Playlist;
pub use track::{Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_YEAR};
