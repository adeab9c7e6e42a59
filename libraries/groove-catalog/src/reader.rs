//! Track metadata reader using lofty
use crate::artwork;
use groove_core::{Track, TrackId};
use lofty::{Accessor, AudioFile, TaggedFile, TaggedFileExt};
use std::path::Path;
use tracing::warn;

/// Read a track from an audio file
///
/// Never fails: unreadable files and missing tags fall back to the file
/// stem as title and the usual "Unknown ..." placeholders with duration 0.
pub fn read_track(path: &Path, id: TrackId) -> Track {
    let track = Track::new(id, file_title(path), path.display().to_string());

    match lofty::read_from_path(path) {
        Ok(tagged_file) => apply_tags(track, &tagged_file),
        Err(e) => {
            warn!("Error parsing metadata for {}: {}", path.display(), e);
            track
        }
    }
}

/// File name without its extension
pub fn file_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown")
        .to_string()
}

fn apply_tags(mut track: Track, tagged_file: &TaggedFile) -> Track {
    let seconds = tagged_file.properties().duration().as_secs();
    track.duration_secs = u32::try_from(seconds).unwrap_or(u32::MAX);

    // Get primary tag or first available tag
    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return track;
    };

    if let Some(title) = non_empty(tag.title().as_deref()) {
        track.title = title;
    }
    if let Some(artist) = non_empty(tag.artist().as_deref()) {
        track.artist = artist;
    }
    if let Some(album) = non_empty(tag.album().as_deref()) {
        track.album = album;
    }
    if let Some(year) = tag.year() {
        track.year = year.to_string();
    }
    track.cover_art = artwork::embedded_cover(tag);

    track
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groove_core::types::{UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_YEAR};

    #[test]
    fn title_from_file_stem() {
        assert_eq!(file_title(Path::new("/music/Rock/01 Intro.mp3")), "01 Intro");
        assert_eq!(file_title(Path::new("/music/Rock/song.flac")), "song");
    }

    #[test]
    fn nonexistent_file_uses_fallbacks() {
        let track = read_track(Path::new("/nonexistent/Blue Train.mp3"), TrackId::from(4));
        assert_eq!(track.id, TrackId::from(4));
        assert_eq!(track.title, "Blue Train");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.year, UNKNOWN_YEAR);
        assert_eq!(track.duration_secs, 0);
        assert!(track.cover_art.is_none());
        assert_eq!(track.source.as_str(), "/nonexistent/Blue Train.mp3");
    }

    #[test]
    fn blank_tag_values_are_ignored() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some(" Kind of Blue ")), Some("Kind of Blue".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
