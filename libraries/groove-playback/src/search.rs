//! Track search filter
//!
//! Case-insensitive substring match against title or artist.

use groove_core::Track;

/// Normalized search query
///
/// Holds the raw text for display and the lowercased needle used for
/// matching. The text is not trimmed, so `" "` only matches tracks whose
/// title or artist contains a space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// Create a query from user input
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The query as typed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the query is empty (matches everything)
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether a track's title or artist contains the query
    pub fn matches(&self, track: &Track) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        track.title.to_lowercase().contains(&self.needle)
            || track.artist.to_lowercase().contains(&self.needle)
    }

    /// Indices of matching tracks, in input order
    pub fn matching_indices(&self, tracks: &[Track]) -> Vec<usize> {
        tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| self.matches(track))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Filter tracks by a text query
///
/// Preserves input order. An empty query returns every track.
pub fn filter<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
    let query = SearchQuery::new(query);
    tracks.iter().filter(|t| query.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use groove_core::TrackId;

    fn track(id: u64, title: &str, artist: &str) -> Track {
        Track::new(TrackId::from(id), title, format!("/music/{}.mp3", id)).with_artist(artist)
    }

    fn tracks() -> Vec<Track> {
        vec![
            track(1, "Blue in Green", "Miles Davis"),
            track(2, "So What", "Miles Davis"),
            track(3, "Giant Steps", "John Coltrane"),
            track(4, "Naima", "John Coltrane"),
            track(5, "Blue Train", "John Coltrane"),
        ]
    }

    fn titles(tracks: &[&Track]) -> Vec<String> {
        tracks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let all = tracks();
        let result = filter(&all, "");
        assert_eq!(result.len(), all.len());
        assert!(result.iter().zip(all.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn matches_title_case_insensitively() {
        let all = tracks();
        let result = filter(&all, "BLUE");
        assert_eq!(titles(&result), vec!["Blue in Green", "Blue Train"]);
    }

    #[test]
    fn matches_artist() {
        let all = tracks();
        let result = filter(&all, "coltrane");
        assert_eq!(titles(&result), vec!["Giant Steps", "Naima", "Blue Train"]);
    }

    #[test]
    fn album_is_not_searched() {
        let all = vec![track(1, "Song", "Artist").with_album("Kind of Blue")];
        assert!(filter(&all, "kind").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        let all = tracks();
        assert!(filter(&all, "zeppelin").is_empty());
    }

    #[test]
    fn whitespace_is_significant() {
        let all = vec![track(1, "Naima", "Coltrane"), track(2, "So What", "Davis")];
        let result = filter(&all, " ");
        assert_eq!(titles(&result), vec!["So What"]);
    }

    #[test]
    fn unicode_case_folding() {
        let all = vec![track(1, "ÉTÉ", "Artiste")];
        assert_eq!(filter(&all, "été").len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let all = tracks();
        let once: Vec<Track> = filter(&all, "mi").into_iter().cloned().collect();
        let twice: Vec<Track> = filter(&once, "mi").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn matching_indices_follow_input_order() {
        let all = tracks();
        let query = SearchQuery::new("Miles");
        assert_eq!(query.matching_indices(&all), vec![0, 1]);
        assert_eq!(query.as_str(), "Miles");
        assert!(!query.is_empty());
    }
}
