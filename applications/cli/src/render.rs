//! Plain-text rendering of session snapshots
use groove_core::{format_time, Catalog};
use groove_playback::{SessionSnapshot, TransportState};
use std::fmt::Write as _;

/// Width of the text progress bar
const BAR_WIDTH: usize = 24;

/// Playlist list with the selected one marked
pub fn playlists(snapshot: &SessionSnapshot) -> String {
    if snapshot.playlists.is_empty() {
        return "No playlists found".to_string();
    }

    let mut out = String::new();
    for playlist in &snapshot.playlists {
        let marker = if playlist.selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {} ({} tracks)",
            marker, playlist.name, playlist.track_count
        );
    }
    out
}

/// Active queue, one numbered row per track
pub fn tracks(snapshot: &SessionSnapshot) -> String {
    if let Some(empty) = snapshot.empty_state() {
        return empty.message().to_string();
    }

    let mut out = String::new();
    for row in &snapshot.queue {
        let marker = if row.is_current { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:>3}. {} - {} [{}]",
            marker, row.position, row.title, row.artist, row.duration_label
        );
    }
    out
}

/// Transport line, progress bar and mode flags
pub fn status(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    match &snapshot.now_playing {
        Some(now) => {
            let state = match snapshot.state {
                TransportState::Playing => "Playing",
                TransportState::Paused => "Paused",
                TransportState::Idle => "Idle",
            };
            let _ = writeln!(out, "{}: {} - {} ({})", state, now.title, now.artist, now.album);
            let _ = writeln!(
                out,
                "{} {} / {}",
                progress_bar(snapshot.progress),
                snapshot.elapsed_label,
                now.duration_label
            );
        }
        None => {
            let _ = writeln!(out, "Nothing playing");
        }
    }

    let _ = writeln!(
        out,
        "shuffle: {}  repeat: {}  volume: {}",
        if snapshot.shuffled { "on" } else { "off" },
        snapshot.repeat,
        if snapshot.muted {
            "muted".to_string()
        } else {
            format!("{:.0}%", snapshot.volume * 100.0)
        }
    );

    if let Some(playlist) = &snapshot.selected_playlist {
        let _ = write!(out, "playlist: {}", playlist);
        if !snapshot.search_query.is_empty() {
            let _ = write!(out, "  search: {:?}", snapshot.search_query);
        }
        out.push('\n');
    }

    out
}

/// `[#######.................]`
pub fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Full catalog listing for `groove list`
pub fn catalog(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No songs found".to_string();
    }

    let mut out = String::new();
    for playlist in catalog.playlists() {
        let _ = writeln!(out, "{} ({} tracks)", playlist.name, playlist.len());
        for (index, track) in playlist.tracks.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>3}. {} - {} [{}]",
                index + 1,
                track.title,
                track.artist,
                format_time(f64::from(track.duration_secs))
            );
        }
    }
    out
}
