//! Shared helpers for session tests

#![allow(dead_code)]

use groove_core::{Catalog, Playlist, SourceLocator, Track, TrackId};
use groove_playback::{LoadTicket, OutputAdapter, PlaybackError, PlaybackSession, SessionConfig};

/// Command received by [`RecordingOutput`]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load { load_id: u64, source: String },
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
}

/// Output that records every command and can be told to reject loads
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub commands: Vec<Command>,
    pub fail_loads: bool,
}

impl RecordingOutput {
    /// Sources loaded so far, in order
    pub fn loaded_sources(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Load { source, .. } => Some(source.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&Command> {
        self.commands.last()
    }
}

impl OutputAdapter for RecordingOutput {
    fn load(&mut self, ticket: &LoadTicket, source: &SourceLocator) -> groove_playback::Result<()> {
        if self.fail_loads {
            return Err(PlaybackError::output(format!("cannot open {source}")));
        }
        self.commands.push(Command::Load {
            load_id: ticket.load_id,
            source: source.to_string(),
        });
        Ok(())
    }

    fn play(&mut self) -> groove_playback::Result<()> {
        self.commands.push(Command::Play);
        Ok(())
    }

    fn pause(&mut self) -> groove_playback::Result<()> {
        self.commands.push(Command::Pause);
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> groove_playback::Result<()> {
        self.commands.push(Command::Seek(seconds));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> groove_playback::Result<()> {
        self.commands.push(Command::SetVolume(volume));
        Ok(())
    }
}

pub fn track(id: u64, title: &str, artist: &str, duration_secs: u32) -> Track {
    Track::new(
        TrackId::from(id),
        title,
        format!("/music/{}.mp3", title.to_lowercase()),
    )
    .with_artist(artist)
    .with_duration_secs(duration_secs)
}

/// Rock = [A(180s), B(200s), C(90s)], Jazz = [Naima, So What]
pub fn catalog() -> Catalog {
    let rock = Playlist::new(
        "Rock",
        vec![
            track(1, "A", "Alpha Band", 180),
            track(2, "B", "Beta Band", 200),
            track(3, "C", "Gamma Band", 90),
        ],
    );
    let jazz = Playlist::new(
        "Jazz",
        vec![
            track(1, "Naima", "John Coltrane", 261),
            track(2, "So What", "Miles Davis", 562),
        ],
    );
    Catalog::new(vec![rock, jazz]).unwrap()
}

pub fn session() -> PlaybackSession<RecordingOutput> {
    let config = SessionConfig {
        shuffle_seed: Some(42),
        ..SessionConfig::default()
    };
    PlaybackSession::new(catalog(), RecordingOutput::default(), config)
}

/// Session with "Rock" selected
pub fn rock_session() -> PlaybackSession<RecordingOutput> {
    let mut session = session();
    session.select_playlist("Rock").unwrap();
    session
}

pub fn current_title(session: &PlaybackSession<RecordingOutput>) -> Option<String> {
    session.current_track().map(|t| t.title.clone())
}
