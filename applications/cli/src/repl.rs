//! Interactive command loop
use crate::error::Result;
use crate::output::SimulatedOutput;
use crate::render;
use groove_catalog::CatalogProvider;
use groove_playback::{PlaybackSession, SessionConfig, SessionEvent};
use std::io::{BufRead, Write};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  playlists            list playlists
  select <name>        select a playlist
  search [query]       filter by title or artist (empty clears)
  tracks               show the active queue
  play <position>      play a track from the queue
  toggle               play / pause
  next, prev           skip forward / back
  seek <seconds>       jump within the current track
  volume <0..1>        set volume
  mute                 toggle mute
  shuffle              toggle shuffle
  repeat               cycle repeat mode (off, all, one)
  status [--json]      show what is playing
  reload               reload the catalog
  help                 show this help
  quit                 exit";

/// One interactive command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Playlists,
    Select(String),
    Search(String),
    Tracks,
    Play(usize),
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Volume(f32),
    Mute,
    Shuffle,
    Repeat,
    Status { json: bool },
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "playlists" | "pl" => Command::Playlists,
        "select" | "sel" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("select <name>"));
            }
            Command::Select(rest.to_string())
        }
        "search" | "find" => Command::Search(rest.to_string()),
        "tracks" | "ls" => Command::Tracks,
        "play" | "p" => {
            let position: usize = parse_number(rest, "play <position>")?;
            if position == 0 {
                return Err(ParseError::Usage("play <position> (positions start at 1)"));
            }
            Command::Play(position)
        }
        "toggle" | "t" | "pause" => Command::Toggle,
        "next" | "n" => Command::Next,
        "prev" | "previous" | "b" => Command::Previous,
        "seek" => Command::Seek(parse_number(rest, "seek <seconds>")?),
        "volume" | "vol" => Command::Volume(parse_number(rest, "volume <0..1>")?),
        "mute" => Command::Mute,
        "shuffle" => Command::Shuffle,
        "repeat" => Command::Repeat,
        "status" | "s" => Command::Status {
            json: rest == "--json",
        },
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_number<T: std::str::FromStr>(
    text: &str,
    usage: &'static str,
) -> std::result::Result<T, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    text.parse()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text
    Text(String),
    /// Nothing to print
    Silent,
    /// Leave the loop
    Quit,
}

/// Session plus the catalog source it can reload from
pub struct Player {
    session: PlaybackSession<SimulatedOutput>,
    provider: Box<dyn CatalogProvider>,
}

impl Player {
    /// Load the catalog and select its first playlist
    pub fn new(provider: Box<dyn CatalogProvider>, config: SessionConfig, speed: f64) -> Self {
        let catalog = provider.load();
        let output = SimulatedOutput::new(&catalog).with_speed(speed);

        let mut session = PlaybackSession::new(catalog, output, config);
        session.select_first_playlist();
        session.drain_events();

        Self { session, provider }
    }

    pub fn session(&self) -> &PlaybackSession<SimulatedOutput> {
        &self.session
    }

    /// Feed due output events into the session
    ///
    /// Returns user-facing notices for anything worth printing.
    pub fn sync(&mut self, now: Instant) -> Vec<String> {
        let events = self.session.output().poll_at(now);
        for event in events {
            if let Err(e) = self.session.handle_output_event(event) {
                warn!("Output event failed: {}", e);
            }
        }
        self.notices()
    }

    fn notices(&mut self) -> Vec<String> {
        self.session
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                SessionEvent::TrackChanged { .. } => self
                    .session
                    .current_track()
                    .map(|t| format!("Now playing: {} - {}", t.title, t.artist)),
                SessionEvent::Error { message } => Some(format!("Playback error: {}", message)),
                other => {
                    debug!("Session event: {:?}", other);
                    None
                }
            })
            .collect()
    }

    /// Execute one command
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        let session = &mut self.session;

        let reply = match command {
            Command::Playlists => Reply::Text(render::playlists(&session.snapshot())),
            Command::Select(name) => {
                session.select_playlist(&name)?;
                Reply::Text(render::tracks(&session.snapshot()))
            }
            Command::Search(query) => {
                session.set_search_query(query);
                Reply::Text(render::tracks(&session.snapshot()))
            }
            Command::Tracks => Reply::Text(render::tracks(&session.snapshot())),
            Command::Play(position) => {
                session.select_queue_index(position - 1)?;
                Reply::Silent
            }
            Command::Toggle => {
                session.toggle_play()?;
                Reply::Text(format!("{:?}", session.state()))
            }
            Command::Next => {
                session.next()?;
                Reply::Silent
            }
            Command::Previous => {
                session.previous()?;
                Reply::Silent
            }
            Command::Seek(seconds) => {
                session.seek(seconds)?;
                Reply::Text(render::status(&session.snapshot()))
            }
            Command::Volume(level) => {
                session.set_volume(level)?;
                Reply::Text(format!("Volume: {:.0}%", session.volume() * 100.0))
            }
            Command::Mute => {
                let level = session.toggle_mute()?;
                Reply::Text(if level == 0.0 { "Muted" } else { "Unmuted" }.to_string())
            }
            Command::Shuffle => {
                let on = session.toggle_shuffle();
                Reply::Text(format!("Shuffle {}", if on { "on" } else { "off" }))
            }
            Command::Repeat => Reply::Text(format!("Repeat {}", session.toggle_repeat())),
            Command::Status { json } => {
                let snapshot = session.snapshot();
                if json {
                    Reply::Text(serde_json::to_string_pretty(&snapshot)?)
                } else {
                    Reply::Text(render::status(&snapshot))
                }
            }
            Command::Reload => {
                let catalog = self.provider.load();
                session.output().register_catalog(&catalog);
                session.reload_catalog(catalog);
                if session.selected_playlist().is_none() {
                    session.select_first_playlist();
                }
                Reply::Text(render::playlists(&session.snapshot()))
            }
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Quit => Reply::Quit,
        };

        Ok(reply)
    }
}

/// Read commands from `input` until `quit` or end of input
pub fn run<R: BufRead, W: Write>(player: &mut Player, input: R, mut out: W) -> Result<()> {
    writeln!(out, "{}", render::status(&player.session().snapshot()))?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;

        for notice in player.sync(Instant::now()) {
            writeln!(out, "{}", notice)?;
        }

        match parse_command(&line) {
            Ok(Some(command)) => match player.execute(command) {
                Ok(Reply::Text(text)) => writeln!(out, "{}", text.trim_end())?,
                Ok(Reply::Silent) => {}
                Ok(Reply::Quit) => return Ok(()),
                Err(e) => writeln!(out, "{}", e)?,
            },
            Ok(None) => {}
            Err(e) => writeln!(out, "{}", e)?,
        }

        for notice in player.sync(Instant::now()) {
            writeln!(out, "{}", notice)?;
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_command("select Road Trip").unwrap(),
            Some(Command::Select("Road Trip".to_string()))
        );
        assert_eq!(parse_command("play 3").unwrap(), Some(Command::Play(3)));
        assert_eq!(parse_command("seek 42.5").unwrap(), Some(Command::Seek(42.5)));
        assert_eq!(parse_command("  VOLUME 0.3 ").unwrap(), Some(Command::Volume(0.3)));
        assert_eq!(
            parse_command("status --json").unwrap(),
            Some(Command::Status { json: true })
        );
    }

    #[test]
    fn search_without_query_clears() {
        assert_eq!(
            parse_command("search").unwrap(),
            Some(Command::Search(String::new()))
        );
        assert_eq!(
            parse_command("search miles davis").unwrap(),
            Some(Command::Search("miles davis".to_string()))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_command("dance"),
            Err(ParseError::Unknown("dance".to_string()))
        );
        assert_eq!(parse_command("play"), Err(ParseError::Usage("play <position>")));
        assert_eq!(
            parse_command("play two"),
            Err(ParseError::InvalidNumber("two".to_string()))
        );
        assert!(matches!(parse_command("play 0"), Err(ParseError::Usage(_))));
        assert_eq!(parse_command("select"), Err(ParseError::Usage("select <name>")));
    }
}
