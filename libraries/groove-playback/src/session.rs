//! Playback session - transport state machine
//!
//! Owns the catalog, the playlist/search/shuffle/repeat selection, the
//! active queue, the current track and the output adapter. Every mutation
//! of session state goes through a method here.

use crate::{
    error::{PlaybackError, Result},
    events::SessionEvent,
    output::{LoadTicket, OutputAdapter, OutputEvent, OutputEventKind},
    queue::{self, ActiveQueue},
    search::SearchQuery,
    snapshot::{progress_fraction, NowPlaying, PlaylistSummary, QueueRow, SessionSnapshot},
    types::{RepeatMode, SessionConfig, TransportState},
    volume::Volume,
};
use groove_core::{format_time, Catalog, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Track the session is positioned on
///
/// Holds its own copy of the track so it survives re-resolution of the
/// active queue and catalog reloads.
#[derive(Debug, Clone)]
struct CurrentTrack {
    /// Playlist the track was started from
    playlist: String,
    track: Track,
    ticket: LoadTicket,
}

/// Playback session
///
/// Generic over the output adapter so tests can drive it with a recorder.
pub struct PlaybackSession<O: OutputAdapter> {
    catalog: Catalog,
    output: O,

    // Queue inputs
    selected_playlist: Option<String>,
    search_query: SearchQuery,
    shuffled: bool,
    repeat: RepeatMode,

    // Derived from the inputs above
    queue: ActiveQueue,

    // Transport
    current: Option<CurrentTrack>,
    playing: bool,
    elapsed: f64,
    volume: Volume,

    next_load_id: u64,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl<O: OutputAdapter> PlaybackSession<O> {
    /// Create a session over `catalog` with nothing selected
    ///
    /// The configured volume is pushed to the output immediately.
    pub fn new(catalog: Catalog, output: O, config: SessionConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = Self {
            catalog,
            output,
            selected_playlist: None,
            search_query: SearchQuery::default(),
            shuffled: config.shuffled,
            repeat: config.repeat,
            queue: ActiveQueue::empty(),
            current: None,
            playing: false,
            elapsed: 0.0,
            volume: Volume::new(config.volume),
            next_load_id: 1,
            rng,
            pending_events: Vec::new(),
        };

        if let Err(e) = session.output.set_volume(session.volume.level()) {
            warn!("Output rejected initial volume: {}", e);
        }

        session
    }

    /// Create a session with default configuration
    pub fn with_defaults(catalog: Catalog, output: O) -> Self {
        Self::new(catalog, output, SessionConfig::default())
    }

    // ===== Queue Inputs =====

    /// Select a playlist by name
    ///
    /// Clears the search query and re-resolves the queue. The current track
    /// keeps playing.
    pub fn select_playlist(&mut self, name: &str) -> Result<()> {
        self.catalog.require_playlist(name)?;

        debug!("Selecting playlist '{}'", name);
        self.selected_playlist = Some(name.to_string());
        self.search_query = SearchQuery::default();
        self.resolve_queue();
        Ok(())
    }

    /// Select the first catalog playlist, if any
    ///
    /// Returns whether a playlist was selected.
    pub fn select_first_playlist(&mut self) -> bool {
        let Some(name) = self.catalog.first().map(|p| p.name.clone()) else {
            return false;
        };

        self.selected_playlist = Some(name);
        self.search_query = SearchQuery::default();
        self.resolve_queue();
        true
    }

    /// Replace the search query and re-resolve the queue
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = SearchQuery::new(text);
        debug!("Search query set to {:?}", self.search_query.as_str());
        self.resolve_queue();
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffled);
        self.shuffled
    }

    /// Set the shuffle flag
    ///
    /// Always re-resolves, so enabling shuffle while already shuffled draws
    /// a fresh permutation.
    pub fn set_shuffle(&mut self, shuffled: bool) {
        if self.shuffled != shuffled {
            self.shuffled = shuffled;
            self.pending_events
                .push(SessionEvent::ShuffleChanged { shuffled });
        }
        self.resolve_queue();
    }

    /// Advance repeat mode: off → all → one → off
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycle());
        self.repeat
    }

    /// Set repeat mode
    ///
    /// The queue is not re-resolved.
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat != mode {
            debug!("Repeat mode: {}", mode);
            self.repeat = mode;
            self.pending_events
                .push(SessionEvent::RepeatChanged { mode });
        }
    }

    /// Swap in a freshly loaded catalog
    ///
    /// The selection survives when a playlist of the same name still exists.
    /// The current track is kept even if it no longer exists anywhere.
    pub fn reload_catalog(&mut self, catalog: Catalog) {
        info!(
            "Catalog reloaded: {} playlists, {} tracks",
            catalog.len(),
            catalog.track_count()
        );
        self.catalog = catalog;

        if let Some(name) = &self.selected_playlist {
            if self.catalog.playlist(name).is_none() {
                debug!("Selected playlist '{}' no longer exists", name);
                self.selected_playlist = None;
                self.search_query = SearchQuery::default();
            }
        }
        self.resolve_queue();
    }

    fn resolve_queue(&mut self) {
        self.queue = queue::resolve(
            &self.catalog,
            self.selected_playlist.as_deref(),
            &self.search_query,
            self.shuffled,
            &mut self.rng,
        );

        debug!(
            "Queue resolved: {} tracks from {:?}",
            self.queue.len(),
            self.queue.playlist_name()
        );
        self.pending_events.push(SessionEvent::QueueChanged {
            playlist: self.selected_playlist.clone(),
            length: self.queue.len(),
        });
    }

    // ===== Transport =====

    /// Make a track from the active queue current and start playing it
    pub fn select_track(&mut self, id: &TrackId) -> Result<()> {
        let index = self
            .queue
            .playlist_name()
            .and_then(|playlist| self.queue.index_of(&self.catalog, playlist, id))
            .ok_or_else(|| PlaybackError::TrackNotInQueue(id.clone()))?;

        self.play_queue_index(index)
    }

    /// Make the track at a queue index current and start playing it
    pub fn select_queue_index(&mut self, index: usize) -> Result<()> {
        if index >= self.queue.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        self.play_queue_index(index)
    }

    /// Pause when playing, resume when paused
    ///
    /// A rejected pause leaves the session playing, since the output is
    /// still producing sound.
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let before = self.state();
        if self.playing {
            if let Err(e) = self.output.pause() {
                warn!("Output rejected pause: {}", e);
                self.pending_events.push(SessionEvent::Error {
                    message: e.to_string(),
                });
                return Err(e);
            }
        } else if let Err(e) = self.output.play() {
            return Err(self.command_failed(before, e));
        }

        self.playing = !self.playing;
        debug!("Transport {:?} -> {:?}", before, self.state());
        self.emit_state_if_changed(before);
        Ok(())
    }

    /// Skip to the next queue track, wrapping to the start
    ///
    /// With repeat-one the current track restarts instead.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }

        if self.repeat == RepeatMode::One && self.current.is_some() {
            return self.restart_current();
        }

        let index = self
            .queue
            .next_index(self.current_queue_index())
            .ok_or(PlaybackError::QueueEmpty)?;
        self.play_queue_index(index)
    }

    /// Go back to the previous queue track, wrapping to the end
    ///
    /// With repeat-one the current track restarts instead.
    pub fn previous(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }

        if self.repeat == RepeatMode::One && self.current.is_some() {
            return self.restart_current();
        }

        let index = self
            .queue
            .previous_index(self.current_queue_index())
            .ok_or(PlaybackError::QueueEmpty)?;
        self.play_queue_index(index)
    }

    /// Move to `seconds` within the current track
    ///
    /// The target is clamped to the track; `playing` is unchanged.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        let Some(current) = &self.current else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        let duration = current.track.duration_secs;
        let target = clamp_position(seconds, duration);

        let before = self.state();
        if let Err(e) = self.output.seek(target) {
            return Err(self.command_failed(before, e));
        }

        self.elapsed = target;
        self.pending_events.push(SessionEvent::PositionUpdate {
            elapsed: target,
            duration,
        });
        Ok(())
    }

    /// Move to a fraction (0.0 - 1.0) of the current track
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        let Some(current) = &self.current else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let seconds = fraction * f64::from(current.track.duration_secs);
        self.seek(seconds)
    }

    // ===== Volume =====

    /// Set volume, clamped into [0, 1]
    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        let level = self.volume.set_level(level);
        self.push_volume(level)
    }

    /// Toggle between silent and full volume
    ///
    /// Returns the new level.
    pub fn toggle_mute(&mut self) -> Result<f32> {
        let level = self.volume.toggle_mute();
        self.push_volume(level)?;
        Ok(level)
    }

    fn push_volume(&mut self, level: f32) -> Result<()> {
        self.pending_events.push(SessionEvent::VolumeChanged { level });

        self.output.set_volume(level).map_err(|e| {
            warn!("Output rejected volume {}: {}", level, e);
            self.pending_events.push(SessionEvent::Error {
                message: e.to_string(),
            });
            e
        })
    }

    // ===== Output Events =====

    /// Feed an asynchronous output event into the session
    ///
    /// Events whose ticket does not match the current load are ignored.
    pub fn handle_output_event(&mut self, event: OutputEvent) -> Result<()> {
        let OutputEvent { ticket, kind } = event;
        match kind {
            OutputEventKind::TimeUpdate(seconds) => {
                self.handle_time_update(&ticket, seconds);
                Ok(())
            }
            OutputEventKind::Ended => self.handle_ended(&ticket),
            OutputEventKind::PlayStateChanged(is_playing) => {
                self.handle_play_state_changed(&ticket, is_playing);
                Ok(())
            }
            OutputEventKind::LoadFailed(reason) => self.handle_load_failed(&ticket, reason),
        }
    }

    /// Record a position report from the output
    pub fn handle_time_update(&mut self, ticket: &LoadTicket, seconds: f64) {
        let Some(duration) = self.current_duration_for(ticket, "TimeUpdate") else {
            return;
        };

        self.elapsed = clamp_position(seconds, duration);
        self.pending_events.push(SessionEvent::PositionUpdate {
            elapsed: self.elapsed,
            duration,
        });
    }

    /// Current track reached its end
    ///
    /// - repeat one: restart the same load from 0
    /// - repeat all: advance, wrapping to the start
    /// - repeat off: advance, or stop at position 0 after the last track
    pub fn handle_ended(&mut self, ticket: &LoadTicket) -> Result<()> {
        if self.current_duration_for(ticket, "Ended").is_none() {
            return Ok(());
        }

        self.pending_events.push(SessionEvent::TrackFinished {
            track_id: ticket.track_id.to_string(),
        });

        match self.repeat {
            RepeatMode::One => self.replay_current(),
            RepeatMode::All | RepeatMode::Off => {
                let at_last = self
                    .current_queue_index()
                    .is_some_and(|index| self.queue.is_last(index));

                if self.queue.is_empty() || (self.repeat == RepeatMode::Off && at_last) {
                    self.stop_at_end();
                    Ok(())
                } else {
                    let index = self
                        .queue
                        .next_index(self.current_queue_index())
                        .ok_or(PlaybackError::QueueEmpty)?;
                    self.play_queue_index(index)
                }
            }
        }
    }

    /// Output started or stopped on its own (e.g. device interruption)
    pub fn handle_play_state_changed(&mut self, ticket: &LoadTicket, is_playing: bool) {
        if self.current_duration_for(ticket, "PlayStateChanged").is_none() {
            return;
        }

        let before = self.state();
        self.playing = is_playing;
        self.emit_state_if_changed(before);
    }

    /// Output could not load or play the current media
    ///
    /// The session stops playing and the failure is returned to the caller.
    pub fn handle_load_failed(&mut self, ticket: &LoadTicket, reason: String) -> Result<()> {
        if self.current_duration_for(ticket, "LoadFailed").is_none() {
            return Ok(());
        }

        let before = self.state();
        Err(self.command_failed(before, PlaybackError::Output(reason)))
    }

    // ===== State Queries =====

    /// Current transport state
    pub fn state(&self) -> TransportState {
        match (&self.current, self.playing) {
            (None, _) => TransportState::Idle,
            (Some(_), false) => TransportState::Paused,
            (Some(_), true) => TransportState::Playing,
        }
    }

    /// Whether playback is requested
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref().map(|c| &c.track)
    }

    /// Playlist the current track was started from
    pub fn current_playlist(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.playlist.as_str())
    }

    /// Ticket of the current load
    pub fn current_ticket(&self) -> Option<&LoadTicket> {
        self.current.as_ref().map(|c| &c.ticket)
    }

    /// Queue index of the current track
    ///
    /// `None` when idle or when the current track is not in the active queue.
    pub fn current_queue_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.queue
            .position_of(&self.catalog, &current.playlist, &current.track)
    }

    /// Elapsed seconds in the current track
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Volume level (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Whether the volume is at zero
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Whether the active queue is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Selected playlist name
    pub fn selected_playlist(&self) -> Option<&str> {
        self.selected_playlist.as_deref()
    }

    /// Search query as typed
    pub fn search_query(&self) -> &str {
        self.search_query.as_str()
    }

    /// Catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Active queue
    pub fn queue(&self) -> &ActiveQueue {
        &self.queue
    }

    /// Active queue tracks in play order
    pub fn queue_tracks(&self) -> Vec<&Track> {
        self.queue.tracks(&self.catalog)
    }

    /// Output adapter
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Owned view of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        let playlists = self
            .catalog
            .playlists()
            .iter()
            .map(|p| PlaylistSummary {
                name: p.name.clone(),
                track_count: p.len(),
                cover_art: p.cover_art.clone(),
                selected: self.selected_playlist.as_deref() == Some(p.name.as_str()),
            })
            .collect();

        let current_index = self.current_queue_index();
        let queue = self
            .queue_tracks()
            .into_iter()
            .enumerate()
            .map(|(index, track)| QueueRow {
                position: index + 1,
                id: track.id.to_string(),
                title: track.title.clone(),
                artist: track.artist.clone(),
                duration: track.duration_secs,
                duration_label: format_time(f64::from(track.duration_secs)),
                cover_art: track.cover_art.clone(),
                is_current: current_index == Some(index),
            })
            .collect();

        let now_playing = self.current.as_ref().map(|c| NowPlaying {
            playlist: c.playlist.clone(),
            id: c.track.id.to_string(),
            title: c.track.title.clone(),
            artist: c.track.artist.clone(),
            album: c.track.album.clone(),
            duration: c.track.duration_secs,
            duration_label: format_time(f64::from(c.track.duration_secs)),
            cover_art: c.track.cover_art.clone(),
            in_queue: current_index.is_some(),
        });

        let duration = self.current.as_ref().map_or(0, |c| c.track.duration_secs);

        SessionSnapshot {
            playlists,
            selected_playlist: self.selected_playlist.clone(),
            search_query: self.search_query.as_str().to_string(),
            shuffled: self.shuffled,
            repeat: self.repeat,
            queue,
            now_playing,
            state: self.state(),
            elapsed: self.elapsed,
            elapsed_label: format_time(self.elapsed),
            progress: progress_fraction(self.elapsed, duration),
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn play_queue_index(&mut self, index: usize) -> Result<()> {
        let playlist = self
            .queue
            .playlist_name()
            .ok_or(PlaybackError::QueueEmpty)?
            .to_string();
        let track = self
            .queue
            .track_at(&self.catalog, index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        self.start_track(playlist, track)
    }

    /// Reload the current track under a new ticket
    fn restart_current(&mut self) -> Result<()> {
        let Some(current) = self.current.clone() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        self.start_track(current.playlist, current.track)
    }

    /// Load `track` under a fresh ticket and play it from the start
    fn start_track(&mut self, playlist: String, track: Track) -> Result<()> {
        let before = self.state();
        let ticket = LoadTicket {
            load_id: self.next_load_id,
            track_id: track.id.clone(),
        };
        self.next_load_id += 1;

        info!("Playing '{}' by {} [{}]", track.title, track.artist, ticket);

        let previous_track_id = self.current.as_ref().map(|c| c.track.id.to_string());
        self.pending_events.push(SessionEvent::TrackChanged {
            track_id: track.id.to_string(),
            previous_track_id,
        });

        let source = track.source.clone();
        self.current = Some(CurrentTrack {
            playlist,
            track,
            ticket: ticket.clone(),
        });
        self.elapsed = 0.0;
        self.playing = true;

        if let Err(e) = self
            .output
            .load(&ticket, &source)
            .and_then(|()| self.output.play())
        {
            return Err(self.command_failed(before, e));
        }

        self.emit_state_if_changed(before);
        Ok(())
    }

    /// Repeat-one end of track: same load, back to 0
    fn replay_current(&mut self) -> Result<()> {
        let before = self.state();
        self.elapsed = 0.0;
        self.playing = true;

        if let Err(e) = self.output.seek(0.0).and_then(|()| self.output.play()) {
            return Err(self.command_failed(before, e));
        }

        if let Some(current) = &self.current {
            self.pending_events.push(SessionEvent::PositionUpdate {
                elapsed: 0.0,
                duration: current.track.duration_secs,
            });
        }
        self.emit_state_if_changed(before);
        Ok(())
    }

    /// End of queue with repeat off: paused at position 0
    fn stop_at_end(&mut self) {
        let before = self.state();
        debug!("End of queue reached");
        self.playing = false;
        self.elapsed = 0.0;

        if let Err(e) = self.output.seek(0.0) {
            warn!("Output rejected rewind at end of queue: {}", e);
        }

        if let Some(current) = &self.current {
            self.pending_events.push(SessionEvent::PositionUpdate {
                elapsed: 0.0,
                duration: current.track.duration_secs,
            });
        }
        self.emit_state_if_changed(before);
    }

    /// Duration of the current track if `ticket` belongs to the current load
    fn current_duration_for(&self, ticket: &LoadTicket, what: &str) -> Option<u32> {
        match &self.current {
            Some(current) if current.ticket == *ticket => Some(current.track.duration_secs),
            Some(current) => {
                debug!(
                    "Ignoring stale {} for {} (current load {})",
                    what, ticket, current.ticket
                );
                None
            }
            None => {
                debug!("Ignoring {} for {} while idle", what, ticket);
                None
            }
        }
    }

    /// Record an output failure: stop playing, report, hand the error back
    fn command_failed(&mut self, before: TransportState, error: PlaybackError) -> PlaybackError {
        warn!("Output failure: {}", error);
        self.playing = false;
        self.pending_events.push(SessionEvent::Error {
            message: error.to_string(),
        });
        self.emit_state_if_changed(before);
        error
    }

    fn emit_state_if_changed(&mut self, before: TransportState) {
        let state = self.state();
        if state != before {
            self.pending_events
                .push(SessionEvent::StateChanged { state });
        }
    }
}

/// Clamp a position into [0, duration]
///
/// Unknown durations (0) only clamp from below. NaN maps to 0.
fn clamp_position(seconds: f64, duration: u32) -> f64 {
    let seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };

    if duration > 0 {
        seconds.min(f64::from(duration))
    } else if seconds.is_finite() {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MockOutputAdapter;
    use groove_core::Playlist;
    use mockall::predicate::eq;

    fn catalog() -> Catalog {
        let rock = Playlist::new(
            "Rock",
            vec![
                Track::new(TrackId::from(1), "Alpha", "a.mp3").with_duration_secs(180),
                Track::new(TrackId::from(2), "Beta", "b.mp3").with_duration_secs(200),
            ],
        );
        Catalog::new(vec![rock]).unwrap()
    }

    fn permissive_mock() -> MockOutputAdapter {
        let mut output = MockOutputAdapter::new();
        output.expect_set_volume().returning(|_| Ok(()));
        output
    }

    #[test]
    fn clamp_position_bounds() {
        assert_eq!(clamp_position(-3.0, 100), 0.0);
        assert_eq!(clamp_position(250.0, 100), 100.0);
        assert_eq!(clamp_position(42.5, 100), 42.5);
        assert_eq!(clamp_position(f64::NAN, 100), 0.0);
        assert_eq!(clamp_position(500.0, 0), 500.0);
        assert_eq!(clamp_position(f64::INFINITY, 0), 0.0);
    }

    #[test]
    fn select_track_loads_then_plays() {
        let mut output = permissive_mock();
        let mut seq = mockall::Sequence::new();
        output
            .expect_load()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|ticket, source| ticket.load_id == 1 && source.as_str() == "b.mp3")
            .returning(|_, _| Ok(()));
        output
            .expect_play()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let mut session = PlaybackSession::with_defaults(catalog(), output);
        session.select_playlist("Rock").unwrap();
        session.select_track(&TrackId::from(2)).unwrap();

        assert_eq!(session.state(), TransportState::Playing);
        assert_eq!(session.current_queue_index(), Some(1));
    }

    #[test]
    fn rejected_load_leaves_session_paused() {
        let mut output = permissive_mock();
        output
            .expect_load()
            .returning(|_, _| Err(PlaybackError::output("unsupported format")));
        output.expect_play().never();

        let mut session = PlaybackSession::with_defaults(catalog(), output);
        session.select_playlist("Rock").unwrap();
        session.drain_events();

        let result = session.select_track(&TrackId::from(1));
        assert!(matches!(result, Err(PlaybackError::Output(_))));
        assert!(!session.is_playing());
        assert_eq!(session.state(), TransportState::Paused);
        assert_eq!(session.current_track().map(|t| t.title.as_str()), Some("Alpha"));

        let events = session.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::Error { message } if message.contains("unsupported format"))));
    }

    #[test]
    fn rejected_play_on_resume_keeps_paused() {
        let mut output = permissive_mock();
        output.expect_load().returning(|_, _| Ok(()));
        output.expect_pause().times(1).returning(|| Ok(()));
        let mut calls = 0;
        output.expect_play().returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(())
            } else {
                Err(PlaybackError::output("autoplay blocked"))
            }
        });

        let mut session = PlaybackSession::with_defaults(catalog(), output);
        session.select_playlist("Rock").unwrap();
        session.select_track(&TrackId::from(1)).unwrap();
        session.toggle_play().unwrap();
        assert_eq!(session.state(), TransportState::Paused);

        assert!(session.toggle_play().is_err());
        assert_eq!(session.state(), TransportState::Paused);
    }

    #[test]
    fn rejected_pause_keeps_playing() {
        let mut output = permissive_mock();
        output.expect_load().returning(|_, _| Ok(()));
        output.expect_play().times(1).returning(|| Ok(()));
        output
            .expect_pause()
            .times(2)
            .returning(|| Err(PlaybackError::output("device busy")));

        let mut session = PlaybackSession::with_defaults(catalog(), output);
        session.select_playlist("Rock").unwrap();
        session.select_track(&TrackId::from(1)).unwrap();
        session.drain_events();

        assert!(session.toggle_play().is_err());
        assert_eq!(session.state(), TransportState::Playing);

        // Still playing, so the next toggle tries to pause again
        assert!(session.toggle_play().is_err());
        assert_eq!(session.state(), TransportState::Playing);

        let events = session.drain_events();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| matches!(e, SessionEvent::Error { message } if message.contains("device busy"))));
    }

    #[test]
    fn rejected_mute_still_records_level() {
        let mut output = MockOutputAdapter::new();
        output.expect_set_volume().with(eq(0.5)).returning(|_| Ok(()));
        output
            .expect_set_volume()
            .with(eq(0.0))
            .returning(|_| Err(PlaybackError::output("device gone")));

        let config = SessionConfig {
            volume: 0.5,
            ..SessionConfig::default()
        };
        let mut session = PlaybackSession::new(catalog(), output, config);
        assert!(session.toggle_mute().is_err());
        assert!(session.is_muted());
    }

    #[test]
    fn rejected_volume_still_records_level() {
        let mut output = MockOutputAdapter::new();
        output.expect_set_volume().with(eq(1.0)).returning(|_| Ok(()));
        output
            .expect_set_volume()
            .with(eq(0.25))
            .returning(|_| Err(PlaybackError::output("device gone")));

        let mut session = PlaybackSession::with_defaults(catalog(), output);
        assert!(session.set_volume(0.25).is_err());
        assert_eq!(session.volume(), 0.25);
    }

    #[test]
    fn seek_forwards_clamped_target() {
        let mut output = permissive_mock();
        output.expect_load().returning(|_, _| Ok(()));
        output.expect_play().returning(|| Ok(()));
        output.expect_seek().with(eq(180.0)).times(1).returning(|_| Ok(()));

        let mut session = PlaybackSession::with_defaults(catalog(), output);
        session.select_playlist("Rock").unwrap();
        session.select_track(&TrackId::from(1)).unwrap();
        session.seek(999.0).unwrap();

        assert_eq!(session.elapsed(), 180.0);
        assert!(session.is_playing());
    }

    #[test]
    fn initial_volume_is_pushed_to_output() {
        let mut output = MockOutputAdapter::new();
        output
            .expect_set_volume()
            .with(eq(0.5))
            .times(1)
            .returning(|_| Ok(()));

        let config = SessionConfig {
            volume: 0.5,
            ..SessionConfig::default()
        };
        let session = PlaybackSession::new(catalog(), output, config);
        assert_eq!(session.volume(), 0.5);
    }
}
