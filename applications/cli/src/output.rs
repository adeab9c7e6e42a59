//! Simulated output device
//!
//! Tracks a wall-clock playback position instead of decoding audio. Used by
//! the terminal front end so the transport behaves like a real player:
//! positions advance while playing, and media ends after its duration.
use groove_core::{Catalog, SourceLocator};
use groove_playback::{LoadTicket, OutputAdapter, OutputEvent, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct LoadedMedia {
    ticket: LoadTicket,
    source: SourceLocator,
    /// Seconds (0 = unknown, never ends)
    duration: f64,
}

/// Output adapter driven by the system clock
#[derive(Debug)]
pub struct SimulatedOutput {
    /// Known durations by source locator
    durations: RefCell<HashMap<String, u32>>,
    media: Option<LoadedMedia>,
    /// Position at the last play/pause/seek
    base_position: f64,
    /// Set while playing
    started_at: Option<Instant>,
    volume: f32,
    speed: f64,
    ended_reported: Cell<bool>,
}

impl SimulatedOutput {
    /// Create an output that knows the durations of every catalog track
    pub fn new(catalog: &Catalog) -> Self {
        let durations = catalog
            .playlists()
            .iter()
            .flat_map(|p| p.tracks.iter())
            .map(|t| (t.source.to_string(), t.duration_secs))
            .collect();

        Self {
            durations: RefCell::new(durations),
            media: None,
            base_position: 0.0,
            started_at: None,
            volume: 1.0,
            speed: 1.0,
            ended_reported: Cell::new(false),
        }
    }

    /// Play `speed` seconds of media per wall-clock second
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
        self
    }

    /// Learn durations of a reloaded catalog
    pub fn register_catalog(&self, catalog: &Catalog) {
        let mut durations = self.durations.borrow_mut();
        for track in catalog.playlists().iter().flat_map(|p| p.tracks.iter()) {
            durations.insert(track.source.to_string(), track.duration_secs);
        }
    }

    /// Currently loaded source
    pub fn source(&self) -> Option<&SourceLocator> {
        self.media.as_ref().map(|m| &m.source)
    }

    /// Output volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether media is advancing at `now`
    pub fn is_playing_at(&self, now: Instant) -> bool {
        self.started_at.is_some() && !self.finished_at(now)
    }

    /// Position in seconds at `now`, capped at the media duration
    pub fn position_at(&self, now: Instant) -> f64 {
        let running = self
            .started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64() * self.speed)
            .unwrap_or(0.0);
        let position = self.base_position + running;

        match &self.media {
            Some(media) if media.duration > 0.0 => position.min(media.duration),
            _ => position,
        }
    }

    fn finished_at(&self, now: Instant) -> bool {
        match &self.media {
            Some(media) if media.duration > 0.0 => self.position_at(now) >= media.duration,
            _ => false,
        }
    }

    /// Events due now
    pub fn poll(&self) -> Vec<OutputEvent> {
        self.poll_at(Instant::now())
    }

    /// Events due at `now`: a position update while running, then `Ended`
    /// once when the media runs out
    pub fn poll_at(&self, now: Instant) -> Vec<OutputEvent> {
        let Some(media) = &self.media else {
            return Vec::new();
        };
        if self.started_at.is_none() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.ended_reported.get() {
            return events;
        }

        events.push(OutputEvent::time_update(
            media.ticket.clone(),
            self.position_at(now),
        ));

        if self.finished_at(now) {
            self.ended_reported.set(true);
            events.push(OutputEvent::ended(media.ticket.clone()));
        }

        events
    }

    /// Stop the clock if the media ran out, like a media element does
    fn settle(&mut self, now: Instant) {
        if self.started_at.is_some() && self.finished_at(now) {
            self.base_position = self.position_at(now);
            self.started_at = None;
        }
    }
}

impl OutputAdapter for SimulatedOutput {
    fn load(&mut self, ticket: &LoadTicket, source: &SourceLocator) -> Result<()> {
        let duration = self
            .durations
            .borrow()
            .get(source.as_str())
            .copied()
            .unwrap_or(0);
        debug!("Simulated load {} ({}s) for {}", source, duration, ticket);

        self.media = Some(LoadedMedia {
            ticket: ticket.clone(),
            source: source.clone(),
            duration: f64::from(duration),
        });
        self.base_position = 0.0;
        self.started_at = None;
        self.ended_reported.set(false);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let now = Instant::now();
        self.settle(now);
        if self.media.is_none() {
            return Err(groove_playback::PlaybackError::output("nothing loaded"));
        }

        if self.started_at.is_none() {
            if self.finished_at(now) {
                // Playing ended media restarts it
                self.base_position = 0.0;
            }
            self.started_at = Some(now);
            self.ended_reported.set(false);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let now = Instant::now();
        self.settle(now);
        if self.started_at.is_some() {
            self.base_position = self.position_at(now);
            self.started_at = None;
        }
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        let now = Instant::now();
        self.settle(now);
        self.base_position = seconds.max(0.0);
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
        self.ended_reported.set(false);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume;
        Ok(())
    }
}
