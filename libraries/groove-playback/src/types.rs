//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track of the queue
    #[default]
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: off → all → one → off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "all" => Some(Self::All),
            "one" => Some(Self::One),
            _ => None,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transport state
///
/// Derived from whether a current track exists and whether it is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// No current track
    Idle,

    /// Current track loaded, not playing
    Paused,

    /// Current track playing (or requested to play)
    Playing,
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial volume in [0, 1] (default: 1.0)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffled: bool,

    /// Seed for the shuffle random source; `None` seeds from entropy
    pub shuffle_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::Off,
            shuffled: false,
            shuffle_seed: None,
        }
    }
}
