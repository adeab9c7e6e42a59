//! Volume control
//!
//! Linear output volume in [0, 1]. Zero doubles as "muted": the mute toggle
//! flips between 0 and 1 and does not remember the previous level.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0 - 1.0)
    level: f32,
}

impl Volume {
    /// Create a volume controller, clamping `level` into [0, 1]
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level),
        }
    }

    /// Clamp a requested level into [0, 1]
    ///
    /// NaN maps to 0.
    pub fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }

    /// Set volume level, returning the clamped value
    pub fn set_level(&mut self, level: f32) -> f32 {
        self.level = Self::clamp(level);
        self.level
    }

    /// Current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Whether the volume is at zero
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Toggle between 0 and 1, returning the new level
    pub fn toggle_mute(&mut self) -> f32 {
        self.level = if self.is_muted() { 1.0 } else { 0.0 };
        self.level
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
