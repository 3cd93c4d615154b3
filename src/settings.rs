//! Game settings
//!
//! Loaded once at startup from a JSON file. Every field has a default so a
//! partial file (or no file at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Screen width in pixels
    pub screen_width: f64,
    /// Screen height in pixels
    pub screen_height: f64,

    // === Population ===
    /// Asteroids at the start of a session
    pub asteroids: usize,
    /// Boids at the start of a session
    pub boids: usize,
    /// Radius of the boids vision
    pub vision_radius: f64,

    // === Pacing ===
    /// Ticks per second requested from the frame driver
    pub max_tps: u32,
    /// Seconds between periodic asteroid spawns. `None` keeps a finite
    /// population and enables the win condition.
    pub asteroid_respawn_interval: Option<f64>,
    /// Seconds alive needed to earn one point
    pub score_time_unit: f64,

    // === Collisions ===
    /// Hitbox scale (<1.0 is more forgiving)
    pub collision_precision: f64,

    // === Misc ===
    /// Start with audio muted
    pub muted: bool,
    /// Debug drawing and verbose logging
    pub debug: bool,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1080.0,
            screen_height: 720.0,

            asteroids: 4,
            boids: 40,
            vision_radius: 75.0,

            max_tps: 60,
            asteroid_respawn_interval: Some(10.0),
            score_time_unit: 5.0,

            collision_precision: 1.0,

            muted: false,
            debug: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No settings at {}, using defaults",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
            Error::InvalidSettings {
                field,
                reason: reason.into(),
            }
        }

        if !(self.screen_width > 0.0 && self.screen_width.is_finite()) {
            return Err(invalid("screen_width", "must be a positive number"));
        }
        if !(self.screen_height > 0.0 && self.screen_height.is_finite()) {
            return Err(invalid("screen_height", "must be a positive number"));
        }
        if !(self.vision_radius >= 0.0 && self.vision_radius.is_finite()) {
            return Err(invalid("vision_radius", "must be zero or positive"));
        }
        if self.max_tps == 0 {
            return Err(invalid("max_tps", "must be at least 1"));
        }
        if !(self.score_time_unit > 0.0) {
            return Err(invalid("score_time_unit", "must be positive"));
        }
        if let Some(interval) = self.asteroid_respawn_interval {
            if !(interval > 0.0) {
                return Err(invalid(
                    "asteroid_respawn_interval",
                    format!("must be positive, got {interval}"),
                ));
            }
        }
        if !(self.collision_precision > 0.0 && self.collision_precision <= 1.0) {
            return Err(invalid("collision_precision", "must be in (0, 1]"));
        }
        Ok(())
    }

    /// Whether destroyed asteroids are replaced and new ones spawn over time
    pub fn respawn_enabled(&self) -> bool {
        self.asteroid_respawn_interval.is_some()
    }

    /// Tick length requested by `max_tps`
    pub fn tick_duration(&self) -> f64 {
        1.0 / self.max_tps.max(1) as f64
    }
}
