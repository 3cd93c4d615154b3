//! Audio boundary
//!
//! The simulation only emits [`SoundEffect`] events. Playback belongs to a
//! platform [`AudioSink`]; [`AudioManager`] applies mute and volume on top.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ship fired a bullet
    Fire,
    /// Ship engine is thrusting
    Thrust,
    /// Rubble destroyed
    BangSmall,
    /// Asteroid split
    BangMedium,
    /// Ship destroyed
    BangLarge,
    /// Ambient heartbeat, low note
    Beat1,
    /// Ambient heartbeat, high note
    Beat2,
}

/// Something that can actually make noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that logs what would have been played
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("play {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, muted: bool) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Ambient two-note beat, running on its own timer
///
/// Shares nothing with the simulation; the host advances it with wall-clock
/// frame time and forwards the beats to the audio manager.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    period: f64,
    elapsed: f64,
    high: bool,
}

impl Heartbeat {
    pub fn new(period: f64) -> Self {
        Self {
            period: period.max(f64::EPSILON),
            elapsed: 0.0,
            high: false,
        }
    }

    /// Advance the timer, returning the beat due in this interval (if any)
    pub fn advance(&mut self, dt: f64) -> Option<SoundEffect> {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.period {
            return None;
        }
        // Several missed periods still produce a single beat
        self.elapsed %= self.period;
        let beat = if self.high {
            SoundEffect::Beat2
        } else {
            SoundEffect::Beat1
        };
        self.high = !self.high;
        Some(beat)
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(1.0)
    }
}
