//! Asteboids - Asteroids with an ambient flock of boids
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (bodies, steering, collisions, lifecycle)
//! - `settings`: Configuration surface consumed by the simulation
//! - `input`: Abstract control polling
//! - `audio`: Fire-and-forget sound effects and the ambient beat
//! - `assets` / `render`: Opaque image handles and the draw boundary
//! - `highscores`: Session leaderboard
//! - `clock`: Fixed timestep accumulator for the frame driver

pub mod assets;
pub mod audio;
pub mod clock;
pub mod error;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::HighScores;
pub use settings::Settings;

use sim::Vector2D;

/// Game tuning constants
pub mod consts {
    use std::f64::consts::PI;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Linear drag applied to velocity every tick
    pub const FRICTION_FACTOR: f64 = 0.03;
    /// Thrust scale applied along the heading
    pub const ACCELERATION_FACTOR: f64 = 0.3;
    /// Position advance per unit of velocity per tick
    pub const VELOCITY_FACTOR: f64 = 1.0;
    /// Speed cap for bodies that do not override it
    pub const DEFAULT_MAX_VELOCITY: f64 = 5.5;

    /// Ship rotation per tick while a turn control is held (5°)
    pub const SHIP_ROTATION_STEP: f64 = PI / 36.0;
    pub const SHIP_SIZE: f64 = 50.0;
    /// Minimum delay between two shots (seconds)
    pub const FIRE_INTERVAL: f64 = 0.15;

    pub const BULLET_SPEED: f64 = 18.0;
    pub const BULLET_TTL: u32 = 30;
    pub const BULLET_SIZE: f64 = 8.0;

    pub const ASTEROID_SPEED: f64 = 2.0;
    pub const ASTEROID_SPIN: f64 = 0.05;
    pub const ASTEROID_SIZE: f64 = 100.0;
    /// Rubble fragments produced by one destroyed asteroid
    pub const RUBBLE_PER_ASTEROID: usize = 3;

    pub const RUBBLE_SPEED: f64 = 3.5;
    pub const RUBBLE_SPIN: f64 = 0.07;
    pub const RUBBLE_SIZE: f64 = 50.0;

    pub const BOID_MAX_VELOCITY: f64 = 3.0;
    pub const BOID_MAX_FORCE: f64 = 0.3;
    pub const BOID_SIZE: f64 = 10.0;
    pub const COHESION_WEIGHT: f64 = 1.5;
    pub const SEPARATION_WEIGHT: f64 = 1.9;
    pub const ALIGNMENT_WEIGHT: f64 = 1.3;

    /// Spawned asteroids keep at least this distance from any ship
    pub const SAFE_SPAWN_RADIUS: f64 = 150.0;
    pub const SAFE_SPAWN_ATTEMPTS: u32 = 8;

    /// Autopilot looks for rocks within this distance
    pub const AUTOPILOT_VISION: f64 = 250.0;
    /// Autopilot projects motion this many ticks ahead
    pub const AUTOPILOT_HORIZON: u32 = 10;

    /// Random headings are drawn from this many evenly spaced directions
    pub const HEADING_STEPS: u32 = 32;

    /// Points awarded per destroyed asteroid or rubble
    pub const KILL_POINTS: u64 = 2;
}

/// Normalize an orientation to [0, 2π)
#[inline]
pub fn normalize_orientation(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector pointing along `orientation`
#[inline]
pub fn heading_vector(orientation: f64) -> Vector2D {
    Vector2D::new(orientation.cos(), orientation.sin())
}
