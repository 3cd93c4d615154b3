//! Kinematic body shared by every entity kind
//!
//! Integration order each tick: acceleration (set by the owner) → velocity
//! (friction, speed clamp) → orientation (velocity-steered bodies only) →
//! position (wrap-around).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vector::{Vector2D, VectorExt};
use crate::consts::*;
use crate::{heading_vector, normalize_orientation};

/// Entity tag, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Rubble,
    Bullet,
    Boid,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Ship,
        EntityKind::Asteroid,
        EntityKind::Rubble,
        EntityKind::Bullet,
        EntityKind::Boid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Ship => "starship",
            EntityKind::Asteroid => "asteroid",
            EntityKind::Rubble => "rubble",
            EntityKind::Bullet => "bullet",
            EntityKind::Boid => "boid",
        }
    }

    /// Asteroids and rubble: what ships crash into and bullets destroy
    pub fn is_rock(&self) -> bool {
        matches!(self, EntityKind::Asteroid | EntityKind::Rubble)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an over-speed velocity is brought back under `max_velocity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampPolicy {
    /// Re-derive velocity from the orientation: capped speed follows the nose
    Heading,
    /// Truncate the velocity vector along its own direction
    Momentum,
}

/// The wrap-around playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Physical state of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    id: Uuid,
    kind: EntityKind,
    position: Vector2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    max_velocity: f64,
    /// Radians in [0, 2π)
    orientation: f64,
    width: f64,
    height: f64,
    friction: f64,
    clamp: ClampPolicy,
    orient_to_velocity: bool,
}

impl KinematicBody {
    pub fn new(id: Uuid, kind: EntityKind, position: Vector2D, width: f64, height: f64) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vector2D::ZERO,
            acceleration: Vector2D::ZERO,
            max_velocity: DEFAULT_MAX_VELOCITY,
            orientation: 0.0,
            width,
            height,
            friction: FRICTION_FACTOR,
            clamp: ClampPolicy::Heading,
            orient_to_velocity: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_orientation(mut self, orientation: f64) -> Self {
        self.orientation = normalize_orientation(orientation);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity.max(0.0);
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    pub fn with_clamp(mut self, clamp: ClampPolicy) -> Self {
        self.clamp = clamp;
        self
    }

    /// Orientation tracks the velocity heading (boids)
    pub fn orient_to_velocity(mut self) -> Self {
        self.orient_to_velocity = true;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp
    }

    /// Teleport (no wrap applied)
    pub fn move_to(&mut self, position: Vector2D) {
        self.position = position;
    }

    /// Set the acceleration used by the next velocity update
    pub fn accelerate(&mut self, acceleration: Vector2D) {
        self.acceleration = if acceleration.is_finite() {
            acceleration
        } else {
            Vector2D::ZERO
        };
    }

    /// Acceleration along the heading; 0 cuts the engine
    pub fn thrust(&mut self, intensity: f64) {
        self.accelerate(heading_vector(self.orientation) * ACCELERATION_FACTOR * intensity);
    }

    /// Add to the orientation, keeping it in [0, 2π)
    pub fn rotate(&mut self, delta: f64) {
        self.orientation = normalize_orientation(self.orientation + delta);
    }

    /// velocity += acceleration - friction * velocity, then clamp
    pub fn update_velocity(&mut self) {
        self.velocity += self.acceleration - self.velocity * self.friction;

        if !self.velocity.is_finite() {
            self.velocity = Vector2D::ZERO;
            return;
        }

        let max = self.max_velocity;
        if self.velocity.length_squared() > max * max {
            self.velocity = match self.clamp {
                ClampPolicy::Heading => heading_vector(self.orientation) * max,
                ClampPolicy::Momentum => self.velocity.limit(max),
            };
        }
    }

    /// Point the body along its velocity (no-op when at rest)
    pub fn update_orientation(&mut self) {
        if !self.velocity.is_zero() {
            self.orientation = normalize_orientation(self.velocity.angle());
        }
    }

    /// position += velocity, then wrap
    pub fn update_position(&mut self, arena: &Arena) {
        self.position += self.velocity * VELOCITY_FACTOR;
        self.wrap(arena);
    }

    /// Hard reset to the opposite edge (not a modulo)
    pub fn wrap(&mut self, arena: &Arena) {
        if self.position.x > arena.width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = arena.width;
        }
        if self.position.y > arena.height {
            self.position.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = arena.height;
        }
    }

    /// Full integration step for a body driven by its acceleration
    pub fn integrate(&mut self, arena: &Arena) {
        self.update_velocity();
        if self.orient_to_velocity {
            self.update_orientation();
        }
        self.update_position(arena);
    }

    /// Where the body will be after `t` ticks at constant velocity
    pub fn future_position(&self, t: f64) -> Vector2D {
        self.position + self.velocity * t
    }

    /// Copy of this body moved to its future position
    pub fn projected(&self, t: f64) -> KinematicBody {
        let mut body = self.clone();
        body.position = self.future_position(t);
        body
    }

    /// Human-readable state, used by the diagnostic dump
    pub fn describe(&self) -> String {
        format!(
            "{}: pos [{}, {}]\nsize [{}, {}] orient {:.2} rad ({:.0} °)\nvel {{{:.2} {:.2}}} acc {{{:.2} {:.2}}}",
            self.kind,
            self.position.x as i64,
            self.position.y as i64,
            self.width as i64,
            self.height as i64,
            self.orientation,
            self.orientation.to_degrees(),
            self.velocity.x,
            self.velocity.y,
            self.acceleration.x,
            self.acceleration.y,
        )
    }
}
