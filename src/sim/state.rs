//! Session state
//!
//! Owns the registry, the seeded RNG and everything the loop mutates. Only
//! the simulation loop writes here; hosts read it and drain events.

use std::io::Write;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::{Agent, Command, Commands, Ctx, new_id, random_heading};
use super::agents::{Asteroid, Boid, Ship};
use super::body::{Arena, EntityKind, KinematicBody};
use super::registry::{Bucket, EntityRegistry};
use super::vector::Vector2D;
use crate::assets::{ROCK_VARIANTS, SpriteSheet};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::error::Result;
use crate::highscores::HighScores;
use crate::input::TickInput;
use crate::render::Renderer;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Ship lost (`won == false`) or every asteroid cleared
    GameOver { won: bool },
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }
}

/// Things the host should react to, drained after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Host should write `GameState::dump` somewhere
    DumpRequested,
    MuteToggled(bool),
    GameOver { won: bool, score: u64 },
    Restarted,
}

/// Serialized form of one live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: Uuid,
    pub kind: EntityKind,
    pub position: [f64; 2],
    pub size: [f64; 2],
    pub orientation_rad: f64,
    pub orientation_deg: f64,
    pub velocity: [f64; 2],
    pub acceleration: [f64; 2],
}

impl From<&KinematicBody> for EntitySnapshot {
    fn from(body: &KinematicBody) -> Self {
        Self {
            id: body.id(),
            kind: body.kind(),
            position: body.position().to_array(),
            size: [body.width(), body.height()],
            orientation_rad: body.orientation(),
            orientation_deg: body.orientation().to_degrees(),
            velocity: body.velocity().to_array(),
            acceleration: body.acceleration().to_array(),
        }
    }
}

/// File name for a dump taken at sim clock `clock` (seconds)
pub fn dump_file_name(clock: f64) -> String {
    format!("asteboids-dump-{:010}.txt", (clock.max(0.0) * 1000.0) as u64)
}

#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    pub sprites: SpriteSheet,
    pub rng: Pcg32,
    pub registry: EntityRegistry,
    pub phase: GamePhase,
    /// Seconds survived in the current session
    pub elapsed: f64,
    /// Seconds since the state was created, never reset
    pub clock: f64,
    /// Asteroids and rubble destroyed this session
    pub kills: u32,
    pub high_score: u64,
    pub best_duration: f64,
    pub leaderboard: HighScores,
    pub muted: bool,
    pub events: Vec<GameEvent>,
    pub(crate) commands: Commands,
    /// Controls from the previous tick, for edge-triggered actions
    pub(crate) prev_input: TickInput,
}

impl GameState {
    /// Validate settings and start a session. Seeds from `settings.seed`,
    /// or from the OS when unset.
    pub fn new(settings: Settings, sprites: SpriteSheet) -> Result<Self> {
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        Self::with_seed(settings, sprites, seed)
    }

    pub fn with_seed(settings: Settings, sprites: SpriteSheet, seed: u64) -> Result<Self> {
        settings.validate()?;
        log::info!("New game, seed {}", seed);

        let mut state = Self {
            muted: settings.muted,
            settings,
            sprites,
            rng: Pcg32::seed_from_u64(seed),
            registry: EntityRegistry::new(),
            phase: GamePhase::Playing,
            elapsed: 0.0,
            clock: 0.0,
            kills: 0,
            high_score: 0,
            best_duration: 0.0,
            leaderboard: HighScores::new(),
            events: Vec::new(),
            commands: Commands::new(),
            prev_input: TickInput::default(),
        };
        state.start();
        Ok(state)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.settings.screen_width, self.settings.screen_height)
    }

    /// Clear every bucket and populate a fresh session
    pub fn start(&mut self) {
        self.registry.clear();
        self.commands = Commands::new();
        self.phase = GamePhase::Playing;
        self.elapsed = 0.0;
        self.kills = 0;

        let ship = Ship::new(new_id(&mut self.rng), self.arena().center(), &self.sprites);
        self.registry.register(Box::new(ship));
        for _ in 0..self.settings.asteroids {
            self.add_asteroid();
        }
        for _ in 0..self.settings.boids {
            self.add_boid();
        }

        log::info!(
            "Session started: {} asteroids, {} boids",
            self.settings.asteroids,
            self.settings.boids
        );
    }

    pub fn restart(&mut self) {
        self.start();
        self.events.push(GameEvent::Restarted);
    }

    fn random_position(&mut self) -> Vector2D {
        Vector2D::new(
            self.rng.random_range(0.0..self.settings.screen_width),
            self.rng.random_range(0.0..self.settings.screen_height),
        )
    }

    fn near_ship(&self, position: Vector2D) -> bool {
        self.registry
            .bodies(Bucket::Ships)
            .any(|ship| ship.position().distance(position) < SAFE_SPAWN_RADIUS)
    }

    /// Random position, re-rolled a few times to keep clear of ships
    fn spawn_position(&mut self) -> Vector2D {
        let mut position = self.random_position();
        for _ in 0..SAFE_SPAWN_ATTEMPTS {
            if !self.near_ship(position) {
                break;
            }
            position = self.random_position();
        }
        position
    }

    /// Register a new asteroid at a random position and heading
    pub fn add_asteroid(&mut self) -> Uuid {
        let position = self.spawn_position();
        let heading = random_heading(&mut self.rng);
        let variant = self.rng.random_range(0..ROCK_VARIANTS as usize);
        let id = new_id(&mut self.rng);
        self.registry
            .register(Box::new(Asteroid::new(id, position, heading, variant, &self.sprites)));
        id
    }

    pub fn add_boid(&mut self) -> Uuid {
        let position = self.random_position();
        let heading = random_heading(&mut self.rng);
        let id = new_id(&mut self.rng);
        self.registry
            .register(Box::new(Boid::new(id, position, heading, &self.sprites)));
        id
    }

    pub fn ship(&self) -> Option<&dyn Agent> {
        self.registry.bucket(Bucket::Ships).next()
    }

    pub fn asteroid_count(&self) -> usize {
        self.registry.count(EntityKind::Asteroid)
    }

    /// Time points plus kill points
    pub fn score(&self) -> u64 {
        let unit = self.settings.score_time_unit;
        let time_points = if unit > 0.0 {
            (self.elapsed / unit).floor() as u64
        } else {
            0
        };
        time_points + KILL_POINTS * self.kills as u64
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.events.push(GameEvent::MuteToggled(self.muted));
    }

    /// Run `f` on one agent with exclusive access and a fresh context.
    /// The agent is out of the registry while `f` runs.
    pub(crate) fn with_agent<F>(&mut self, id: Uuid, input: &TickInput, f: F) -> bool
    where
        F: FnOnce(&mut dyn Agent, &mut Ctx<'_>),
    {
        let Some(mut agent) = self.registry.take(id) else {
            return false;
        };
        let arena = self.arena();
        let mut ctx = Ctx {
            registry: &self.registry,
            input,
            rng: &mut self.rng,
            commands: &mut self.commands,
            settings: &self.settings,
            sprites: &self.sprites,
            arena,
            now: self.clock,
        };
        f(agent.as_mut(), &mut ctx);
        self.registry.restore(agent);
        true
    }

    /// Apply queued commands to the registry. Returns the ids actually
    /// removed.
    pub(crate) fn apply_commands(&mut self) -> Vec<(Uuid, EntityKind)> {
        let mut removed = Vec::new();
        for command in self.commands.drain() {
            match command {
                Command::Spawn(agent) => {
                    self.registry.register(agent);
                }
                Command::Despawn { id, kind } => {
                    if self.registry.unregister(id, kind) {
                        removed.push((id, kind));
                    }
                }
                Command::Play(effect) => {
                    if !self.muted {
                        self.events.push(GameEvent::Sound(effect));
                    }
                }
            }
        }
        removed
    }

    /// Enter game over and record the session
    pub(crate) fn finish(&mut self, won: bool) {
        let score = self.score();
        self.phase = GamePhase::GameOver { won };
        self.high_score = self.high_score.max(score);
        self.best_duration = self.best_duration.max(self.elapsed);
        if let Some(rank) = self.leaderboard.add_score(score, self.kills, self.elapsed) {
            log::info!("New high score #{}: {}", rank, score);
        }
        log::info!(
            "Game over ({}): score {}, {} kills, {:.1}s",
            if won { "won" } else { "lost" },
            score,
            self.kills,
            self.elapsed
        );
        self.events.push(GameEvent::GameOver { won, score });
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for agent in self.registry.all_entities() {
            agent.draw(renderer, self.settings.debug);
        }
    }

    /// Human-readable record of every live entity
    pub fn dump(&self, out: &mut impl Write) -> Result<()> {
        for agent in self.registry.all_entities() {
            out.write_all(agent.describe().as_bytes())?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.registry
            .all_entities()
            .map(|agent| EntitySnapshot::from(agent.body()))
            .collect()
    }

    /// Same records as [`dump`](Self::dump), as a JSON array
    pub fn dump_json(&self, out: &mut impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, &self.snapshots())?;
        out.flush()?;
        Ok(())
    }
}
