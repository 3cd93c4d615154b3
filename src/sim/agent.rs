//! Entity capability trait and the per-tick context
//!
//! Agents never mutate the registry directly. Spawns, removals and sounds go
//! into [`Commands`] and are applied by the loop once the current pass over
//! the registry is done.

use std::fmt;

use rand::Rng;
use rand_pcg::Pcg32;
use uuid::Uuid;

use super::body::{Arena, EntityKind, KinematicBody};
use super::registry::EntityRegistry;
use crate::assets::{ImageHandle, SpriteSheet};
use crate::audio::SoundEffect;
use crate::consts::HEADING_STEPS;
use crate::input::TickInput;
use crate::render::{Renderer, Sprite};
use crate::settings::Settings;

/// Something living in the registry
pub trait Agent: fmt::Debug {
    fn body(&self) -> &KinematicBody;
    fn body_mut(&mut self) -> &mut KinematicBody;

    /// Advance one tick
    fn update(&mut self, ctx: &mut Ctx<'_>);

    /// Leave the game: unregister self, and spawn children if any
    fn explode(&mut self, ctx: &mut Ctx<'_>);

    /// Image drawn at the body's position
    fn image(&self) -> ImageHandle;

    fn id(&self) -> Uuid {
        self.body().id()
    }

    fn kind(&self) -> EntityKind {
        self.body().kind()
    }

    fn draw(&self, renderer: &mut dyn Renderer, debug: bool) {
        draw_body(self.body(), self.image(), renderer, debug);
    }

    /// Dump record for this agent
    fn describe(&self) -> String {
        format!("\n *** {} ***\n{}\n", self.id(), self.body().describe())
    }
}

/// Sprite at the body's pose, plus its collision box in debug mode
pub fn draw_body(body: &KinematicBody, image: ImageHandle, renderer: &mut dyn Renderer, debug: bool) {
    renderer.draw_sprite(&Sprite {
        image,
        center: body.position(),
        orientation: body.orientation(),
        width: body.width(),
        height: body.height(),
    });
    if debug {
        renderer.draw_box(body.position(), body.width(), body.height());
    }
}

/// A deferred side effect
#[derive(Debug)]
pub enum Command {
    Spawn(Box<dyn Agent>),
    Despawn { id: Uuid, kind: EntityKind },
    Play(SoundEffect),
}

/// Side effects queued during a pass
#[derive(Debug, Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, agent: Box<dyn Agent>) {
        self.queue.push(Command::Spawn(agent));
    }

    pub fn despawn(&mut self, id: Uuid, kind: EntityKind) {
        self.queue.push(Command::Despawn { id, kind });
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.queue.push(Command::Play(effect));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Take every queued command, in order
    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.queue.drain(..)
    }
}

/// Everything an agent may read or request during a tick
pub struct Ctx<'a> {
    /// Every other agent (the one being updated is taken out)
    pub registry: &'a EntityRegistry,
    pub input: &'a TickInput,
    pub rng: &'a mut Pcg32,
    pub commands: &'a mut Commands,
    pub settings: &'a Settings,
    pub sprites: &'a SpriteSheet,
    pub arena: Arena,
    /// Simulation clock, seconds
    pub now: f64,
}

impl Ctx<'_> {
    pub fn new_id(&mut self) -> Uuid {
        new_id(self.rng)
    }

    /// One of `HEADING_STEPS` evenly spaced directions
    pub fn random_heading(&mut self) -> f64 {
        random_heading(self.rng)
    }

    pub fn spawn(&mut self, agent: Box<dyn Agent>) {
        self.commands.spawn(agent);
    }

    pub fn despawn(&mut self, id: Uuid, kind: EntityKind) {
        self.commands.despawn(id, kind);
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.commands.play(effect);
    }
}

/// Fresh entity id drawn from the session RNG
pub fn new_id(rng: &mut Pcg32) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

pub fn random_heading(rng: &mut Pcg32) -> f64 {
    let step = std::f64::consts::TAU / HEADING_STEPS as f64;
    rng.random_range(0..HEADING_STEPS) as f64 * step
}
