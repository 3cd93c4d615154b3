//! Player ship

use uuid::Uuid;

use super::Bullet;
use crate::assets::{ImageHandle, SpriteSheet};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::sim::agent::{Agent, Ctx};
use crate::sim::body::{ClampPolicy, EntityKind, KinematicBody};
use crate::sim::vector::Vector2D;

#[derive(Debug, Clone)]
pub struct Ship {
    body: KinematicBody,
    image: ImageHandle,
    /// Sim clock time of the last accepted shot
    last_fire: Option<f64>,
    thrusting: bool,
}

impl Ship {
    /// Nose pointing up the screen
    pub const START_ORIENTATION: f64 = 3.0 * std::f64::consts::FRAC_PI_2;

    pub fn new(id: Uuid, position: Vector2D, sprites: &SpriteSheet) -> Self {
        let body = KinematicBody::new(id, EntityKind::Ship, position, SHIP_SIZE, SHIP_SIZE)
            .with_orientation(Self::START_ORIENTATION)
            .with_max_velocity(DEFAULT_MAX_VELOCITY)
            .with_clamp(ClampPolicy::Heading);
        Self {
            body,
            image: sprites.ship,
            last_fire: None,
            thrusting: false,
        }
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    /// Spawn a bullet unless the previous shot was under `FIRE_INTERVAL` ago
    pub fn fire(&mut self, ctx: &mut Ctx<'_>) -> bool {
        if self.last_fire.is_some_and(|last| ctx.now - last < FIRE_INTERVAL) {
            return false;
        }

        let id = ctx.new_id();
        let bullet = Bullet::new(id, self.body.position(), self.body.orientation(), ctx.sprites);
        ctx.spawn(Box::new(bullet));
        ctx.play(SoundEffect::Fire);
        self.last_fire = Some(ctx.now);
        true
    }
}

impl Agent for Ship {
    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    fn image(&self) -> ImageHandle {
        self.image
    }

    fn update(&mut self, ctx: &mut Ctx<'_>) {
        let input = ctx.input;

        if input.quit {
            log::info!("Ship {} self-destructed", self.id());
            self.explode(ctx);
            return;
        }

        if input.rotate_left {
            self.body.rotate(-SHIP_ROTATION_STEP);
        }
        if input.rotate_right {
            self.body.rotate(SHIP_ROTATION_STEP);
        }

        if input.thrust {
            if !self.thrusting {
                ctx.play(SoundEffect::Thrust);
            }
            self.body.thrust(1.0);
        } else {
            self.body.thrust(0.0);
        }
        self.thrusting = input.thrust;

        self.body.integrate(&ctx.arena);

        if input.fire {
            self.fire(ctx);
        }
    }

    fn explode(&mut self, ctx: &mut Ctx<'_>) {
        log::debug!("Ship {} exploded at {:?}", self.id(), self.body.position());
        ctx.despawn(self.id(), self.kind());
        ctx.play(SoundEffect::BangLarge);
    }
}
