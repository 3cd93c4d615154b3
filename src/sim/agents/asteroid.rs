//! Large drifting rock that splits into rubble

use rand::Rng;
use uuid::Uuid;

use super::{Rubble, drifting_body};
use crate::assets::{ImageHandle, ROCK_VARIANTS, SpriteSheet};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::sim::agent::{Agent, Ctx};
use crate::sim::body::{EntityKind, KinematicBody};
use crate::sim::vector::Vector2D;

/// Large rock: drifts, spins, splits into rubble when shot
#[derive(Debug, Clone)]
pub struct Asteroid {
    body: KinematicBody,
    image: ImageHandle,
    spin: f64,
}

impl Asteroid {
    pub fn new(id: Uuid, position: Vector2D, heading: f64, variant: usize, sprites: &SpriteSheet) -> Self {
        Self {
            body: drifting_body(id, EntityKind::Asteroid, position, heading, ASTEROID_SPEED, ASTEROID_SIZE),
            image: sprites.asteroid(variant),
            spin: ASTEROID_SPIN,
        }
    }
}

impl Agent for Asteroid {
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
        self.body.rotate(self.spin);
        self.body.update_position(&ctx.arena);
    }

    fn explode(&mut self, ctx: &mut Ctx<'_>) {
        let position = self.body.position();
        log::debug!("Asteroid {} split at {:?}", self.id(), position);

        ctx.despawn(self.id(), self.kind());
        for _ in 0..RUBBLE_PER_ASTEROID {
            let id = ctx.new_id();
            let heading = ctx.random_heading();
            let variant = ctx.rng.random_range(0..ROCK_VARIANTS as usize);
            let rubble = Rubble::new(id, position, heading, variant, ctx.sprites);
            ctx.spawn(Box::new(rubble));
        }
        ctx.play(SoundEffect::BangMedium);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::agent::Command;
    use crate::sim::agents::testing::{Harness, spawned};

    #[test]
    fn test_splits_into_rubble_at_last_position() {
        let mut h = Harness::new();
        let sprites = h.sprites.clone();
        let mut a = Asteroid::new(Uuid::from_u128(3), Vector2D::new(200.0, 300.0), 0.0, 0, &sprites);
        h.update(&mut a, 0.0);
        let last = a.body().position();

        h.explode(&mut a);
        let commands = h.drain();
        let rubble = spawned(&commands);
        assert_eq!(rubble.len(), RUBBLE_PER_ASTEROID);
        for r in &rubble {
            assert_eq!(r.kind(), EntityKind::Rubble);
            assert_eq!(r.body().position(), last);
            assert!((r.body().velocity().length() - RUBBLE_SPEED).abs() < 1e-9);
        }
        assert!(commands.iter().any(|c| matches!(
            c,
            Command::Despawn { id, kind: EntityKind::Asteroid } if *id == Uuid::from_u128(3)
        )));
        assert!(commands.iter().any(|c| matches!(c, Command::Play(SoundEffect::BangMedium))));
    }

    #[test]
    fn test_drifts_and_spins() {
        let mut h = Harness::new();
        let sprites = h.sprites.clone();
        let mut a = Asteroid::new(Uuid::from_u128(3), Vector2D::new(200.0, 300.0), 0.0, 2, &sprites);
        for _ in 0..10 {
            h.update(&mut a, 0.0);
        }
        assert_eq!(a.body().position(), Vector2D::new(200.0 + 10.0 * ASTEROID_SPEED, 300.0));
        assert!((a.body().orientation() - 10.0 * ASTEROID_SPIN).abs() < 1e-9);
    }
}
