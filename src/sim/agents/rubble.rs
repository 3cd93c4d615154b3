//! Asteroid fragment, destroyed without splitting

use uuid::Uuid;

use super::drifting_body;
use crate::assets::{ImageHandle, SpriteSheet};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::sim::agent::{Agent, Ctx};
use crate::sim::body::{EntityKind, KinematicBody};
use crate::sim::vector::Vector2D;

/// Asteroid fragment, the last split level
#[derive(Debug, Clone)]
pub struct Rubble {
    body: KinematicBody,
    image: ImageHandle,
    spin: f64,
}

impl Rubble {
    pub fn new(id: Uuid, position: Vector2D, heading: f64, variant: usize, sprites: &SpriteSheet) -> Self {
        Self {
            body: drifting_body(id, EntityKind::Rubble, position, heading, RUBBLE_SPEED, RUBBLE_SIZE),
            image: sprites.rubble(variant),
            spin: RUBBLE_SPIN,
        }
    }
}

impl Agent for Rubble {
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
        ctx.despawn(self.id(), self.kind());
        ctx.play(SoundEffect::BangSmall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::agent::Command;
    use crate::sim::agents::testing::Harness;

    #[test]
    fn test_explode_spawns_nothing() {
        let mut h = Harness::new();
        let sprites = h.sprites.clone();
        let mut r = Rubble::new(Uuid::from_u128(8), Vector2D::new(5.0, 5.0), 1.0, 7, &sprites);
        h.explode(&mut r);
        let commands = h.drain();
        assert_eq!(commands.len(), 2);
        assert!(!commands.iter().any(|c| matches!(c, Command::Spawn(_))));
    }
}
