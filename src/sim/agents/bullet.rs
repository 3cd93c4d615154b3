//! Short-lived projectile fired by the ship

use uuid::Uuid;

use super::drifting_body;
use crate::assets::{ImageHandle, SpriteSheet};
use crate::consts::*;
use crate::sim::agent::{Agent, Ctx};
use crate::sim::body::{EntityKind, KinematicBody};
use crate::sim::vector::Vector2D;

/// Ballistic projectile with a tick countdown
#[derive(Debug, Clone)]
pub struct Bullet {
    body: KinematicBody,
    image: ImageHandle,
    ttl: u32,
}

impl Bullet {
    pub fn new(id: Uuid, position: Vector2D, heading: f64, sprites: &SpriteSheet) -> Self {
        Self {
            body: drifting_body(id, EntityKind::Bullet, position, heading, BULLET_SPEED, BULLET_SIZE),
            image: sprites.bullet,
            ttl: BULLET_TTL,
        }
    }

    /// Ticks left before self-destruct
    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

impl Agent for Bullet {
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
        self.body.update_position(&ctx.arena);
        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            self.explode(ctx);
        }
    }

    fn explode(&mut self, ctx: &mut Ctx<'_>) {
        ctx.despawn(self.id(), self.kind());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::agent::Command;
    use crate::sim::agents::testing::Harness;

    #[test]
    fn test_expires_after_ttl() {
        let mut h = Harness::new();
        let mut b = Bullet::new(Uuid::from_u128(5), Vector2D::new(10.0, 10.0), 0.0, &h.sprites.clone());

        for _ in 0..BULLET_TTL - 1 {
            h.update(&mut b, 0.0);
        }
        assert!(h.drain().is_empty());
        assert_eq!(b.ttl(), 1);

        h.update(&mut b, 0.0);
        let commands = h.drain();
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], Command::Despawn { kind: EntityKind::Bullet, .. }));
    }

    #[test]
    fn test_flies_straight_without_drag() {
        let mut h = Harness::new();
        let mut b = Bullet::new(Uuid::from_u128(5), Vector2D::new(10.0, 10.0), 0.0, &h.sprites.clone());
        h.update(&mut b, 0.0);
        h.update(&mut b, 0.0);
        assert_eq!(b.body().position(), Vector2D::new(10.0 + 2.0 * BULLET_SPEED, 10.0));
    }
}
