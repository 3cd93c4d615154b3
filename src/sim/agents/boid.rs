//! Flocking agent steered by cohesion, separation and alignment

use uuid::Uuid;

use crate::assets::{ImageHandle, SpriteSheet};
use crate::consts::*;
use crate::heading_vector;
use crate::render::Renderer;
use crate::sim::agent::{Agent, Ctx, draw_body};
use crate::sim::body::{ClampPolicy, EntityKind, KinematicBody};
use crate::sim::steering::{FlockingParams, flock};
use crate::sim::vector::Vector2D;

/// Ambient flocking agent
#[derive(Debug, Clone)]
pub struct Boid {
    body: KinematicBody,
    image: ImageHandle,
    params: FlockingParams,
    /// Flockmate positions seen during the last update (debug links)
    seen: Vec<Vector2D>,
}

impl Boid {
    pub fn new(id: Uuid, position: Vector2D, heading: f64, sprites: &SpriteSheet) -> Self {
        let params = FlockingParams::default();
        let body = KinematicBody::new(id, EntityKind::Boid, position, BOID_SIZE, BOID_SIZE)
            .with_clamp(ClampPolicy::Momentum)
            .with_max_velocity(params.max_velocity)
            .with_velocity(heading_vector(heading) * params.max_velocity)
            .with_orientation(heading)
            .orient_to_velocity();
        Self {
            body,
            image: sprites.boid,
            params,
            seen: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: FlockingParams) -> Self {
        self.params = params;
        self
    }

    pub fn seen(&self) -> &[Vector2D] {
        &self.seen
    }
}

impl Agent for Boid {
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
        let neighbors = ctx
            .registry
            .vision(self.body.position(), ctx.settings.vision_radius);

        let steering = flock(&self.body, &neighbors, &self.params);
        self.body.accelerate(steering);
        self.body.integrate(&ctx.arena);

        self.seen.clear();
        self.seen.extend(
            neighbors
                .iter()
                .filter(|n| n.kind == EntityKind::Boid)
                .map(|n| n.position),
        );
    }

    fn explode(&mut self, ctx: &mut Ctx<'_>) {
        ctx.despawn(self.id(), self.kind());
    }

    fn draw(&self, renderer: &mut dyn Renderer, debug: bool) {
        draw_body(&self.body, self.image, renderer, debug);
        if debug {
            for &other in &self.seen {
                renderer.draw_line(self.body.position(), other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use crate::sim::agents::testing::Harness;

    fn boid(id: u128, x: f64, y: f64, heading: f64) -> Boid {
        Boid::new(Uuid::from_u128(id), Vector2D::new(x, y), heading, &SpriteSheet::default())
    }

    #[test]
    fn test_alone_keeps_cruising() {
        let mut h = Harness::new();
        let mut b = boid(1, 100.0, 100.0, 0.0);
        h.update(&mut b, 0.0);
        // No neighbors: friction only, heading unchanged
        let v = b.body().velocity();
        assert!((v.x - BOID_MAX_VELOCITY * (1.0 - FRICTION_FACTOR)).abs() < 1e-9);
        assert!(v.y.abs() < 1e-12);
        assert!(b.seen().is_empty());
    }

    #[test]
    fn test_zero_weights_ignore_flock() {
        let mut h = Harness::new();
        h.registry.register(Box::new(boid(2, 110.0, 110.0, 1.0)));

        let params = FlockingParams {
            cohesion: 0.0,
            separation: 0.0,
            alignment: 0.0,
            ..FlockingParams::default()
        };
        let mut b = boid(1, 100.0, 100.0, 0.0).with_params(params);
        assert_eq!(b.body().clamp_policy(), ClampPolicy::Momentum);
        h.update(&mut b, 0.0);

        let v = b.body().velocity();
        assert!((v.x - BOID_MAX_VELOCITY * (1.0 - FRICTION_FACTOR)).abs() < 1e-9);
        assert!(v.y.abs() < 1e-12);
        assert_eq!(b.seen(), &[Vector2D::new(110.0, 110.0)]);
    }

    #[test]
    fn test_sees_and_steers_toward_flock() {
        let mut h = Harness::new();
        h.registry.register(Box::new(boid(2, 130.0, 140.0, 0.0)));
        h.registry.register(Box::new(boid(3, 500.0, 500.0, 0.0)));

        let mut b = boid(1, 100.0, 100.0, 0.0);
        h.update(&mut b, 0.0);
        assert_eq!(b.seen(), &[Vector2D::new(130.0, 140.0)]);
        assert!(b.body().velocity().length() <= BOID_MAX_VELOCITY + 1e-9);
        // Orientation follows the new velocity
        let v = b.body().velocity();
        let expected = crate::normalize_orientation(v.y.atan2(v.x));
        assert!((b.body().orientation() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_debug_draws_links() {
        let mut h = Harness::new();
        h.registry.register(Box::new(boid(2, 110.0, 100.0, 0.0)));
        let mut b = boid(1, 100.0, 100.0, 0.0);
        h.update(&mut b, 0.0);

        let mut renderer = RecordingRenderer::default();
        b.draw(&mut renderer, true);
        assert_eq!(renderer.sprites.len(), 1);
        assert_eq!(renderer.boxes, 1);
        assert_eq!(renderer.lines, 1);

        let mut quiet = RecordingRenderer::default();
        b.draw(&mut quiet, false);
        assert_eq!(quiet.lines, 0);
    }
}
