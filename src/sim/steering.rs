//! Boid steering rules
//!
//! Every rule returns a steering force: desired velocity minus current
//! velocity, capped at `max_force`. A rule with no qualifying neighbors
//! contributes the zero vector.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::body::{EntityKind, KinematicBody};
use super::vector::{Vector2D, VectorExt};
use crate::consts::*;

/// Copy of a registry entry as seen through `vision`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: Uuid,
    pub kind: EntityKind,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Neighbor {
    pub fn of(body: &KinematicBody) -> Self {
        Self {
            id: body.id(),
            kind: body.kind(),
            position: body.position(),
            velocity: body.velocity(),
        }
    }
}

/// Flocking tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockingParams {
    pub max_velocity: f64,
    pub max_force: f64,
    pub cohesion: f64,
    pub separation: f64,
    pub alignment: f64,
}

impl Default for FlockingParams {
    fn default() -> Self {
        Self {
            max_velocity: BOID_MAX_VELOCITY,
            max_force: BOID_MAX_FORCE,
            cohesion: COHESION_WEIGHT,
            separation: SEPARATION_WEIGHT,
            alignment: ALIGNMENT_WEIGHT,
        }
    }
}

/// Steer toward a desired direction at full speed
fn steer(body: &KinematicBody, direction: Vector2D, params: &FlockingParams) -> Vector2D {
    let desired = direction.normalized_or_zero() * params.max_velocity;
    (desired - body.velocity()).limit(params.max_force)
}

/// Steering force toward `target`
pub fn seek(body: &KinematicBody, target: Vector2D, params: &FlockingParams) -> Vector2D {
    steer(body, target - body.position(), params)
}

fn flockmates<'a>(
    body: &'a KinematicBody,
    neighbors: &'a [Neighbor],
) -> impl Iterator<Item = &'a Neighbor> + 'a {
    neighbors
        .iter()
        .filter(move |n| n.kind == body.kind() && n.id != body.id())
}

/// Seek the average position of same-kind neighbors
pub fn cohesion(body: &KinematicBody, neighbors: &[Neighbor], params: &FlockingParams) -> Vector2D {
    let (sum, count) = flockmates(body, neighbors)
        .fold((Vector2D::ZERO, 0usize), |(sum, n), nb| (sum + nb.position, n + 1));
    if count == 0 {
        return Vector2D::ZERO;
    }
    seek(body, sum / count as f64, params)
}

/// Steer away from every neighbor, weighted by inverse distance
pub fn separation(body: &KinematicBody, neighbors: &[Neighbor], params: &FlockingParams) -> Vector2D {
    let mut sum = Vector2D::ZERO;
    let mut count = 0usize;
    for nb in neighbors.iter().filter(|n| n.id != body.id()) {
        let distance = body.position().distance(nb.position);
        // Coincident bodies have no direction to flee in
        if distance <= 0.0 || !distance.is_finite() {
            continue;
        }
        sum += (body.position() - nb.position).normalized_or_zero() / distance;
        count += 1;
    }
    if count == 0 {
        return Vector2D::ZERO;
    }
    steer(body, sum / count as f64, params)
}

/// Match the average velocity of same-kind neighbors
pub fn alignment(body: &KinematicBody, neighbors: &[Neighbor], params: &FlockingParams) -> Vector2D {
    let (sum, count) = flockmates(body, neighbors)
        .fold((Vector2D::ZERO, 0usize), |(sum, n), nb| (sum + nb.velocity, n + 1));
    if count == 0 {
        return Vector2D::ZERO;
    }
    steer(body, sum / count as f64, params)
}

/// Weighted sum of the three rules
pub fn flock(body: &KinematicBody, neighbors: &[Neighbor], params: &FlockingParams) -> Vector2D {
    cohesion(body, neighbors, params) * params.cohesion
        + separation(body, neighbors, params) * params.separation
        + alignment(body, neighbors, params) * params.alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(x: f64, y: f64) -> KinematicBody {
        KinematicBody::new(Uuid::new_v4(), EntityKind::Boid, Vector2D::new(x, y), BOID_SIZE, BOID_SIZE)
            .with_max_velocity(BOID_MAX_VELOCITY)
    }

    fn neighbor(kind: EntityKind, x: f64, y: f64, vx: f64, vy: f64) -> Neighbor {
        Neighbor {
            id: Uuid::new_v4(),
            kind,
            position: Vector2D::new(x, y),
            velocity: Vector2D::new(vx, vy),
        }
    }

    #[test]
    fn test_empty_neighborhood_is_zero() {
        let b = boid_at(10.0, 10.0).with_velocity(Vector2D::new(1.0, 0.0));
        let params = FlockingParams::default();
        assert_eq!(cohesion(&b, &[], &params), Vector2D::ZERO);
        assert_eq!(separation(&b, &[], &params), Vector2D::ZERO);
        assert_eq!(alignment(&b, &[], &params), Vector2D::ZERO);
        assert_eq!(flock(&b, &[], &params), Vector2D::ZERO);
    }

    #[test]
    fn test_other_kinds_only_separate() {
        let b = boid_at(100.0, 100.0);
        let params = FlockingParams::default();
        let rocks = [neighbor(EntityKind::Asteroid, 120.0, 100.0, 2.0, 0.0)];

        assert_eq!(cohesion(&b, &rocks, &params), Vector2D::ZERO);
        assert_eq!(alignment(&b, &rocks, &params), Vector2D::ZERO);
        let away = separation(&b, &rocks, &params);
        assert!(away.x < 0.0);
        assert!(away.length() <= params.max_force + 1e-12);
    }

    #[test]
    fn test_self_is_ignored() {
        let b = boid_at(50.0, 50.0).with_velocity(Vector2D::new(1.0, 1.0));
        let params = FlockingParams::default();
        let me = [Neighbor::of(&b)];
        assert_eq!(flock(&b, &me, &params), Vector2D::ZERO);
    }

    #[test]
    fn test_nearer_neighbor_pushes_harder() {
        let b = boid_at(100.0, 100.0);
        let params = FlockingParams::default();
        let rocks = [
            neighbor(EntityKind::Asteroid, 99.0, 100.0, 0.0, 0.0),
            neighbor(EntityKind::Asteroid, 170.0, 100.0, 0.0, 0.0),
        ];
        let away = separation(&b, &rocks, &params);
        assert!(away.x > 0.0);
        assert!(away.y.abs() < 1e-12);
    }

    #[test]
    fn test_coincident_neighbor_skipped() {
        let b = boid_at(50.0, 50.0);
        let params = FlockingParams::default();
        let on_top = [neighbor(EntityKind::Boid, 50.0, 50.0, 0.0, 0.0)];
        let force = separation(&b, &on_top, &params);
        assert!(force.is_finite());
        assert_eq!(force, Vector2D::ZERO);
    }

    #[test]
    fn test_cohesion_pulls_toward_center() {
        let b = boid_at(0.0, 0.0);
        let params = FlockingParams::default();
        let mates = [
            neighbor(EntityKind::Boid, 10.0, 10.0, 0.0, 0.0),
            neighbor(EntityKind::Boid, 10.0, -10.0, 0.0, 0.0),
        ];
        let pull = cohesion(&b, &mates, &params);
        assert!(pull.x > 0.0);
        assert!(pull.y.abs() < 1e-12);
        assert!((pull.length() - params.max_force).abs() < 1e-12);
    }

    #[test]
    fn test_alignment_matches_heading() {
        let b = boid_at(0.0, 0.0).with_velocity(Vector2D::new(0.0, 3.0));
        let params = FlockingParams::default();
        let mates = [neighbor(EntityKind::Boid, 5.0, 0.0, 3.0, 0.0)];
        let turn = alignment(&b, &mates, &params);
        assert!(turn.x > 0.0);
        assert!(turn.y < 0.0);
    }

    #[test]
    fn test_seek_capped_by_max_force() {
        let b = boid_at(0.0, 0.0);
        let params = FlockingParams::default();
        let force = seek(&b, Vector2D::new(1000.0, 0.0), &params);
        assert!((force.length() - params.max_force).abs() < 1e-12);
        // Seeking your own position yields a braking force only
        assert_eq!(seek(&b, b.position(), &params), Vector2D::ZERO);
    }
}
