//! Computer pilot
//!
//! Produces flight controls for the ship from what is around it: flee rocks
//! on a collision course, otherwise turn toward the nearest rock and fire
//! when a bullet would connect.

use std::f64::consts::{PI, TAU};

use super::body::{EntityKind, KinematicBody};
use super::collision::will_collide;
use super::registry::{Bucket, EntityRegistry};
use super::vector::VectorExt;
use crate::consts::*;
use crate::heading_vector;
use crate::input::TickInput;

/// Signed shortest turn from `from` to `to`, in (-π, π]
fn angle_delta(from: f64, to: f64) -> f64 {
    let d = (to - from + PI).rem_euclid(TAU) - PI;
    if d <= -PI { d + TAU } else { d }
}

fn on_collision_course(a: &KinematicBody, b: &KinematicBody, precision: f64) -> bool {
    (1..=AUTOPILOT_HORIZON).any(|t| will_collide(a, b, t as f64, precision))
}

/// Bullet the ship would fire right now, as a body
fn virtual_bullet(ship: &KinematicBody) -> KinematicBody {
    KinematicBody::new(ship.id(), EntityKind::Bullet, ship.position(), BULLET_SIZE, BULLET_SIZE)
        .with_velocity(heading_vector(ship.orientation()) * BULLET_SPEED)
}

/// Controls for `ship` this tick
pub fn pilot(ship: &KinematicBody, registry: &EntityRegistry, precision: f64) -> TickInput {
    let rocks: Vec<&KinematicBody> = registry
        .bodies(Bucket::Rocks)
        .filter(|rock| rock.position().distance(ship.position()) < AUTOPILOT_VISION)
        .collect();

    let Some(nearest) = rocks.iter().min_by(|a, b| {
        let da = a.position().distance_squared(ship.position());
        let db = b.position().distance_squared(ship.position());
        da.total_cmp(&db)
    }) else {
        return TickInput::default();
    };

    let threat = rocks
        .iter()
        .find(|rock| on_collision_course(ship, rock, precision));

    let target_angle = match threat {
        Some(rock) => (ship.position() - rock.position()).angle(),
        None => (nearest.position() - ship.position()).angle(),
    };
    let turn = angle_delta(ship.orientation(), target_angle);

    let bullet = virtual_bullet(ship);
    let locked = rocks
        .iter()
        .any(|rock| on_collision_course(&bullet, rock, precision));

    TickInput {
        rotate_left: turn < -SHIP_ROTATION_STEP / 2.0,
        rotate_right: turn > SHIP_ROTATION_STEP / 2.0,
        thrust: threat.is_some() && turn.abs() < PI / 4.0,
        fire: locked,
        ..Default::default()
    }
}
