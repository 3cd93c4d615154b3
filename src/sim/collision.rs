//! Axis-aligned box overlap tests
//!
//! Each body occupies a `width × height` box centered on its position. Box
//! extents are scaled by the collision precision (1.0 = exact sprite size,
//! smaller values are more forgiving). Touching edges do not count as a hit.

use uuid::Uuid;

use super::body::KinematicBody;

/// Half extents of a body's collision box
#[inline]
fn half_extents(body: &KinematicBody, precision: f64) -> (f64, f64) {
    (
        body.width() * precision / 2.0,
        body.height() * precision / 2.0,
    )
}

/// Strict overlap of two collision boxes
pub fn intersect(a: &KinematicBody, b: &KinematicBody, precision: f64) -> bool {
    let (aw, ah) = half_extents(a, precision);
    let (bw, bh) = half_extents(b, precision);
    let d = (a.position() - b.position()).abs();
    d.x < aw + bw && d.y < ah + bh
}

/// First body in `others` that overlaps `body` (never `body` itself)
pub fn intersect_any<'a, I>(body: &KinematicBody, others: I, precision: f64) -> Option<Uuid>
where
    I: IntoIterator<Item = &'a KinematicBody>,
{
    others
        .into_iter()
        .filter(|other| other.id() != body.id())
        .find(|other| intersect(body, other, precision))
        .map(|other| other.id())
}

/// Would the two bodies overlap after `horizon` ticks at constant velocity?
pub fn will_collide(a: &KinematicBody, b: &KinematicBody, horizon: f64, precision: f64) -> bool {
    intersect(&a.projected(horizon), &b.projected(horizon), precision)
}
