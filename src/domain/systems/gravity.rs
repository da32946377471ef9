use crate::domain::body::TrackedBody;
use crate::domain::vector::Vec2;

/// Accelerates every zero-gravity body towards every body with positive gravity.
///
/// Attraction is one-way: sources are never pulled, including by each other.
/// Only velocities change. Returns the number of source/target pairs applied.
pub fn apply_gravity(bodies: &mut [TrackedBody]) -> usize {
    let mut applied = 0;
    for s in 0..bodies.len() {
        let source = &bodies[s];
        if !(source.body.gravity > 0.0) {
            continue;
        }
        let (source_id, source_center, strength) =
            (source.id, source.body.center, source.body.gravity);

        for target in bodies.iter_mut() {
            if target.id == source_id || target.body.gravity != 0.0 {
                continue;
            }
            if let Some(dv) = pull(source_center, strength, target.body.center) {
                target.body.velocity += dv;
                applied += 1;
            }
        }
    }
    applied
}

/// Velocity change a source at `source` with `strength` imparts on a body at `target`.
///
/// The squared distance is clamped to at least 1 to bound close-range pulls.
/// Coincident centers have no defined direction and yield `None`.
pub fn pull(source: Vec2, strength: f64, target: Vec2) -> Option<Vec2> {
    let offset = source - target;
    let distance_sq = offset.length_squared();
    if distance_sq == 0.0 {
        return None;
    }
    let distance = distance_sq.sqrt();
    let accel = strength / distance_sq.max(1.0);
    Some(offset * (accel / distance))
}
