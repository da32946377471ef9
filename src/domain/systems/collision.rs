use crate::domain::body::{Body, TrackedBody};
use crate::domain::ports::CollisionObserver;

/// Which pairs the collision pass visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPairing {
    /// Every ordered pair (A, B) and (B, A): an overlap is reported twice.
    #[default]
    Ordered,
    /// Each unordered pair once, in collection order.
    Unordered,
}

/// Reports every overlapping pair to `observer` and returns how many calls were made.
///
/// Brute force over all pairs; bodies are read only, so observers see the same
/// state for every pair of the pass.
pub fn detect_collisions<O>(
    bodies: &[TrackedBody],
    pairing: CollisionPairing,
    observer: &mut O,
) -> usize
where
    O: CollisionObserver + ?Sized,
{
    let mut reported = 0;
    for (i, a) in bodies.iter().enumerate() {
        let others = match pairing {
            CollisionPairing::Ordered => 0,
            CollisionPairing::Unordered => i + 1,
        };
        for b in &bodies[others..] {
            if a.id == b.id {
                continue;
            }
            if a.body.ignore_collision || b.body.ignore_collision {
                continue;
            }
            if overlaps(&a.body, &b.body) {
                observer.on_collision(a, b);
                reported += 1;
            }
        }
    }
    reported
}

// Strict comparison: discs that only touch do not collide.
fn overlaps(a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    (a.center - b.center).length_squared() < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::body::BodyId;
    use crate::domain::vector::Vec2;

    fn disc(x: f64, y: f64, radius: f64) -> TrackedBody {
        TrackedBody::new(Body::new(Vec2::new(x, y), radius).expect("valid radius"))
    }

    fn run(bodies: &[TrackedBody], pairing: CollisionPairing) -> Vec<(BodyId, BodyId)> {
        let mut calls = Vec::new();
        let mut record = |a: &TrackedBody, b: &TrackedBody| calls.push((a.id, b.id));
        detect_collisions(bodies, pairing, &mut record);
        calls
    }

    #[test]
    fn ordered_pairing_reports_both_orderings() {
        let bodies = vec![disc(0.0, 0.0, 2.0), disc(3.0, 0.0, 2.0)];
        let calls = run(&bodies, CollisionPairing::Ordered);
        assert_eq!(
            calls,
            vec![(bodies[0].id, bodies[1].id), (bodies[1].id, bodies[0].id)]
        );
    }

    #[test]
    fn unordered_pairing_reports_once() {
        let bodies = vec![disc(0.0, 0.0, 2.0), disc(3.0, 0.0, 2.0)];
        let calls = run(&bodies, CollisionPairing::Unordered);
        assert_eq!(calls, vec![(bodies[0].id, bodies[1].id)]);
    }

    #[test]
    fn touching_discs_do_not_collide() {
        let bodies = vec![disc(0.0, 0.0, 2.0), disc(4.0, 0.0, 2.0)];
        assert!(run(&bodies, CollisionPairing::Ordered).is_empty());
    }

    #[test]
    fn ignore_flag_on_either_side_exempts_the_pair() {
        let mut bodies = vec![disc(0.0, 0.0, 2.0), disc(1.0, 0.0, 2.0)];
        bodies[1].body.ignore_collision = true;
        assert!(run(&bodies, CollisionPairing::Ordered).is_empty());

        bodies[1].body.ignore_collision = false;
        bodies[0].body.ignore_collision = true;
        assert!(run(&bodies, CollisionPairing::Unordered).is_empty());
    }

    #[test]
    fn large_lone_body_never_collides_with_itself() {
        let bodies = vec![disc(0.0, 0.0, 1_000.0)];
        assert!(run(&bodies, CollisionPairing::Ordered).is_empty());
    }

    #[test]
    fn exempt_body_does_not_hide_other_pairs() {
        let mut bodies = vec![
            disc(0.0, 0.0, 1.0),
            disc(0.5, 0.0, 1.0),
            disc(1.0, 0.0, 1.0),
        ];
        bodies[1].body.ignore_collision = true;
        let calls = run(&bodies, CollisionPairing::Ordered);
        assert_eq!(
            calls,
            vec![(bodies[0].id, bodies[2].id), (bodies[2].id, bodies[0].id)]
        );
    }
}
