use crate::domain::body::TrackedBody;
use crate::domain::ports::MoveObserver;

/// Explicit Euler step: one velocity unit is one unit of displacement per tick.
///
/// The observer sees each body right after it moved, with a copy of the
/// velocity that was applied.
pub fn integrate<O>(bodies: &mut [TrackedBody], observer: &mut O) -> usize
where
    O: MoveObserver + ?Sized,
{
    for tracked in bodies.iter_mut() {
        let displacement = tracked.body.velocity;
        tracked.body.center += displacement;
        observer.on_move(tracked, displacement);
    }
    bodies.len()
}
