use crate::domain::body::TrackedBody;
use crate::domain::vector::Vec2;

// Port notified for every overlapping pair found by the collision pass.
pub trait CollisionObserver: Send {
    fn on_collision(&mut self, a: &TrackedBody, b: &TrackedBody);
}

// Port notified once per body after the movement pass moved it.
pub trait MoveObserver: Send {
    fn on_move(&mut self, body: &TrackedBody, displacement: Vec2);
}

impl<F> CollisionObserver for F
where
    F: FnMut(&TrackedBody, &TrackedBody) + Send,
{
    fn on_collision(&mut self, a: &TrackedBody, b: &TrackedBody) {
        self(a, b)
    }
}

impl<F> MoveObserver for F
where
    F: FnMut(&TrackedBody, Vec2) + Send,
{
    fn on_move(&mut self, body: &TrackedBody, displacement: Vec2) {
        self(body, displacement)
    }
}
