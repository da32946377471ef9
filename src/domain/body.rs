// Simulated circular bodies and their engine-assigned identities.

use super::errors::BodyError;
use super::vector::Vec2;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity of a body tracked by the engine.
///
/// Equality of ids, not of field values, decides self-exclusion and removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    /// Returns a process-unique, monotonically increasing id.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        BodyId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub radius: f64,
    pub velocity: Vec2,
    // 0.0 means the body does not attract anything.
    pub gravity: f64,
    pub ignore_collision: bool,
    // Orientation for renderers; the physics passes never read it.
    pub direction: Vec2,
}

impl Body {
    /// Creates a resting body with no gravity, facing +X.
    pub fn new(center: Vec2, radius: f64) -> Result<Self, BodyError> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(BodyError::NegativeRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            velocity: Vec2::ZERO,
            gravity: 0.0,
            ignore_collision: false,
            direction: Vec2::new(1.0, 0.0),
        })
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Result<Self, BodyError> {
        if !(gravity.is_finite() && gravity >= 0.0) {
            return Err(BodyError::InvalidGravity(gravity));
        }
        self.gravity = gravity;
        Ok(self)
    }

    pub fn with_ignore_collision(mut self, ignore: bool) -> Self {
        self.ignore_collision = ignore;
        self
    }

    /// Turns `direction` counter-clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.direction = self.direction.rotated(angle);
    }

    /// Adds `amount` units of `direction` to the velocity.
    pub fn accelerate(&mut self, amount: f64) {
        self.velocity += self.direction * amount;
    }
}

/// A body together with the id the engine assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedBody {
    pub id: BodyId,
    pub body: Body,
}

impl TrackedBody {
    pub(crate) fn new(body: Body) -> Self {
        Self {
            id: BodyId::next(),
            body,
        }
    }
}
