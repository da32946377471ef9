//! Gameplay tuning for bullets.
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct BulletTuning {
    /// Collision radius in board units.
    pub radius: f64,

    /// Muzzle speed added on top of the ship's own velocity.
    pub speed: f64,

    /// How long a fresh bullet ignores collisions.
    pub grace: Duration,

    /// Pull a bullet exerts during its grace period, before it becomes a plain target.
    pub grace_gravity: f64,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 1.0,
            grace: Duration::from_secs(1),
            grace_gravity: 0.01,
        }
    }
}
