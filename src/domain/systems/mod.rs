// The three tick passes, run in this order: collision, gravity, movement.

pub mod collision;
pub mod gravity;
pub mod movement;

pub use collision::{CollisionPairing, detect_collisions};
pub use gravity::apply_gravity;
pub use movement::integrate;
