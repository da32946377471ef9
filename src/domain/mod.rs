// Domain layer: bodies, observer ports and the physics passes of a tick.

pub mod body;
pub mod errors;
pub mod ports;
pub mod systems;
pub mod tuning;
pub mod vector;

pub use body::{Body, BodyId, TrackedBody};
pub use errors::{BodyError, EngineError};
pub use ports::{CollisionObserver, MoveObserver};
pub use systems::CollisionPairing;
pub use vector::Vec2;
