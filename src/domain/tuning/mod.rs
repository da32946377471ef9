// Gameplay tuning for the demo scene; kept apart from runtime configuration.

pub mod bullet;
pub mod planet;
pub mod ship;

pub use bullet::BulletTuning;
pub use planet::PlanetTuning;
pub use ship::ShipTuning;
