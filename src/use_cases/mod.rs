// Use cases layer: the tracked world and the engine that schedules its ticks.

pub mod engine;
pub mod types;
pub mod world;

pub use engine::{Engine, EngineConfig, EngineHandle, WeakEngineHandle};
pub use types::{BodyCommand, EngineState, TickOutcome, TickReport, WorldView};
pub use world::World;
