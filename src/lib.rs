pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{Body, BodyError, BodyId, CollisionPairing, EngineError, TrackedBody, Vec2};
pub use frameworks::demo::run_demo;
pub use use_cases::{
    Engine, EngineConfig, EngineHandle, EngineState, TickOutcome, TickReport, WeakEngineHandle,
};
