//! Gameplay tuning for player-controlled ships.
//!
//! Rates are per tick because the engine folds the timestep into velocity units.
use std::f64::consts::TAU;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ShipTuning {
    /// Collision radius in board units.
    pub radius: f64,

    /// Tiny positive pull so ships count as sources and planets leave them alone.
    pub gravity: f64,

    /// Velocity added along the nose per tick of held thrust.
    pub thrust_per_tick: f64,

    /// Rotation in radians per tick of held turn.
    pub turn_per_tick: f64,

    /// Time between shots while the trigger is held.
    pub fire_interval: Duration,

    /// Collision immunity after a reset.
    pub respawn_grace: Duration,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            radius: 20.0,
            gravity: 0.0001,
            thrust_per_tick: 1.0 / 60.0,
            turn_per_tick: TAU / 60.0,
            fire_interval: Duration::from_millis(1000 / 3),
            respawn_grace: Duration::from_secs(3),
        }
    }
}
