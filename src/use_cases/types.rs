// Use-case level inputs/outputs for the simulation engine.

use crate::domain::{Body, BodyId, TrackedBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
}

/// Counters for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub bodies: usize,
    pub collisions: usize,
    pub attractions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Completed(TickReport),
    // Another tick was still running.
    Skipped,
}

/// Copy of the applied body collection, in insertion order.
#[derive(Debug, Clone)]
pub struct WorldView {
    pub tick: u64,
    pub bodies: Vec<TrackedBody>,
}

impl WorldView {
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|t| t.id == id).map(|t| &t.body)
    }
}

pub type BodyUpdate = Box<dyn FnOnce(&mut Body) + Send>;

/// Structural change requested between or during ticks.
pub enum BodyCommand {
    Add(TrackedBody),
    Remove(BodyId),
    Update(BodyId, BodyUpdate),
}

impl std::fmt::Debug for BodyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyCommand::Add(tracked) => f.debug_tuple("Add").field(&tracked.id).finish(),
            BodyCommand::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
            BodyCommand::Update(id, _) => f.debug_tuple("Update").field(id).finish(),
        }
    }
}
