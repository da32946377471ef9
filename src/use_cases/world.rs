// The tracked body collection and the fixed-order tick over it.

use super::types::{BodyCommand, TickReport, WorldView};
use crate::domain::systems::{CollisionPairing, apply_gravity, detect_collisions, integrate};
use crate::domain::{CollisionObserver, MoveObserver, TrackedBody};
use tracing::debug;

#[derive(Debug)]
pub struct World {
    bodies: Vec<TrackedBody>,
    pairing: CollisionPairing,
    tick: u64,
}

impl World {
    pub fn new(pairing: CollisionPairing) -> Self {
        Self {
            bodies: Vec::new(),
            pairing,
            tick: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn view(&self) -> WorldView {
        WorldView {
            tick: self.tick,
            bodies: self.bodies.clone(),
        }
    }

    /// Applies queued changes in request order. Only called at a tick boundary.
    pub fn apply(&mut self, commands: impl IntoIterator<Item = BodyCommand>) {
        for command in commands {
            match command {
                BodyCommand::Add(tracked) => {
                    if self.bodies.iter().any(|t| t.id == tracked.id) {
                        debug!(id = %tracked.id, "body already tracked; ignoring add");
                        continue;
                    }
                    debug!(id = %tracked.id, "body added");
                    self.bodies.push(tracked);
                }
                BodyCommand::Remove(id) => {
                    let before = self.bodies.len();
                    self.bodies.retain(|t| t.id != id);
                    if self.bodies.len() != before {
                        debug!(%id, "body removed");
                    }
                }
                BodyCommand::Update(id, update) => {
                    if let Some(tracked) = self.bodies.iter_mut().find(|t| t.id == id) {
                        update(&mut tracked.body);
                    }
                }
            }
        }
    }

    /// Runs one tick: collisions, then gravity, then movement.
    ///
    /// Each pass covers the whole collection before the next one starts.
    pub fn step<C, M>(&mut self, on_collision: &mut C, on_move: &mut M) -> TickReport
    where
        C: CollisionObserver + ?Sized,
        M: MoveObserver + ?Sized,
    {
        self.tick += 1;
        let collisions = detect_collisions(&self.bodies, self.pairing, on_collision);
        let attractions = apply_gravity(&mut self.bodies);
        let bodies = integrate(&mut self.bodies, on_move);

        TickReport {
            tick: self.tick,
            bodies,
            collisions,
            attractions,
        }
    }
}
