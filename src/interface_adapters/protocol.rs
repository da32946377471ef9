// Serializable snapshot DTOs for render loops and other read-only consumers.

use crate::domain::TrackedBody;
use crate::use_cases::WorldView;
use serde::Serialize;

/// What a renderer needs to draw one body.
#[derive(Debug, Clone, Serialize)]
pub struct BodySnapshot {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub dir_x: f64,
    pub dir_y: f64,
}

/// Snapshot of the whole world after a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub bodies: Vec<BodySnapshot>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&TrackedBody> for BodySnapshot {
    fn from(t: &TrackedBody) -> Self {
        Self {
            id: t.id.get(),
            x: t.body.center.x,
            y: t.body.center.y,
            radius: t.body.radius,
            dir_x: t.body.direction.x,
            dir_y: t.body.direction.y,
        }
    }
}

impl From<&WorldView> for WorldSnapshot {
    fn from(view: &WorldView) -> Self {
        Self {
            tick: view.tick,
            bodies: view.bodies.iter().map(BodySnapshot::from).collect(),
        }
    }
}
