// Shared observers and builders for the engine integration tests.
#![allow(dead_code)]

use orbit_duel::{Body, BodyId, Engine, EngineConfig, TrackedBody, Vec2, WeakEngineHandle};
use std::sync::{Arc, Mutex, OnceLock};

pub type Log<T> = Arc<Mutex<Vec<T>>>;

// Records every observer call so tests can assert on counts and order.
#[derive(Clone, Default)]
pub struct Recorder {
    pub collisions: Log<(BodyId, BodyId)>,
    pub moves: Log<(BodyId, Vec2, Vec2)>,
}

impl Recorder {
    pub fn collision_observer(&self) -> impl FnMut(&TrackedBody, &TrackedBody) + Send + 'static {
        let log = self.collisions.clone();
        move |a: &TrackedBody, b: &TrackedBody| {
            log.lock().expect("collision log poisoned").push((a.id, b.id));
        }
    }

    pub fn move_observer(&self) -> impl FnMut(&TrackedBody, Vec2) + Send + 'static {
        let log = self.moves.clone();
        move |body: &TrackedBody, displacement: Vec2| {
            log.lock()
                .expect("move log poisoned")
                .push((body.id, body.body.center, displacement));
        }
    }

    pub fn collisions(&self) -> Vec<(BodyId, BodyId)> {
        self.collisions.lock().expect("collision log poisoned").clone()
    }

    pub fn moves(&self) -> Vec<(BodyId, Vec2, Vec2)> {
        self.moves.lock().expect("move log poisoned").clone()
    }

    pub fn clear(&self) {
        self.collisions.lock().expect("collision log poisoned").clear();
        self.moves.lock().expect("move log poisoned").clear();
    }
}

// Slot that lets observers reach the engine they are registered with.
pub type HandleSlot = Arc<OnceLock<WeakEngineHandle>>;

pub fn disc(x: f64, y: f64, radius: f64) -> Body {
    Body::new(Vec2::new(x, y), radius).expect("valid radius")
}

pub fn source(x: f64, y: f64, gravity: f64) -> Body {
    disc(x, y, 1.0).with_gravity(gravity).expect("valid gravity")
}

// Engine over `bodies` with recording observers; ids come back in input order.
pub fn recorded_engine(config: EngineConfig, bodies: Vec<Body>) -> (Engine, Recorder, Vec<BodyId>) {
    let recorder = Recorder::default();
    let engine = Engine::new(
        config,
        bodies,
        recorder.collision_observer(),
        recorder.move_observer(),
    )
    .expect("valid engine config");
    let ids = engine.snapshot().bodies.iter().map(|t| t.id).collect();
    (engine, recorder, ids)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
