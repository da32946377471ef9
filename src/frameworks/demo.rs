// Headless two-ship duel: builds the scene, scripts both pilots and runs the engine.
//
// Rendering and keyboard input are not part of this crate; the board edge check and
// the scripted pilots stand in for them.

use crate::domain::tuning::{BulletTuning, PlanetTuning, ShipTuning};
use crate::domain::{Body, BodyError, BodyId, EngineError, TrackedBody, Vec2};
use crate::frameworks::config::DemoConfig;
use crate::use_cases::{Engine, EngineHandle, WeakEngineHandle};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DemoError {
    Body(BodyError),
    Engine(EngineError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Body(e) => write!(f, "scene setup failed: {e}"),
            DemoError::Engine(e) => write!(f, "engine failed: {e}"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<BodyError> for DemoError {
    fn from(e: BodyError) -> Self {
        DemoError::Body(e)
    }
}

impl From<EngineError> for DemoError {
    fn from(e: EngineError) -> Self {
        DemoError::Engine(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    pub ticks: u64,
    pub deaths: [u32; 2],
    pub shots: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Ship(usize),
    Bullet,
    Planet,
}

#[derive(Debug, Clone, Copy)]
struct Board {
    width: f64,
    height: f64,
}

impl Board {
    fn contains(&self, body: &Body) -> bool {
        let Vec2 { x, y } = body.center;
        let r = body.radius;
        x + r >= 0.0 && x - r <= self.width && y + r >= 0.0 && y - r <= self.height
    }
}

struct Scene {
    roles: HashMap<BodyId, Role>,
    ships: [BodyId; 2],
    // Where a destroyed ship comes back, facing up the board.
    respawn: Vec2,
    deaths: [u32; 2],
    shots: u32,
    // Ships inside their respawn grace, with the moment it ends.
    shielded: HashMap<BodyId, Instant>,
    // Bullets still ignoring collisions, with the moment that ends.
    arming: HashMap<BodyId, Instant>,
    ship_tuning: ShipTuning,
}

impl Scene {
    fn new(respawn: Vec2, ship_tuning: ShipTuning) -> Self {
        Self {
            roles: HashMap::new(),
            // Replaced once the ships are added.
            ships: [BodyId::next(), BodyId::next()],
            respawn,
            deaths: [0; 2],
            shots: 0,
            shielded: HashMap::new(),
            arming: HashMap::new(),
            ship_tuning,
        }
    }

    fn on_collision(&mut self, handle: &WeakEngineHandle, body: &TrackedBody) {
        match self.roles.get(&body.id).copied() {
            Some(Role::Bullet) => {
                self.roles.remove(&body.id);
                self.arming.remove(&body.id);
                handle.remove_body(body.id);
            }
            Some(Role::Ship(index)) => self.reset_ship(handle, index),
            Some(Role::Planet) | None => {}
        }
    }

    fn on_move(&mut self, handle: &WeakEngineHandle, board: Board, body: &TrackedBody) {
        if board.contains(&body.body) {
            return;
        }
        match self.roles.get(&body.id).copied() {
            Some(Role::Bullet) => {
                self.roles.remove(&body.id);
                self.arming.remove(&body.id);
                handle.remove_body(body.id);
            }
            Some(Role::Ship(index)) => self.reset_ship(handle, index),
            Some(Role::Planet) | None => {}
        }
    }

    // Both orderings of a pair are reported, so a ship already shielded this tick
    // is left alone.
    fn reset_ship(&mut self, handle: &WeakEngineHandle, index: usize) {
        let id = self.ships[index];
        if self.shielded.contains_key(&id) {
            return;
        }
        self.deaths[index] += 1;
        self.shielded
            .insert(id, Instant::now() + self.ship_tuning.respawn_grace);
        info!(ship = index, deaths = self.deaths[index], "ship destroyed");

        let respawn = self.respawn;
        handle.update_body(id, move |b| {
            b.center = respawn;
            b.velocity = Vec2::ZERO;
            b.direction = Vec2::new(0.0, -1.0);
            b.ignore_collision = true;
        });
    }

    fn expire_graces(&mut self, handle: &EngineHandle, now: Instant) {
        let shields: Vec<BodyId> = expired(&self.shielded, now);
        for id in shields {
            self.shielded.remove(&id);
            handle.update_body(id, |b| b.ignore_collision = false);
        }

        let armed: Vec<BodyId> = expired(&self.arming, now);
        for id in armed {
            self.arming.remove(&id);
            handle.update_body(id, |b| {
                b.ignore_collision = false;
                b.gravity = 0.0;
            });
        }
    }
}

fn expired(timers: &HashMap<BodyId, Instant>, now: Instant) -> Vec<BodyId> {
    timers
        .iter()
        .filter(|(_, until)| **until <= now)
        .map(|(id, _)| *id)
        .collect()
}

fn lock(scene: &Mutex<Scene>) -> MutexGuard<'_, Scene> {
    scene.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bullet leaving `ship`'s nose: starts on the ship's center, unarmed and pulling
/// lightly until its grace period ends.
fn bullet_from(ship: &Body, tuning: BulletTuning) -> Result<Body, BodyError> {
    let heading = ship.direction.length();
    let boost = if heading > 0.0 {
        tuning.speed / heading
    } else {
        0.0
    };
    Ok(Body::new(ship.center, tuning.radius)?
        .with_direction(ship.direction)
        .with_velocity(ship.direction * (1.0 + boost) + ship.velocity)
        .with_ignore_collision(true)
        .with_gravity(tuning.grace_gravity)?)
}

// Scripted stick input for pilot `index` on `frame`: (turn, thrust).
fn pilot_input(index: usize, frame: u64) -> (f64, bool) {
    let turn = if (frame / 120) % 2 == 0 { 1.0 } else { -1.0 };
    let turn = if index == 0 { turn } else { -turn };
    let thrust = (frame / 90) % 2 == 0;
    (turn, thrust)
}

pub async fn run_demo(config: DemoConfig) -> Result<DemoSummary, DemoError> {
    let ship_tuning = ShipTuning::default();
    let bullet_tuning = BulletTuning::default();
    let planet_tuning = PlanetTuning::default();
    let board = Board {
        width: config.board_width,
        height: config.board_height,
    };

    let spawns = [
        Vec2::new(300.0, 300.0),
        Vec2::new(board.width - 300.0, 300.0),
    ];
    let earth_center = Vec2::new(board.width / 2.0, board.height / 2.0);

    let ship = |spawn: Vec2| -> Result<Body, BodyError> {
        Body::new(spawn, ship_tuning.radius)?
            .with_direction(Vec2::new(0.0, 1.0))
            .with_gravity(ship_tuning.gravity)
    };
    let earth = Body::new(earth_center, planet_tuning.earth_radius)?
        .with_gravity(planet_tuning.earth_gravity)?;
    let moon = Body::new(
        earth_center + Vec2::new(planet_tuning.moon_offset, 0.0),
        planet_tuning.moon_radius,
    )?
    .with_gravity(planet_tuning.moon_gravity)?;

    // Observers need the handle, which only exists once the engine does.
    // A weak handle, since the engine owns the observers holding it.
    let slot: Arc<OnceLock<WeakEngineHandle>> = Arc::new(OnceLock::new());
    let respawn = Vec2::new(board.width / 2.0, board.height - 300.0);
    let scene = Arc::new(Mutex::new(Scene::new(respawn, ship_tuning)));

    let engine = {
        let (collision_slot, collision_scene) = (slot.clone(), scene.clone());
        let (move_slot, move_scene) = (slot.clone(), scene.clone());
        Engine::new(
            config.engine,
            Vec::new(),
            move |a: &TrackedBody, b: &TrackedBody| {
                let Some(handle) = collision_slot.get() else {
                    return;
                };
                let mut scene = lock(&collision_scene);
                scene.on_collision(handle, a);
                scene.on_collision(handle, b);
            },
            move |body: &TrackedBody, _: Vec2| {
                let Some(handle) = move_slot.get() else {
                    return;
                };
                lock(&move_scene).on_move(handle, board, body);
            },
        )?
    };
    let handle = engine.handle();
    let _ = slot.set(handle.downgrade());

    {
        let mut scene = lock(&scene);
        for (index, spawn) in spawns.into_iter().enumerate() {
            let id = handle.add_body(ship(spawn)?);
            scene.ships[index] = id;
            scene.roles.insert(id, Role::Ship(index));
        }
        for planet in [earth, moon] {
            let id = handle.add_body(planet);
            scene.roles.insert(id, Role::Planet);
        }
    }

    engine.start()?;
    info!(
        duration_s = config.duration.as_secs(),
        fps = config.engine.fps,
        "demo running"
    );

    let period = engine.tick_interval();
    let fire_every = (ship_tuning.fire_interval.as_secs_f64() / period.as_secs_f64())
        .ceil()
        .max(1.0) as u64;
    let deadline = Instant::now() + config.duration;
    let mut pilot = tokio::time::interval(period);
    pilot.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frame: u64 = 0;

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => break,
            _ = pilot.tick() => {}
        }
        frame += 1;

        let ships = {
            let mut scene = lock(&scene);
            scene.expire_graces(&handle, Instant::now());
            scene.ships
        };

        for (index, id) in ships.into_iter().enumerate() {
            let (turn, thrust) = pilot_input(index, frame);
            let (turn_step, thrust_step) = (ship_tuning.turn_per_tick, ship_tuning.thrust_per_tick);
            handle.update_body(id, move |b| {
                b.rotate(turn * turn_step);
                if thrust {
                    b.accelerate(thrust_step);
                }
            });
        }

        if frame % fire_every != 0 {
            continue;
        }
        let view = handle.snapshot();
        for id in ships {
            let Some(ship) = view.get(id) else {
                continue;
            };
            let bullet = handle.add_body(bullet_from(ship, bullet_tuning)?);
            let mut scene = lock(&scene);
            scene.roles.insert(bullet, Role::Bullet);
            scene.arming.insert(bullet, Instant::now() + bullet_tuning.grace);
            scene.shots += 1;
            debug!(%bullet, shooter = %id, "bullet fired");
        }
    }

    engine.stop();
    let ticks = handle.snapshot().tick;
    let scene = lock(&scene);
    let summary = DemoSummary {
        ticks,
        deaths: scene.deaths,
        shots: scene.shots,
    };
    info!(
        ticks = summary.ticks,
        ship_a_deaths = summary.deaths[0],
        ship_b_deaths = summary.deaths[1],
        shots = summary.shots,
        "demo finished"
    );
    Ok(summary)
}
