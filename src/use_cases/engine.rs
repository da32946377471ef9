// Engine lifecycle: construction, fixed-rate scheduling and the deferred mutation API.

use super::types::{BodyCommand, EngineState, TickOutcome, WorldView};
use super::world::World;
use crate::domain::{
    Body, BodyId, CollisionObserver, CollisionPairing, EngineError, MoveObserver, TrackedBody,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

/// Runtime settings for one engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Ticks per second.
    pub fps: f64,
    pub pairing: CollisionPairing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            pairing: CollisionPairing::Ordered,
        }
    }
}

impl EngineConfig {
    /// Period between ticks, or an error if `fps` is not a usable rate.
    pub fn tick_interval(&self) -> Result<Duration, EngineError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(EngineError::InvalidFrameRate(self.fps));
        }
        match Duration::try_from_secs_f64(1.0 / self.fps) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(EngineError::InvalidFrameRate(self.fps)),
        }
    }
}

struct Observers {
    collision: Box<dyn CollisionObserver>,
    movement: Box<dyn MoveObserver>,
}

struct Simulation {
    world: World,
    observers: Observers,
}

// State shared between the engine, its handles and the scheduled task.
struct Core {
    simulation: Mutex<Simulation>,
    // Kept apart from `simulation` so observers can queue changes mid-tick.
    pending: Mutex<Vec<BodyCommand>>,
    ticking: AtomicBool,
}

impl Core {
    fn queue(&self, command: BodyCommand) {
        lock(&self.pending).push(command);
    }

    fn try_view(&self) -> Option<WorldView> {
        match self.simulation.try_lock() {
            Ok(simulation) => Some(simulation.world.view()),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().world.view()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    fn tick(&self) -> TickOutcome {
        let Some(_guard) = TickGuard::acquire(&self.ticking) else {
            warn!("tick already in progress; skipping");
            return TickOutcome::Skipped;
        };

        let mut simulation = lock(&self.simulation);
        let commands = std::mem::take(&mut *lock(&self.pending));
        let Simulation { world, observers } = &mut *simulation;
        world.apply(commands);
        let report = world.step(observers.collision.as_mut(), observers.movement.as_mut());

        trace!(
            tick = report.tick,
            bodies = report.bodies,
            collisions = report.collisions,
            attractions = report.attractions,
            "tick"
        );
        TickOutcome::Completed(report)
    }
}

// Clears the in-progress flag even if an observer panics.
struct TickGuard<'a>(&'a AtomicBool);

impl<'a> TickGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| TickGuard(flag))
    }
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable access to the body collection.
///
/// `add_body`, `remove_body` and `update_body` never wait for a running tick.
/// Queued changes apply at the start of the next tick. Observers are owned by
/// the engine, so they should hold a [`WeakEngineHandle`] instead of this.
#[derive(Clone)]
pub struct EngineHandle {
    core: Arc<Core>,
}

impl EngineHandle {
    pub fn add_body(&self, body: Body) -> BodyId {
        let tracked = TrackedBody::new(body);
        let id = tracked.id;
        self.core.queue(BodyCommand::Add(tracked));
        id
    }

    pub fn remove_body(&self, id: BodyId) {
        self.core.queue(BodyCommand::Remove(id));
    }

    pub fn update_body<F>(&self, id: BodyId, update: F)
    where
        F: FnOnce(&mut Body) + Send + 'static,
    {
        self.core.queue(BodyCommand::Update(id, Box::new(update)));
    }

    /// Copies the applied collection. Waits for a running tick, so it must not
    /// be called from an observer; use [`try_snapshot`](Self::try_snapshot) there.
    pub fn snapshot(&self) -> WorldView {
        lock(&self.core.simulation).world.view()
    }

    /// Like `snapshot`, but `None` while a tick holds the world.
    pub fn try_snapshot(&self) -> Option<WorldView> {
        self.core.try_view()
    }

    pub fn tick(&self) -> TickOutcome {
        self.core.tick()
    }

    pub fn downgrade(&self) -> WeakEngineHandle {
        WeakEngineHandle {
            core: Arc::downgrade(&self.core),
        }
    }
}

/// Handle that does not keep the engine alive.
///
/// Every call is a no-op once the engine and all strong handles are dropped.
#[derive(Clone)]
pub struct WeakEngineHandle {
    core: Weak<Core>,
}

impl WeakEngineHandle {
    pub fn upgrade(&self) -> Option<EngineHandle> {
        self.core.upgrade().map(|core| EngineHandle { core })
    }

    pub fn add_body(&self, body: Body) -> Option<BodyId> {
        self.upgrade().map(|handle| handle.add_body(body))
    }

    pub fn remove_body(&self, id: BodyId) {
        if let Some(handle) = self.upgrade() {
            handle.remove_body(id);
        }
    }

    pub fn update_body<F>(&self, id: BodyId, update: F)
    where
        F: FnOnce(&mut Body) + Send + 'static,
    {
        if let Some(handle) = self.upgrade() {
            handle.update_body(id, update);
        }
    }

    pub fn try_snapshot(&self) -> Option<WorldView> {
        self.upgrade()?.try_snapshot()
    }

    pub fn tick(&self) -> Option<TickOutcome> {
        self.upgrade().map(|handle| handle.tick())
    }
}

struct Schedule {
    shutdown: Arc<Notify>,
    _task: JoinHandle<()>,
}

pub struct Engine {
    handle: EngineHandle,
    tick_interval: Duration,
    schedule: Mutex<Option<Schedule>>,
}

impl Engine {
    pub fn new<C, M>(
        config: EngineConfig,
        bodies: impl IntoIterator<Item = Body>,
        on_collision: C,
        on_move: M,
    ) -> Result<Self, EngineError>
    where
        C: CollisionObserver + 'static,
        M: MoveObserver + 'static,
    {
        let tick_interval = config.tick_interval()?;

        let mut world = World::new(config.pairing);
        world.apply(
            bodies
                .into_iter()
                .map(|body| BodyCommand::Add(TrackedBody::new(body))),
        );

        let core = Arc::new(Core {
            simulation: Mutex::new(Simulation {
                world,
                observers: Observers {
                    collision: Box::new(on_collision),
                    movement: Box::new(on_move),
                },
            }),
            pending: Mutex::new(Vec::new()),
            ticking: AtomicBool::new(false),
        });

        Ok(Self {
            handle: EngineHandle { core },
            tick_interval,
            schedule: Mutex::new(None),
        })
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn state(&self) -> EngineState {
        match *lock(&self.schedule) {
            Some(_) => EngineState::Running,
            None => EngineState::Stopped,
        }
    }

    /// Starts ticking every `1/fps` seconds, replacing any running schedule.
    pub fn start(&self) -> Result<(), EngineError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;

        let mut schedule = lock(&self.schedule);
        if let Some(previous) = schedule.take() {
            info!("replacing running tick schedule");
            previous.shutdown.notify_one();
        }

        let shutdown = Arc::new(Notify::new());
        // First tick one period after start, like a plain repeating timer.
        let first = Instant::now() + self.tick_interval;
        let task = runtime.spawn(tick_loop(
            self.handle.core.clone(),
            first,
            self.tick_interval,
            shutdown.clone(),
        ));
        *schedule = Some(Schedule {
            shutdown,
            _task: task,
        });

        info!(
            tick_interval_us = self.tick_interval.as_micros() as u64,
            "engine started"
        );
        Ok(())
    }

    /// Stops the schedule. A tick already running finishes first.
    pub fn stop(&self) {
        if let Some(previous) = lock(&self.schedule).take() {
            previous.shutdown.notify_one();
            info!("engine stopped");
        }
    }

    pub fn add_body(&self, body: Body) -> BodyId {
        self.handle.add_body(body)
    }

    pub fn remove_body(&self, id: BodyId) {
        self.handle.remove_body(id)
    }

    pub fn update_body<F>(&self, id: BodyId, update: F)
    where
        F: FnOnce(&mut Body) + Send + 'static,
    {
        self.handle.update_body(id, update)
    }

    pub fn snapshot(&self) -> WorldView {
        self.handle.snapshot()
    }

    pub fn tick(&self) -> TickOutcome {
        self.handle.tick()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn tick_loop(core: Arc<Core>, first: Instant, period: Duration, shutdown: Arc<Notify>) {
    // Late ticks are dropped, never bunched up.
    let mut interval = tokio::time::interval_at(first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.notified() => break,
            _ = interval.tick() => {
                core.tick();
            }
        }
    }
    debug!("tick loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vec2;

    fn quiet_engine(config: EngineConfig) -> Result<Engine, EngineError> {
        Engine::new(
            config,
            Vec::new(),
            |_: &TrackedBody, _: &TrackedBody| {},
            |_: &TrackedBody, _: Vec2| {},
        )
    }

    #[test]
    fn non_positive_frame_rates_fail_fast() {
        for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let result = quiet_engine(EngineConfig {
                fps,
                ..EngineConfig::default()
            });
            assert!(matches!(result, Err(EngineError::InvalidFrameRate(_))));
        }
    }

    #[test]
    fn interval_is_the_inverse_of_fps() {
        let config = EngineConfig {
            fps: 50.0,
            ..EngineConfig::default()
        };
        assert_eq!(config.tick_interval(), Ok(Duration::from_millis(20)));
    }

    #[test]
    fn start_outside_a_runtime_is_an_error() {
        let engine = quiet_engine(EngineConfig::default()).expect("valid config");
        assert_eq!(engine.start(), Err(EngineError::NoRuntime));
        assert_eq!(engine.state(), EngineState::Stopped);
    }

    #[test]
    fn stop_when_stopped_is_a_no_op() {
        let engine = quiet_engine(EngineConfig::default()).expect("valid config");
        engine.stop();
        engine.stop();
        assert_eq!(engine.state(), EngineState::Stopped);
    }

    #[test]
    fn queued_add_is_invisible_until_the_next_tick() {
        let engine = quiet_engine(EngineConfig::default()).expect("valid config");
        let id = engine.add_body(Body::new(Vec2::ZERO, 1.0).expect("valid radius"));
        assert!(engine.snapshot().get(id).is_none());

        assert!(matches!(engine.tick(), TickOutcome::Completed(_)));
        assert!(engine.snapshot().get(id).is_some());
    }

    #[test]
    fn try_snapshot_sees_the_applied_collection_between_ticks() {
        let engine = quiet_engine(EngineConfig::default()).expect("valid config");
        let id = engine.add_body(Body::new(Vec2::ZERO, 1.0).expect("valid radius"));
        engine.tick();

        let view = engine.handle().try_snapshot().expect("no tick running");
        assert!(view.get(id).is_some());
    }

    #[test]
    fn weak_handle_goes_quiet_once_the_engine_is_dropped() {
        let engine = quiet_engine(EngineConfig::default()).expect("valid config");
        let weak = engine.handle().downgrade();
        assert!(weak.add_body(Body::new(Vec2::ZERO, 1.0).expect("valid radius")).is_some());
        assert!(matches!(weak.tick(), Some(TickOutcome::Completed(_))));

        drop(engine);

        assert!(weak.upgrade().is_none());
        assert!(weak.add_body(Body::new(Vec2::ZERO, 1.0).expect("valid radius")).is_none());
        assert!(weak.tick().is_none());
        assert!(weak.try_snapshot().is_none());
        weak.remove_body(BodyId::next());
    }

    #[test]
    fn tick_guard_rejects_a_second_holder() {
        let flag = AtomicBool::new(false);
        let first = TickGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(TickGuard::acquire(&flag).is_none());
        drop(first);
        assert!(TickGuard::acquire(&flag).is_some());
    }
}
