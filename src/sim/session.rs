//! Session state machine
//!
//! Owns the world, gates the per-frame engine on the current phase and drives
//! the single terminal transition:
//!
//! - `Active`: engine runs every frame. A lost projectile ends the session
//!   with `Failure` and an immediate transition request.
//! - `Celebrating`: entered on target destruction. Physics and input are
//!   frozen, `Success` is emitted and a one-shot delay is armed.
//! - `Ended`: terminal. Entered on loss, on delay expiry, or on dispose.

use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::state::{ArenaBounds, GameEvent, Outcome, SessionPhase, World};
use super::tick::{TickInput, tick};
use super::timer::{OneShot, ScheduledHandle};
use crate::error::DeflectorError;
use crate::tuning::Tuning;

/// Serializable view of a session for renderers and debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub outcome: Option<Outcome>,
    pub frames: u64,
    pub world: World,
    /// Time left before the outcome screen, while celebrating
    pub celebration_remaining_ms: Option<f32>,
}

/// One play-through, from spawn to the outcome screen
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    world: World,
    phase: SessionPhase,
    outcome: Option<Outcome>,
    /// Celebration delay; dropped with the session
    pending: Option<OneShot>,
    next_task_id: u64,
    disposed: bool,
    frames: u64,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a session with default tuning
    pub fn new(bounds: ArenaBounds, seed: u64) -> Self {
        let tuning = Tuning::default();
        let world = World::spawn(bounds, &tuning, seed);
        Self::start(world, tuning, seed)
    }

    /// Start a session with custom tuning
    pub fn with_tuning(
        bounds: ArenaBounds,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, DeflectorError> {
        tuning.validate()?;
        let world = World::spawn(bounds, &tuning, seed);
        Ok(Self::start(world, tuning, seed))
    }

    /// Start from a hand-built world (harnesses, replays)
    pub fn from_world(mut world: World, tuning: Tuning) -> Result<Self, DeflectorError> {
        tuning.validate()?;
        world.bounds = ArenaBounds::new(world.bounds.width(), world.bounds.height())?;
        let positions = [
            ("paddle position", world.paddle.pos),
            ("projectile position", world.projectile.pos),
            ("projectile velocity", world.projectile.vel),
            ("target position", world.target.pos),
        ];
        for (name, value) in positions {
            if !value.is_finite() {
                return Err(DeflectorError::InvalidWorld(name));
            }
        }
        world.paddle.pos.x = world.paddle.pos.x.clamp(0.0, world.bounds.width());
        Ok(Self::start(world, tuning, 0))
    }

    fn start(world: World, tuning: Tuning, seed: u64) -> Self {
        log::info!(
            "Session started: arena {}x{}, seed {}, target at ({:.1}, {:.1})",
            world.bounds.width(),
            world.bounds.height(),
            seed,
            world.target.pos.x,
            world.target.pos.y
        );
        Self {
            tuning,
            world,
            phase: SessionPhase::Active,
            outcome: None,
            pending: None,
            next_task_id: 1,
            disposed: false,
            frames: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Frames processed while active
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Handle for an external schedule-once facility, while the delay is armed
    pub fn pending_handle(&self) -> Option<ScheduledHandle> {
        self.pending
            .as_ref()
            .filter(|task| task.is_pending())
            .map(OneShot::handle)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            outcome: self.outcome,
            frames: self.frames,
            world: self.world.clone(),
            celebration_remaining_ms: self
                .pending
                .as_ref()
                .filter(|task| task.is_pending())
                .map(OneShot::remaining_ms),
        }
    }

    /// Advance one rendered frame
    pub fn update(&mut self, input: &TickInput, dt_ms: f32) {
        match self.phase {
            SessionPhase::Active => {
                self.frames += 1;
                let collisions = tick(&mut self.world, input, dt_ms, &self.tuning);
                for collision in collisions {
                    match collision {
                        Collision::Target { x, y } => {
                            self.events.push(GameEvent::TargetDestroyed { x, y });
                            self.celebrate();
                        }
                        Collision::ProjectileLost => self.fail(),
                        Collision::SideWall | Collision::TopWall | Collision::Paddle { .. } => {}
                    }
                }
            }
            SessionPhase::Celebrating => {
                let expired = self
                    .pending
                    .as_mut()
                    .is_some_and(|task| task.advance(dt_ms));
                if expired {
                    self.finish();
                }
            }
            SessionPhase::Ended => {}
        }
    }

    /// External timer callback for the celebration delay.
    ///
    /// Returns false (and does nothing) for a stale handle, a disposed
    /// session, or any phase other than `Celebrating`.
    pub fn fire_scheduled(&mut self, handle: ScheduledHandle) -> bool {
        if self.disposed || self.phase != SessionPhase::Celebrating {
            log::warn!(
                "Ignoring scheduled task {} (phase {:?}, disposed {})",
                handle.id(),
                self.phase,
                self.disposed
            );
            return false;
        }
        let fired = self.pending.as_mut().is_some_and(|task| task.fire(handle));
        if fired {
            self.finish();
        } else {
            log::warn!("Ignoring stale scheduled task {}", handle.id());
        }
        fired
    }

    /// Tear down on scene exit: cancel the delay and end without a transition
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(task) = self.pending.as_mut() {
            task.cancel();
        }
        self.disposed = true;
        if !self.phase.is_terminal() {
            self.enter(SessionPhase::Ended);
        }
        log::info!("Session disposed");
    }

    fn enter(&mut self, next: SessionPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        log::info!("Session phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Record the outcome; only the first call sticks
    fn reach(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        log::info!("Outcome reached: {:?}", outcome);
        self.outcome = Some(outcome);
        self.events.push(GameEvent::OutcomeReached(outcome));
    }

    fn celebrate(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        self.enter(SessionPhase::Celebrating);
        self.reach(Outcome::Success);

        let id = self.next_task_id;
        self.next_task_id += 1;
        self.pending = Some(OneShot::new(id, self.tuning.celebration_delay_ms));
        log::info!(
            "Target destroyed, transition in {} ms",
            self.tuning.celebration_delay_ms
        );
    }

    fn fail(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        log::info!("Projectile lost");
        self.enter(SessionPhase::Ended);
        self.reach(Outcome::Failure);
        self.request_transition();
    }

    fn finish(&mut self) {
        if self.phase != SessionPhase::Celebrating {
            return;
        }
        self.enter(SessionPhase::Ended);
        self.request_transition();
    }

    fn request_transition(&mut self) {
        let scene = self.outcome.unwrap_or(Outcome::Success).scene();
        log::info!("Transition requested: {:?}", scene);
        self.events.push(GameEvent::TransitionRequested(scene));
    }
}
