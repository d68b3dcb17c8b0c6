//! One-shot delayed task owned by a session
//!
//! The task can be driven two ways: by frame time (`advance`) or by an
//! external clock calling back with the handle it was given (`fire`).
//! Either way it completes at most once, and a cancelled task never fires.

use serde::{Deserialize, Serialize};

/// Token handed to an external schedule-once facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledHandle(u64);

impl ScheduledHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Pending,
    Fired,
    Cancelled,
}

/// A cancellable one-shot delay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneShot {
    id: u64,
    delay_ms: f64,
    elapsed_ms: f64,
    state: TaskState,
}

impl OneShot {
    pub fn new(id: u64, delay_ms: f32) -> Self {
        Self {
            id,
            delay_ms: f64::from(delay_ms),
            elapsed_ms: 0.0,
            state: TaskState::Pending,
        }
    }

    pub fn handle(&self) -> ScheduledHandle {
        ScheduledHandle(self.id)
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state == TaskState::Pending
    }

    pub fn remaining_ms(&self) -> f32 {
        match self.state {
            TaskState::Pending => (self.delay_ms - self.elapsed_ms).max(0.0) as f32,
            _ => 0.0,
        }
    }

    /// Accumulate frame time. Returns true on the call that reaches the delay.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.elapsed_ms += f64::from(dt_ms);
        if self.elapsed_ms >= self.delay_ms {
            self.state = TaskState::Fired;
            return true;
        }
        false
    }

    /// External callback. Returns true only if `handle` names this task and
    /// it is still pending.
    pub fn fire(&mut self, handle: ScheduledHandle) -> bool {
        if handle.0 != self.id || !self.is_pending() {
            return false;
        }
        self.elapsed_ms = self.delay_ms;
        self.state = TaskState::Fired;
        true
    }

    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.state = TaskState::Cancelled;
        }
    }
}
