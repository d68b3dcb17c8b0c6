//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time and decoded input are the only inputs
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod session;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, Collision, paddle_deflection};
pub use session::{Session, Snapshot};
pub use state::{
    ArenaBounds, GameEvent, Outcome, Paddle, Projectile, SceneId, SessionPhase, Target, World,
};
pub use tick::{PaddleInput, TickInput, tick};
pub use timer::{OneShot, ScheduledHandle, TaskState};
