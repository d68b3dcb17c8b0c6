//! Deflector - A paddle, projectile and single target arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `error`: Construction and configuration errors

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::DeflectorError;
pub use sim::{GameEvent, Outcome, PaddleInput, SceneId, Session, SessionPhase, TickInput};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time in milliseconds (~60 Hz)
    pub const FRAME_DT_MS: f32 = 16.6;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 768.0;

    /// Paddle defaults
    pub const PADDLE_SPEED: f32 = 5.0; // units per update call, not per second
    pub const PADDLE_START_X: f32 = 400.0;
    pub const PADDLE_Y: f32 = 600.0;
    pub const PADDLE_HALF_WIDTH: f32 = 50.0;
    /// Depth of the strip above the paddle where the projectile bounces
    pub const PADDLE_BAND_DEPTH: f32 = 50.0;
    /// Horizontal speed for an edge hit; center hits go straight up
    pub const DEFLECTION_SCALE: f32 = 200.0;

    /// Projectile defaults (units/second)
    pub const PROJECTILE_START_VX: f32 = 0.0;
    pub const PROJECTILE_START_VY: f32 = -300.0;

    /// Target defaults
    pub const TARGET_Y: f32 = 50.0;
    pub const TARGET_WIDTH: f32 = 100.0;
    pub const TARGET_HEIGHT: f32 = 100.0;

    /// Delay between target destruction and the outcome screen
    pub const CELEBRATION_DELAY_MS: f32 = 3000.0;
}

/// Convert a frame time in milliseconds to seconds
#[inline]
pub fn ms_to_secs(dt_ms: f32) -> f32 {
    dt_ms / 1000.0
}

/// Horizontal offset of `point` from `center`, normalized by `half_width`
/// and clamped to [-1, 1]
#[inline]
pub fn normalized_offset(point: Vec2, center: Vec2, half_width: f32) -> f32 {
    ((point.x - center.x) / half_width).clamp(-1.0, 1.0)
}
