//! Entities and session-level types
//!
//! Everything the per-frame engine mutates lives in `World`; the session owns
//! exactly one of them for its lifetime.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::DeflectorError;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Physics and input are live
    Active,
    /// Target destroyed; frozen until the transition delay expires
    Celebrating,
    /// Terminal, nothing runs
    Ended,
}

impl SessionPhase {
    /// Legal edges: Active -> Celebrating, Active -> Ended, Celebrating -> Ended
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Active, Celebrating) | (Active, Ended) | (Celebrating, Ended)
        )
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == SessionPhase::Ended
    }
}

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Screen the scene controller should switch to
    pub fn scene(self) -> SceneId {
        match self {
            Outcome::Success => SceneId::Victory,
            Outcome::Failure => SceneId::GameOver,
        }
    }
}

/// Scenes the core can ask the external controller to switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneId {
    MainMenu,
    Game,
    GameOver,
    Victory,
}

/// Events emitted to the render/scene sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Target hit at its position (renderer may draw an effect)
    TargetDestroyed { x: f32, y: f32 },
    OutcomeReached(Outcome),
    TransitionRequested(SceneId),
}

/// Immutable playable rectangle, origin at top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct ArenaBounds {
    width: f32,
    height: f32,
}

/// Unchecked wire form; deserialization goes through `ArenaBounds::new`
#[derive(Deserialize)]
struct RawBounds {
    width: f32,
    height: f32,
}

impl TryFrom<RawBounds> for ArenaBounds {
    type Error = DeflectorError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        ArenaBounds::new(raw.width, raw.height)
    }
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, DeflectorError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(DeflectorError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        (0.0..=self.width).contains(&x)
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: crate::consts::ARENA_WIDTH,
            height: crate::consts::ARENA_HEIGHT,
        }
    }
}

/// The player's paddle; moves horizontally only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub half_width: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, half_width: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            half_width,
        }
    }

    /// Shift by `dx` and clamp the center to [0, arena_width]
    pub fn shift(&mut self, dx: f32, arena_width: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, arena_width);
    }

    /// Whether `point` sits in the bounce strip of `depth` above the paddle.
    ///
    /// The strip is open vertically (`y - depth < py < y`) and closed
    /// horizontally (`|px - x| <= half_width`).
    pub fn band_contains(&self, point: Vec2, depth: f32) -> bool {
        let in_band = point.y > self.pos.y - depth && point.y < self.pos.y;
        in_band && (point.x - self.pos.x).abs() <= self.half_width
    }
}

/// The only entity with continuous physics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
}

impl Projectile {
    /// Spawn directly above the paddle, at the top edge of its bounce strip
    pub fn above(paddle: &Paddle, clearance: f32, vel: Vec2) -> Self {
        Self {
            pos: Vec2::new(paddle.pos.x, paddle.pos.y - clearance),
            vel,
        }
    }

    /// Explicit Euler step
    #[inline]
    pub fn integrate(&mut self, dt_secs: f32) {
        self.pos += self.vel * dt_secs;
    }
}

/// The single target near the top of the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub half_extents: Vec2,
    alive: bool,
}

impl Target {
    pub fn new(pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos,
            half_extents,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }

    /// Clear the alive flag. Returns true only on the first call.
    pub fn destroy(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// All entities owned by one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub bounds: ArenaBounds,
    pub paddle: Paddle,
    pub projectile: Projectile,
    pub target: Target,
}

impl World {
    /// Spawn paddle, projectile and a target at a seeded random x
    pub fn spawn(bounds: ArenaBounds, tuning: &Tuning, seed: u64) -> Self {
        let paddle = Paddle::new(
            tuning.paddle_start_x.clamp(0.0, bounds.width()),
            tuning.paddle_y,
            tuning.paddle_half_width,
        );
        let projectile = Projectile::above(
            &paddle,
            tuning.paddle_band_depth,
            tuning.initial_velocity(),
        );

        let half = tuning.target_half_extents();
        let mut rng = Pcg32::seed_from_u64(seed);
        let target_x = if bounds.width() > half.x * 2.0 {
            rng.random_range(half.x..=bounds.width() - half.x)
        } else {
            // Arena narrower than the target; center it
            bounds.width() / 2.0
        };
        let target = Target::new(Vec2::new(target_x, tuning.target_y), half);

        Self {
            bounds,
            paddle,
            projectile,
            target,
        }
    }
}
