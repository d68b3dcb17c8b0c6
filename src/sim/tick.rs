//! Per-frame physics and collision step
//!
//! Resolution order within one frame is fixed:
//! paddle move + clamp, integration, side walls, top wall, paddle bounce,
//! target hit, loss check. The target check reads the already-updated
//! position, so its velocity reset overrides a paddle bounce from the same
//! frame.

use serde::{Deserialize, Serialize};

use super::collision::{Collision, paddle_deflection};
use super::state::World;
use crate::tuning::Tuning;
use crate::{ms_to_secs, normalized_offset};

/// Decoded horizontal input for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleInput {
    LeftPressed,
    RightPressed,
    #[default]
    Neither,
}

impl PaddleInput {
    /// -1 for left, +1 for right, 0 otherwise
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            PaddleInput::LeftPressed => -1.0,
            PaddleInput::RightPressed => 1.0,
            PaddleInput::Neither => 0.0,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub paddle: PaddleInput,
    /// Idle/demo mode - the paddle follows the projectile on its own
    pub idle_mode: bool,
}

impl TickInput {
    pub fn pressed(paddle: PaddleInput) -> Self {
        Self {
            paddle,
            ..Default::default()
        }
    }
}

/// Steer under the projectile, offset so the bounce angles toward the
/// target. Dead zone of one step keeps the paddle from jittering.
fn autopilot(world: &World, speed: f32) -> PaddleInput {
    let projectile_x = world.projectile.pos.x;
    let mut aim_x = projectile_x;
    if world.target.is_alive() {
        let to_target = world.target.pos.x - projectile_x;
        if to_target.abs() > world.paddle.half_width {
            // Hit off-center on the side away from the target
            aim_x -= to_target.signum() * world.paddle.half_width * 0.5;
        }
    }

    let dx = aim_x - world.paddle.pos.x;
    if dx < -speed {
        PaddleInput::LeftPressed
    } else if dx > speed {
        PaddleInput::RightPressed
    } else {
        PaddleInput::Neither
    }
}

/// Advance the world by one frame of `dt_ms` milliseconds.
///
/// Paddle movement is per call, not per millisecond. Returns the collisions
/// resolved this frame in resolution order.
pub fn tick(world: &mut World, input: &TickInput, dt_ms: f32, tuning: &Tuning) -> Vec<Collision> {
    let mut collisions = Vec::new();

    let direction = if input.idle_mode {
        autopilot(world, tuning.paddle_speed)
    } else {
        input.paddle
    };
    world
        .paddle
        .shift(direction.sign() * tuning.paddle_speed, world.bounds.width());

    let projectile = &mut world.projectile;
    projectile.integrate(ms_to_secs(dt_ms));

    // Walls: each axis flips at most once per frame
    if !world.bounds.contains_x(projectile.pos.x) {
        projectile.vel.x = -projectile.vel.x;
        collisions.push(Collision::SideWall);
        log::debug!("Side wall bounce at x={:.1}", projectile.pos.x);
    }
    if projectile.pos.y < 0.0 {
        projectile.vel.y = -projectile.vel.y;
        collisions.push(Collision::TopWall);
        log::debug!("Top wall bounce at x={:.1}", projectile.pos.x);
    }

    if world
        .paddle
        .band_contains(projectile.pos, tuning.paddle_band_depth)
    {
        let offset = normalized_offset(projectile.pos, world.paddle.pos, world.paddle.half_width);
        projectile.vel = paddle_deflection(projectile.vel, offset, tuning.deflection_scale);
        collisions.push(Collision::Paddle { offset });
        log::debug!("Paddle bounce, offset {:.2}", offset);
    }

    // Liveness first: a destroyed target is never tested again
    let target = &mut world.target;
    if target.is_alive() && target.aabb().contains_point(projectile.pos) && target.destroy() {
        projectile.vel = tuning.initial_velocity();
        collisions.push(Collision::Target {
            x: target.pos.x,
            y: target.pos.y,
        });
        // A hit ends active play; the loss check does not run this frame
        return collisions;
    }

    if projectile.pos.y > world.bounds.height() {
        collisions.push(Collision::ProjectileLost);
    }

    collisions
}
