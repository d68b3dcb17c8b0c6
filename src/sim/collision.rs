//! Collision primitives and per-frame collision records
//!
//! Every overlap test in the engine goes through `Aabb`, so the ordering and
//! tie-break rules stay in `tick` and the geometry stays here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as center plus half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// A zero-sized box; intersecting it is a point test
    pub fn point(p: Vec2) -> Self {
        Self::new(p, Vec2::ZERO)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Overlap test, inclusive on the edges
    pub fn intersects(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x <= reach.x && delta.y <= reach.y
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.intersects(&Aabb::point(p))
    }
}

/// What the engine resolved during one frame, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collision {
    /// Left or right wall; vx was inverted
    SideWall,
    /// Top wall; vy was inverted
    TopWall,
    /// Paddle bounce at the given normalized offset in [-1, 1]
    Paddle { offset: f32 },
    /// Target destroyed at its position
    Target { x: f32, y: f32 },
    /// Projectile fell below the arena
    ProjectileLost,
}

/// Velocity after a paddle hit: always upward, sideways by offset
#[inline]
pub fn paddle_deflection(vel: Vec2, offset: f32, scale: f32) -> Vec2 {
    Vec2::new(offset.clamp(-1.0, 1.0) * scale, -vel.y.abs())
}
