//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so a session can be built from
//! JSON. Missing fields fall back to the values in `crate::consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::DeflectorError;

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddle ===
    /// Horizontal movement per update call
    pub paddle_speed: f32,
    pub paddle_start_x: f32,
    pub paddle_y: f32,
    pub paddle_half_width: f32,
    /// Depth of the bounce strip above the paddle
    pub paddle_band_depth: f32,
    /// Horizontal speed given to an edge hit
    pub deflection_scale: f32,

    // === Projectile ===
    /// Velocity at spawn and after a target hit (units/second)
    pub initial_velocity: (f32, f32),

    // === Target ===
    pub target_y: f32,
    pub target_width: f32,
    pub target_height: f32,

    // === Session ===
    pub celebration_delay_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_speed: PADDLE_SPEED,
            paddle_start_x: PADDLE_START_X,
            paddle_y: PADDLE_Y,
            paddle_half_width: PADDLE_HALF_WIDTH,
            paddle_band_depth: PADDLE_BAND_DEPTH,
            deflection_scale: DEFLECTION_SCALE,

            initial_velocity: (PROJECTILE_START_VX, PROJECTILE_START_VY),

            target_y: TARGET_Y,
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,

            celebration_delay_ms: CELEBRATION_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, DeflectorError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Read and parse a tuning file; a missing or unreadable file is an error
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, DeflectorError> {
        let path = path.as_ref();
        log::info!("Loading tuning from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, DeflectorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), DeflectorError> {
        let positive = [
            ("paddle_half_width", self.paddle_half_width),
            ("paddle_band_depth", self.paddle_band_depth),
            ("target_width", self.target_width),
            ("target_height", self.target_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(DeflectorError::InvalidTuning { field, value });
            }
        }

        let non_negative = [
            ("paddle_speed", self.paddle_speed),
            ("deflection_scale", self.deflection_scale),
            ("celebration_delay_ms", self.celebration_delay_ms),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DeflectorError::InvalidTuning { field, value });
            }
        }

        let (vx, vy) = self.initial_velocity;
        let finite = [
            ("paddle_start_x", self.paddle_start_x),
            ("paddle_y", self.paddle_y),
            ("target_y", self.target_y),
            ("initial_velocity.x", vx),
            ("initial_velocity.y", vy),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(DeflectorError::InvalidTuning { field, value });
            }
        }
        // A zero launch velocity would leave the projectile parked forever
        if vx == 0.0 && vy == 0.0 {
            return Err(DeflectorError::InvalidTuning {
                field: "initial_velocity",
                value: 0.0,
            });
        }

        Ok(())
    }

    #[inline]
    pub fn initial_velocity(&self) -> Vec2 {
        Vec2::new(self.initial_velocity.0, self.initial_velocity.1)
    }

    #[inline]
    pub fn target_half_extents(&self) -> Vec2 {
        Vec2::new(self.target_width / 2.0, self.target_height / 2.0)
    }
}
