//! Errors raised while building a session or loading tuning
//!
//! The per-frame update never fails; these only surface at construction.

/// Construction and configuration errors
#[derive(Debug, thiserror::Error)]
pub enum DeflectorError {
    /// Arena dimensions must be positive and finite
    #[error("Invalid arena bounds: {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    /// Hand-built or replayed world with non-finite entity state
    #[error("Invalid world: {0} is not finite")]
    InvalidWorld(&'static str),

    #[error("Invalid tuning value for {field}: {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    #[error("Failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),

    #[error("Failed to read tuning: {0}")]
    Io(#[from] std::io::Error),
}
