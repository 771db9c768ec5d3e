//! Error types
//!
//! Malformed numeric fields inside block records are not errors (they are
//! substituted during generation). Only undecodable input, invalid
//! configuration and session misuse surface here.

use thiserror::Error;

use crate::sim::GamePhase;

/// Failure to decode a block feed.
#[derive(Error, Debug)]
pub enum BlockDataError {
    /// Payload was not valid JSON, or matched neither accepted shape.
    #[error("invalid block feed: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed envelope reported upstream errors instead of data.
    #[error("block feed returned errors: {0}")]
    Upstream(String),
}

/// Invalid tuning or settings values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Platform width bounds are inverted.
    #[error("min platform width {min} exceeds max {max}")]
    WidthRange {
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },

    /// Jump impulse must point upward (negative y).
    #[error("jump force must be negative, got {0}")]
    JumpForce(f32),

    /// Settings JSON could not be decoded.
    #[error("invalid settings: {0}")]
    Json(String),

    /// Settings file could not be read.
    #[error("cannot read settings: {0}")]
    Io(String),
}

/// Misuse of the game loop driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No platforms were generated, so there is nothing to play.
    #[error("no playable level: block feed produced no platforms")]
    EmptyLevel,

    /// A session can only start from Idle.
    #[error("cannot start a session while {0:?}")]
    NotIdle(GamePhase),
}
