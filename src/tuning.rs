//! Data-driven game balance
//!
//! Every physics and level-generation constant lives here so a run can be
//! reproduced (or rebalanced) without touching simulation code. Defaults come
//! from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics and generator parameters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics (per tick) ===
    pub gravity: f32,
    pub jump_force: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    pub landing_tolerance: f32,

    // === Player spawn ===
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_size: f32,

    // === Level generation ===
    pub first_platform_x: f32,
    pub baseline_y: f32,
    pub platform_gap: f32,
    pub platform_height: f32,
    pub min_platform_width: f32,
    pub max_platform_width: f32,
    /// Block size units per world unit of platform width
    pub size_per_width: f32,
    /// `gasUsed mod gas_band - gas_band / 2` gives the height offset
    pub gas_band: i64,
    pub special_every: usize,

    // === Scoring / termination ===
    pub points_per_platform: u64,
    pub game_over_margin: f32,

    /// Autopilot edge distance that triggers a jump
    pub autopilot_lookahead: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            max_fall_speed: MAX_VELOCITY_Y,
            landing_tolerance: LANDING_TOLERANCE,

            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_size: PLAYER_SIZE,

            first_platform_x: FIRST_PLATFORM_X,
            baseline_y: BASELINE_Y,
            platform_gap: PLATFORM_GAP,
            platform_height: PLATFORM_HEIGHT,
            min_platform_width: MIN_PLATFORM_WIDTH,
            max_platform_width: MAX_PLATFORM_WIDTH,
            size_per_width: SIZE_PER_WIDTH,
            gas_band: GAS_BAND,
            special_every: SPECIAL_EVERY,

            points_per_platform: POINTS_PER_PLATFORM,
            game_over_margin: GAME_OVER_MARGIN,

            autopilot_lookahead: AUTOPILOT_LOOKAHEAD,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot make sense of
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("player_size", self.player_size),
            ("platform_gap", self.platform_gap),
            ("platform_height", self.platform_height),
            ("min_platform_width", self.min_platform_width),
            ("size_per_width", self.size_per_width),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.min_platform_width > self.max_platform_width {
            return Err(ConfigError::WidthRange {
                min: self.min_platform_width,
                max: self.max_platform_width,
            });
        }

        if !(self.jump_force < 0.0) {
            return Err(ConfigError::JumpForce(self.jump_force));
        }

        if self.gas_band <= 0 {
            return Err(ConfigError::NotPositive {
                field: "gas_band",
                value: self.gas_band as f32,
            });
        }

        if self.special_every == 0 {
            return Err(ConfigError::NotPositive {
                field: "special_every",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// Clamp a raw `size / size_per_width` width into the configured bounds
    #[inline]
    pub fn clamp_width(&self, width: f32) -> f32 {
        width.clamp(self.min_platform_width, self.max_platform_width)
    }
}
