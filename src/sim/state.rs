//! Game state and core simulation types
//!
//! Everything the renderer needs to draw a frame lives in [`SessionState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Platform;
use crate::tuning::Tuning;

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session; waiting for a level
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Player fell off the world; result reported
    Ended,
}

/// The controlled character (axis-aligned box, y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub is_jumping: bool,
    pub is_grounded: bool,
}

impl Player {
    /// Spawn just above the first platform, falling onto it
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, tuning.player_start_y),
            size: Vec2::splat(tuning.player_size),
            vel: Vec2::ZERO,
            is_jumping: false,
            is_grounded: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap of horizontal spans (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, platform: &Platform) -> bool {
        self.right() > platform.left() && self.left() < platform.right()
    }
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub player: Player,
    /// Generated once at session start, never mutated
    pub platforms: Vec<Platform>,
    /// Best score reached this run
    pub score: u64,
    /// Whole seconds since the session started
    pub time_secs: u64,
    /// Left edge of the viewport in world coordinates
    pub camera_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub game_over: bool,
}

impl SessionState {
    /// Fresh session on the given level
    pub fn new(platforms: Vec<Platform>, tuning: &Tuning) -> Self {
        Self {
            player: Player::spawn(tuning),
            platforms,
            score: 0,
            time_secs: 0,
            camera_x: 0.0,
            time_ticks: 0,
            game_over: false,
        }
    }
}
