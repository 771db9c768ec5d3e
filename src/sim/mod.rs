//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Same blocks always build the same level
//! - Per-tick physics, no wall clock
//! - Stable iteration order (platform index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod block;
pub mod level;
pub mod scoring;
pub mod state;
pub mod tick;

pub use autopilot::{autopilot, supporting_platform};
pub use block::{BlockRecord, parse_block_feed, parse_int_lenient, synthetic_feed};
pub use level::{MARKERS, Platform, PlatformKind, generate_platforms};
pub use scoring::{calculate_score, camera_x, check_game_over};
pub use state::{GamePhase, Player, SessionState};
pub use tick::{ControlInput, is_landing, landing_platform, step};
