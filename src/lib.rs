//! Block Runner - A side-scrolling runner built from chain data
//!
//! Core modules:
//! - `sim`: Deterministic simulation (platform generation, player physics, scoring)
//! - `driver`: Game loop state machine (Idle → Running → Ended)
//! - `platform`: Browser/native platform abstraction (input, clock)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences and viewport configuration

pub mod driver;
pub mod error;
pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{Driver, ResultSink, RunResult, TickOutcome};
pub use error::{BlockDataError, ConfigError, SessionError};
pub use settings::{Cadence, Settings};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics values are per tick and assume the tick rate below.
pub mod consts {
    /// Simulation tick rate the per-tick constants are tuned for
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player physics
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = -15.0;
    pub const MOVE_SPEED: f32 = 5.0;
    /// Terminal fall speed
    pub const MAX_VELOCITY_Y: f32 = 20.0;
    /// Extra depth below a platform's bottom still counted as a landing
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Player spawn (just above the first platform)
    pub const PLAYER_START_X: f32 = 170.0;
    pub const PLAYER_START_Y: f32 = 340.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Level generation
    pub const FIRST_PLATFORM_X: f32 = 150.0;
    pub const BASELINE_Y: f32 = 400.0;
    pub const PLATFORM_GAP: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const MIN_PLATFORM_WIDTH: f32 = 150.0;
    pub const MAX_PLATFORM_WIDTH: f32 = 400.0;
    /// Block size units per world unit of platform width
    pub const SIZE_PER_WIDTH: f32 = 5.0;
    /// `gasUsed mod GAS_BAND - GAS_BAND / 2` gives the height offset
    pub const GAS_BAND: i64 = 200;
    /// Every Nth platform (after the first) is special
    pub const SPECIAL_EVERY: usize = 8;

    /// Scoring / termination
    pub const POINTS_PER_PLATFORM: u64 = 100;
    pub const GAME_OVER_MARGIN: f32 = 100.0;

    /// Autopilot jumps when this close to the platform edge
    pub const AUTOPILOT_LOOKAHEAD: f32 = 10.0;

    /// Default viewport (canvas) size
    pub const VIEWPORT_WIDTH: f32 = 1200.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
}
