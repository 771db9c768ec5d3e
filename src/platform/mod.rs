//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock for elapsed play time)
//! - Input events (keyboard → control snapshot)
//!
//! Storage lives with the data it stores (see `Settings::load`).

pub mod input;
pub mod time;

pub use input::{Control, KeyboardInput};
pub use time::{Clock, ManualClock, SystemClock, elapsed_secs};
