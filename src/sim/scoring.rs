//! Score, camera and termination (derived from state each tick)

use super::level::Platform;
use super::state::Player;
use crate::tuning::Tuning;

/// Points for every platform whose right edge is strictly behind the player
pub fn calculate_score(player: &Player, platforms: &[Platform], tuning: &Tuning) -> u64 {
    let passed = platforms.iter().filter(|p| p.right() < player.pos.x).count() as u64;
    passed * tuning.points_per_platform
}

/// Viewport left edge: player held a third of the way in, never left of 0
pub fn camera_x(player: &Player, viewport_width: f32) -> f32 {
    (player.pos.x - viewport_width / 3.0).max(0.0)
}

/// Fallen below the bottom of the world
pub fn check_game_over(player: &Player, viewport_height: f32, tuning: &Tuning) -> bool {
    player.pos.y > viewport_height + tuning.game_over_margin
}
