//! Idle/demo mode - the game plays itself
//!
//! Deterministic: the same level always produces the same input trace.

use super::level::Platform;
use super::state::Player;
use super::tick::ControlInput;
use crate::tuning::Tuning;

/// The platform the player is standing on, if any
pub fn supporting_platform<'a>(player: &Player, platforms: &'a [Platform]) -> Option<&'a Platform> {
    if !player.is_grounded {
        return None;
    }
    platforms
        .iter()
        .find(|p| player.overlaps_x(p) && (player.bottom() - p.top()).abs() < 1e-3)
}

/// Run right and jump off each platform's far edge
pub fn autopilot(player: &Player, platforms: &[Platform], tuning: &Tuning) -> ControlInput {
    let jump = supporting_platform(player, platforms)
        .is_some_and(|p| player.right() >= p.right() - tuning.autopilot_lookahead);

    ControlInput {
        left: false,
        right: true,
        jump,
    }
}
