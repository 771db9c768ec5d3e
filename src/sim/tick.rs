//! Single simulation tick
//!
//! Pure player update: input, gravity, jump, integration, then landing
//! resolution against the level. No hidden state.

use serde::{Deserialize, Serialize};

use super::level::Platform;
use super::state::Player;
use crate::tuning::Tuning;

/// Control snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub left: bool,
    pub right: bool,
    /// Read as a level: jumps whenever held while grounded
    pub jump: bool,
}

/// Advance the player by one tick
pub fn step(player: &Player, input: &ControlInput, platforms: &[Platform], tuning: &Tuning) -> Player {
    let mut next = player.clone();

    // Arcade movement: no inertia
    next.vel.x = if input.left {
        -tuning.move_speed
    } else if input.right {
        tuning.move_speed
    } else {
        0.0
    };

    next.vel.y = (next.vel.y + tuning.gravity).min(tuning.max_fall_speed);

    if input.jump && next.is_grounded {
        next.vel.y = tuning.jump_force;
        next.is_jumping = true;
        next.is_grounded = false;
    }

    next.pos += next.vel;

    // Grounded is recomputed from scratch every tick
    next.is_grounded = false;
    if let Some(platform) = landing_platform(&next, platforms, tuning) {
        next.pos.y = platform.top() - next.size.y;
        next.vel.y = 0.0;
        next.is_grounded = true;
        next.is_jumping = false;
        log::trace!("Landed on platform {}", platform.index);
    }

    next
}

/// Whether the player is settling onto `platform` this tick
///
/// Only top-surface landings while falling or resting count; sides and
/// undersides are pass-through.
#[inline]
pub fn is_landing(player: &Player, platform: &Platform, tuning: &Tuning) -> bool {
    let bottom = player.bottom();
    player.overlaps_x(platform)
        && bottom > platform.top()
        && bottom < platform.top() + platform.height() + tuning.landing_tolerance
        && player.vel.y >= 0.0
}

/// Pick the platform to land on when several qualify
///
/// The highest top surface wins; equal tops resolve to the earliest platform.
pub fn landing_platform<'a>(player: &Player, platforms: &'a [Platform], tuning: &Tuning) -> Option<&'a Platform> {
    platforms
        .iter()
        .filter(|p| is_landing(player, p, tuning))
        .fold(None, |best: Option<&Platform>, p| match best {
            Some(b) if b.top() <= p.top() => Some(b),
            _ => Some(p),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::block::BlockRecord;
    use crate::sim::level::{PlatformKind, generate_platforms};
    use glam::Vec2;

    fn level() -> Vec<Platform> {
        let blocks = [
            BlockRecord::new("100", "1000", "0"),
            BlockRecord::new("500", "2000", "1"),
        ];
        generate_platforms(&blocks, &Tuning::default())
    }

    fn resting_on(platform: &Platform) -> Player {
        let mut player = Player::spawn(&Tuning::default());
        player.pos = Vec2::new(platform.left() + 20.0, platform.top() - PLAYER_SIZE);
        player.is_grounded = true;
        player
    }

    fn platform_at(index: usize, x: f32, y: f32, width: f32) -> Platform {
        Platform {
            index,
            pos: Vec2::new(x, y),
            size: Vec2::new(width, PLATFORM_HEIGHT),
            kind: PlatformKind::Normal,
            marker: None,
            block: BlockRecord::default(),
        }
    }

    #[test]
    fn test_jump_from_rest() {
        let platforms = level();
        let player = resting_on(&platforms[0]);
        let input = ControlInput {
            jump: true,
            ..Default::default()
        };

        let next = step(&player, &input, &platforms, &Tuning::default());
        assert_eq!(next.vel.y, JUMP_FORCE);
        assert!(!next.is_grounded);
        assert!(next.is_jumping);
        assert_eq!(next.pos.y, player.pos.y + JUMP_FORCE);
    }

    #[test]
    fn test_rest_stays_grounded() {
        let platforms = level();
        let player = resting_on(&platforms[0]);

        let next = step(&player, &ControlInput::default(), &platforms, &Tuning::default());
        assert!(next.is_grounded);
        assert_eq!(next.vel.y, 0.0);
        assert_eq!(next.bottom(), platforms[0].top());
    }

    #[test]
    fn test_airborne_jump_ignored() {
        let platforms = level();
        let mut player = resting_on(&platforms[0]);
        player.pos.y -= 150.0;
        player.is_grounded = false;
        player.vel.y = -2.0;

        let input = ControlInput {
            jump: true,
            ..Default::default()
        };
        let next = step(&player, &input, &platforms, &Tuning::default());
        assert!((next.vel.y - (-2.0 + GRAVITY)).abs() < 1e-6);
        assert!(!next.is_jumping);
    }

    #[test]
    fn test_horizontal_input() {
        let platforms = level();
        let player = resting_on(&platforms[0]);
        let tuning = Tuning::default();

        let both = ControlInput {
            left: true,
            right: true,
            jump: false,
        };
        assert_eq!(step(&player, &both, &platforms, &tuning).vel.x, -MOVE_SPEED);

        let right = ControlInput {
            right: true,
            ..Default::default()
        };
        let next = step(&player, &right, &platforms, &tuning);
        assert_eq!(next.vel.x, MOVE_SPEED);
        assert_eq!(next.pos.x, player.pos.x + MOVE_SPEED);

        // Releasing stops instantly
        assert_eq!(step(&next, &ControlInput::default(), &platforms, &tuning).vel.x, 0.0);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let mut player = Player::spawn(&Tuning::default());
        player.vel.y = MAX_VELOCITY_Y;
        player.pos.y = 5000.0;

        let next = step(&player, &ControlInput::default(), &[], &Tuning::default());
        assert_eq!(next.vel.y, MAX_VELOCITY_Y);
        assert_eq!(next.pos.y, 5000.0 + MAX_VELOCITY_Y);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platform = platform_at(0, 0.0, 400.0, 300.0);
        let mut player = Player::spawn(&Tuning::default());
        player.pos = Vec2::new(50.0, 365.0);
        player.vel.y = -5.0;

        let next = step(&player, &ControlInput::default(), &[platform], &Tuning::default());
        assert!(!next.is_grounded);
    }

    #[test]
    fn test_landing_tolerance_band() {
        let tuning = Tuning::default();
        let platform = platform_at(0, 0.0, 400.0, 300.0);
        let mut player = Player::spawn(&tuning);
        player.pos = Vec2::new(50.0, 0.0);

        // Just inside the band: top < bottom < top + height + tolerance
        player.pos.y = 400.0 + 29.0 - PLAYER_SIZE;
        assert!(is_landing(&player, &platform, &tuning));

        // At the band edge
        player.pos.y = 400.0 + 30.0 - PLAYER_SIZE;
        assert!(!is_landing(&player, &platform, &tuning));

        // Exactly on top is not "past" the surface
        player.pos.y = 400.0 - PLAYER_SIZE;
        assert!(!is_landing(&player, &platform, &tuning));
    }

    #[test]
    fn test_no_side_collision() {
        let platform = platform_at(0, 100.0, 400.0, 200.0);
        let mut player = Player::spawn(&Tuning::default());
        // Player overlaps the platform body from the left, moving right
        player.pos = Vec2::new(70.0, 390.0);
        let input = ControlInput {
            right: true,
            ..Default::default()
        };

        let next = step(&player, &input, &[platform], &Tuning::default());
        assert_eq!(next.pos.x, 75.0);
        // Bottom at 430.6 is past the landing band, so no snap either
        assert!(!next.is_grounded);
    }

    #[test]
    fn test_highest_candidate_wins() {
        let tuning = Tuning::default();
        // Two overlapping surfaces, the lower listed last
        let high = platform_at(0, 0.0, 400.0, 300.0);
        let low = platform_at(1, 0.0, 410.0, 300.0);
        let mut player = Player::spawn(&tuning);
        player.pos = Vec2::new(50.0, 412.0 - PLAYER_SIZE);
        player.vel.y = 1.0;

        let platforms = [high, low];
        assert!(is_landing(&player, &platforms[0], &tuning));
        assert!(is_landing(&player, &platforms[1], &tuning));
        assert_eq!(landing_platform(&player, &platforms, &tuning).map(|p| p.index), Some(0));
    }

    #[test]
    fn test_equal_tops_resolve_to_first() {
        let tuning = Tuning::default();
        let a = platform_at(0, 0.0, 400.0, 100.0);
        let b = platform_at(1, 50.0, 400.0, 100.0);
        let mut player = Player::spawn(&tuning);
        player.pos = Vec2::new(60.0, 405.0 - PLAYER_SIZE);

        let platforms = [a, b];
        assert_eq!(landing_platform(&player, &platforms, &tuning).map(|p| p.index), Some(0));
    }

    #[test]
    fn test_spawn_falls_onto_first_platform() {
        let platforms = level();
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);

        for _ in 0..30 {
            player = step(&player, &ControlInput::default(), &platforms, &tuning);
        }
        assert!(player.is_grounded);
        assert_eq!(player.bottom(), BASELINE_Y);
        assert_eq!(player.vel.y, 0.0);
    }
}
