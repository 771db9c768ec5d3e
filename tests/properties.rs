//! Property tests for level generation and player physics

use block_runner::consts::*;
use block_runner::driver::ResultHistory;
use block_runner::platform::ManualClock;
use block_runner::sim::{
    BlockRecord, ControlInput, Player, check_game_over, generate_platforms, landing_platform, step,
};
use block_runner::{Driver, Settings, TickOutcome, Tuning};
use proptest::prelude::*;

fn numeric_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (0u64..40_000_000).prop_map(|n| n.to_string()),
        1 => "[a-z ]{0,6}",
        1 => (-500i64..0).prop_map(|n| n.to_string()),
    ]
}

fn block() -> impl Strategy<Value = BlockRecord> {
    (numeric_text(), numeric_text(), 0u64..2_000_000_000)
        .prop_map(|(gas, size, ts)| BlockRecord::new(gas, size, ts.to_string()))
}

fn blocks(max: usize) -> impl Strategy<Value = Vec<BlockRecord>> {
    prop::collection::vec(block(), 0..max)
}

fn input() -> impl Strategy<Value = ControlInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| ControlInput { left, right, jump })
}

proptest! {
    #[test]
    fn generation_is_deterministic(blocks in blocks(40)) {
        let tuning = Tuning::default();
        prop_assert_eq!(generate_platforms(&blocks, &tuning), generate_platforms(&blocks, &tuning));
    }

    #[test]
    fn platforms_are_spaced_by_gap(blocks in blocks(40)) {
        let platforms = generate_platforms(&blocks, &Tuning::default());
        prop_assert_eq!(platforms.len(), blocks.len());
        for pair in platforms.windows(2) {
            prop_assert_eq!(pair[0].left() + pair[0].width() + PLATFORM_GAP, pair[1].left());
            prop_assert!(pair[0].right() < pair[1].left());
        }
    }

    #[test]
    fn first_platform_on_baseline(blocks in prop::collection::vec(block(), 1..10)) {
        let platforms = generate_platforms(&blocks, &Tuning::default());
        prop_assert_eq!(platforms[0].top(), BASELINE_Y);
        prop_assert_eq!(platforms[0].left(), FIRST_PLATFORM_X);
    }

    #[test]
    fn widths_and_heights_bounded(blocks in blocks(40)) {
        for p in generate_platforms(&blocks, &Tuning::default()) {
            prop_assert!(p.width() >= MIN_PLATFORM_WIDTH && p.width() <= MAX_PLATFORM_WIDTH);
            prop_assert_eq!(p.height(), PLATFORM_HEIGHT);
        }
    }

    #[test]
    fn fall_speed_never_exceeds_clamp(
        blocks in prop::collection::vec(block(), 1..12),
        inputs in prop::collection::vec(input(), 1..300),
    ) {
        let tuning = Tuning::default();
        let platforms = generate_platforms(&blocks, &tuning);
        let mut player = Player::spawn(&tuning);
        for input in &inputs {
            player = step(&player, input, &platforms, &tuning);
            prop_assert!(player.vel.y <= MAX_VELOCITY_Y);
        }
    }

    #[test]
    fn landing_always_grounds(
        blocks in prop::collection::vec(block(), 1..12),
        inputs in prop::collection::vec(input(), 1..300),
    ) {
        let tuning = Tuning::default();
        let platforms = generate_platforms(&blocks, &tuning);
        let mut player = Player::spawn(&tuning);
        for input in &inputs {
            let next = step(&player, input, &platforms, &tuning);
            if next.is_grounded {
                prop_assert_eq!(next.vel.y, 0.0);
                prop_assert!(!next.is_jumping);
                let surface = platforms.iter().any(|p| p.top() == next.bottom() && next.overlaps_x(p));
                prop_assert!(surface);
            }
            player = next;
        }
    }

    #[test]
    fn landing_picks_highest_surface(
        tops in prop::collection::vec(380.0f32..420.0, 1..6),
        vy in 0.0f32..20.0,
        bottom in 390.0f32..430.0,
    ) {
        let tuning = Tuning::default();
        let mut platforms = generate_platforms(&vec![BlockRecord::new("100", "1000", "0"); tops.len()], &tuning);
        // Stack them all at the same x so every one overlaps the player
        for (p, top) in platforms.iter_mut().zip(&tops) {
            p.pos.x = 0.0;
            p.pos.y = *top;
        }
        let mut player = Player::spawn(&tuning);
        player.pos.x = 50.0;
        player.pos.y = bottom - player.size.y;
        player.vel.y = vy;

        if let Some(chosen) = landing_platform(&player, &platforms, &tuning) {
            let candidates = platforms.iter().filter(|p| block_runner::sim::is_landing(&player, p, &tuning));
            for p in candidates {
                prop_assert!(chosen.top() <= p.top());
            }
        }
    }

    #[test]
    fn game_over_threshold(y in -1000.0f32..2000.0, height in 100.0f32..2000.0) {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);
        player.pos.y = y;
        prop_assert_eq!(check_game_over(&player, height, &tuning), y > height + GAME_OVER_MARGIN);
    }

    #[test]
    fn session_score_is_monotonic(
        blocks in prop::collection::vec(block(), 1..12),
        inputs in prop::collection::vec(input(), 1..400),
    ) {
        let clock = ManualClock::new(0.0);
        let mut driver = Driver::new(Settings::default(), clock.clone(), ResultHistory::default());
        driver.start_from_blocks(&blocks).unwrap();

        let mut last = 0;
        for input in &inputs {
            clock.advance_ms(16.0);
            let outcome = driver.tick(input);
            let score = driver.session().unwrap().score;
            prop_assert!(score >= last);
            last = score;
            if outcome != TickOutcome::Running {
                break;
            }
        }
        prop_assert!(driver.sink().results.len() <= 1);
    }
}

#[test]
fn two_block_scenario() {
    let blocks = [
        BlockRecord::new("100", "1000", "0"),
        BlockRecord::new("500", "2000", "1"),
    ];
    let platforms = generate_platforms(&blocks, &Tuning::default());
    assert_eq!(platforms.len(), 2);
    assert_eq!(platforms[0].top(), 400.0);
    assert_eq!(platforms[0].width(), 200.0);
    assert_eq!(platforms[1].top(), 400.0 + ((500 % 200) - 100) as f32);
    assert_eq!(platforms[1].width(), 400.0);
}

#[test]
fn jump_from_rest_on_first_platform() {
    let tuning = Tuning::default();
    let platforms = generate_platforms(&[BlockRecord::new("100", "1000", "0")], &tuning);

    // Let the spawn settle onto platform 0
    let mut player = Player::spawn(&tuning);
    for _ in 0..20 {
        player = step(&player, &ControlInput::default(), &platforms, &tuning);
    }
    assert!(player.is_grounded);

    let jump = ControlInput {
        jump: true,
        ..Default::default()
    };
    let next = step(&player, &jump, &platforms, &tuning);
    assert_eq!(next.vel.y, JUMP_FORCE);
    assert!(!next.is_grounded);
}

#[test]
fn autopilot_clears_flat_level() {
    let blocks = vec![BlockRecord::new("100", "750", "0"); 5];
    let clock = ManualClock::new(0.0);
    let mut driver = Driver::new(Settings::default(), clock.clone(), ResultHistory::default());
    driver.start_from_blocks(&blocks).unwrap();

    for _ in 0..5_000 {
        let session = driver.session().unwrap();
        let input = block_runner::sim::autopilot(&session.player, &session.platforms, &driver.settings().tuning);
        clock.advance_ms(1000.0 / 60.0);
        if driver.tick(&input) != TickOutcome::Running {
            break;
        }
    }

    let results = &driver.sink().results;
    assert_eq!(results.len(), 1);
    // Every platform passed before falling off the end
    assert_eq!(results[0].score, 500);
}

#[test]
fn feed_with_numeric_fields_is_playable() {
    let feed = r#"[{"gasUsed":123,"size":1000,"timestamp":0},{"gasUsed":null,"timestamp":"1"}]"#;
    let blocks = block_runner::sim::parse_block_feed(feed).unwrap();
    let mut driver = Driver::new(Settings::default(), ManualClock::new(0.0), ResultHistory::default());
    driver.start_from_blocks(&blocks).unwrap();
    let session = driver.session().unwrap();
    assert_eq!(session.platforms.len(), 2);
    assert_eq!(session.platforms[1].top(), BASELINE_Y);
    assert_eq!(session.platforms[1].width(), MIN_PLATFORM_WIDTH);
}
