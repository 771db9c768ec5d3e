//! Game loop driver
//!
//! Owns the session and walks it through `Idle → Running → Ended`. Each
//! display frame the host samples input and calls [`Driver::frame`]; the
//! driver steps the simulation, refreshes score/camera/time, and reports the
//! final result exactly once when the player falls out of the world.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::SessionError;
use crate::platform::time::{Clock, elapsed_secs};
use crate::settings::{Cadence, Settings};
use crate::sim::{
    BlockRecord, ControlInput, GamePhase, Platform, SessionState, calculate_score, camera_x,
    check_game_over, generate_platforms, step,
};

/// Final outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub score: u64,
    pub elapsed_secs: u64,
}

/// Receives the result when a session ends
pub trait ResultSink {
    fn report(&mut self, result: RunResult);
}

impl<F: FnMut(RunResult)> ResultSink for F {
    fn report(&mut self, result: RunResult) {
        self(result)
    }
}

/// Keeps every reported result (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct ResultHistory {
    pub results: Vec<RunResult>,
}

impl ResultSink for ResultHistory {
    fn report(&mut self, result: RunResult) {
        self.results.push(result);
    }
}

/// What a driver call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session running; nothing simulated
    Inactive,
    /// Simulated; the run continues
    Running,
    /// This call ended the run
    Ended(RunResult),
}

/// Session scheduler
pub struct Driver<C: Clock, S: ResultSink> {
    settings: Settings,
    clock: C,
    sink: S,
    phase: GamePhase,
    session: Option<SessionState>,
    started_at_ms: f64,
    accumulator: f32,
}

impl<C: Clock, S: ResultSink> Driver<C, S> {
    pub fn new(settings: Settings, clock: C, sink: S) -> Self {
        Self {
            settings,
            clock,
            sink,
            phase: GamePhase::Idle,
            session: None,
            started_at_ms: 0.0,
            accumulator: 0.0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Current (or just-ended) session, for drawing
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Switch tick scheduling; takes effect on the next frame
    pub fn set_cadence(&mut self, cadence: Cadence) {
        if self.settings.cadence != cadence {
            log::info!("Cadence: {}", cadence.as_str());
        }
        self.settings.cadence = cadence;
        self.accumulator = 0.0;
    }

    /// Idle → Running on a pre-built level
    pub fn start(&mut self, platforms: Vec<Platform>) -> Result<(), SessionError> {
        if self.phase != GamePhase::Idle {
            return Err(SessionError::NotIdle(self.phase));
        }
        if platforms.is_empty() {
            log::warn!("Refusing to start: empty level");
            return Err(SessionError::EmptyLevel);
        }

        log::info!(
            "Session started: {} platforms, level ends at x={}",
            platforms.len(),
            platforms.last().map_or(0.0, |p| p.right())
        );

        self.session = Some(SessionState::new(platforms, &self.settings.tuning));
        self.started_at_ms = self.clock.now_ms();
        self.accumulator = 0.0;
        self.phase = GamePhase::Running;
        Ok(())
    }

    /// Idle → Running, generating the level from block data
    pub fn start_from_blocks(&mut self, blocks: &[BlockRecord]) -> Result<(), SessionError> {
        let platforms = generate_platforms(blocks, &self.settings.tuning);
        self.start(platforms)
    }

    /// Tear down any session and return to Idle
    pub fn reset(&mut self) {
        if self.phase != GamePhase::Idle {
            log::info!("Session reset from {:?}", self.phase);
        }
        self.session = None;
        self.accumulator = 0.0;
        self.phase = GamePhase::Idle;
    }

    /// One display frame, scheduled per the configured cadence
    pub fn frame(&mut self, frame_dt: f32, input: &ControlInput) -> TickOutcome {
        match self.settings.cadence {
            Cadence::FixedStep => self.advance(frame_dt, input),
            Cadence::FrameLocked => self.tick(input),
        }
    }

    /// Fixed-timestep update: run as many `SIM_DT` ticks as real time allows
    pub fn advance(&mut self, frame_dt: f32, input: &ControlInput) -> TickOutcome {
        if self.phase != GamePhase::Running {
            self.accumulator = 0.0;
            return TickOutcome::Inactive;
        }

        // NaN/inf would poison the accumulator for the rest of the run
        let frame_dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += frame_dt;

        let mut outcome = TickOutcome::Running;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            outcome = self.tick(input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if outcome != TickOutcome::Running {
                self.accumulator = 0.0;
                break;
            }
        }
        outcome
    }

    /// Advance the session by exactly one simulation tick
    pub fn tick(&mut self, input: &ControlInput) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Inactive;
        }
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Inactive;
        };
        let tuning = &self.settings.tuning;

        session.player = step(&session.player, input, &session.platforms, tuning);
        session.time_ticks += 1;
        // High-water mark: walking back never costs points
        session.score = session
            .score
            .max(calculate_score(&session.player, &session.platforms, tuning));
        session.camera_x = camera_x(&session.player, self.settings.viewport_width);
        session.time_secs = elapsed_secs(self.started_at_ms, self.clock.now_ms());

        if !check_game_over(&session.player, self.settings.viewport_height, tuning) {
            return TickOutcome::Running;
        }

        session.game_over = true;
        self.phase = GamePhase::Ended;
        let result = RunResult {
            score: session.score,
            elapsed_secs: session.time_secs,
        };
        log::info!(
            "Game over: score {} in {}s ({} ticks)",
            result.score,
            result.elapsed_secs,
            session.time_ticks
        );
        self.sink.report(result);
        TickOutcome::Ended(result)
    }
}
