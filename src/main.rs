//! Block Runner entry point
//!
//! Web: exports `WebGame` for the host page, which fetches block data and
//! draws frames from `snapshot_json`. Native: headless autopilot runs over a
//! block feed file or a seeded synthetic feed.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use block_runner::consts::SIM_DT;
    use block_runner::driver::ResultHistory;
    use block_runner::hud::{format_elapsed, platform_caption};
    use block_runner::platform::{KeyboardInput, SystemClock};
    use block_runner::sim::{GamePhase, autopilot, parse_block_feed};
    use block_runner::{Cadence, Driver, RunResult, Settings, TickOutcome};

    /// Game instance holding all state
    struct Game {
        driver: Driver<SystemClock, ResultHistory>,
        keys: KeyboardInput,
        last_time: f64,
        frame_request: Option<i32>,
        /// Idle/demo mode - autopilot plays the game
        idle_mode: bool,
        on_game_over: Option<js_sys::Function>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let keys = KeyboardInput::new(settings.debounce_jump);
            Self {
                driver: Driver::new(settings, SystemClock, ResultHistory::default()),
                keys,
                last_time: 0.0,
                frame_request: None,
                idle_mode: false,
                on_game_over: None,
            }
        }

        /// Stop the frame loop and drop the session
        fn teardown(&mut self) {
            if let Some(id) = self.frame_request.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            self.driver.reset();
            self.keys.release_all();
            self.last_time = 0.0;
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(session) = self.driver.session() else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&session.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&format_elapsed(session.time_secs)));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.driver.phase() == GamePhase::Ended {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&session.score.to_string()));
                    }
                    if let Some(time_el) = document.get_element_by_id("final-time") {
                        time_el.set_text_content(Some(&format_elapsed(session.time_secs)));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Browser handle to one game; the page owns block fetching and drawing
    #[wasm_bindgen]
    pub struct WebGame {
        game: Rc<RefCell<Game>>,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebGame {
            let game = Rc::new(RefCell::new(Game::new(Settings::load())));
            setup_input_handlers(game.clone());
            WebGame { game }
        }

        /// Start a run from block feed JSON. `on_game_over(score, seconds)`
        /// is called once when the player falls.
        pub fn start(&self, blocks_json: &str, on_game_over: Option<js_sys::Function>) -> Result<(), JsValue> {
            let blocks = parse_block_feed(blocks_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
            {
                let mut g = self.game.borrow_mut();
                g.teardown();
                g.driver
                    .start_from_blocks(&blocks)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                g.on_game_over = on_game_over;
            }
            log::info!("Run started with {} blocks", blocks.len());
            request_animation_frame(self.game.clone());
            Ok(())
        }

        /// Cancel the frame loop and return to idle
        pub fn stop(&self) {
            self.game.borrow_mut().teardown();
        }

        /// Current session as JSON for the renderer
        pub fn snapshot_json(&self) -> Option<String> {
            let g = self.game.borrow();
            let session = g.driver.session()?;
            match serde_json::to_string(session) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::warn!("Snapshot failed: {}", e);
                    None
                }
            }
        }

        /// `["Gas: …", "Time: …"]` caption for the platform at `index`
        pub fn platform_caption(&self, index: usize) -> Option<js_sys::Array> {
            let g = self.game.borrow();
            let platform = g.driver.session()?.platforms.get(index)?;
            Some(platform_caption(platform).iter().map(|line| JsValue::from_str(line)).collect())
        }

        /// Current tick cadence, as shown in the settings menu
        pub fn cadence(&self) -> String {
            self.game.borrow().driver.settings().cadence.as_str().to_string()
        }

        /// Switch cadence by name and persist it; false for unknown names
        pub fn set_cadence(&self, name: &str) -> bool {
            let Some(cadence) = Cadence::from_str(name) else {
                log::warn!("Unknown cadence {:?}", name);
                return false;
            };
            let mut g = self.game.borrow_mut();
            g.driver.set_cadence(cadence);
            g.driver.settings().save();
            true
        }

        pub fn set_idle_mode(&self, on: bool) {
            self.game.borrow_mut().idle_mode = on;
            log::info!("Idle mode: {}", on);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; keyboard input disabled");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyups never arrive once focus is gone
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(handle, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_request = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let (outcome, callback) = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            g.frame_request = None;

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let keys = g.keys.snapshot();
            let input = match g.driver.session() {
                Some(s) if g.idle_mode => autopilot(&s.player, &s.platforms, &g.driver.settings().tuning),
                _ => keys,
            };

            let outcome = g.driver.frame(dt, &input);
            g.update_hud();
            (outcome, g.on_game_over.clone())
        };

        // Callback runs outside the borrow so it may restart the game
        match outcome {
            TickOutcome::Running => request_animation_frame(game),
            TickOutcome::Ended(RunResult { score, elapsed_secs }) => {
                if let Some(callback) = callback {
                    let _ = callback.call2(
                        &JsValue::NULL,
                        &JsValue::from_f64(score as f64),
                        &JsValue::from_f64(elapsed_secs as f64),
                    );
                }
            }
            TickOutcome::Inactive => {}
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }
        log::info!("Block Runner ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use block_runner::consts::SIM_DT;
    use block_runner::driver::ResultHistory;
    use block_runner::hud::format_elapsed;
    use block_runner::platform::ManualClock;
    use block_runner::sim::{BlockRecord, autopilot, parse_block_feed, synthetic_feed};
    use block_runner::{Cadence, Driver, Settings, TickOutcome};

    /// Hard stop for runs the autopilot never loses
    const MAX_TICKS: u64 = 60 * 60 * 10;

    /// Headless autopilot run over a block feed.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Block feed JSON (bare array or indexer envelope); synthesized when omitted.
        #[arg(value_name = "FEED")]
        feed: Option<PathBuf>,
        /// Settings JSON file.
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
        /// Seed for the synthetic feed.
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of synthetic blocks.
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=100_000))]
        count: u64,
        /// Override the settings' tick cadence (fixed or frame-locked).
        #[arg(long, value_name = "NAME", value_parser = parse_cadence)]
        cadence: Option<Cadence>,
    }

    fn parse_cadence(name: &str) -> Result<Cadence, String> {
        Cadence::from_str(name).ok_or_else(|| format!("unknown cadence {name:?}"))
    }

    fn load_blocks(args: &Args) -> Result<Vec<BlockRecord>, String> {
        match &args.feed {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
                parse_block_feed(&json).map_err(|e| e.to_string())
            }
            None => {
                log::info!("No feed file; synthesizing {} blocks (seed {})", args.count, args.seed);
                Ok(synthetic_feed(args.seed, args.count as usize))
            }
        }
    }

    pub fn run() -> Result<(), String> {
        let args = Args::parse();
        let mut settings = match &args.settings {
            Some(path) => Settings::load_from(path).map_err(|e| e.to_string())?,
            None => Settings::default(),
        };
        if let Some(cadence) = args.cadence {
            settings.cadence = cadence;
        }
        log::info!("Cadence: {}", settings.cadence.as_str());
        let blocks = load_blocks(&args)?;

        // Simulated clock: one tick is SIM_DT of play time
        let clock = ManualClock::new(0.0);
        let mut driver = Driver::new(settings, clock.clone(), ResultHistory::default());
        driver.start_from_blocks(&blocks).map_err(|e| e.to_string())?;

        let tick_ms = f64::from(SIM_DT) * 1000.0;
        loop {
            let Some(session) = driver.session() else { break };
            if session.time_ticks >= MAX_TICKS {
                log::warn!("Stopping after {} ticks without a fall", MAX_TICKS);
                break;
            }
            let input = autopilot(&session.player, &session.platforms, &driver.settings().tuning);
            clock.advance_ms(tick_ms);
            match driver.tick(&input) {
                TickOutcome::Running => {}
                TickOutcome::Ended(result) => {
                    println!(
                        "score {}  time {}  ({} platforms)",
                        result.score,
                        format_elapsed(result.elapsed_secs),
                        blocks.len()
                    );
                    break;
                }
                TickOutcome::Inactive => break,
            }
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Runner (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
