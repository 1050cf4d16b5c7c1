//! Gorilla Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use gorilla_dash::consts::*;
    use gorilla_dash::sim::{BurstKind, GameEvent, GamePhase, GameState, Snapshot, frame};
    use gorilla_dash::{HighScores, Settings};

    thread_local! {
        /// Handle for the exported command functions
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        highscores: HighScores,
    }

    impl Game {
        /// Push drained simulation events into the DOM
        fn update_hud(&mut self) {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };

            for event in self.state.drain_events() {
                match event {
                    GameEvent::RunStarted => {
                        set_text("score", "0");
                        set_text("lives", &self.state.lives().to_string());
                    }
                    GameEvent::ObstaclePassed { score } | GameEvent::CoinCollected { score } => {
                        set_text("score", &score.to_string());
                    }
                    GameEvent::LifeLost { lives_left, .. } => {
                        set_text("lives", &lives_left.to_string());
                    }
                    GameEvent::GameOver { final_score } => {
                        set_text("finalScore", &final_score.to_string());
                        set_hidden("gameOverScreen", false);
                        let speed = self.state.ramp.current();
                        if let Some(rank) =
                            self.highscores.add_score(final_score, speed, js_sys::Date::now())
                        {
                            log::info!("New high score #{}: {}", rank, final_score);
                            self.highscores.save();
                        }
                        if let Some(best) = self.highscores.top_score() {
                            set_text("bestScore", &best.to_string());
                        }
                    }
                }
            }
        }

        fn render(&self) {
            draw(&self.ctx, &self.state.snapshot());
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn with_game(f: impl FnOnce(&mut Game)) {
        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                f(&mut game.borrow_mut());
            }
        });
    }

    /// Lane left (exported for gesture controls)
    #[wasm_bindgen]
    pub fn move_left() {
        with_game(|g| {
            g.state.move_left();
        });
    }

    /// Lane right (exported for gesture controls)
    #[wasm_bindgen]
    pub fn move_right() {
        with_game(|g| {
            g.state.move_right();
        });
    }

    /// Jump (exported for gesture controls)
    #[wasm_bindgen]
    pub fn move_forward() {
        with_game(|g| {
            g.state.move_forward();
        });
    }

    fn start_run(game: &Rc<RefCell<Game>>) {
        let needs_loop = {
            let mut g = game.borrow_mut();
            let needs_loop = g.state.start(now_ms());
            g.update_hud();
            needs_loop
        };
        set_hidden("startScreen", true);
        set_hidden("gameOverScreen", true);
        if needs_loop {
            request_animation_frame(game.clone());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Gorilla Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::load();
        // Write back so the stored copy lists every field, ready for editing
        settings.save();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(settings.width as u32);
        canvas.set_height(settings.height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_settings(settings, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game {
            state,
            ctx,
            highscores: HighScores::load(),
        }));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));
        log::info!("Game initialized with seed: {}", seed);

        setup_buttons(&game);
        setup_keyboard(&game);

        // Idle frame behind the start screen
        game.borrow().render();
        Ok(())
    }

    fn setup_buttons(game: &Rc<RefCell<Game>>) {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        for id in ["startBtn", "restartBtn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    start_run(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_keyboard(game: &Rc<RefCell<Game>>) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let phase = game.borrow().state.phase;
            match (event.key().as_str(), phase) {
                ("Enter", GamePhase::Idle | GamePhase::GameOver) => start_run(&game),
                ("ArrowLeft" | "a", _) => {
                    game.borrow_mut().state.move_left();
                }
                ("ArrowRight" | "d", _) => {
                    game.borrow_mut().state.move_right();
                }
                ("ArrowUp" | " " | "w", _) => {
                    game.borrow_mut().state.move_forward();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = frame(&mut g.state, time);
            g.update_hud();
            g.render();
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    fn draw(ctx: &CanvasRenderingContext2d, snap: &Snapshot<'_>) {
        let (w, h) = (snap.width as f64, snap.height as f64);

        ctx.set_fill_style_str("#87CEEB");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#555");
        ctx.fill_rect(0.0, h * 0.6, w, h * 0.4);
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
        for x in LANE_XS {
            ctx.fill_rect(x as f64 - 2.0, 0.0, 4.0, h);
        }

        ctx.set_fill_style_str("#FFD700");
        for coin in snap.coins {
            circle(ctx, coin.pos.x as f64, coin.pos.y as f64, COIN_RADIUS as f64);
        }

        ctx.set_fill_style_str("#A0522D");
        for obstacle in snap.obstacles {
            ctx.fill_rect(
                (obstacle.pos.x - OBSTACLE_WIDTH / 2.0) as f64,
                (obstacle.pos.y - OBSTACLE_HEIGHT) as f64,
                OBSTACLE_WIDTH as f64,
                OBSTACLE_HEIGHT as f64,
            );
        }

        let pursuer = snap.pursuer;
        if pursuer.pos.y > -PURSUER_HEIGHT {
            ctx.set_fill_style_str("#8B4513");
            ctx.fill_rect(
                (pursuer.pos.x - PURSUER_WIDTH / 2.0) as f64,
                (pursuer.pos.y - PURSUER_HEIGHT) as f64,
                PURSUER_WIDTH as f64,
                PURSUER_HEIGHT as f64,
            );
        }

        let player = snap.player;
        let feet = (player.pos.y - player.jump_height) as f64;
        ctx.set_global_alpha(if player.is_invincible() { 0.6 } else { 1.0 });
        ctx.set_fill_style_str("#FF6B6B");
        ctx.fill_rect(
            (player.pos.x - PLAYER_WIDTH / 2.0) as f64,
            feet - PLAYER_HEIGHT as f64,
            PLAYER_WIDTH as f64,
            PLAYER_HEIGHT as f64,
        );

        for particle in snap.particles {
            ctx.set_global_alpha(particle.alpha() as f64);
            let lightness = match particle.kind {
                BurstKind::Explosion => 50,
                BurstKind::Sparkle => 55,
            };
            ctx.set_fill_style_str(&format!("hsl({:.0}, 100%, {}%)", particle.hue, lightness));
            circle(ctx, particle.pos.x as f64, particle.pos.y as f64, particle.size as f64);
        }
        ctx.set_global_alpha(1.0);

        if pursuer.threat > 0.0 {
            ctx.set_stroke_style_str(&format!("rgba(255, 0, 0, {:.2})", pursuer.threat * 0.8));
            ctx.set_line_width(8.0);
            ctx.stroke_rect(0.0, 0.0, w, h);
        }

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.set_font("20px Arial");
        let _ = ctx.fill_text(
            &format!("Speed: {:.0}", snap.current_speed * 10.0),
            10.0,
            30.0,
        );
    }

    fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
        ctx.fill();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gorilla_dash::{HighScores, Settings, SpeedRampMode};

    /// Runs per demo session
    const DEMO_RUNS: u64 = 5;

    env_logger::init();
    log::info!("Gorilla Dash (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");
    log::info!("Usage: gorilla-dash [seed] [per-tick|frame-scaled]");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let mut settings = Settings::load();
    if let Some(arg) = args.next() {
        match SpeedRampMode::from_str(&arg) {
            Some(mode) => settings.speed_ramp = mode,
            None => log::warn!("Unknown speed ramp '{}', keeping {}", arg, settings.speed_ramp.as_str()),
        }
    }
    if let Err(e) = settings.validate() {
        log::error!("Invalid settings: {}", e);
        std::process::exit(1);
    }
    log::info!("Speed ramp: {}", settings.speed_ramp.as_str());

    // Session-local board; only the web build persists scores
    let mut highscores = HighScores::new();
    for run_seed in seed..seed.saturating_add(DEMO_RUNS) {
        let Some(state) = play_demo_run(&settings, run_seed) else {
            continue;
        };
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        let rank = highscores.add_score(state.score(), state.ramp.current(), timestamp);
        println!(
            "seed {}: score {}, {} lives left, speed {:.2}, session rank {:?}",
            run_seed,
            state.score(),
            state.lives(),
            state.ramp.current(),
            rank
        );
    }

    if highscores.is_empty() {
        println!("No run scored any points");
        return;
    }
    println!("Session leaderboard:");
    for (i, entry) in highscores.entries.iter().enumerate() {
        println!("{:>2}. {:>6}  (speed {:.2})", i + 1, entry.score, entry.top_speed);
    }
}

/// Play one autopiloted run, at most five minutes at 60 fps
#[cfg(not(target_arch = "wasm32"))]
fn play_demo_run(
    settings: &gorilla_dash::Settings,
    seed: u64,
) -> Option<gorilla_dash::sim::GameState> {
    use gorilla_dash::consts::FRAME_MS;
    use gorilla_dash::sim::{GameEvent, GameState, frame};

    const DEMO_FRAMES: u32 = 5 * 60 * 60;

    let mut state = match GameState::with_settings(settings.clone(), seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return None;
        }
    };

    state.start(0.0);
    let mut now = 0.0;
    let mut coins = 0u32;
    let mut frames = 0u32;
    while frames < DEMO_FRAMES {
        autopilot(&mut state);
        now += FRAME_MS;
        let keep_going = frame(&mut state, now);
        frames += 1;
        for event in state.drain_events() {
            match event {
                GameEvent::CoinCollected { .. } => coins += 1,
                GameEvent::LifeLost { cause, lives_left } => {
                    log::debug!("Frame {}: life lost ({:?}), {} left", frames, cause, lives_left)
                }
                _ => {}
            }
        }
        if !keep_going {
            break;
        }
    }
    log::info!("Seed {} finished after {} frames with {} coins", seed, frames, coins);
    Some(state)
}

/// Simple demo bot: leave lanes with an obstacle closing in, hop when the
/// gorilla gets near.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &mut gorilla_dash::sim::GameState) {
    use gorilla_dash::consts::PLAYER_Y;
    use gorilla_dash::sim::Lane;

    let danger = |lane: Lane| {
        state
            .pools
            .obstacles
            .iter()
            .any(|o| o.lane == lane && o.pos.y > PLAYER_Y - 220.0 && o.pos.y < PLAYER_Y + 60.0)
    };

    let lane = state.player.lane;
    if danger(lane) {
        let escape = [lane.left(), lane.right()]
            .into_iter()
            .flatten()
            .find(|&l| !danger(l));
        match escape {
            Some(l) if l.index() < lane.index() => {
                state.move_left();
            }
            Some(_) => {
                state.move_right();
            }
            None => {
                state.move_forward();
            }
        }
    }

    if state.pursuer.threat > 0.6 {
        state.move_forward();
    }
}
