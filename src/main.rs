//! Cube Rush entry point
//!
//! Handles platform-specific initialization and wires the two periodic
//! drivers (frame loop and countdown interval) to the game session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
        TouchEvent,
    };

    use cube_rush::GameConfig;
    use cube_rush::consts::TIMER_INTERVAL_MS;
    use cube_rush::leaderboard::Leaderboard;
    use cube_rush::persistence::LocalStorageStore;
    use cube_rush::platform::{Interval, now_ms};
    use cube_rush::sim::{
        FrameInput, GameSession, MoveIntent, RenderSnapshot, RoundStatus, frame, timer_tick,
    };

    /// Touch displacement that maps to full movement intent (CSS pixels)
    const TOUCH_MAX_RADIUS_PX: f32 = 60.0;

    /// Held-key state for the keyboard input adapter
    #[derive(Debug, Default)]
    struct HeldKeys {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    }

    impl HeldKeys {
        fn set(&mut self, code: &str, held: bool) {
            match code {
                "KeyW" | "ArrowUp" => self.up = held,
                "KeyS" | "ArrowDown" => self.down = held,
                "KeyA" | "ArrowLeft" => self.left = held,
                "KeyD" | "ArrowRight" => self.right = held,
                _ => {}
            }
        }

        /// Each held direction contributes a unit step; diagonals sum and are
        /// not re-normalized
        fn intent(&self) -> MoveIntent {
            let x = (self.right as i8 - self.left as i8) as f32;
            let z = (self.down as i8 - self.up as i8) as f32;
            MoveIntent::new(x, z)
        }
    }

    /// Game instance holding session, leaderboard, and input adapter state
    struct Game {
        session: GameSession,
        leaderboard: Leaderboard,
        store: LocalStorageStore,
        keys: HeldKeys,
        touch_anchor: Option<(f32, f32)>,
        touch_intent: MoveIntent,
        /// Countdown driver handle; dropped (cleared) once the round ends
        timer: Option<Interval>,
        /// One leaderboard submission per terminal round
        submitted: bool,
        ctx: Option<CanvasRenderingContext2d>,
        canvas_size: (f32, f32),
    }

    impl Game {
        /// Touch overrides keyboard while a finger is down
        fn current_intent(&self) -> MoveIntent {
            if self.touch_anchor.is_some() {
                self.touch_intent
            } else {
                self.keys.intent()
            }
        }

        /// Draw the top-down view of the arena
        fn render(&self, snap: &RenderSnapshot) {
            let Some(ctx) = &self.ctx else { return };
            let (w, h) = self.canvas_size;
            let half = self.session.config.world_half_extent;
            let scale = w.min(h) / (half * 2.0);
            let to_px = |x: f32, z: f32| ((w / 2.0 + x * scale) as f64, (h / 2.0 + z * scale) as f64);

            ctx.set_fill_style_str("#222222");
            ctx.fill_rect(0.0, 0.0, w as f64, h as f64);

            // Arena floor
            let (left, top) = to_px(-half, -half);
            ctx.set_fill_style_str("#444444");
            ctx.fill_rect(left, top, (half * 2.0 * scale) as f64, (half * 2.0 * scale) as f64);

            // Collectibles as spinning squares
            ctx.set_fill_style_str("#ffcc33");
            let side = (0.8 * scale) as f64;
            for c in &snap.collectibles {
                let (px, py) = to_px(c.position.x, c.position.z);
                ctx.save();
                let _ = ctx.translate(px, py);
                let _ = ctx.rotate(c.rotation as f64);
                ctx.fill_rect(-side / 2.0, -side / 2.0, side, side);
                ctx.restore();
            }

            // Player footprint (2.0 x 0.5 world units)
            let (px, py) = to_px(snap.player.x, snap.player.z);
            let pw = (2.0 * scale) as f64;
            let pd = (0.5 * scale) as f64;
            ctx.set_fill_style_str("#00ff00");
            ctx.fill_rect(px - pw / 2.0, py - pd / 2.0, pw, pd);
        }

        /// Update HUD text elements
        fn update_hud(&self, document: &Document, snap: &RenderSnapshot) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&snap.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("items-left") {
                el.set_text_content(Some(&snap.items_left.to_string()));
            }
            if let Some(el) = document.get_element_by_id("time-left") {
                el.set_text_content(Some(&(snap.time_remaining.ceil() as u32).to_string()));
            }
            // Recolor the countdown as it runs out
            if let Some(el) = document.get_element_by_id("timer") {
                let _ = el.set_attribute("class", snap.urgency.css_class());
            }
        }

        /// Show or hide the end-of-round overlay
        fn update_overlay(&self, document: &Document, snap: &RenderSnapshot) {
            if let Some(overlay) = document.get_element_by_id("game-over") {
                let _ = overlay.set_attribute(
                    "class",
                    if snap.status.is_terminal() { "" } else { "hidden" },
                );
            }

            let (title, message) = match snap.status {
                RoundStatus::Playing => return,
                RoundStatus::Won => (
                    "Congratulations!".to_string(),
                    "You collected all items in time!".to_string(),
                ),
                RoundStatus::Lost => (
                    "Time's Up!".to_string(),
                    format!(
                        "You collected {} out of {} items.",
                        snap.score, snap.total_items
                    ),
                ),
            };
            if let Some(el) = document.get_element_by_id("game-over-title") {
                el.set_text_content(Some(&title));
            }
            if let Some(el) = document.get_element_by_id("game-over-message") {
                el.set_text_content(Some(&message));
            }

            // Name entry stays open until a submission is accepted
            if let Some(el) = document.get_element_by_id("name-entry") {
                let _ = el.set_attribute("class", if self.submitted { "hidden" } else { "" });
            }
        }
    }

    /// Rebuild the leaderboard list in the DOM
    fn render_leaderboard(document: &Document, leaderboard: &Leaderboard) {
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_inner_html("");
        for entry in leaderboard.entries() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&format!(
                    "{} - {} ({:.1}s)",
                    entry.name, entry.score, entry.final_time
                )));
                let _ = list.append_child(&item);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cube Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());

        let store = LocalStorageStore;
        let leaderboard = Leaderboard::load(&store);

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(seed, now_ms(), GameConfig::default());
        log::info!("Session initialized with seed {seed}");

        let game = Rc::new(RefCell::new(Game {
            session,
            leaderboard,
            store,
            keys: HeldKeys::default(),
            touch_anchor: None,
            touch_intent: MoveIntent::ZERO,
            timer: None,
            submitted: false,
            ctx,
            canvas_size: (canvas.width() as f32, canvas.height() as f32),
        }));

        render_leaderboard(&document, &game.borrow().leaderboard);
        setup_input_handlers(&canvas, game.clone());
        setup_submit_button(game.clone());
        setup_restart_button(game.clone());
        start_timer(&game);
        request_animation_frame_loop(game);

        log::info!("Cube Rush running!");
    }

    /// Arm the independent countdown driver (~10 Hz)
    fn start_timer(game: &Rc<RefCell<Game>>) {
        let driver = game.clone();
        let interval = Interval::new(TIMER_INTERVAL_MS, move || {
            let mut g = driver.borrow_mut();
            timer_tick(&mut g.session, now_ms());
        });
        game.borrow_mut().timer = interval;
    }

    fn request_animation_frame_loop(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let input = FrameInput {
                intent: g.current_intent(),
            };
            frame(&mut g.session, &input, now_ms());

            // Dispose the countdown driver on terminal state
            if g.session.is_over() && g.timer.is_some() {
                g.timer = None;
            }

            let snap = g.session.snapshot();
            g.render(&snap);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document, &snap);
                g.update_overlay(&document, &snap);
            }
        }

        request_animation_frame_loop(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard held-key tracking
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.set(&event.code(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.set(&event.code(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start anchors the analog stick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.touch_anchor = Some((touch.client_x() as f32, touch.client_y() as f32));
                    g.touch_intent = MoveIntent::ZERO;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move: displacement from the anchor, normalized by a fixed
        // radius, gives a continuous fractional intent
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if let Some((ax, ay)) = g.touch_anchor {
                        let dx = (touch.client_x() as f32 - ax) / TOUCH_MAX_RADIUS_PX;
                        let dy = (touch.client_y() as f32 - ay) / TOUCH_MAX_RADIUS_PX;
                        g.touch_intent = MoveIntent::new(dx, dy);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end releases the stick
        for event_name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.touch_anchor = None;
                g.touch_intent = MoveIntent::ZERO;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_submit_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("submit-score") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let g = &mut *game.borrow_mut();
                // Submission is only accepted once a terminal state is reached
                if !g.session.is_over() || g.submitted {
                    return;
                }
                let Some(final_time) = g.session.final_elapsed() else {
                    return;
                };

                let document = web_sys::window().unwrap().document().unwrap();
                let name = document
                    .get_element_by_id("player-name")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();

                match g.leaderboard.submit_and_persist(
                    &g.store,
                    &name,
                    g.session.round.score,
                    final_time,
                    now_ms() as i64,
                ) {
                    Ok(rank) => {
                        g.submitted = true;
                        match rank {
                            Some(r) => log::info!("Score submitted at rank {r}"),
                            None => log::info!("Score submitted, below the top 10"),
                        }
                        render_leaderboard(&document, &g.leaderboard);
                    }
                    Err(err) => {
                        // Leave the name entry open; nothing advances
                        log::debug!("Submission rejected: {err}");
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().session.restart(seed, now_ms());
                game.borrow_mut().submitted = false;
                // Re-arm the countdown driver for the new round
                start_timer(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cube_rush::GameConfig;
    use cube_rush::leaderboard::Leaderboard;
    use cube_rush::persistence::FileStore;
    use cube_rush::platform::now_ms;
    use cube_rush::sim::{FrameInput, GameSession, RoundStatus, frame, timer_tick};

    env_logger::init();
    log::info!("Cube Rush (native) starting...");

    // Headless smoke round on a synthetic timeline: chase the nearest
    // collectible at full intent, frames at ~60 Hz, countdown at 10 Hz.
    let mut session = GameSession::new(now_ms() as u64, 0.0, GameConfig::default());

    let mut now = 0.0f64;
    let mut next_timer = 0.0f64;
    while !session.is_over() {
        if now >= next_timer {
            timer_tick(&mut session, now);
            next_timer += f64::from(cube_rush::consts::TIMER_INTERVAL_MS);
        }
        let input = FrameInput {
            intent: chase_intent(&session),
        };
        frame(&mut session, &input, now);
        now += 1000.0 / 60.0;
    }

    let snap = session.snapshot();
    match snap.status {
        RoundStatus::Won => println!(
            "Won: collected all {} items with {:.1}s to spare",
            snap.total_items, snap.time_remaining
        ),
        _ => println!(
            "Lost: collected {} out of {} items",
            snap.score, snap.total_items
        ),
    }

    // Exercise the persisted leaderboard end to end
    let store = FileStore::new();
    let mut board = Leaderboard::load(&store);
    if let Some(final_time) = session.final_elapsed() {
        match board.submit_and_persist(&store, "cpu", snap.score, final_time, now_ms() as i64) {
            Ok(Some(rank)) => println!("Leaderboard rank: {rank}"),
            Ok(None) => println!("Score did not reach the top 10"),
            Err(err) => println!("Submission rejected: {err}"),
        }
    }
    for (i, entry) in board.entries().iter().enumerate() {
        println!(
            "{:>2}. {} - {} ({:.1}s)",
            i + 1,
            entry.name,
            entry.score,
            entry.final_time
        );
    }
}

/// Steer toward the nearest remaining collectible
#[cfg(not(target_arch = "wasm32"))]
fn chase_intent(session: &cube_rush::sim::GameSession) -> cube_rush::sim::MoveIntent {
    use cube_rush::sim::MoveIntent;

    let player = session.round.player;
    session
        .round
        .collectibles
        .iter()
        .min_by(|a, b| {
            player
                .distance(a.position)
                .total_cmp(&player.distance(b.position))
        })
        .map(|c| MoveIntent::new(c.position.x - player.x, c.position.z - player.z))
        .unwrap_or_default()
}
