//! Gap Glider entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gap_glider::BestScore;
    use gap_glider::consts::*;
    use gap_glider::renderer::Renderer;
    use gap_glider::sim::{GameState, Phase, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        input: TickInput,
        last_time: f64,
        best: BestScore,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                renderer: None,
                input: TickInput::default(),
                last_time: 0.0,
                best: BestScore::load(),
            }
        }

        /// Run one simulation frame from a rAF timestamp
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input;
            let report = tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.pause = false;

            if let Some(report) = report {
                if self.best.record(report.score) {
                    log::info!("New best score: {}", report.score);
                    self.best.save();
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-distance") {
                el.set_text_content(Some(&format!("{} m", self.state.distance.round() as u32)));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&self.best.score.to_string()));
            }

            // Countdown overlay
            if let Some(el) = document.get_element_by_id("countdown") {
                match self.state.phase.countdown_label() {
                    Some(label) => {
                        let _ = el.set_attribute("class", "");
                        el.set_text_content(Some(label));
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            // Start hint (idle only)
            if let Some(el) = document.get_element_by_id("start-hint") {
                let class = if self.state.phase == Phase::Idle { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Pause overlay
            if let Some(el) = document.get_element_by_id("pause-overlay") {
                let class = if matches!(self.state.phase, Phase::Paused(_)) {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // Game over panel
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == Phase::Over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(dist_el) = document.get_element_by_id("final-distance") {
                        dist_el.set_text_content(Some(&format!(
                            "{} m",
                            self.state.distance.round() as u32
                        )));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// A press anywhere is thrust, and doubles as start when no run
        /// is in progress.
        fn press(&mut self) {
            self.input.thrust = true;
            if matches!(self.state.phase, Phase::Idle | Phase::Over) {
                self.input.start = true;
            }
        }

        fn release(&mut self) {
            self.input.thrust = false;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Glider starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Match the backing store to CSS size and device pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match Renderer::new(canvas.clone()) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Renderer init failed: {:?}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Gap Glider running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press/release = thrust held
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().release();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().release();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Space/ArrowUp thrust, Enter start, Escape pause
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => g.press(),
                    "Enter" => g.input.start = true,
                    "Escape" | "p" | "P" => g.input.pause = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "ArrowUp") {
                    game.borrow_mut().release();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if matches!(g.state.phase, Phase::Running(_)) {
                        g.input.pause = true;
                        g.input.thrust = false;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if matches!(g.state.phase, Phase::Running(_)) {
                    g.input.pause = true;
                    g.input.thrust = false;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
    use gap_glider::consts::*;
    use gap_glider::sim::{GameState, Phase, TickInput, tick};

    env_logger::init();
    log::info!("Gap Glider (native) starting...");

    // Headless autopilot run of the pure sim: thrust whenever the craft
    // sits below the next gap's center. Shows the core running without a
    // browser; the playable build is the wasm target.
    const DT: f32 = 1.0 / 60.0;

    let seed = 0xC0FFEE;
    let mut state = GameState::new(seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        DT,
    );

    let mut report = None;
    for _ in 0..(120.0 / DT) as u32 {
        let target = state
            .pylons
            .iter()
            .find(|p| p.trailing_edge() > CRAFT_X)
            .map(|p| p.gap_center)
            .unwrap_or(FIELD_HEIGHT / 2.0);
        let input = TickInput {
            thrust: state.craft.y > target,
            ..Default::default()
        };
        if let Some(r) = tick(&mut state, &input, DT) {
            report = Some(r);
            break;
        }
    }

    match report {
        Some(r) => println!(
            "Autopilot run over: {} gaps cleared, {} m traveled",
            r.score,
            r.distance.round() as u32
        ),
        None => {
            debug_assert!(matches!(state.phase, Phase::Running(_)));
            println!(
                "Autopilot survived the full demo: {} gaps cleared, {} m traveled",
                state.score,
                state.distance.round() as u32
            );
        }
    }
}
