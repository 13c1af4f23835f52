//! Drop Dodge entry point
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

    use drop_dodge::audio::{AudioManager, SoundEffect};
    use drop_dodge::consts::*;
    use drop_dodge::persistence::LocalStore;
    use drop_dodge::platform::{FixedStep, InputState};
    use drop_dodge::renderer::{RenderState, build_scene};
    use drop_dodge::sim::{GameEvent, GameState, tick};
    use drop_dodge::ui::{self, HudText, RESTART_BUTTON};
    use drop_dodge::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: InputState,
        settings: Settings,
        store: LocalStore,
        high_score: HighScore,
        audio: AudioManager,
        clock: FixedStep,
        last_time: f64,
        /// CSS to physical pixel ratio, for pointer mapping
        dpr: f32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Last HUD strings written, to skip redundant DOM writes
        last_hud: Option<HudText>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = LocalStore::new();
            let settings = Settings::load(&store);
            let high_score = HighScore::load(&store);
            let audio = AudioManager::new(&settings);
            Self {
                state: GameState::new(seed, high_score.value),
                render_state: None,
                input: InputState::default(),
                settings,
                store,
                high_score,
                audio,
                clock: FixedStep::new(),
                last_time: 0.0,
                dpr: 1.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_hud: None,
            }
        }

        /// Map a CSS-pixel position on the canvas into field coordinates
        fn to_field(&self, css_x: f32, css_y: f32) -> Option<glam::Vec2> {
            let viewport = self.render_state.as_ref()?.viewport;
            Some(viewport.to_field(css_x * self.dpr, css_y * self.dpr))
        }

        fn pointer_moved(&mut self, css_x: f32, css_y: f32) {
            if let Some(p) = self.to_field(css_x, css_y) {
                self.input.follow(p.x);
            }
        }

        fn pointer_pressed(&mut self, css_x: f32, css_y: f32) {
            self.audio.resume();
            if let Some(p) = self.to_field(css_x, css_y)
                && !self.restart_at(p)
            {
                self.input.follow(p.x);
            }
        }

        /// Press at a field point; restarts if it hits the restart button
        fn restart_at(&mut self, point: glam::Vec2) -> bool {
            if !ui::try_restart(&mut self.state, point) {
                return false;
            }
            self.clock.reset();
            self.last_hud = None;
            true
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            for _ in 0..self.clock.ticks_for(dt) {
                let input = self.input.resolve(&self.state.player);
                tick(&mut self.state, &input, SIM_DT);
                self.handle_events();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// React to what the last tick did
        fn handle_events(&mut self) {
            for event in std::mem::take(&mut self.state.events) {
                if let GameEvent::NewHighScore { score } = event {
                    self.high_score.record(&mut self.store, score);
                }
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring");
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.settings.show_fps
                && let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten()
            {
                el.set_text_content(Some(&self.fps.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps {
                    "hud-item"
                } else {
                    "hud-item hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("hud-score") {
                let flashing = ui::score_flash_level(&self.state, self.settings.reduced_motion) > 0.0;
                let class = if flashing { "hud-item flash" } else { "hud-item" };
                let _ = el.set_attribute("class", class);
            }

            let hud = HudText::from_state(&self.state);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = document.query_selector("#hud-high .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.high_score));
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(hud.game_over.as_deref());
            }

            self.last_hud = Some(hud);
        }

        /// Apply a preference hotkey and persist the result
        fn apply_setting_key(&mut self, key: &str) {
            if !self.settings.apply_key(key) {
                return;
            }
            self.audio.apply_settings(&self.settings);
            if let Err(e) = self.settings.save(&mut self.store) {
                log::warn!("Could not save settings: {}", e);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drop Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = fit_canvas(&window, &canvas);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().dpr = window.device_pixel_ratio() as f32;

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(canvas.clone(), game.clone());
        setup_visibility(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Drop Dodge running!");
    }

    /// Size the canvas backing store to its CSS box in physical pixels
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    /// Touch position relative to the canvas, in CSS pixels
    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Mouse move - follow the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_moved(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse leave - stop following
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.release_pointer();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - restart button
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_pressed(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - restart button or follow
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().pointer_pressed(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().pointer_moved(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.release_pointer();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.input.key(&key, true) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    " " | "Enter" => {
                        // Keyboard stand-in for the restart button
                        g.restart_at(RESTART_BUTTON.center());
                    }
                    _ => g.apply_setting_key(&key),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key(&event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = fit_canvas(&window, &canvas);
            let mut g = game.borrow_mut();
            g.dpr = window.device_pixel_ratio() as f32;
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                // Key-ups are lost while hidden; don't resume walking
                g.input = InputState {
                    autopilot: g.input.autopilot,
                    ..InputState::default()
                };
                // Don't replay the hidden interval on return
                g.last_time = 0.0;
                g.clock.reset();
                log::info!("Tab hidden, input cleared");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless autopilot run: `drop-dodge [seed] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drop_dodge::HighScore;
    use drop_dodge::consts::SIM_DT;
    use drop_dodge::persistence::MemoryStore;
    use drop_dodge::sim::{GameEvent, GameState, RunPhase, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    log::info!("Drop Dodge (native, headless) seed={} ticks={}", seed, ticks);

    let mut store = MemoryStore::new();
    let mut high_score = HighScore::load(&store);
    let mut state = GameState::new(seed, high_score.value);
    let input = TickInput {
        axis: 0.0,
        autopilot: true,
    };

    let mut runs = 1;
    let mut bonuses = 0;
    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT);
        for event in std::mem::take(&mut state.events) {
            match event {
                GameEvent::BonusCollected { .. } => bonuses += 1,
                GameEvent::NewHighScore { score } => {
                    high_score.record(&mut store, score);
                }
                _ => {}
            }
        }
        if state.run.phase == RunPhase::GameOverDisplayed && state.reset() {
            runs += 1;
        }
    }

    log::info!(
        "Finished: {} runs, {} bonuses, current score {}, best {}",
        runs,
        bonuses,
        state.run.score,
        high_score.value
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
