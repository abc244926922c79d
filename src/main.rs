//! Meteor Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use meteor_dodge::audio::{AudioManager, SoundEffect};
    use meteor_dodge::consts::SIM_DT;
    use meteor_dodge::platform::{Key, Session};
    use meteor_dodge::renderer::{RenderState, build_vertices};
    use meteor_dodge::sim::{Arena, GameEvent, GamePhase};
    use meteor_dodge::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let session = Session::new(seed, &settings, HighScores::load());
            let audio = AudioManager::new(settings.effective_volume());
            Self {
                session,
                settings,
                render_state: None,
                audio,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks and react to what happened
        fn update(&mut self, dt: f32, time: f64) {
            let events = self.session.frame(dt, time);
            let mut high_score = false;

            for event in &events {
                if let GameEvent::ShipDestroyed { score } = *event {
                    if let Some(rank) = self.session.record_run(score, js_sys::Date::now()) {
                        self.session.high_scores.save();
                        high_score = rank == 1;
                    }
                }
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }

            if high_score {
                self.audio.play(SoundEffect::HighScore);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_vertices(&self.session.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
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
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.session.state;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.best_score().to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.session.fps().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("hud-shield") {
                let class = if state.shield.active { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Meteor Dodge starting...");

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

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let settings = Settings::load();
        let (arena_w, arena_h) = settings.window_size();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, Arena::new(arena_w, arena_h)).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        }

        setup_input_handlers(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Meteor Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_web_key(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    if key == Key::Restart && event.repeat() {
                        return;
                    }
                    game.borrow_mut().session.input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_web_key(&event.key()) {
                    game.borrow_mut().session.input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: drop held keys so the ship doesn't drift
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mute while the tab is hidden
        let Some(document) = window.document() else {
            return;
        };
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    g.session.input.release_all();
                    if g.settings.mute_on_blur {
                        g.audio.set_muted(true);
                    }
                } else {
                    g.audio.set_muted(false);
                }
            });
            let _ = document
                .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            // Update, then draw
            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::sync::Arc;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use winit::application::ApplicationHandler;
    use winit::dpi::LogicalSize;
    use winit::event::{ElementState, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Window, WindowId};

    use meteor_dodge::platform::{Key, Session};
    use meteor_dodge::renderer::{RenderState, build_vertices};
    use meteor_dodge::sim::{Arena, GameEvent};
    use meteor_dodge::{GameError, HighScores, Settings};

    fn map_key(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
            KeyCode::KeyR | KeyCode::Space | KeyCode::Enter => Some(Key::Restart),
            KeyCode::Escape => Some(Key::Quit),
            _ => None,
        }
    }

    fn unix_millis() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    /// Everything that exists once the window is up
    struct Game {
        window: Arc<Window>,
        render_state: RenderState,
        session: Session,
        started: Instant,
        last_frame: Instant,
        title: String,
    }

    impl Game {
        fn new(event_loop: &ActiveEventLoop, settings: &Settings) -> Result<Self, GameError> {
            let (width, height) = settings.window_size();
            let attributes = Window::default_attributes()
                .with_title("Meteor Dodge")
                .with_inner_size(LogicalSize::new(width, height))
                .with_resizable(false);
            let window = Arc::new(
                event_loop
                    .create_window(attributes)
                    .map_err(|e| GameError::Window(e.to_string()))?,
            );
            log::info!("Window created: {}x{}", width, height);

            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
            let surface = instance.create_surface(window.clone())?;
            let adapter = pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                },
            ))?;
            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let size = window.inner_size();
            let render_state = pollster::block_on(RenderState::new(
                surface,
                &adapter,
                size.width,
                size.height,
                Arena::new(width, height),
            ))?;

            let seed = unix_millis() as u64;
            let session = Session::new(seed, settings, HighScores::load());
            let now = Instant::now();

            Ok(Self {
                window,
                render_state,
                session,
                started: now,
                last_frame: now,
                title: String::new(),
            })
        }

        /// Update, then draw
        fn frame(&mut self, show_fps: bool) {
            let now = Instant::now();
            let dt = now.duration_since(self.last_frame).as_secs_f32();
            self.last_frame = now;
            let time_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;

            for event in self.session.frame(dt, time_ms) {
                if let GameEvent::ShipDestroyed { score } = event {
                    if self.session.record_run(score, unix_millis()).is_some() {
                        self.session.high_scores.save();
                    }
                }
            }

            let vertices = build_vertices(&self.session.state);
            match self.render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            let title = self.session.status_line(show_fps);
            if title != self.title {
                self.window.set_title(&title);
                self.title = title;
            }
        }
    }

    struct App {
        settings: Settings,
        game: Option<Game>,
        error: Option<GameError>,
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.game.is_some() {
                return;
            }
            match Game::new(event_loop, &self.settings) {
                Ok(game) => self.game = Some(game),
                Err(e) => {
                    log::error!("Startup failed: {}", e);
                    self.error = Some(e);
                    event_loop.exit();
                }
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(game) = &self.game {
                game.window.request_redraw();
            }
        }

        fn window_event(
            &mut self,
            event_loop: &ActiveEventLoop,
            _window_id: WindowId,
            event: WindowEvent,
        ) {
            let Some(game) = self.game.as_mut() else {
                return;
            };

            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Close requested, exiting.");
                    event_loop.exit();
                }

                WindowEvent::Resized(physical_size) => {
                    game.render_state
                        .resize(physical_size.width, physical_size.height);
                }

                WindowEvent::Focused(false) => {
                    game.session.input.release_all();
                }

                WindowEvent::KeyboardInput { event, .. } => {
                    let PhysicalKey::Code(code) = event.physical_key else {
                        return;
                    };
                    let Some(key) = map_key(code) else {
                        return;
                    };
                    match event.state {
                        ElementState::Pressed if event.repeat && key == Key::Restart => {}
                        ElementState::Pressed => game.session.input.key_down(key),
                        ElementState::Released => game.session.input.key_up(key),
                    }
                    if game.session.input.quit_requested() {
                        log::info!("Escape pressed, exiting.");
                        event_loop.exit();
                    }
                }

                WindowEvent::RedrawRequested => {
                    game.frame(self.settings.show_fps);
                }

                _ => {}
            }
        }
    }

    pub fn run() -> Result<(), GameError> {
        let event_loop = EventLoop::new().map_err(|e| GameError::Window(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            settings: Settings::load(),
            game: None,
            error: None,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| GameError::Window(e.to_string()))?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Meteor Dodge (native) starting...");

    if let Err(e) = native_game::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
