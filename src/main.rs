//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window};

    use brick_breaker::renderer::{CanvasSurface, Viewport};
    use brick_breaker::{
        Driver, Engine, FrameHandle, FrameScheduler, HudObserver, HudSnapshot, InputState,
        KeyAction, Settings, Tuning,
    };

    const CANVAS_ID: &str = "breakoutCanvas";
    const GAME_AREA_ID: &str = "breakoutGameArea";
    const REVEAL_BTN_ID: &str = "revealGameBtn";
    const START_BTN_ID: &str = "startGameBtn";
    const PAUSE_BTN_ID: &str = "pauseGameBtn";

    /// requestAnimationFrame behind the driver's scheduler trait
    struct RafScheduler {
        window: Window,
        game: Weak<RefCell<Game>>,
        next_id: u64,
        /// Our handle and the browser's request id
        pending: Option<(FrameHandle, i32)>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            let handle = FrameHandle(self.next_id);
            let game = self.game.clone();
            let callback = Closure::once_into_js(move |time: f64| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().frame(handle, time);
                }
            });
            match self
                .window
                .request_animation_frame(callback.unchecked_ref())
            {
                Ok(id) => self.pending = Some((handle, id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some((pending, id)) = self.pending {
                if pending == handle {
                    let _ = self.window.cancel_animation_frame(id);
                    self.pending = None;
                }
            }
        }
    }

    /// Mirrors the HUD into DOM text and handles game over chrome
    struct DomHud {
        score: HtmlElement,
        lives: HtmlElement,
        level: HtmlElement,
        game_area: HtmlElement,
        reveal_btn: HtmlElement,
    }

    impl HudObserver for DomHud {
        fn on_hud(&mut self, hud: &HudSnapshot) {
            self.score.set_text_content(Some(&hud.score_label()));
            self.lives.set_text_content(Some(&hud.lives_label()));
            self.level.set_text_content(Some(&hud.level_label()));
        }

        fn on_game_over(&mut self, final_hud: &HudSnapshot) {
            log::info!("Game over ({})", final_hud);
            set_display(&self.game_area, "none");
            set_display(&self.reveal_btn, "inline-block");
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: Driver<RafScheduler>,
        surface: CanvasSurface,
        viewport: Viewport,
        settings: Settings,
        window: Window,
        pause_btn: HtmlElement,
    }

    impl Game {
        fn frame(&mut self, handle: FrameHandle, time: f64) {
            let Game {
                driver, surface, ..
            } = self;
            driver.on_frame(handle, time, surface);
        }

        /// Recompute the virtual -> physical mapping from the element size
        fn resize(&mut self) {
            let rect = self.surface.canvas().get_bounding_client_rect();
            let dpr = self.window.device_pixel_ratio() as f32;
            self.viewport
                .resize(rect.width() as f32, rect.height() as f32, dpr);
            self.surface.apply_viewport(&self.viewport);
            self.render();
        }

        fn render(&mut self) {
            self.driver.engine().render(&mut self.surface);
        }

        fn toggle_pause(&mut self) {
            let paused = self.driver.toggle_pause();
            self.pause_btn
                .set_text_content(Some(if paused { "Resume" } else { "Pause" }));
        }

        /// Fresh game, running; the pause button goes back to its idle label
        fn restart(&mut self) {
            self.driver.reset();
            self.pause_btn.set_text_content(Some("Pause"));
            self.resize();
            self.driver.start();
        }

        fn toggle_contrast(&mut self) {
            let palette = self.settings.toggle_high_contrast();
            self.driver.engine_mut().set_palette(palette);
            self.render();
        }
    }

    fn element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
    }

    fn set_display(el: &HtmlElement, value: &str) {
        if let Err(e) = el.style().set_property("display", value) {
            log::warn!("Failed to set display: {:?}", e);
        }
    }

    /// Tuning from the canvas `data-tuning` attribute, defaults otherwise
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::error!("{}; using default tuning", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("not a canvas"))?;

        let settings = Settings::load();
        let tuning = load_tuning(&canvas);
        let viewport = Viewport::new(tuning.field());

        let mut engine = Engine::new(tuning, InputState::new());
        engine.set_palette(settings.palette());
        engine.add_observer(Box::new(DomHud {
            score: element(&document, "breakoutScore")?,
            lives: element(&document, "breakoutLives")?,
            level: element(&document, "breakoutLevel")?,
            game_area: element(&document, GAME_AREA_ID)?,
            reveal_btn: element(&document, REVEAL_BTN_ID)?,
        }));

        let surface = CanvasSurface::new(canvas.clone())?;
        let pause_btn = element(&document, PAUSE_BTN_ID)?;

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let scheduler = RafScheduler {
                window: window.clone(),
                game: weak.clone(),
                next_id: 0,
                pending: None,
            };
            RefCell::new(Game {
                driver: Driver::new(engine, scheduler),
                surface,
                viewport,
                settings,
                window: window.clone(),
                pause_btn,
            })
        });

        setup_buttons(&document, game.clone())?;
        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_window_handlers(&window, game.clone())?;

        {
            let mut g = game.borrow_mut();
            g.driver.reset();
            g.render();
        }

        log::info!("Brick Breaker ready");
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let reveal_btn = element(document, REVEAL_BTN_ID)?;
        let game_area = element(document, GAME_AREA_ID)?;

        // Reveal: swap the button for the game area
        {
            let game = game.clone();
            let reveal = reveal_btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_display(&reveal, "none");
                set_display(&game_area, "block");
                game.borrow_mut().resize();
            });
            reveal_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Start: fresh game, then run
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            element(document, START_BTN_ID)?
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pause / resume
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().toggle_pause();
            });
            element(document, PAUSE_BTN_ID)?
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_input_handlers(
        window: &Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down: held directions, one-shot commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Some(action) = g.settings.bindings.action_for(&event.key()) else {
                    return;
                };
                event.prevent_default();
                if !g.driver.engine_mut().input_mut().key_down(action) || event.repeat() {
                    return;
                }
                match action {
                    KeyAction::TogglePause => g.toggle_pause(),
                    KeyAction::ToggleContrast => g.toggle_contrast(),
                    KeyAction::MoveLeft | KeyAction::MoveRight => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(action) = g.settings.bindings.action_for(&event.key()) {
                    g.driver.engine_mut().input_mut().key_up(action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move: absolute paddle position
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.settings.pointer_control {
                    return;
                }
                let rect = canvas_clone.get_bounding_client_rect();
                let x = g
                    .viewport
                    .pointer_x(event.client_x() as f32, rect.left() as f32);
                g.driver.engine_mut().input_mut().pointer_moved(x);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_window_handlers(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: drop held keys, pause a running game
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.driver.engine_mut().input_mut().release_all();
                let engine = g.driver.engine();
                if g.settings.pause_on_blur && engine.is_running() && !engine.is_paused() {
                    g.toggle_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let summary = headless::run_demo(headless::DEMO_AUTOPILOT_FRAMES, headless::DEMO_MAX_FRAMES);
    println!("\n{}", summary);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_breaker::renderer::RecordingSurface;
    use brick_breaker::sim::GameEvent;
    use brick_breaker::{Driver, Engine, HudObserver, HudSnapshot, ManualScheduler};

    /// Frames the autopilot plays before letting go of the paddle
    pub const DEMO_AUTOPILOT_FRAMES: u64 = 6_000;
    /// Hard cap on simulated frames
    pub const DEMO_MAX_FRAMES: u64 = 60_000;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    struct LogHud {
        level: u32,
    }

    impl HudObserver for LogHud {
        fn on_hud(&mut self, hud: &HudSnapshot) {
            if hud.level != self.level {
                self.level = hud.level;
                log::info!("{}", hud);
            }
        }

        fn on_game_over(&mut self, final_hud: &HudSnapshot) {
            log::info!("Game over: {}", final_hud);
        }
    }

    /// Play until game over (or the frame cap) and describe the result
    pub fn run_demo(autopilot_frames: u64, max_frames: u64) -> String {
        let mut engine: Engine = Engine::default();
        engine.add_observer(Box::new(LogHud { level: 1 }));
        let mut driver = Driver::new(engine, ManualScheduler::new());
        let mut surface = RecordingSurface::new();

        driver.reset();
        driver.start();

        let mut time = 0.0;
        let mut frames = 0u64;
        let mut bricks = 0u64;
        while let Some(handle) = driver.scheduler_mut().take_due() {
            if frames >= max_frames {
                driver.stop();
                break;
            }
            if frames < autopilot_frames {
                // Track the ball with a wandering offset so bounce angles vary
                let ball_x = driver.engine().state().ball.pos.x;
                let wobble = (frames as f32 * 0.05).sin() * 45.0;
                driver
                    .engine_mut()
                    .input_mut()
                    .pointer_moved(ball_x + wobble);
            }

            surface.clear_commands();
            let events = driver.on_frame(handle, time, &mut surface);
            bricks += events
                .iter()
                .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
                .count() as u64;

            time += FRAME_MS;
            frames += 1;
        }

        let hud = driver.engine().hud();
        format!(
            "Played {} frames ({:.1}s): {} bricks destroyed, {}",
            frames,
            time / 1000.0,
            bricks,
            hud
        )
    }
}
