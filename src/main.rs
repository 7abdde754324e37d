//! Block Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use block_blaster::audio::AudioManager;
    use block_blaster::platform::{CanvasRect, Key, pointer_to_world};
    use block_blaster::renderer::CanvasPresenter;
    use block_blaster::sim::GamePhase;
    use block_blaster::{Game, Settings, Tuning};

    /// Browser session: the game plus the handles the page owns
    struct Shell {
        game: Game<CanvasPresenter>,
        settings: Settings,
        spawn_handle: Option<i32>,
    }

    impl Shell {
        fn stop_spawning(&mut self) {
            if let (Some(handle), Some(window)) = (self.spawn_handle.take(), web_sys::window()) {
                window.clear_interval_with_handle(handle);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.settings.save();
            let settings = self.settings.clone();
            self.game.presenter_mut().audio_mut().apply_settings(&settings);
            log::info!("Muted: {}", settings.muted);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Block Blaster starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        let tuning = Tuning::default();
        let spawn_interval = tuning.spawn_interval_ms;

        let audio = AudioManager::new(&settings);
        let presenter = CanvasPresenter::new(canvas.clone(), document.clone(), audio)
            .ok_or("canvas has no 2d context")?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, tuning, presenter);
        if settings.attract_mode {
            game.set_demo(true);
        }

        let shell = Rc::new(RefCell::new(Shell {
            game,
            settings,
            spawn_handle: None,
        }));

        setup_input_handlers(&canvas, shell.clone());
        setup_blur_mute(shell.clone());
        start_spawning(shell.clone(), spawn_interval)?;

        request_animation_frame(shell);

        log::info!("Block Blaster running!");
        Ok(())
    }

    fn start_spawning(shell: Rc<RefCell<Shell>>, interval_ms: f64) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let game = shell.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().game.on_spawn_timer();
        });
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        )?;
        closure.forget();
        shell.borrow_mut().spawn_handle = Some(handle);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Click to shoot
        {
            let shell = shell.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let bounds = CanvasRect {
                    left: rect.left() as f32,
                    bottom: rect.bottom() as f32,
                    width: canvas_clone.width() as f32,
                    height: canvas_clone.height() as f32,
                };
                let target =
                    pointer_to_world(event.client_x() as f32, event.client_y() as f32, &bounds);
                let _ = shell.borrow_mut().game.on_pointer_down(target.x, target.y);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut s = shell.borrow_mut();
                match event.key().as_str() {
                    "i" | "I" => {
                        let enabled = !s.game.is_demo();
                        s.game.set_demo(enabled);
                    }
                    "m" | "M" => s.toggle_mute(),
                    key => s.game.on_key_down(Key::from_dom_key(key)),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event, muted) in [("blur", true), ("focus", false)] {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut s = shell.borrow_mut();
                if s.settings.mute_on_blur {
                    s.game.presenter_mut().audio_mut().set_muted(muted);
                }
            });
            let _ =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(shell);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(shell: Rc<RefCell<Shell>>) {
        let phase = shell.borrow_mut().game.tick();

        if phase == GamePhase::GameOver {
            let score = {
                let mut s = shell.borrow_mut();
                s.stop_spawning();
                s.game.final_score()
            };
            log::info!("Game over, final score {}", score);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("Game Over! Final Score: {}", score));
                let _ = window.location().reload();
            }
            return;
        }

        request_animation_frame(shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), block_blaster::GameError> {
    env_logger::init();
    log::info!("Block Blaster (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let (tuning, seed) = parse_args(std::env::args().skip(1))?;
    let score = headless::run_demo(seed, tuning);
    println!("Final score: {}", score);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// `[tuning.json] [seed]`
#[cfg(not(target_arch = "wasm32"))]
fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<(block_blaster::Tuning, u64), block_blaster::GameError> {
    use block_blaster::{GameError, Tuning};

    let mut tuning = Tuning::default();
    let mut seed = 0x5eed;

    let mut next = args.next();
    if let Some(path) = next.as_deref().filter(|a| a.ends_with(".json")) {
        let json = std::fs::read_to_string(path)?;
        tuning = Tuning::from_json(&json)?;
        log::info!("Loaded tuning from {}", path);
        next = args.next();
    }
    if let Some(raw) = next {
        seed = raw.parse().map_err(|_| GameError::InvalidSeed(raw))?;
    }
    Ok((tuning, seed))
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use block_blaster::consts::FRAME_MS;
    use block_blaster::renderer::RecordingPresenter;
    use block_blaster::sim::GamePhase;
    use block_blaster::{Game, Tuning};

    /// Ten minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Let the demo pilot play one session and return its score
    pub fn run_demo(seed: u64, tuning: Tuning) -> u64 {
        let mut game = Game::new(seed, tuning, RecordingPresenter::new());
        game.set_demo(true);

        for frame in 0..MAX_FRAMES {
            game.advance_clock(FRAME_MS);
            if game.tick() == GamePhase::GameOver {
                log::info!("Game over after {} frames", frame + 1);
                break;
            }
        }

        let shots = game
            .presenter()
            .sounds()
            .filter(|s| *s == block_blaster::renderer::SoundId::Shoot)
            .count();
        log::info!(
            "Final score {} at level {} ({} shots fired)",
            game.final_score(),
            game.state().level.number(),
            shots
        );
        game.final_score()
    }
}
