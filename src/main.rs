//! Canvas Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent,
        TouchEvent,
    };

    use canvas_arcade::assets::AssetManifest;
    use canvas_arcade::consts::*;
    use canvas_arcade::driver::{ArcadeGame, FrameOutcome, LoopDriver, Phase};
    use canvas_arcade::input::ViewportTransform;
    use canvas_arcade::platform::{PageConfig, web};
    use canvas_arcade::renderer::CanvasSurface;

    /// Game instance holding all state
    struct Game {
        driver: LoopDriver<ArcadeGame>,
        surface: CanvasSurface,
        manifest: AssetManifest,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store is always the world size; CSS decides the displayed size
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let config = PageConfig::from_attributes(
            canvas.get_attribute("data-game").as_deref(),
            canvas.get_attribute("data-tuning").as_deref(),
            canvas.get_attribute("data-assets").as_deref(),
        );

        let seed = js_sys::Date::now() as u64;
        let driver = LoopDriver::new(
            ArcadeGame::new(config.variant, seed, &config.tuning),
            seed,
            config.variant.needs_assets(),
        );
        log::info!(
            "Canvas Arcade starting: {} (seed {})",
            config.variant.as_str(),
            seed
        );

        let game = Rc::new(RefCell::new(Game {
            driver,
            surface: CanvasSurface::new(ctx),
            manifest: config.manifest,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        wasm_bindgen_futures::spawn_local(session(game));
    }

    /// One Loading -> Running -> GameOver pass. Exits early if a restart
    /// superseded it.
    async fn session(game: Rc<RefCell<Game>>) {
        set_game_over_visible(false, 0);

        let (generation, loading, manifest) = {
            let g = game.borrow();
            (
                g.driver.generation(),
                g.driver.phase() == Phase::Loading,
                g.manifest.clone(),
            )
        };

        if loading {
            let sprites = web::load_sprites(&manifest).await;
            let mut g = game.borrow_mut();
            if g.driver.generation() != generation {
                return;
            }
            g.surface.set_sprites(sprites);
            g.driver.assets_settled();
        }

        loop {
            let time = web::next_animation_frame().await;
            let mut g = game.borrow_mut();
            if g.driver.generation() != generation {
                return;
            }
            let Game {
                driver, surface, ..
            } = &mut *g;
            if driver.frame(time, surface) == FrameOutcome::Halt {
                set_game_over_visible(true, driver.stats().score);
                return;
            }
        }
    }

    fn set_game_over_visible(visible: bool, score: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("finalScore") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("gameOverScreen") {
            let classes = el.class_list();
            let _ = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().driver.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().driver.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move: map to world units and re-center the player
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Keep the page from scrolling under the finger
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let viewport = ViewportTransform::new(
                        rect.left() as f32,
                        rect.top() as f32,
                        rect.width() as f32,
                        rect.height() as f32,
                    );
                    let point = viewport.to_world(touch.client_x() as f32, touch.client_y() as f32);
                    game.borrow_mut().driver.touch(point);
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                event_name,
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().driver.restart(seed);
                wasm_bindgen_futures::spawn_local(session(game.clone()));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, bail};

    use canvas_arcade::Variant;
    use canvas_arcade::consts::FALLBACK_FRAME_MS;
    use canvas_arcade::driver::{ArcadeGame, LoopDriver};
    use canvas_arcade::platform::headless;
    use canvas_arcade::tuning::Tuning;

    /// Command line options
    #[derive(Debug)]
    pub struct Args {
        pub variant: Variant,
        pub frames: u64,
        pub seed: u64,
        pub tuning_path: Option<String>,
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
            let mut parsed = Args {
                variant: Variant::Dodge,
                frames: 60 * 60,
                seed: 12345,
                tuning_path: None,
            };
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--frames" => {
                        let value = args.next().context("--frames needs a value")?;
                        parsed.frames = value.parse().context("--frames must be a number")?;
                    }
                    "--seed" => {
                        let value = args.next().context("--seed needs a value")?;
                        parsed.seed = value.parse().context("--seed must be a number")?;
                    }
                    "--tuning" => {
                        parsed.tuning_path = Some(args.next().context("--tuning needs a path")?);
                    }
                    other => match Variant::parse(other) {
                        Some(variant) => parsed.variant = variant,
                        None => bail!(
                            "unknown argument '{other}'\nusage: canvas-arcade [dodge|shooter] [--frames N] [--seed S] [--tuning PATH]"
                        ),
                    },
                }
            }
            Ok(parsed)
        }
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse(std::env::args().skip(1))?;

        let tuning = match &args.tuning_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning file {path}"))?;
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning from {path}");
                tuning
            }
            None => Tuning::default(),
        };

        log::info!(
            "Canvas Arcade (headless) starting: {} seed {} for {} frames",
            args.variant.as_str(),
            args.seed,
            args.frames
        );

        let mut driver = LoopDriver::new(
            ArcadeGame::new(args.variant, args.seed, &tuning),
            args.seed,
            args.variant.needs_assets(),
        );
        let report = headless::run(&mut driver, args.frames, FALLBACK_FRAME_MS);

        println!(
            "{}: score {} hearts {} after {} frames{}",
            args.variant.as_str(),
            report.stats.score,
            report.stats.hearts,
            report.frames,
            if report.game_over { " (game over)" } else { "" }
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
