//! Drop Catcher entry point
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
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent, Window,
    };

    use drop_catcher::assets::AssetManifest;
    use drop_catcher::assets::web::load_images;
    use drop_catcher::input::Key;
    use drop_catcher::persistence::LocalStorageStore;
    use drop_catcher::platform::web::{DomHud, VibrationHaptics};
    use drop_catcher::renderer::{CanvasRenderer, RenderAdapter};
    use drop_catcher::sim::Arena;
    use drop_catcher::{Game, Platform, Settings, Tuning};

    /// Size the canvas backing store for the device pixel ratio and return
    /// the CSS-pixel arena size
    fn fit_canvas(
        window: &Window,
        canvas: &HtmlCanvasElement,
        ctx: &CanvasRenderingContext2d,
    ) -> (f32, f32) {
        let dpr = window.device_pixel_ratio().clamp(1.0, 3.0);
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(480.0)
            .floor();
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0)
            .floor();

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", w));
        let _ = style.set_property("height", &format!("{}px", h));
        canvas.set_width((w * dpr) as u32);
        canvas.set_height((h * dpr) as u32);
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

        (w as f32, h as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drop Catcher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let (width, height) = fit_canvas(&window, &canvas, &ctx);

        let platform = Platform {
            store: Box::new(LocalStorageStore::new()),
            hud: Box::new(DomHud::new(document.clone())),
            haptics: Box::new(VibrationHaptics),
        };
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            Tuning::default(),
            Arena::new(width, height),
            Settings::load(),
            platform,
        )));

        // Nothing simulates until every asset is in
        let images = match load_images(&AssetManifest::default()).await {
            Ok(images) => images,
            Err(e) => {
                log::error!("Asset loading failed: {}", e);
                CanvasRenderer::new(ctx, None).draw_error(
                    width,
                    height,
                    "Failed to load assets. Check assets/face.png",
                );
                return;
            }
        };
        let renderer = CanvasRenderer::new(ctx.clone(), images.get(AssetManifest::FACE).cloned());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        setup_input_handlers(&window, &canvas, game.clone());
        setup_resize_handler(&window, canvas, ctx, game.clone());
        setup_restart_button(game.clone());

        game.borrow_mut().start();
        request_animation_frame(game, renderer);

        log::info!("Drop Catcher running!");
    }

    /// Pointer position relative to the canvas in CSS pixels
    fn canvas_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        (
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        )
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down starts a drag
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = target.set_pointer_capture(event.pointer_id());
                let (x, y) = canvas_point(&target, &event);
                game.borrow_mut().input.pointer_down(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move while dragging
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let (x, y) = canvas_point(&target, &event);
                game.borrow_mut().input.pointer_move(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / cancel ends the drag
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.pointer_up();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "f" || key == "F" {
                    game.borrow_mut().toggle_fps();
                    return;
                }
                if let Some(key) = Key::from_dom(&key) {
                    event.prevent_default();
                    game.borrow_mut().input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear_held();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &Window,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        game: Rc<RefCell<Game>>,
    ) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (w, h) = fit_canvas(&window, &canvas, &ctx);
            game.borrow_mut().resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("btn-restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, renderer: CanvasRenderer) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, renderer, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, mut renderer: CanvasRenderer, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            renderer.render(&g.view());
        }

        request_animation_frame(game, renderer);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use drop_catcher::Tuning;
    use drop_catcher::headless::run_headless;
    use std::process::ExitCode;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => 42,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid seed: {}", e);
            return ExitCode::from(2);
        }
    };
    let seconds = match args.next().map(|s| s.parse::<f32>()) {
        None => 60.0,
        Some(Ok(seconds)) if seconds.is_finite() && seconds >= 0.0 => seconds,
        Some(_) => {
            eprintln!("usage: drop-catcher [seed] [seconds]");
            return ExitCode::from(2);
        }
    };

    log::info!("Drop Catcher (native) headless run, seed {} for {}s", seed, seconds);
    let report = run_headless(seed, seconds, Tuning::default());

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode report: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
