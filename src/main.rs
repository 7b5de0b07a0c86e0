//! Breakout of Time entry point
//!
//! Web: canvas 2D surface, DOM overlay and keyboard/touch input.
//! Native: headless demo run driven by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent, TouchEvent,
    };

    use breakout_of_time::GameConfig;
    use breakout_of_time::game::{Game, InputEvent, InputSource, Presenter};
    use breakout_of_time::renderer::{Color, FONT, Surface, TextAlign};
    use breakout_of_time::sim::{Hud, Outcome, PaddleDirection};
    use breakout_of_time::ui::{countdown_message, end_message};

    type InputQueue = Rc<RefCell<VecDeque<InputEvent>>>;

    /// Event listeners push here; the frame callback drains it
    struct SharedInput(InputQueue);

    impl InputSource for SharedInput {
        fn poll_input(&mut self) -> Option<InputEvent> {
            self.0.borrow_mut().pop_front()
        }
    }

    fn css(color: Color) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round(),
            (color[1] * 255.0).round(),
            (color[2] * 255.0).round(),
            color[3]
        )
    }

    struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self) {
            let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
            self.ctx.clear_rect(0.0, 0.0, w, h);
        }

        fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
            self.ctx.set_fill_style_str(&css(color));
            self.ctx
                .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str(&css(color));
            self.ctx.fill();
            self.ctx.close_path();
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, align: TextAlign, color: Color) {
            self.ctx.set_font(FONT);
            self.ctx.set_text_align(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            });
            self.ctx.set_fill_style_str(&css(color));
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }

        fn measure_text(&self, text: &str) -> f32 {
            self.ctx.set_font(FONT);
            self.ctx
                .measure_text(text)
                .map(|m| m.width() as f32)
                .unwrap_or(0.0)
        }
    }

    /// Writes overlay messages into `#overlay`
    struct DomPresenter {
        overlay: Element,
        countdown_steps: u32,
    }

    impl DomPresenter {
        fn show(&self, message: &str) {
            let _ = self.overlay.class_list().remove_1("hidden");
            self.overlay.set_inner_html(&message.replace('\n', "<br>"));
        }
    }

    impl Presenter for DomPresenter {
        fn show_countdown(&mut self, _level: u32, remaining: u32) {
            self.show(&countdown_message(remaining, self.countdown_steps));
        }

        fn hide_overlay(&mut self) {
            let _ = self.overlay.class_list().add_1("hidden");
        }

        fn show_ending(&mut self, outcome: Outcome, _hud: &Hud) {
            self.show(end_message(outcome));
        }
    }

    fn push_on<E: FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        kind: &str,
        input: InputQueue,
        map: impl Fn(&E) -> Option<InputEvent> + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(E)>::new(move |event: E| {
            if let Some(e) = map(&event) {
                input.borrow_mut().push_back(e);
            }
        });
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input(document: &Document, input: &InputQueue) -> Result<(), JsValue> {
        push_on::<KeyboardEvent>(document, "keydown", input.clone(), |e| {
            match e.key().as_str() {
                "ArrowLeft" => Some(InputEvent::Move(PaddleDirection::Left)),
                "ArrowRight" => Some(InputEvent::Move(PaddleDirection::Right)),
                " " | "Enter" => Some(InputEvent::Launch),
                _ => None,
            }
        })?;

        for (id, dir) in [
            ("left-btn", PaddleDirection::Left),
            ("right-btn", PaddleDirection::Right),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                push_on::<TouchEvent>(&btn, "touchstart", input.clone(), move |_| {
                    Some(InputEvent::Move(dir))
                })?;
            }
        }
        Ok(())
    }

    fn setup_resize(canvas: HtmlCanvasElement, input: &InputQueue) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        push_on::<web_sys::Event>(&window, "resize", input.clone(), move |_| {
            let window = web_sys::window()?;
            let width = window.inner_width().ok()?.as_f64()?;
            let height = window.inner_height().ok()?.as_f64()?;
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            Some(InputEvent::Resize {
                width: width as f32,
                height: height as f32,
            })
        })
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(f.as_ref().unchecked_ref());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        let width = window.inner_width()?.as_f64().unwrap_or(1280.0);
        let height = window.inner_height()?.as_f64().unwrap_or(720.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        let overlay = document
            .get_element_by_id("overlay")
            .ok_or("missing #overlay")?;

        let config = GameConfig {
            surface_width: width as f32,
            surface_height: height as f32,
            seed: Some(js_sys::Date::now() as u64),
            ..GameConfig::default()
        };
        let presenter = DomPresenter {
            overlay,
            countdown_steps: config.countdown_steps,
        };

        let input: InputQueue = Rc::default();
        setup_input(&document, &input)?;
        setup_resize(canvas.clone(), &input)?;

        let mut game = Game::new(config, SharedInput(input), presenter)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.start();

        let mut surface = CanvasSurface { canvas, ctx };
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let next = frame.clone();
        *frame.borrow_mut() = Some(Closure::new(move || {
            game.frame(&mut surface);
            if let Some(f) = next.borrow().as_ref() {
                request_animation_frame(f);
            }
        }));
        if let Some(f) = frame.borrow().as_ref() {
            request_animation_frame(f);
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::VecDeque;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;

    use breakout_of_time::game::{FrameStatus, Game, InputEvent};
    use breakout_of_time::renderer::DrawList;
    use breakout_of_time::ui::LogPresenter;
    use breakout_of_time::{BlockLayout, GameConfig, PaddleLabelFit};

    /// Headless demo: the autopilot plays one run and the final HUD is printed as JSON
    #[derive(Parser, Debug)]
    #[command(name = "breakout-of-time", version, about)]
    struct Args {
        /// JSON config file (missing fields take defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed (overrides the config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Block grid layout: centered or left_aligned
        #[arg(long)]
        layout: Option<String>,

        /// Paddle label fit: fixed or grow_to_fit
        #[arg(long)]
        label_fit: Option<String>,

        /// Give up after this many frames
        #[arg(long, default_value_t = 100_000)]
        max_frames: u64,

        /// Write the last drawn frame's commands to this file as JSON
        #[arg(long)]
        dump_frame: Option<PathBuf>,
    }

    pub fn main() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.seed = Some(seed);
        }
        if let Some(layout) = &args.layout {
            config.block_layout = BlockLayout::from_str(layout)
                .ok_or_else(|| anyhow!("unknown layout '{layout}'"))?;
        }
        if let Some(fit) = &args.label_fit {
            config.paddle_label_fit = PaddleLabelFit::from_str(fit)
                .ok_or_else(|| anyhow!("unknown label fit '{fit}'"))?;
        }

        let presenter = LogPresenter::new(config.countdown_steps);
        let mut game = Game::new(config, VecDeque::<InputEvent>::new(), presenter)
            .context("invalid configuration")?;
        game.set_idle_mode(true);
        game.start();

        let mut surface = DrawList::new();
        let mut frames = 0;
        while frames < args.max_frames {
            if game.frame(&mut surface) == FrameStatus::Ended {
                break;
            }
            frames += 1;
        }
        log::info!(
            "Stopped after {} frames ({} drawn)",
            frames,
            surface.frames
        );

        if let Some(path) = &args.dump_frame {
            std::fs::write(path, surface.frame_json()?)
                .with_context(|| format!("writing frame to {}", path.display()))?;
        }

        println!("{}", serde_json::to_string_pretty(&game.hud())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}
