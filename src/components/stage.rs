use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlImageElement,
    KeyboardEvent, MouseEvent, TouchEvent, Window,
};
use yew::prelude::*;

use super::fps_overlay::FpsOverlay;
use crate::config::{CanvasSize, GameConfig};
use crate::error::GameError;
use crate::game::Game;
use crate::model::{Offset, Point};
use crate::render::paint;
use crate::state::TouchState;
use crate::util::{cerror, clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct StageProps {
    pub config: GameConfig,
}

#[derive(Clone)]
struct Hud {
    fps: UseStateHandle<Option<u32>>,
    paused: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
}

impl Hud {
    fn report(&self, err: &GameError) {
        cerror(&err.to_string());
        self.error.set(Some(err.to_string()));
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach<E, F>(target: &EventTarget, kind: &'static str, mut handler: F) -> Result<Self, GameError>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(
            Box::new(move |e: Event| handler(e.unchecked_into::<E>())) as Box<dyn FnMut(Event)>
        );
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Sprite image plus its load handlers; lives until the stage unmounts.
struct Loader {
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl Loader {
    fn detach(&self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

/// Input listeners, scroll interval and frame loop, registered once the
/// sprite image is available.
struct Running {
    window: Window,
    listeners: Vec<Listener>,
    tick_id: i32,
    _tick: Closure<dyn FnMut()>,
    raf_id: Rc<Cell<Option<i32>>>,
    raf_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Running {
    fn teardown(self) {
        for l in &self.listeners {
            l.detach();
        }
        self.window.clear_interval_with_handle(self.tick_id);
        if let Some(id) = self.raf_id.get() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // breaks the closure <-> cell cycle
        self.raf_cb.borrow_mut().take();
    }
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.offset_x() as f64, e.offset_y() as f64)
}

fn touch_point(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Option<Point> {
    let t0 = e.touches().item(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some(Point::new(
        t0.client_x() as f64 - rect.left(),
        t0.client_y() as f64 - rect.top(),
    ))
}

fn apply_background_offset(canvas: &HtmlCanvasElement, offset: Offset) {
    let value = format!("{}px {}px", offset.x, offset.y);
    if let Err(e) = canvas.style().set_property("background-position", &value) {
        cwarn(&format!("background-position not applied: {:?}", e));
    }
}

fn fit_canvas(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    config: &GameConfig,
) -> Result<CanvasSize, GameError> {
    let width = window.inner_width()?.as_f64().unwrap_or(800.0);
    let height = window.inner_height()?.as_f64().unwrap_or(600.0);
    let size = config.canvas_size(width, height, window.device_pixel_ratio());
    canvas.set_width(size.backing_width());
    canvas.set_height(size.backing_height());
    // resizing the backing store resets the context transform
    if size.is_scaled() {
        ctx.scale(size.pixel_ratio, size.pixel_ratio)?;
    }
    let style = canvas.style();
    style.set_property("width", &format!("{}px", size.css_width))?;
    style.set_property("height", &format!("{}px", size.css_height))?;
    style.set_property("background-image", &format!("url({})", config.background_image))?;
    Ok(size)
}

fn mount(
    canvas: HtmlCanvasElement,
    game: Rc<RefCell<Game>>,
    hud: Hud,
    running: Rc<RefCell<Option<Running>>>,
) -> Result<Loader, GameError> {
    let window = web_sys::window().ok_or(GameError::NoWindow)?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(GameError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GameError::ContextUnavailable)?;
    let config = game.borrow().config.clone();
    let size = fit_canvas(&window, &canvas, &ctx, &config)?;
    {
        let (x, y) = config.hero_start(&size);
        game.borrow_mut().place_hero(x, y);
    }

    let image = HtmlImageElement::new()?;
    let onload = {
        let image = image.clone();
        let hud = hud.clone();
        Closure::wrap(Box::new(move || {
            if running.borrow().is_some() {
                return;
            }
            match start(&window, &canvas, &ctx, &image, &game, &hud) {
                Ok(r) => {
                    *running.borrow_mut() = Some(r);
                    clog("Game initialized!");
                    clog(&format!("Canvas size: {} {}", size.css_width, size.css_height));
                }
                Err(e) => hud.report(&e),
            }
        }) as Box<dyn FnMut()>)
    };
    let onerror = {
        let src = config.hero_image.clone();
        Closure::wrap(Box::new(move || hud.report(&GameError::AssetLoad(src.clone())))
            as Box<dyn FnMut()>)
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    image.set_src(&config.hero_image);
    Ok(Loader {
        image,
        _onload: onload,
        _onerror: onerror,
    })
}

fn start(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    game: &Rc<RefCell<Game>>,
    hud: &Hud,
) -> Result<Running, GameError> {
    let mut listeners = Vec::new();
    let touch = Rc::new(RefCell::new(TouchState::default()));

    // Mouse
    {
        let game = game.clone();
        listeners.push(Listener::attach(canvas, "mousedown", move |e: MouseEvent| {
            if e.button() == 0 {
                game.borrow_mut().pointer_down(mouse_point(&e));
            }
        })?);
    }
    {
        let game = game.clone();
        listeners.push(Listener::attach(canvas, "mousemove", move |e: MouseEvent| {
            game.borrow_mut().pointer_move(mouse_point(&e));
        })?);
    }
    {
        let game = game.clone();
        listeners.push(Listener::attach(canvas, "mouseup", move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            let result = game.borrow_mut().pointer_up(mouse_point(&e));
            if let Err(err) = result {
                cerror(&err.to_string());
            }
        })?);
    }
    {
        let game = game.clone();
        listeners.push(Listener::attach(canvas, "mouseleave", move |_e: MouseEvent| {
            game.borrow_mut().pointer_cancel();
        })?);
    }

    // Touch
    {
        let game = game.clone();
        let touch = touch.clone();
        let canvas_tc = canvas.clone();
        listeners.push(Listener::attach(canvas, "touchstart", move |e: TouchEvent| {
            e.prevent_default();
            if e.touches().length() != 1 {
                return;
            }
            if let Some(at) = touch_point(&canvas_tc, &e) {
                touch.borrow_mut().begin(at);
                game.borrow_mut().pointer_down(at);
            }
        })?);
    }
    {
        let game = game.clone();
        let touch = touch.clone();
        let canvas_tc = canvas.clone();
        listeners.push(Listener::attach(canvas, "touchmove", move |e: TouchEvent| {
            e.prevent_default();
            if !touch.borrow().single_active {
                return;
            }
            if let Some(at) = touch_point(&canvas_tc, &e) {
                touch.borrow_mut().track(at);
                game.borrow_mut().pointer_move(at);
            }
        })?);
    }
    {
        let game = game.clone();
        let touch = touch.clone();
        listeners.push(Listener::attach(canvas, "touchend", move |e: TouchEvent| {
            e.prevent_default();
            if e.touches().length() > 0 {
                return;
            }
            let released = touch.borrow_mut().end();
            if let Some(at) = released {
                let result = game.borrow_mut().pointer_up(at);
                if let Err(err) = result {
                    cerror(&err.to_string());
                }
            }
        })?);
    }
    {
        let game = game.clone();
        let touch = touch.clone();
        listeners.push(Listener::attach(canvas, "touchcancel", move |_e: TouchEvent| {
            touch.borrow_mut().end();
            game.borrow_mut().pointer_cancel();
        })?);
    }

    // Space toggles pause
    {
        let game = game.clone();
        let paused = hud.paused.clone();
        listeners.push(Listener::attach(window, "keydown", move |e: KeyboardEvent| {
            let key = e.key();
            if e.code() == "Space" || key == " " || key == "Spacebar" {
                e.prevent_default();
                let running = game.borrow_mut().toggle_running();
                clog(if running { "resumed" } else { "paused" });
                paused.set(!running);
            }
        })?);
    }

    // Scroll stepper, fixed cadence independent of the frame loop
    let tick = {
        let game = game.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            let moved = game.borrow_mut().scroll_tick();
            match moved {
                Ok(Some(offset)) => apply_background_offset(&canvas, offset),
                Ok(None) => {}
                Err(e) => cerror(&e.to_string()),
            }
        }) as Box<dyn FnMut()>)
    };
    let tick_ms = game.borrow().config.tick_ms.max(1);
    let tick_id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), tick_ms)?;

    // Frame loop
    let raf_id = Rc::new(Cell::new(None));
    let raf_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let window_loop = window.clone();
        let ctx = ctx.clone();
        let image = image.clone();
        let game = game.clone();
        let fps_handle = hud.fps.clone();
        let raf_id_loop = raf_id.clone();
        let raf_cb_loop = raf_cb.clone();
        let last_fps = Cell::new(None);
        *raf_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let now = window_loop
                .performance()
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now);
            let (ops, fps) = {
                let mut g = game.borrow_mut();
                let ops = g.frame(now);
                (ops, g.clock.fps)
            };
            if let Err(e) = paint(&ctx, &image, &ops) {
                cerror(&e.to_string());
            }
            if fps != last_fps.get() {
                last_fps.set(fps);
                fps_handle.set(fps);
            }
            // schedule next frame
            if let Some(cb) = raf_cb_loop.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id_loop.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(cb) = raf_cb.borrow().as_ref() {
        raf_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
    }

    Ok(Running {
        window: window.clone(),
        listeners,
        tick_id,
        _tick: tick,
        raf_id,
        raf_cb,
    })
}

#[function_component(Stage)]
pub fn stage(props: &StageProps) -> Html {
    let canvas_ref = use_node_ref();
    let game = use_mut_ref(|| Game::new(props.config.clone()));
    let fps = use_state(|| None::<u32>);
    let paused = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let canvas_ref = canvas_ref.clone();
        let hud = Hud {
            fps: fps.clone(),
            paused: paused.clone(),
            error: error.clone(),
        };
        let game = game.clone();
        use_effect_with((), move |_| {
            let running: Rc<RefCell<Option<Running>>> = Rc::new(RefCell::new(None));
            let mounted = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or(GameError::CanvasMissing)
                .and_then(|canvas| mount(canvas, game, hud.clone(), running.clone()));
            let loader = match mounted {
                Ok(loader) => Some(loader),
                Err(e) => {
                    hud.report(&e);
                    None
                }
            };
            move || {
                if let Some(loader) = loader {
                    loader.detach();
                }
                if let Some(r) = running.borrow_mut().take() {
                    r.teardown();
                }
            }
        });
    }

    let overlay = if props.config.show_stats {
        html! { <FpsOverlay fps={*fps} paused={*paused} /> }
    } else {
        html! {}
    };
    let banner = match &*error {
        Some(msg) => html! {
            <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:16px 24px; border-radius:8px; color:#f85149;">
                { msg.clone() }
            </div>
        },
        None => html! {},
    };

    html! {
        <div style="position:relative;">
            <canvas ref={canvas_ref} id="game-canvas" style="display:block; touch-action:none;"></canvas>
            { overlay }
            { banner }
        </div>
    }
}
