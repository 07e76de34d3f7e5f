//! Browser shell: mounts the fishing loop on a canvas, wires pointer/touch
//! input, and drives frames from `requestAnimationFrame`.
//!
//! Input listeners only write the `INPUT` buffer. The frame callback snapshots
//! it, applies queued commands, advances the session, then draws. No frame is
//! requested unless a round is running or a command is waiting, and
//! `teardown()` cancels the pending request and unhooks every listener.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, window};

use crate::config::{FishingConfig, Playfield};
use crate::fishing::{AdvancedLevel, Command, FrameInput, Mode, Session, pointer_to_playfield};

mod render;

const CANVAS_ID: &str = "htp-canvas";
const SCORE_ID: &str = "htp-score";
const TOTAL_ID: &str = "htp-total";

/// Narrow buffer written by input handlers and control exports between
/// frames; drained once at the top of each frame.
#[derive(Default)]
struct InputBuffer {
    pointer_x: Option<f64>,
    lowering: bool,
    commands: Vec<Command>,
}

impl InputBuffer {
    fn take_frame(&mut self) -> (FrameInput, Vec<Command>) {
        let input = FrameInput {
            pointer_x: self.pointer_x.take(),
            lowering: self.lowering,
        };
        (input, std::mem::take(&mut self.commands))
    }
}

/// A registered DOM listener, kept so teardown can remove it.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: Session,
    rng: StdRng,
    frame_cb: Closure<dyn FnMut(f64)>,
    raf_handle: Option<i32>,
    listeners: Vec<Listener>,
}

thread_local! {
    static GAME: RefCell<Option<GameState>> = const { RefCell::new(None) };
    static INPUT: RefCell<InputBuffer> = RefCell::new(InputBuffer::default());
}

// --- WASM entry points -------------------------------------------------------

/// Mount the game with default tuning on the canvas `canvas_id` (created if
/// missing). Replaces any game already mounted.
#[wasm_bindgen]
pub fn start_fishing_mode(canvas_id: Option<String>) -> Result<(), JsValue> {
    mount(canvas_id, FishingConfig::default())
}

/// Same as [`start_fishing_mode`] with a JSON tuning override.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_fishing_mode_with_config(canvas_id: Option<String>, config_json: &str) -> Result<(), JsValue> {
    let cfg = FishingConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount(canvas_id, cfg)
}

#[wasm_bindgen]
pub fn start_round() {
    send(Command::Start);
}

#[wasm_bindgen]
pub fn replay_round() {
    send(Command::Replay);
}

#[wasm_bindgen]
pub fn next_level() {
    send(Command::NextLevel);
}

#[wasm_bindgen]
pub fn end_series() {
    send(Command::EndSeries);
}

#[wasm_bindgen]
pub fn abort_round() {
    send(Command::Abort);
}

#[wasm_bindgen]
pub fn reset_series() {
    send(Command::ResetSeries);
}

/// Toggle advanced mode. Applies to the next round started.
#[wasm_bindgen]
pub fn set_advanced_mode(enabled: bool) {
    send(Command::SetAdvanced(enabled));
}

/// Select advanced level 1-3 for the next round.
#[wasm_bindgen]
pub fn set_advanced_level(level: u8) -> Result<(), JsValue> {
    let level = AdvancedLevel::try_from(level).map_err(|e| JsValue::from_str(&e.to_string()))?;
    send(Command::SelectMode(Mode::Advanced(level)));
    Ok(())
}

/// Latest finished round as JSON, for the summary overlay.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn round_summary_json() -> Option<String> {
    GAME.with(|cell| {
        let slot = cell.borrow();
        let summary = slot.as_ref()?.session.last_summary()?;
        match serde_json::to_string(summary) {
            Ok(json) => Some(json),
            Err(err) => {
                log::error!("could not serialize round summary: {}", err);
                None
            }
        }
    })
}

#[wasm_bindgen]
pub fn total_score() -> f64 {
    GAME.with(|cell| cell.borrow().as_ref().map_or(0.0, |g| g.session.total_score() as f64))
}

/// Stop the loop, unhook listeners and drop all game state.
#[wasm_bindgen]
pub fn teardown() {
    let Some(game) = GAME.with(|cell| cell.borrow_mut().take()) else {
        return;
    };
    if let (Some(handle), Some(win)) = (game.raf_handle, window()) {
        if let Err(err) = win.cancel_animation_frame(handle) {
            log::warn!("could not cancel pending frame: {:?}", err);
        }
    }
    for l in &game.listeners {
        let _ = l
            .target
            .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
    }
    INPUT.with(|buf| *buf.borrow_mut() = InputBuffer::default());
    log::info!("fishing game torn down");
}

// --- Mounting ----------------------------------------------------------------

fn mount(canvas_id: Option<String>, cfg: FishingConfig) -> Result<(), JsValue> {
    teardown();
    let session = Session::new(cfg).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let id = canvas_id.as_deref().unwrap_or(CANVAS_ID);

    // Create / reuse the canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(id) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(id);
        c.set_attribute("style", "display:block; margin:0 auto; border:2px solid #3b7aa1; border-radius:12px;")
            .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let pf = session.config().playfield;
    fit_canvas(&canvas, pf.width, pf.height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    ensure_overlay(&doc, SCORE_ID, "top:10px; left:12px;", "Score (Round): 0")?;
    ensure_overlay(&doc, TOTAL_ID, "top:10px; right:12px;", "Total: 0")?;

    let listeners = register_input(&canvas, pf)?;
    let game = GameState {
        canvas,
        ctx,
        session,
        rng: StdRng::from_entropy(),
        frame_cb: frame_callback(),
        raf_handle: None,
        listeners,
    };
    GAME.with(|cell| cell.replace(Some(game)));
    log::info!("fishing game mounted on #{}", id);
    // Paint the idle scene once; the loop then sleeps until a round starts.
    schedule_frame();
    Ok(())
}

/// Size the backing store for the device pixel ratio (capped at 2) while the
/// CSS box follows the playfield's aspect ratio.
fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    let Some(win) = window() else { return };
    let inner = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(width);
    let css_w = (inner - 24.0).clamp(1.0, width).floor();
    let css_h = (height * css_w / width).floor();
    let dpr = win.device_pixel_ratio().clamp(1.0, 2.0);
    canvas.set_width((css_w * dpr) as u32);
    canvas.set_height((css_h * dpr) as u32);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", css_w)).ok();
    style.set_property("height", &format!("{}px", css_h)).ok();
}

fn ensure_overlay(doc: &Document, id: &str, position: &str, text: &str) -> Result<(), JsValue> {
    if doc.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let Some(body) = doc.body() else { return Ok(()) };
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_text_content(Some(text));
    let style = format!(
        "position:fixed; {} font-family:system-ui, sans-serif; font-size:16px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#fff; z-index:45;",
        position
    );
    div.set_attribute("style", &style).ok();
    body.append_child(&div)?;
    Ok(())
}

fn register_input(canvas: &HtmlCanvasElement, pf: Playfield) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    let target: EventTarget = canvas.clone().into();

    for event in ["mousemove", "touchmove"] {
        let move_canvas = canvas.clone();
        let passive = event.starts_with("touch");
        listeners.push(listen(&target, event, passive, move |evt| pointer_moved(&evt, &move_canvas, &pf))?);
    }

    for (event, lowering) in [
        ("mousedown", true),
        ("touchstart", true),
        ("mouseup", false),
        ("mouseleave", false),
        ("touchend", false),
    ] {
        listeners.push(listen(&target, event, event.starts_with("touch"), move |_evt| {
            INPUT.with(|buf| buf.borrow_mut().lowering = lowering);
        })?);
    }

    if let Some(win) = window() {
        let win_target: EventTarget = win.into();
        let resize_canvas = canvas.clone();
        listeners.push(listen(&win_target, "resize", false, move |_evt| {
            fit_canvas(&resize_canvas, pf.width, pf.height);
        })?);
    }
    Ok(listeners)
}

fn pointer_moved(evt: &web_sys::Event, canvas: &HtmlCanvasElement, pf: &Playfield) {
    let client_x = if let Some(m) = evt.dyn_ref::<web_sys::MouseEvent>() {
        m.client_x() as f64
    } else if let Some(t) = evt.dyn_ref::<web_sys::TouchEvent>() {
        match t.touches().get(0) {
            Some(touch) => touch.client_x() as f64,
            None => return,
        }
    } else {
        return;
    };
    let rect = canvas.get_bounding_client_rect();
    let x = pointer_to_playfield(client_x, rect.left(), rect.width(), pf);
    INPUT.with(|buf| buf.borrow_mut().pointer_x = Some(x));
}

/// Touch listeners are registered passive so the page keeps scrolling smoothly.
fn listen(
    target: &EventTarget,
    event: &'static str,
    passive: bool,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    )?;
    Ok(Listener {
        target: target.clone(),
        event,
        closure,
    })
}

// --- Frame loop ----------------------------------------------------------------

fn send(cmd: Command) {
    INPUT.with(|buf| buf.borrow_mut().commands.push(cmd));
    schedule_frame();
}

fn frame_callback() -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |ts: f64| {
        let again = GAME.with(|cell| match cell.borrow_mut().as_mut() {
            Some(game) => game_tick(game, ts),
            None => false,
        });
        if again {
            schedule_frame();
        }
    }) as Box<dyn FnMut(f64)>)
}

/// Request a frame unless one is already pending or no game is mounted.
fn schedule_frame() {
    GAME.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(game) = slot.as_mut() else { return };
        if game.raf_handle.is_some() {
            return;
        }
        let Some(win) = window() else { return };
        match win.request_animation_frame(game.frame_cb.as_ref().unchecked_ref()) {
            Ok(handle) => game.raf_handle = Some(handle),
            Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
        }
    });
}

/// One frame. Returns whether another frame should be requested.
fn game_tick(game: &mut GameState, ts: f64) -> bool {
    game.raf_handle = None;
    let (input, commands) = INPUT.with(|buf| buf.borrow_mut().take_frame());
    for cmd in commands {
        game.session.push(cmd);
    }
    let report = game.session.frame(ts, &input, &mut game.rng);

    // A detached canvas means the page is tearing us down: stop quietly.
    if !game.canvas.is_connected() {
        return false;
    }
    let scale = game.canvas.width() as f64 / game.session.config().playfield.width;
    if let Err(err) = render::draw_frame(&game.ctx, scale, game.session.round(), game.session.config()) {
        log::warn!("skipping draw: {:?}", err);
    }
    update_overlays(game);
    if report.finished {
        if let Some(summary) = game.session.last_summary() {
            log::info!(
                "{}: round score {}, total {}",
                summary.title,
                summary.score,
                summary.cumulative_total
            );
        }
    }
    game.session.wants_frames()
}

fn update_overlays(game: &GameState) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = doc.get_element_by_id(SCORE_ID) {
        el.set_text_content(Some(&format!(
            "Score (Round): {} \u{2022} {}",
            game.session.round().score(),
            game.session.round().mode().title()
        )));
    }
    if let Some(el) = doc.get_element_by_id(TOTAL_ID) {
        el.set_text_content(Some(&format!("Total: {}", game.session.total_score())));
    }
}
