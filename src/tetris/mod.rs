//! Browser session for the Tetris runtime.
//!
//! This module owns everything event-driven about the game page: the playfield
//! canvas, the keyboard bindings, the one-second drop interval, and the
//! animation-frame render loop. Logical rules live in [`grid`]; this layer
//! feeds events into the model and re-derives the visual block set (one cube
//! sprite per occupied cell) after every mutation. The render pass itself is
//! dumb on purpose: it redraws whatever sprites exist, every frame, whether or
//! not anything changed.
//!
//! A session is torn down with [`stop_tetris_mode`], which stops both event
//! sources, unhooks the listener and releases every sprite; starting a new
//! session implies stopping the previous one.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, window};

pub mod grid;
pub mod shapes;

use crate::scene;
use crate::tetris::grid::{GRID_HEIGHT, GRID_WIDTH, GridModel, Step};

// --- Session constants -------------------------------------------------------

const CANVAS_ID: &str = "ug-tetris-canvas";
const SCORE_ID: &str = "ug-score";
const HINT_ID: &str = "ug-hint";
const CANVAS_WIDTH: u32 = 420;
const CANVAS_HEIGHT: u32 = 760;
/// Auto-drop period; the only autonomous mutation source.
const DROP_INTERVAL_MS: i32 = 1000;

// --- Visual block set --------------------------------------------------------

/// One cube sprite in scene coordinates. Derived from the grid, rebuilt from
/// scratch after every mutation, never a source of truth.
#[derive(Debug, Clone, PartialEq)]
struct BlockSprite {
    sx: f64,
    sy: f64,
    color: &'static str,
}

/// The full visual block set for the current logical state: one sprite per
/// locked cell, then one per active-piece cell.
fn derive_blocks(grid: &GridModel) -> Vec<BlockSprite> {
    let mut blocks = Vec::new();
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            if let Some(color) = grid.cell(x, y) {
                let (sx, sy) = scene::scene_position(x as i32, y as i32, GRID_WIDTH, GRID_HEIGHT);
                blocks.push(BlockSprite { sx, sy, color });
            }
        }
    }
    if let Some(piece) = grid.active.as_ref() {
        for (x, y) in piece.cells() {
            let (sx, sy) = scene::scene_position(x, y, GRID_WIDTH, GRID_HEIGHT);
            blocks.push(BlockSprite {
                sx,
                sy,
                color: piece.color,
            });
        }
    }
    blocks
}

// --- Session state -----------------------------------------------------------

struct TetrisState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    grid: GridModel,
    blocks: Vec<BlockSprite>,
    interval_id: i32,
    raf_id: Option<i32>,
    // Listener and timer closures stay alive here until teardown unhooks them.
    keydown_cb: Closure<dyn FnMut(KeyboardEvent)>,
    _drop_cb: Closure<dyn FnMut()>,
    frame_cb: FrameCallback,
}

thread_local! {
    static TETRIS_STATE: std::cell::RefCell<Option<TetrisState>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Seed for the shape picker: real entropy with the `rng` feature, otherwise
/// the page clock mixed the same way the old inline picker did.
fn session_seed() -> u32 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 4];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u32::from_le_bytes(buf);
        }
    }
    let x = (crate::performance_now() * 1000.0) as u64;
    (x ^ (x >> 7)) as u32
}

// --- Session lifecycle -------------------------------------------------------

/// Mounts the Tetris page: canvas, HUD overlays, keyboard bindings, the drop
/// interval and the render loop. Any previous session is stopped first so the
/// page never hosts two sets of timers.
#[wasm_bindgen]
pub fn start_tetris_mode() -> Result<(), JsValue> {
    stop_tetris_mode()?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // The page title comes from the registry, like any other client of it.
    if let Some(info) = crate::games::game_info_by_id(crate::games::TETRIS_GAME_ID) {
        doc.set_title(info.name);
    }

    // Create / reuse the fixed-size playfield canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(CANVAS_WIDTH);
        c.set_height(CANVAS_HEIGHT);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.35); border-radius:12px; border:2px solid #222; background:#0b0b12; z-index:20;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    ensure_overlays(&doc)?;

    let mut model = GridModel::new(session_seed());
    model.spawn();

    // Keyboard: exactly the four game keys, everything else passes through.
    let keydown_cb = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        let key = evt.key();
        if matches!(
            key.as_str(),
            "ArrowLeft" | "ArrowRight" | "ArrowDown" | "ArrowUp"
        ) {
            evt.prevent_default();
            TETRIS_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    handle_key(state, &key);
                }
            });
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())?;

    // Drop clock: one gravity step per second.
    let drop_cb = Closure::wrap(Box::new(move || {
        TETRIS_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.grid.active.is_some() {
                    let step = state.grid.step_down();
                    apply_step(state, step);
                }
            }
        });
    }) as Box<dyn FnMut()>);
    let interval_id = win.set_interval_with_callback_and_timeout_and_arguments_0(
        drop_cb.as_ref().unchecked_ref(),
        DROP_INTERVAL_MS,
    )?;

    let frame_cb: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));

    let mut state = TetrisState {
        canvas,
        ctx,
        grid: model,
        blocks: Vec::new(),
        interval_id,
        raf_id: None,
        keydown_cb,
        _drop_cb: drop_cb,
        frame_cb: frame_cb.clone(),
    };
    rebuild_blocks(&mut state);
    TETRIS_STATE.with(|cell| cell.replace(Some(state)));

    clog("tetris session started");
    start_render_loop(frame_cb);
    Ok(())
}

/// Tears the session down: stops the drop interval, cancels the pending
/// animation frame and drops the frame closure, unhooks the keyboard
/// listener, and removes the canvas and overlays. The sprites go with the
/// state. Safe to call when nothing is running.
#[wasm_bindgen]
pub fn stop_tetris_mode() -> Result<(), JsValue> {
    let Some(state) = TETRIS_STATE.with(|cell| cell.borrow_mut().take()) else {
        return Ok(());
    };
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;

    win.clear_interval_with_handle(state.interval_id);
    if let Some(id) = state.raf_id {
        let _ = win.cancel_animation_frame(id);
    }
    // Break the frame closure's self-reference so it drops with the state.
    state.frame_cb.borrow_mut().take();

    if let Some(doc) = win.document() {
        doc.remove_event_listener_with_callback(
            "keydown",
            state.keydown_cb.as_ref().unchecked_ref(),
        )?;
        for id in [SCORE_ID, HINT_ID] {
            if let Some(el) = doc.get_element_by_id(id) {
                el.remove();
            }
        }
    }
    state.canvas.remove();
    clog("tetris session stopped");
    Ok(())
}

fn ensure_overlays(doc: &web_sys::Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(SCORE_ID).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(SCORE_ID);
            div.set_text_content(Some("Score: 0"));
            div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }
    if doc.get_element_by_id(HINT_ID).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(HINT_ID);
            div.set_text_content(Some("← → move · ↑ rotate · ↓ drop"));
            div.set_attribute("style", "position:fixed; bottom:14px; left:50%; transform:translateX(-50%); font-family:'Fira Code', monospace; font-size:13px; padding:4px 10px; background:rgba(0,0,0,0.35); border:1px solid #333; border-radius:6px; color:#9aa4b5; z-index:30;").ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

// --- Input & tick handling ---------------------------------------------------

/// Maps the four game keys onto grid operations. Inputs are dropped entirely
/// while no piece is active.
fn handle_key(state: &mut TetrisState, key: &str) {
    if state.grid.active.is_none() {
        return;
    }
    match key {
        "ArrowLeft" => {
            if state.grid.try_move(-1, 0) {
                rebuild_blocks(state);
            }
        }
        "ArrowRight" => {
            if state.grid.try_move(1, 0) {
                rebuild_blocks(state);
            }
        }
        "ArrowUp" => {
            if state.grid.rotate() {
                rebuild_blocks(state);
            }
        }
        "ArrowDown" => {
            let step = state.grid.step_down();
            apply_step(state, step);
        }
        _ => {}
    }
}

/// Post-mutation bookkeeping for a gravity step: re-derive the scene, then
/// surface game over. The alert fires after the reset already happened, so
/// dismissing it resumes play on the fresh board.
fn apply_step(state: &mut TetrisState, step: Step) {
    rebuild_blocks(state);
    if let Step::Locked {
        game_over: true, ..
    } = step
    {
        clog("game over, board reset");
        if let Some(win) = window() {
            let _ = win.alert_with_message("Game over! The board has been cleared.");
        }
    }
}

fn rebuild_blocks(state: &mut TetrisState) {
    state.blocks = derive_blocks(&state.grid);
}

// --- Render loop -------------------------------------------------------------

fn start_render_loop(f: FrameCallback) {
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        // Teardown empties the state cell and cancels the pending frame; if a
        // frame slips through anyway the loop must end here, not reschedule.
        let live = TETRIS_STATE.with(|cell| match cell.borrow().as_ref() {
            Some(state) => {
                render(state);
                true
            }
            None => false,
        });
        if !live {
            return;
        }
        // Reschedule and remember the handle so teardown can cancel it.
        if let Some(w) = window() {
            if let Ok(id) =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            {
                TETRIS_STATE.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.raf_id = Some(id);
                    }
                });
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        if let Ok(id) =
            w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            TETRIS_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.raf_id = Some(id);
                }
            });
        }
    }
}

/// Pixels per cell, leaving one spare cell of margin on every playfield side.
fn cell_size(w: f64, h: f64) -> f64 {
    (w / (GRID_WIDTH as f64 + 2.0)).min(h / (GRID_HEIGHT as f64 + 2.0))
}

/// Pure presentation pass: backdrop, playfield frame, then every sprite in
/// the current block set. Also keeps the score overlay text current.
fn render(state: &TetrisState) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    let cell = cell_size(w, h);
    let ctx = &state.ctx;

    scene::paint_backdrop(ctx, w, h);

    let field_w = GRID_WIDTH as f64 * cell;
    let field_h = GRID_HEIGHT as f64 * cell;
    let left = (w - field_w) / 2.0;
    let top = (h - field_h) / 2.0;
    ctx.set_stroke_style_str("#333a4d");
    ctx.set_line_width(2.0);
    ctx.stroke_rect(left - 1.0, top - 1.0, field_w + 2.0, field_h + 2.0);

    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.05)");
    ctx.set_line_width(1.0);
    for gx in 1..GRID_WIDTH {
        let x = left + gx as f64 * cell;
        ctx.begin_path();
        ctx.move_to(x, top);
        ctx.line_to(x, top + field_h);
        ctx.stroke();
    }
    for gy in 1..GRID_HEIGHT {
        let y = top + gy as f64 * cell;
        ctx.begin_path();
        ctx.move_to(left, y);
        ctx.line_to(left + field_w, y);
        ctx.stroke();
    }

    for block in &state.blocks {
        let (px, py) = scene::to_canvas(block.sx, block.sy, w, h, cell);
        scene::draw_cube(ctx, px, py, cell, block.color);
    }

    // Keep the score overlay updated each frame
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id(SCORE_ID) {
            el.set_text_content(Some(&format!("Score: {}", state.grid.score)));
        }
    }
}
