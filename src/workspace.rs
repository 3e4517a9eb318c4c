//! Workspace page: the registry's scratch entry.
//!
//! A bare scene with a single demo cube, kept around for trying out rendering
//! changes without touching a real game. Draws once; there is nothing to
//! animate or tear down here.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::scene;

const CANVAS_ID: &str = "ug-workspace-canvas";
const CUBE_SIZE: f64 = 96.0;

pub fn mount_workspace() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if let Some(info) = crate::games::game_info_by_id(crate::games::WORKSPACE_GAME_ID) {
        doc.set_title(info.name);
    }

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(640);
        c.set_height(640);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); border-radius:12px; border:2px solid #222; background:#0b0b12; z-index:20;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    scene::paint_backdrop(&ctx, w, h);

    // One white cube at the scene origin.
    let (sx, sy) = scene::scene_position(0, 0, 1, 1);
    let (px, py) = scene::to_canvas(sx, sy, w, h, CUBE_SIZE);
    scene::draw_cube(&ctx, px, py, CUBE_SIZE, "#ffffff");
    Ok(())
}
