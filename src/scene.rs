//! Scene helpers shared by the game pages.
//!
//! Game blocks are unit cubes in a scene centered at the origin, y up; this
//! module maps that scene onto the 2D canvas and fakes the cube look: a front
//! face in the base color with lit top-left and shaded bottom-right bevels,
//! over a dark gradient backdrop. Everything geometric here is pure and
//! unit-tested; only the drawing calls touch the canvas.

use web_sys::CanvasRenderingContext2d;

/// Grid cell (col, row 0 = top) to scene coordinates: origin at the grid
/// center, y up, one unit per cell, positions at cell centers.
pub(crate) fn scene_position(x: i32, y: i32, cols: usize, rows: usize) -> (f64, f64) {
    (
        x as f64 - cols as f64 / 2.0 + 0.5,
        rows as f64 / 2.0 - y as f64 - 0.5,
    )
}

/// Scene coordinates to canvas pixels for a given cell size in pixels.
pub(crate) fn to_canvas(sx: f64, sy: f64, width: f64, height: f64, cell: f64) -> (f64, f64) {
    (width / 2.0 + sx * cell, height / 2.0 - sy * cell)
}

/// Scales a `#rrggbb` color channel-wise, clamped to [0, 255]. Unparseable
/// input falls back to mid gray rather than failing a render pass.
pub(crate) fn shade(color: &str, factor: f64) -> String {
    let (r, g, b) = parse_hex(color).unwrap_or((128, 128, 128));
    let scale = |v: u8| ((v as f64 * factor).round().clamp(0.0, 255.0)) as u8;
    format!("rgb({}, {}, {})", scale(r), scale(g), scale(b))
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Dark vertical gradient over the whole canvas; drawn first every frame.
pub(crate) fn paint_backdrop(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    let _ = gradient.add_color_stop(0.0, "#10101b");
    let _ = gradient.add_color_stop(1.0, "#05050a");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);
}

/// One unit cube centered at (cx, cy) in canvas pixels. Bevels stay inside
/// the cell so neighboring cubes never overdraw each other.
pub(crate) fn draw_cube(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, size: f64, color: &str) {
    let half = size / 2.0;
    let x = cx - half;
    let y = cy - half;
    let bevel = (size * 0.16).max(2.0);

    ctx.set_fill_style_str(color);
    ctx.fill_rect(x, y, size, size);

    // Lit top and left faces.
    ctx.set_fill_style_str(&shade(color, 1.4));
    ctx.begin_path();
    ctx.move_to(x, y);
    ctx.line_to(x + size, y);
    ctx.line_to(x + size - bevel, y + bevel);
    ctx.line_to(x + bevel, y + bevel);
    ctx.line_to(x + bevel, y + size - bevel);
    ctx.line_to(x, y + size);
    ctx.close_path();
    ctx.fill();

    // Shaded bottom and right faces.
    ctx.set_fill_style_str(&shade(color, 0.55));
    ctx.begin_path();
    ctx.move_to(x + size, y);
    ctx.line_to(x + size, y + size);
    ctx.line_to(x, y + size);
    ctx.line_to(x + bevel, y + size - bevel);
    ctx.line_to(x + size - bevel, y + size - bevel);
    ctx.line_to(x + size - bevel, y + bevel);
    ctx.close_path();
    ctx.fill();

    ctx.set_stroke_style_str("#1a1a1a");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, size, size);
}
