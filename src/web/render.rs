// Canvas drawing for one frame. Reads the round by reference only.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::FishingConfig;
use crate::fishing::{Direction, Fish, ItemKind, LabeledItem, Payload, Round};

// Boat sizing + how deep it sits in the water.
const BOAT_W: f64 = 350.0;
const BOAT_H: f64 = 290.0;
const BOAT_SIT: f64 = 160.0;

const TAG_FONT: &str = "14px system-ui, -apple-system, Segoe UI, Roboto, sans-serif";

/// Draw the whole scene. `scale` maps playfield units onto canvas pixels.
pub(super) fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    scale: f64,
    round: &Round,
    cfg: &FishingConfig,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)?;
    let pf = &cfg.playfield;
    ctx.clear_rect(0.0, 0.0, pf.width, pf.height);

    draw_background(ctx, cfg)?;
    let rod_x = round.hook().rod_x();
    draw_boat(ctx, rod_x, pf.waterline);
    draw_rod_and_hook(ctx, rod_x, round.hook().depth(), pf.waterline)?;
    for fish in round.fish().iter().filter(|f| f.is_live()) {
        draw_fish(ctx, fish)?;
    }
    ctx.restore();
    Ok(())
}

fn draw_background(ctx: &CanvasRenderingContext2d, cfg: &FishingConfig) -> Result<(), JsValue> {
    let pf = &cfg.playfield;
    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, pf.waterline);
    sky.add_color_stop(0.0, "#a7d7ff")?;
    sky.add_color_stop(1.0, "#dff1ff")?;
    ctx.set_fill_style(&sky);
    ctx.fill_rect(0.0, 0.0, pf.width, pf.waterline);

    let water = ctx.create_linear_gradient(0.0, pf.waterline, 0.0, pf.height);
    water.add_color_stop(0.0, "#2aa0e0")?;
    water.add_color_stop(1.0, "#02679c")?;
    ctx.set_fill_style(&water);
    ctx.fill_rect(0.0, pf.waterline, pf.width, pf.height - pf.waterline);
    Ok(())
}

fn boat_top(waterline: f64) -> f64 {
    waterline - BOAT_H + BOAT_SIT
}

fn draw_boat(ctx: &CanvasRenderingContext2d, x: f64, waterline: f64) {
    // Hull: trapezoid straddling the waterline, cabin on top.
    let half = BOAT_W / 2.0;
    ctx.set_fill_style(&JsValue::from_str("#8b5a2b"));
    ctx.begin_path();
    ctx.move_to(x - half, waterline - 30.0);
    ctx.line_to(x + half, waterline - 30.0);
    ctx.line_to(x + half - 50.0, waterline + 20.0);
    ctx.line_to(x - half + 50.0, waterline + 20.0);
    ctx.close_path();
    ctx.fill();
    ctx.set_fill_style(&JsValue::from_str("#f4f1e8"));
    ctx.fill_rect(x - 70.0, boat_top(waterline) + 95.0, 90.0, 45.0);
}

fn draw_rod_and_hook(ctx: &CanvasRenderingContext2d, x: f64, depth: f64, waterline: f64) -> Result<(), JsValue> {
    let top = boat_top(waterline);

    ctx.set_stroke_style(&JsValue::from_str("#333"));
    ctx.set_line_width(3.0);
    ctx.begin_path();
    ctx.move_to(x, top + 130.0);
    ctx.line_to(x + 90.0, top + 80.0);
    ctx.stroke();

    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(x + 90.0, top + 80.0);
    ctx.line_to(x, waterline + depth);
    ctx.stroke();

    ctx.set_stroke_style(&JsValue::from_str("#111"));
    ctx.set_line_width(3.0);
    ctx.begin_path();
    ctx.arc(x, waterline + depth, 8.0, PI * 0.2, PI * 1.3)?;
    ctx.stroke();
    Ok(())
}

fn draw_fish(ctx: &CanvasRenderingContext2d, fish: &Fish) -> Result<(), JsValue> {
    let cx = fish.x + fish.width / 2.0;
    let cy = fish.y + fish.height / 2.0;
    let body = if fish.payload.looks_bad() { "#ff5757" } else { "#72e06a" };

    ctx.save();
    ctx.translate(cx, cy)?;
    if fish.direction() == Direction::RightToLeft {
        ctx.scale(-1.0, 1.0)?;
    }
    ctx.set_fill_style(&JsValue::from_str(body));
    // Tail trails behind the direction of travel.
    ctx.begin_path();
    ctx.move_to(-fish.width / 2.8, 0.0);
    ctx.line_to(-fish.width / 2.0, -fish.height / 3.0);
    ctx.line_to(-fish.width / 2.0, fish.height / 3.0);
    ctx.close_path();
    ctx.fill();
    ctx.begin_path();
    ctx.ellipse(0.0, 0.0, fish.width / 2.8, fish.height / 2.0, 0.0, 0.0, PI * 2.0)?;
    ctx.fill();
    ctx.set_fill_style(&JsValue::from_str("#111"));
    ctx.begin_path();
    ctx.arc(fish.width / 5.0, -fish.height / 8.0, 4.0, 0.0, PI * 2.0)?;
    ctx.fill();
    ctx.restore();

    let above = fish.y - 16.0;
    let below = fish.y + fish.height + 16.0;
    match fish.payload {
        Payload::Simple(item) => draw_tag(ctx, cx, below, item)?,
        Payload::Advanced { sender, hook } => {
            if let Some(item) = sender {
                draw_tag(ctx, cx, above, item)?;
            }
            if let Some(item) = hook {
                draw_tag(ctx, cx, below, item)?;
            }
        }
    }
    Ok(())
}

/// Rounded label centered on `(cx, cy)`, red for bad and green for good.
fn draw_tag(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, item: LabeledItem) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_font(TAG_FONT);
    let pad_x = 8.0;
    let w = ctx.measure_text(item.label)?.width() + pad_x * 2.0;
    let h = 22.0;
    let r = 8.0;
    let x = cx - w / 2.0;
    let y = cy - h / 2.0;

    let fill = match item.kind {
        ItemKind::Bad => "#7a1010",
        ItemKind::Good => "#0e5a2b",
    };
    ctx.set_fill_style(&JsValue::from_str(fill));
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    ctx.fill();

    ctx.set_fill_style(&JsValue::from_str("#fff"));
    ctx.set_text_align("left");
    ctx.fill_text(item.label, x + pad_x, y + h - 7.0)?;
    ctx.restore();
    Ok(())
}
