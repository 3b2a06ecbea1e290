//! Draw operations produced by the game each frame, and their execution on a
//! 2d canvas context.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::error::GameError;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Clear `width` x `height` from the origin.
    Clear { width: f64, height: f64 },
    /// Sprite image centred on `(x, y)`, rotated by `angle` about its centre.
    Sprite {
        x: f64,
        y: f64,
        angle: f64,
        width: f64,
        height: f64,
    },
    /// Debug square at the latest drag sample.
    Marker {
        x: f64,
        y: f64,
        size: f64,
        color: String,
    },
}

pub fn paint(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    ops: &[DrawOp],
) -> Result<(), GameError> {
    for op in ops {
        match op {
            DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawOp::Sprite {
                x,
                y,
                angle,
                width,
                height,
            } => {
                ctx.save();
                let drawn = draw_rotated(ctx, image, *x, *y, *angle, *width, *height);
                // restore even when a transform call failed
                ctx.restore();
                drawn?;
            }
            DrawOp::Marker { x, y, size, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x, *y, *size, *size);
            }
        }
    }
    Ok(())
}

fn draw_rotated(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    x: f64,
    y: f64,
    angle: f64,
    width: f64,
    height: f64,
) -> Result<(), GameError> {
    ctx.translate(x, y)?;
    ctx.rotate(angle)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        width / -2.0,
        height / -2.0,
        width,
        height,
    )?;
    Ok(())
}
