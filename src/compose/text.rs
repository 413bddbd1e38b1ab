//! Glyph rasterization onto the RGBA canvas.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::compose::canvas::blend_px;
use crate::layout::wrap;

/// Draw a single line of text with its top edge at `top_y`.
///
/// Returns the advance width of the drawn line.
pub fn draw_line(
    img: &mut RgbaImage,
    font: &FontRef<'static>,
    px: f32,
    x: f32,
    top_y: f32,
    color: Rgba<u8>,
    text: &str,
) -> f32 {
    let scale = PxScale::from(px);
    let scaled = font.as_scaled(scale);
    let baseline = top_y + scaled.ascent();
    let mut caret = x;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, cov| {
                if cov <= 0.0 {
                    return;
                }
                let dx = bounds.min.x as i64 + i64::from(gx);
                let dy = bounds.min.y as i64 + i64::from(gy);
                if dx < 0 || dy < 0 {
                    return;
                }
                blend_px(img, dx as u32, dy as u32, color, cov);
            });
        }
        caret += scaled.h_advance(id);
    }

    caret - x
}

/// Draw `text` word-wrapped into a column of `max_width` starting at
/// (`x`, `top_y`).
///
/// Returns the total height consumed.
pub fn draw_wrapped(
    img: &mut RgbaImage,
    font: &FontRef<'static>,
    px: f32,
    x: f32,
    top_y: f32,
    max_width: f32,
    color: Rgba<u8>,
    text: &str,
) -> f32 {
    let line_h = wrap::line_height(font, px);
    let mut y = top_y;
    for line in wrap::wrap(font, px, text, max_width) {
        draw_line(img, font, px, x, y, color, &line.text);
        y += line_h;
    }
    y - top_y
}
