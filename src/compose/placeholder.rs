//! Generated initial-letter badge used when no logo is supplied.

use image::{Rgba, RgbaImage};

use crate::compose::canvas::fill_rounded_rect;
use crate::compose::text::draw_line;
use crate::fonts::FontStack;
use crate::layout::{Rect, wrap};

/// Badge background (indigo).
const BADGE_COLOR: Rgba<u8> = Rgba([74, 87, 250, 255]);
/// Letter color.
const LETTER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Letter size as a fraction of the badge diameter.
const LETTER_FRACTION: f32 = 0.48;

/// Render a circular badge with the uppercased first letter of `app_name`.
///
/// The badge is a standalone bitmap sized to the logo slot; the composer
/// places it exactly like a supplied logo.
pub fn initial_badge(app_name: &str, diameter: u32, fonts: &FontStack) -> RgbaImage {
    let diameter = diameter.max(1);
    let mut badge = RgbaImage::new(diameter, diameter);
    let d = diameter as f32;

    let circle = Rect {
        x: 0.0,
        y: 0.0,
        w: d,
        h: d,
    };
    fill_rounded_rect(&mut badge, circle, d / 2.0, BADGE_COLOR);

    let initial: String = app_name
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_owned());

    let px = d * LETTER_FRACTION;
    let width = wrap::text_width(&fonts.bold, px, &initial);
    let height = wrap::line_height(&fonts.bold, px);
    draw_line(
        &mut badge,
        &fonts.bold,
        px,
        (d - width) / 2.0,
        (d - height) / 2.0,
        LETTER_COLOR,
        &initial,
    );

    badge
}
