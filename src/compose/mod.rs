//! Card composition: rasterize a payload and its measured layout into a
//! bitmap.
//!
//! Composition is side-effect free and total: missing optional assets
//! degrade to a generated placeholder or a hint string, never an error.
//! The same payload at the same scale always produces identical pixels.

pub mod canvas;
pub mod placeholder;
pub mod text;

use image::{Rgba, RgbaImage};

use crate::error::ShareError;
use crate::fonts::{FontStack, fonts};
use crate::layout::{self, CardLayout, Rect, wrap};
use crate::payload::SharePayload;

/// Gradient top color.
const BACKGROUND_TOP: Rgba<u8> = Rgba([242, 247, 255, 255]);
/// Gradient bottom color.
const BACKGROUND_BOTTOM: Rgba<u8> = Rgba([230, 240, 255, 255]);
/// Card fill.
const CARD_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// App name color.
const NAME_COLOR: Rgba<u8> = Rgba([20, 26, 41, 255]);
/// Prompt color.
const PROMPT_COLOR: Rgba<u8> = Rgba([59, 69, 92, 255]);
/// Separator line color.
const SEPARATOR_COLOR: Rgba<u8> = Rgba([235, 235, 235, 255]);
/// "Official Link" label color.
const LABEL_COLOR: Rgba<u8> = Rgba([48, 61, 92, 255]);
/// URL color.
const URL_COLOR: Rgba<u8> = Rgba([38, 43, 66, 255]);
/// QR hint color.
const HINT_COLOR: Rgba<u8> = Rgba([102, 112, 143, 255]);
/// QR caption color.
const QR_CAPTION_COLOR: Rgba<u8> = Rgba([64, 77, 115, 255]);

/// Card shadow offset, blur, and opacity.
const SHADOW_OFFSET_Y: f32 = 24.0;
const SHADOW_BLUR: f32 = 48.0;
const SHADOW_ALPHA: f32 = 0.08;

/// Logo clip radius.
const LOGO_CORNER_RADIUS: f32 = 40.0;
/// QR clip radius.
const QR_CORNER_RADIUS: f32 = 24.0;

/// Measure and compose a share card.
///
/// `scale` controls output pixel density; non-positive values fall back to
/// [`layout::DEFAULT_SCALE`]. Pure: identical inputs yield identical
/// pixels.
pub fn compose_image(payload: &SharePayload, scale: f32) -> RgbaImage {
    let fonts = fonts();
    let card_layout = CardLayout::measure(payload, fonts, scale);
    compose_with_layout(payload, &card_layout, fonts)
}

/// Compose a share card from an already-measured layout.
pub fn compose_with_layout(
    payload: &SharePayload,
    card: &CardLayout,
    fonts: &FontStack,
) -> RgbaImage {
    let s = card.scale;
    let mut img = RgbaImage::new(card.canvas_w, card.canvas_h);

    canvas::fill_vertical_gradient(&mut img, BACKGROUND_TOP, BACKGROUND_BOTTOM);
    canvas::draw_soft_shadow(
        &mut img,
        card.card,
        layout::CARD_CORNER_RADIUS * s,
        SHADOW_OFFSET_Y * s,
        SHADOW_BLUR * s,
        SHADOW_ALPHA,
    );
    canvas::fill_rounded_rect(&mut img, card.card, layout::CARD_CORNER_RADIUS * s, CARD_COLOR);

    draw_header(&mut img, payload, card, fonts);
    draw_separator(&mut img, card);
    draw_footer(&mut img, payload, card, fonts);

    img
}

/// Encode a finished bitmap as PNG bytes.
pub fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>, ShareError> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(ShareError::Encode)?;
    Ok(bytes)
}

fn draw_header(img: &mut RgbaImage, payload: &SharePayload, card: &CardLayout, fonts: &FontStack) {
    let s = card.scale;

    match payload.logo() {
        Some(logo) => {
            canvas::draw_image_fit(img, logo, card.logo, LOGO_CORNER_RADIUS * s);
        }
        None => {
            let badge = placeholder::initial_badge(
                payload.sanitized_app_name(),
                card.logo.w.round().max(1.0) as u32,
                fonts,
            );
            canvas::draw_image_fit(img, &badge, card.logo, card.logo.w / 2.0);
        }
    }

    // The name stays on one line; overlong names are ellipsized to the
    // header text column instead of painting past the card edge.
    let name = wrap::truncate_to_width(
        &fonts.bold,
        layout::NAME_SIZE * s,
        payload.sanitized_app_name(),
        card.header_text_w.max(0.0),
    );
    text::draw_line(
        img,
        &fonts.bold,
        layout::NAME_SIZE * s,
        card.header_text_x,
        card.content.y,
        NAME_COLOR,
        &name,
    );

    if card.header_text_w > 0.0 {
        let name_h = wrap::line_height(&fonts.bold, layout::NAME_SIZE * s);
        text::draw_wrapped(
            img,
            &fonts.regular,
            layout::PROMPT_SIZE * s,
            card.header_text_x,
            card.content.y + name_h + layout::NAME_PROMPT_GAP * s,
            card.header_text_w,
            PROMPT_COLOR,
            payload.sanitized_prompt(),
        );
    }
}

fn draw_separator(img: &mut RgbaImage, card: &CardLayout) {
    // Floor at one output pixel so the line stays visible at small scales.
    let line = Rect {
        x: card.content.x,
        y: card.separator_y,
        w: card.content.w,
        h: (layout::SEPARATOR_THICKNESS * card.scale).max(1.0),
    };
    canvas::fill_rounded_rect(img, line, 0.0, SEPARATOR_COLOR);
}

fn draw_footer(img: &mut RgbaImage, payload: &SharePayload, card: &CardLayout, fonts: &FontStack) {
    let s = card.scale;

    if let (Some(slot), Some(qr)) = (card.qr, payload.qrcode()) {
        canvas::draw_image_fit(img, qr, slot, QR_CORNER_RADIUS * s);
        let caption_px = layout::QR_CAPTION_SIZE * s;
        let caption_w = wrap::text_width(&fonts.bold, caption_px, layout::QR_CAPTION);
        text::draw_line(
            img,
            &fonts.bold,
            caption_px,
            slot.mid_x() - caption_w / 2.0,
            slot.max_y() + layout::QR_CAPTION_GAP * s,
            QR_CAPTION_COLOR,
            layout::QR_CAPTION,
        );
    }

    text::draw_line(
        img,
        &fonts.regular,
        layout::LABEL_SIZE * s,
        card.content.x,
        card.footer_top,
        LABEL_COLOR,
        layout::OFFICIAL_LINK_LABEL,
    );

    if card.footer_text_w <= 0.0 {
        return;
    }

    let label_h = wrap::line_height(&fonts.regular, layout::LABEL_SIZE * s);
    let url_y = card.footer_top + label_h + layout::LABEL_URL_GAP * s;
    let url_h = text::draw_wrapped(
        img,
        &fonts.mono,
        layout::URL_SIZE * s,
        card.content.x,
        url_y,
        card.footer_text_w,
        URL_COLOR,
        payload.sanitized_url(),
    );

    if card.qr.is_none() {
        text::draw_wrapped(
            img,
            &fonts.regular,
            layout::HINT_SIZE * s,
            card.content.x,
            url_y + url_h + layout::URL_HINT_GAP * s,
            card.footer_text_w,
            HINT_COLOR,
            layout::QR_HINT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CANVAS_WIDTH;

    fn payload() -> SharePayload {
        SharePayload::builder()
            .app_name("Demo")
            .prompt("Compose share cards in one call.")
            .url("https://example.com/install")
            .build()
    }

    #[test]
    fn composition_is_idempotent() {
        let a = compose_image(&payload(), 0.5);
        let b = compose_image(&payload(), 0.5);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn canvas_matches_measured_layout() {
        let card = CardLayout::measure(&payload(), fonts(), 0.5);
        let img = compose_image(&payload(), 0.5);
        assert_eq!(img.dimensions(), (card.canvas_w, card.canvas_h));
    }

    #[test]
    fn empty_payload_renders_baseline_canvas() {
        let empty = SharePayload::default();
        let img = compose_image(&empty, 1.0);
        assert_eq!(img.width(), CANVAS_WIDTH as u32);
        let baseline = CardLayout::measure(&empty, fonts(), 1.0).canvas_h;
        assert_eq!(img.height(), baseline);
    }

    #[test]
    fn missing_assets_degrade_to_placeholder_and_hint() {
        let bare = compose_image(&payload(), 0.5);

        let logo = RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 255]));
        let with_logo = compose_image(
            &SharePayload::builder()
                .app_name("Demo")
                .prompt("Compose share cards in one call.")
                .url("https://example.com/install")
                .logo(logo)
                .build(),
            0.5,
        );

        // The placeholder badge and a real logo render differently.
        assert_eq!(bare.dimensions(), with_logo.dimensions());
        assert_ne!(bare.as_raw(), with_logo.as_raw());
    }

    #[test]
    fn overlong_app_name_stays_inside_the_card() {
        let long = SharePayload::builder()
            .app_name("The Greatest Collaborative Sketching Studio Known To Anyone")
            .build();
        let card = CardLayout::measure(&long, fonts(), 1.0);
        let img = compose_image(&long, 1.0);

        let mut background = RgbaImage::new(card.canvas_w, card.canvas_h);
        canvas::fill_vertical_gradient(&mut background, BACKGROUND_TOP, BACKGROUND_BOTTOM);

        // Right of the card and its shadow feather only the gradient remains.
        let x0 = (card.card.max_x() + SHADOW_BLUR).ceil() as u32 + 1;
        let name_band = card.content.y as u32..(card.content.y + layout::NAME_SIZE * 2.0) as u32;
        for y in name_band {
            for x in x0..card.canvas_w {
                assert_eq!(
                    img.get_pixel(x, y),
                    background.get_pixel(x, y),
                    "stray paint at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn separator_remains_visible_at_small_scales() {
        let payload = SharePayload::default();
        let card = CardLayout::measure(&payload, fonts(), 0.25);
        let img = compose_image(&payload, 0.25);

        let x = card.content.mid_x() as u32;
        let y0 = card.separator_y as u32;
        let darkened =
            (y0.saturating_sub(1)..=y0 + 2).any(|y| img.get_pixel(x, y)[0] < 250);
        assert!(darkened, "separator line left no visible pixels");
    }

    #[test]
    fn qr_payload_renders_caption_column() {
        let qr = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        let with_qr = compose_image(
            &SharePayload::builder().qrcode(qr).build(),
            0.5,
        );
        let without = compose_image(&SharePayload::default(), 0.5);
        assert_ne!(with_qr.as_raw(), without.as_raw());
    }

    #[test]
    fn png_bytes_roundtrip() {
        let img = compose_image(&SharePayload::default(), 0.25);
        let bytes = png_bytes(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), img.dimensions());
        assert_eq!(decoded.as_raw(), img.as_raw());
    }
}
