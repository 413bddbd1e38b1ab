//! Card geometry: measure text and assets to size the canvas before drawing.
//!
//! Measurement is the first of two passes. The card must visually fit
//! variable-length app names, prompts, and URLs without clipping or excess
//! whitespace, so every composition measures the wrapped text blocks first
//! and derives the card and canvas heights from them. Width is fixed.

pub mod wrap;

use crate::fonts::FontStack;
use crate::payload::SharePayload;

/// Fixed canvas width in logical pixels.
pub const CANVAS_WIDTH: f32 = 1024.0;
/// Horizontal inset from canvas edge to card edge.
pub const CARD_INSET: f32 = 64.0;
/// Inset from card edge to content area.
pub const CONTENT_INSET: f32 = 48.0;
/// Logo slot edge length.
pub const LOGO_SIZE: f32 = 180.0;
/// QR slot edge length.
pub const QR_SIZE: f32 = 260.0;
/// Card corner radius.
pub const CARD_CORNER_RADIUS: f32 = 48.0;
/// Canvas margin above the card, as a multiple of [`CARD_INSET`].
pub const CARD_TOP_FACTOR: f32 = 1.5;
/// Canvas margin below the card, as a multiple of [`CARD_INSET`].
pub const CARD_BOTTOM_FACTOR: f32 = 1.5;

/// App name size (bold).
pub const NAME_SIZE: f32 = 56.0;
/// Prompt text size.
pub const PROMPT_SIZE: f32 = 32.0;
/// URL text size (monospaced).
pub const URL_SIZE: f32 = 30.0;
/// "Official Link" label size.
pub const LABEL_SIZE: f32 = 24.0;
/// Caption size under the QR code.
pub const QR_CAPTION_SIZE: f32 = 22.0;
/// QR-encouragement hint size.
pub const HINT_SIZE: f32 = 24.0;

/// Gap between the logo slot and the header text column.
pub const LOGO_TEXT_GAP: f32 = 32.0;
/// Gap between the app name and the prompt block.
pub const NAME_PROMPT_GAP: f32 = 12.0;
/// Gap between the taller header block and the separator line.
pub const SEPARATOR_GAP: f32 = 40.0;
/// Separator line thickness.
pub const SEPARATOR_THICKNESS: f32 = 1.0;
/// Gap between the separator line and the footer.
pub const SECTION_GAP: f32 = 32.0;
/// Gap between the "Official Link" label and the URL block.
pub const LABEL_URL_GAP: f32 = 12.0;
/// Gap between the URL block and the QR hint.
pub const URL_HINT_GAP: f32 = 24.0;
/// Gap between the QR code and its caption.
pub const QR_CAPTION_GAP: f32 = 12.0;
/// Gap between the footer text column and the QR column.
pub const QR_TEXT_GAP: f32 = 32.0;

/// Label above the URL.
pub const OFFICIAL_LINK_LABEL: &str = "Official Link";
/// Caption under the QR code.
pub const QR_CAPTION: &str = "Scan to install";
/// Hint shown when no QR code is supplied.
pub const QR_HINT: &str = "Tip: Add a QR code to increase installs";

/// Output pixel density used when the caller passes a non-positive scale.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Axis-aligned rectangle in scaled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }

    pub fn mid_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

/// Measured card geometry for one composition. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    /// Resolved output scale (always positive).
    pub scale: f32,
    /// Canvas size in output pixels.
    pub canvas_w: u32,
    pub canvas_h: u32,
    /// Card rectangle.
    pub card: Rect,
    /// Content rectangle inside the card.
    pub content: Rect,
    /// Logo slot; always drawn (real logo or generated placeholder).
    pub logo: Rect,
    /// Left edge and width of the header text column.
    pub header_text_x: f32,
    pub header_text_w: f32,
    /// Top of the separator line under the header.
    pub separator_y: f32,
    /// Top of the footer section.
    pub footer_top: f32,
    /// QR slot, present only when the payload carries a QR image.
    pub qr: Option<Rect>,
    /// Width of the footer text column (full content width without a QR).
    pub footer_text_w: f32,
}

impl CardLayout {
    /// Measure a payload at the given output scale.
    ///
    /// Degenerate text columns (zero or negative width) fall back to fixed
    /// single-line heights instead of measuring.
    pub fn measure(payload: &SharePayload, fonts: &FontStack, scale: f32) -> Self {
        let s = resolve_scale(scale);

        let canvas_w = CANVAS_WIDTH * s;
        let card_x = CARD_INSET * s;
        let card_y = CARD_INSET * CARD_TOP_FACTOR * s;
        let card_w = canvas_w - 2.0 * CARD_INSET * s;
        let content_x = card_x + CONTENT_INSET * s;
        let content_y = card_y + CONTENT_INSET * s;
        let content_w = card_w - 2.0 * CONTENT_INSET * s;

        // Header: logo slot beside the name + prompt column.
        let logo = Rect {
            x: content_x,
            y: content_y,
            w: LOGO_SIZE * s,
            h: LOGO_SIZE * s,
        };
        let header_text_x = logo.max_x() + LOGO_TEXT_GAP * s;
        let header_text_w = content_x + content_w - header_text_x;

        let name_h = wrap::line_height(&fonts.bold, NAME_SIZE * s);
        let prompt_h = measured_height(
            &fonts.regular,
            PROMPT_SIZE * s,
            payload.sanitized_prompt(),
            header_text_w,
        );
        let text_block_h = name_h + NAME_PROMPT_GAP * s + prompt_h;
        let header_block_h = text_block_h.max(logo.h);

        let separator_y = content_y + header_block_h + SEPARATOR_GAP * s;
        let footer_top = separator_y + SEPARATOR_THICKNESS * s + SECTION_GAP * s;

        // Footer: URL column beside the optional QR column.
        let has_qr = payload.qrcode().is_some();
        let footer_text_w = if has_qr {
            content_w - (QR_SIZE + QR_TEXT_GAP) * s
        } else {
            content_w
        };

        let label_h = wrap::line_height(&fonts.regular, LABEL_SIZE * s);
        let url_h = measured_height(
            &fonts.mono,
            URL_SIZE * s,
            payload.sanitized_url(),
            footer_text_w,
        );
        let mut text_col_h = label_h + LABEL_URL_GAP * s + url_h;
        if !has_qr {
            let hint_h =
                measured_height(&fonts.regular, HINT_SIZE * s, QR_HINT, footer_text_w);
            text_col_h += URL_HINT_GAP * s + hint_h;
        }

        let qr_block_h = if has_qr {
            QR_SIZE * s + QR_CAPTION_GAP * s + wrap::line_height(&fonts.bold, QR_CAPTION_SIZE * s)
        } else {
            0.0
        };
        let footer_h = text_col_h.max(qr_block_h);

        let content_h = header_block_h
            + SEPARATOR_GAP * s
            + SEPARATOR_THICKNESS * s
            + SECTION_GAP * s
            + footer_h;
        let card_h = content_h + 2.0 * CONTENT_INSET * s;
        let canvas_h = card_y + card_h + CARD_INSET * CARD_BOTTOM_FACTOR * s;

        Self {
            scale: s,
            canvas_w: canvas_w.round().max(1.0) as u32,
            canvas_h: canvas_h.round().max(1.0) as u32,
            card: Rect {
                x: card_x,
                y: card_y,
                w: card_w,
                h: card_h,
            },
            content: Rect {
                x: content_x,
                y: content_y,
                w: content_w,
                h: content_h,
            },
            logo,
            header_text_x,
            header_text_w,
            separator_y,
            footer_top,
            qr: has_qr.then(|| Rect {
                x: content_x + content_w - QR_SIZE * s,
                y: footer_top,
                w: QR_SIZE * s,
                h: QR_SIZE * s,
            }),
            footer_text_w,
        }
    }
}

/// Resolve a caller-supplied scale, defaulting when non-positive.
pub fn resolve_scale(scale: f32) -> f32 {
    if scale > 0.0 && scale.is_finite() {
        scale
    } else {
        DEFAULT_SCALE
    }
}

/// Wrapped height of `text`, or one line when the column is degenerate.
fn measured_height(
    font: &ab_glyph::FontRef<'static>,
    px: f32,
    text: &str,
    max_width: f32,
) -> f32 {
    if max_width > 0.0 {
        wrap::wrapped_height(font, px, text, max_width)
    } else {
        wrap::line_height(font, px)
    }
}
