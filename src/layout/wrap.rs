//! Greedy word-wrap measurement against scaled font metrics.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};

/// One measured line of wrapped text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

/// Height of one line at the given pixel size (ascent to next ascent).
pub fn line_height(font: &FontRef<'static>, px: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(px));
    scaled.height() + scaled.line_gap()
}

/// Advance width of a single-line string at the given pixel size.
pub fn text_width(font: &FontRef<'static>, px: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(px));
    text.chars()
        .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
        .sum()
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Greedy: words are packed onto a line until the next word would overflow.
/// A single word wider than the box is broken per character so no line
/// exceeds `max_width` by more than one glyph advance.
pub fn wrap(font: &FontRef<'static>, px: f32, text: &str, max_width: f32) -> Vec<Line> {
    let scaled = font.as_scaled(PxScale::from(px));
    let space = scaled.h_advance(scaled.glyph_id(' '));
    let advance = |word: &str| -> f32 {
        word.chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
            .sum()
    };

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    let mut push_line = |text: &mut String, width: &mut f32| {
        if !text.is_empty() {
            lines.push(Line {
                text: std::mem::take(text),
                width: *width,
            });
            *width = 0.0;
        }
    };

    for word in text.split_whitespace() {
        let word_width = advance(word);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + space + word_width
        };

        if needed <= max_width {
            if !current.is_empty() {
                current.push(' ');
                current_width += space;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        push_line(&mut current, &mut current_width);

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        // Overlong word: break per character.
        for ch in word.chars() {
            let ch_width = scaled.h_advance(scaled.glyph_id(ch));
            if !current.is_empty() && current_width + ch_width > max_width {
                push_line(&mut current, &mut current_width);
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    push_line(&mut current, &mut current_width);
    lines
}

/// Truncate `text` to fit `max_width` on a single line, appending an
/// ellipsis when anything is cut. Text that already fits is returned
/// unchanged.
pub fn truncate_to_width(font: &FontRef<'static>, px: f32, text: &str, max_width: f32) -> String {
    let scaled = font.as_scaled(PxScale::from(px));
    let full: f32 = text
        .chars()
        .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
        .sum();
    if full <= max_width {
        return text.to_owned();
    }

    let ellipsis = '\u{2026}';
    let ellipsis_width = scaled.h_advance(scaled.glyph_id(ellipsis));
    let mut out = String::new();
    let mut width = 0.0_f32;
    for ch in text.chars() {
        let ch_width = scaled.h_advance(scaled.glyph_id(ch));
        if width + ch_width + ellipsis_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push(ellipsis);
    out
}

/// Total height of `text` wrapped to `max_width`.
pub fn wrapped_height(font: &FontRef<'static>, px: f32, text: &str, max_width: f32) -> f32 {
    wrap(font, px, text, max_width).len() as f32 * line_height(font, px)
}
