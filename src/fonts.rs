//! Embedded font faces used for measurement and rasterization.
//!
//! The card template draws with three faces: a regular face for body text,
//! a bold face for the app name and captions, and a monospaced face for the
//! URL. Embedding the faces keeps measurement deterministic across hosts.

use ab_glyph::FontRef;
use std::sync::LazyLock;

static SANS: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");
static MONO: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// The three faces the card template draws with.
#[derive(Debug)]
pub struct FontStack {
    pub regular: FontRef<'static>,
    pub bold: FontRef<'static>,
    pub mono: FontRef<'static>,
}

static FONTS: LazyLock<FontStack> = LazyLock::new(|| FontStack {
    regular: FontRef::try_from_slice(SANS).expect("embedded regular font is valid"),
    bold: FontRef::try_from_slice(SANS_BOLD).expect("embedded bold font is valid"),
    mono: FontRef::try_from_slice(MONO).expect("embedded mono font is valid"),
});

/// Shared font stack, parsed once per process.
pub fn fonts() -> &'static FontStack {
    &FONTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::{Font, PxScale, ScaleFont};

    #[test]
    fn embedded_fonts_parse() {
        let stack = fonts();
        let scaled = stack.regular.as_scaled(PxScale::from(32.0));
        assert!(scaled.ascent() > 0.0);
        assert!(scaled.h_advance(stack.regular.glyph_id('m')) > 0.0);
    }
}
