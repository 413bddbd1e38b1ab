//! Content-derived cache keys.
//!
//! A [`Fingerprint`] identifies one payload by its sanitized text fields and
//! the encoded bytes of each present image. Two payloads with identical
//! sanitized text and identical image bytes produce the same fingerprint;
//! any difference in any field changes it.

use image::RgbaImage;

use crate::payload::SharePayload;

/// Joins fingerprint components; not expected to occur in hashed text.
const SEPARATOR: &str = "|";

/// Sentinel tokens for absent images, so absence is distinguishable from a
/// zero-length hash.
const NO_LOGO: &str = "no-logo";
const NO_QR: &str = "no-qr";
const NO_CONTENT: &str = "no-content";

/// A 256-bit content hash (blake3 output) identifying one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Create a new Fingerprint from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (used as the on-disk filename stem).
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        if bytes.len() != 32 {
            return None;
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Some(Self(arr))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Compute the fingerprint for a payload.
///
/// Pure and deterministic: sanitize each text field, hash each present
/// image's encoded bytes (or substitute a sentinel token), join with an
/// unambiguous separator, hash the joined string.
pub fn fingerprint(payload: &SharePayload) -> Fingerprint {
    let components = [
        payload.sanitized_app_name().to_owned(),
        payload.sanitized_prompt().to_owned(),
        payload.sanitized_url().to_owned(),
        image_component(payload.logo(), NO_LOGO),
        image_component(payload.qrcode(), NO_QR),
        image_component(payload.content_image(), NO_CONTENT),
    ];
    let joined = components.join(SEPARATOR);
    Fingerprint::new(*blake3::hash(joined.as_bytes()).as_bytes())
}

/// Hash an image's encoded bytes, or return the sentinel when absent.
fn image_component(image: Option<&RgbaImage>, sentinel: &str) -> String {
    let Some(image) = image else {
        return sentinel.to_owned();
    };
    // Encoding an in-memory RGBA buffer only fails on pathological
    // dimensions; fall back to the raw pixel buffer in that case.
    let bytes = crate::compose::png_bytes(image).unwrap_or_else(|_| image.as_raw().clone());
    hex::encode(blake3::hash(&bytes).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn payload() -> SharePayload {
        SharePayload::builder()
            .app_name("Demo")
            .prompt("Try it")
            .url("https://example.com")
            .build()
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint(&payload()), fingerprint(&payload()));
    }

    #[test]
    fn sanitization_applies_before_hashing() {
        let explicit = SharePayload::builder()
            .app_name("  Demo  ")
            .prompt("Try it")
            .url("https://example.com")
            .build();
        assert_eq!(fingerprint(&payload()), fingerprint(&explicit));
    }

    #[test]
    fn each_text_field_changes_fingerprint() {
        let base = fingerprint(&payload());
        let renamed = SharePayload::builder()
            .app_name("Demo2")
            .prompt("Try it")
            .url("https://example.com")
            .build();
        let reprompted = SharePayload::builder()
            .app_name("Demo")
            .prompt("Try it now")
            .url("https://example.com")
            .build();
        let relinked = SharePayload::builder()
            .app_name("Demo")
            .prompt("Try it")
            .url("https://example.org")
            .build();
        assert_ne!(base, fingerprint(&renamed));
        assert_ne!(base, fingerprint(&reprompted));
        assert_ne!(base, fingerprint(&relinked));
    }

    #[test]
    fn image_bytes_change_fingerprint() {
        let red = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let blue = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        let without = fingerprint(&payload());
        let with_red = fingerprint(
            &SharePayload::builder()
                .app_name("Demo")
                .prompt("Try it")
                .url("https://example.com")
                .logo(red.clone())
                .build(),
        );
        let with_blue = fingerprint(
            &SharePayload::builder()
                .app_name("Demo")
                .prompt("Try it")
                .url("https://example.com")
                .logo(blue)
                .build(),
        );
        let as_qr = fingerprint(
            &SharePayload::builder()
                .app_name("Demo")
                .prompt("Try it")
                .url("https://example.com")
                .qrcode(red)
                .build(),
        );

        assert_ne!(without, with_red);
        assert_ne!(with_red, with_blue);
        // Same bytes in a different slot is a different payload.
        assert_ne!(with_red, as_qr);
    }

    #[test]
    fn hex_roundtrip() {
        let original = Fingerprint::new([0x12; 32]);
        let recovered = Fingerprint::from_hex(&original.to_hex()).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn display_is_abbreviated_hex() {
        let fp = Fingerprint::new([0xab; 32]);
        assert_eq!(format!("{fp}"), "abababababababab");
    }
}
