//! Share payload model and text sanitization.
//!
//! A [`SharePayload`] carries the content fields for one share card. All
//! text fields are optional; the sanitized accessors substitute defaults
//! when a field is absent or blank, so downstream components never see an
//! empty string. Payloads are immutable once built.

use image::RgbaImage;

use crate::error::ShareError;

/// Default app name when none is supplied.
pub const DEFAULT_APP_NAME: &str = "Your App";
/// Default prompt line when none is supplied.
pub const DEFAULT_PROMPT: &str = "Share-worthy features packed inside.";
/// Default URL line when none is supplied.
pub const DEFAULT_URL: &str = "Scan the QR code to install.";

/// Content fields for one share card.
#[derive(Debug, Clone, Default)]
pub struct SharePayload {
    app_name: Option<String>,
    prompt: Option<String>,
    logo: Option<RgbaImage>,
    qrcode: Option<RgbaImage>,
    url: Option<String>,
    content_image: Option<RgbaImage>,
}

impl SharePayload {
    /// Start building a payload.
    pub fn builder() -> SharePayloadBuilder {
        SharePayloadBuilder::default()
    }

    /// App name, trimmed, falling back to [`DEFAULT_APP_NAME`].
    pub fn sanitized_app_name(&self) -> &str {
        trimmed_non_empty(&self.app_name).unwrap_or(DEFAULT_APP_NAME)
    }

    /// Prompt text, trimmed, falling back to [`DEFAULT_PROMPT`].
    pub fn sanitized_prompt(&self) -> &str {
        trimmed_non_empty(&self.prompt).unwrap_or(DEFAULT_PROMPT)
    }

    /// URL text, trimmed, falling back to [`DEFAULT_URL`].
    pub fn sanitized_url(&self) -> &str {
        trimmed_non_empty(&self.url).unwrap_or(DEFAULT_URL)
    }

    /// Logo image, if supplied.
    pub fn logo(&self) -> Option<&RgbaImage> {
        self.logo.as_ref()
    }

    /// QR code image, if supplied.
    pub fn qrcode(&self) -> Option<&RgbaImage> {
        self.qrcode.as_ref()
    }

    /// Extra content image, if supplied. Participates in the fingerprint
    /// but is not drawn by the card template.
    pub fn content_image(&self) -> Option<&RgbaImage> {
        self.content_image.as_ref()
    }
}

/// Builder for [`SharePayload`].
#[derive(Debug, Clone, Default)]
pub struct SharePayloadBuilder {
    payload: SharePayload,
}

impl SharePayloadBuilder {
    /// Set the app name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.payload.app_name = Some(name.into());
        self
    }

    /// Set the prompt text.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.payload.prompt = Some(prompt.into());
        self
    }

    /// Set the URL text.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.payload.url = Some(url.into());
        self
    }

    /// Set the logo image.
    pub fn logo(mut self, image: RgbaImage) -> Self {
        self.payload.logo = Some(image);
        self
    }

    /// Decode encoded image bytes (PNG/JPEG/WebP) as the logo.
    pub fn logo_bytes(self, bytes: &[u8]) -> Result<Self, ShareError> {
        Ok(self.logo(decode(bytes)?))
    }

    /// Set the QR code image.
    pub fn qrcode(mut self, image: RgbaImage) -> Self {
        self.payload.qrcode = Some(image);
        self
    }

    /// Decode encoded image bytes as the QR code.
    pub fn qrcode_bytes(self, bytes: &[u8]) -> Result<Self, ShareError> {
        Ok(self.qrcode(decode(bytes)?))
    }

    /// Set the extra content image.
    pub fn content_image(mut self, image: RgbaImage) -> Self {
        self.payload.content_image = Some(image);
        self
    }

    /// Decode encoded image bytes as the extra content image.
    pub fn content_image_bytes(self, bytes: &[u8]) -> Result<Self, ShareError> {
        Ok(self.content_image(decode(bytes)?))
    }

    /// Finish building.
    pub fn build(self) -> SharePayload {
        self.payload
    }
}

fn decode(bytes: &[u8]) -> Result<RgbaImage, ShareError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(ShareError::Decode)
}

fn trimmed_non_empty(field: &Option<String>) -> Option<&str> {
    let value = field.as_deref()?.trim();
    (!value.is_empty()).then_some(value)
}
