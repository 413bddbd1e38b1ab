//! Sharekit - promotional share-card composition with two-tier caching.
//!
//! The crate renders a fixed share-card template (app name, prompt, logo,
//! QR code, URL) into an RGBA bitmap. The canvas is sized dynamically by a
//! measure-then-draw pass so variable-length text fits without clipping or
//! excess whitespace, and finished cards are cached in memory and on disk
//! under a content fingerprint so repeat requests skip the render.
//!
//! ```no_run
//! use sharekit::{SharePayload, compose_image};
//!
//! let payload = SharePayload::builder()
//!     .app_name("Sketchy")
//!     .prompt("Draw together, anywhere.")
//!     .url("https://sketchy.example")
//!     .build();
//! let card = compose_image(&payload, 2.0);
//! ```
//!
//! Share-sheet presentation is out of scope: callers hand the finished
//! image to whatever presentation layer the host platform provides.

pub mod cache;
pub mod compose;
pub mod error;
pub mod fingerprint;
pub mod fonts;
pub mod layout;
pub mod logger;
pub mod payload;

pub use cache::{RequestSlot, ShareImageCache, shared};
pub use compose::{compose_image, png_bytes};
pub use error::ShareError;
pub use fingerprint::{Fingerprint, fingerprint};
pub use payload::SharePayload;
