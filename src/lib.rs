//! # qrism-shapes
//!
//! Pluggable shape generators for styling the finder patterns of QR codes. A finder
//! pattern is drawn as an **eye**, the 7x7 module ring, around a **pupil**, the 3x3
//! glyph at its centre.
//!
//! ## Features
//!
//! - **Design square**: every shape is authored in a fixed 90x90 square, the finder
//!   pattern plus one module of margin, and produced as a vector [`Path`]
//! - **Settings protocol**: shapes expose their tunables through string keys, so any
//!   shape can be persisted and restored without knowing its concrete type
//! - **Registries**: eyes and pupils are instantiated by name, enumerated alphabetically
//!   by title
//! - **Previews**: composed styles render to SVG or to a grey-level thumbnail
//!
//! ## Quick Start
//!
//! ```rust
//! use qrism_shapes::{ShapeGenerator, StyleBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Eye by name, pupil picked by the eye
//! let style = StyleBuilder::new().eye("circle").build()?;
//! assert_eq!(style.pupil().name(), "circle");
//!
//! let svg = style.to_svg(180.0);
//! let thumbnail = style.thumbnail(64);
//! # Ok(())
//! # }
//! ```
//!
//! ### Settings
//!
//! ```rust
//! use qrism_shapes::{eye, keys, EyeShape, SettingValue, SettingsBag, ShapeGenerator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, 0.5);
//! let mut pixels = eye::named("pixels", Some(&settings))?;
//!
//! // Out of range fractions are clamped, unknown keys refused
//! assert!(pixels.set_setting(&SettingValue::Float(4.0), keys::CORNER_RADIUS_FRACTION));
//! assert!(!pixels.set_setting(&SettingValue::Bool(true), "colour"));
//!
//! // Round trip through the persisted envelope
//! let json = qrism_shapes::registry::to_json(pixels.as_ref())?;
//! let restored = eye::create_from_json(&json)?;
//! assert_eq!(restored.outer_path(), pixels.outer_path());
//! # Ok(())
//! # }
//! ```
//!
//! ## Persisted Form
//!
//! A configured shape is stored as `{ "type": <name>, "settings": { <key>: <value> } }`.
//! Names are permanent. Settings that are not a number or a bool are dropped when loading,
//! and settings a shape does not understand are ignored.

pub mod builder;
pub mod common;
pub mod eye;
pub mod generator;
pub mod pupil;
pub mod registry;
pub mod render;

pub use builder::StyleBuilder;
pub use common::error::{ShapeError, ShapeResult};
pub use common::geometry::{Corners, Flip, Transform};
pub use common::path::{Path, PathCommand, Point, Rect};
pub use common::settings::{keys, EyeInnerStyle, SettingValue, SettingsBag};
pub use generator::{CopyEyeShape, CopyPupilShape, EyeShape, PupilShape, ShapeGenerator};
pub use registry::{Registry, ShapeEnvelope};
pub use render::{EyePosition, Layer, LayerKind, Style, StyleDocument};

/// Table of every eye shape
pub fn eye_registry() -> &'static Registry<dyn EyeShape> {
    eye::registry()
}

/// Table of every pupil shape
pub fn pupil_registry() -> &'static Registry<dyn PupilShape> {
    pupil::registry()
}
