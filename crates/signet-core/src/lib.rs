//! Signet Core Library
//!
//! Platform-agnostic stroke tracking, style state and pad logic for the
//! Signet signature pad. Rasterization lives behind the [`Compositor`] trait
//! so this crate never touches pixels.

pub mod color;
pub mod config;
pub mod decoration;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod pad;
pub mod path;
pub mod style;
pub mod tracker;

pub use color::SerializableColor;
pub use config::{MAX_PAD_DIMENSION, SignatureConfig};
pub use decoration::{Decorations, ShadowGeometry, SignatureLine};
pub use dispatch::{BackgroundColorHandle, PendingChange};
pub use error::{SignatureError, SignatureResult};
pub use input::{TouchEvent, TouchPhase};
pub use pad::{Compositor, SignaturePad, SignaturePadBuilder};
pub use path::{Segment, StrokePath};
pub use style::{SignatureStyle, StrokeStyle, DEFAULT_STROKE_WIDTH};
pub use tracker::{StrokeTracker, TrackerState, WINDOW_LEN};
