//! Signet Render Library
//!
//! CPU raster backend for the Signet signature pad. Finished strokes are
//! flattened into a `tiny_skia::Pixmap`; frames are composed from that
//! buffer, the pad decorations and the stroke still being drawn.

mod compositor;
mod convert;
mod error;
mod export;
mod frame;

pub use compositor::PixmapCompositor;
pub use error::{RenderError, RenderResult};
pub use export::{encode_png, write_png};
pub use frame::{frame_size, render_frame, render_strokes};

/// A signature pad backed by the pixmap compositor.
pub type RasterSignaturePad = signet_core::SignaturePad<PixmapCompositor>;

/// Build a raster pad with default style.
pub fn raster_pad(bounds: kurbo::Size) -> signet_core::SignatureResult<RasterSignaturePad> {
    signet_core::SignaturePad::new(bounds, PixmapCompositor::new())
}
