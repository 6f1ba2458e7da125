//! Pixmap-backed raster compositor.

use crate::convert::draw_stroke_path;
use kurbo::Size;
use signet_core::{Compositor, StrokePath, StrokeStyle};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// Keeps committed strokes as flat pixels.
///
/// Each commit opens a fresh surface of the current size, copies the
/// previous buffer in at the origin, strokes the new path on top and keeps
/// the result. Strokes are rasterized exactly once.
///
/// If a surface cannot be allocated the stroke is held as vector data and
/// flattened into the buffer by the next commit that succeeds.
#[derive(Debug, Clone)]
pub struct PixmapCompositor {
    width: u32,
    height: u32,
    buffer: Option<Pixmap>,
    backlog: Vec<(StrokePath, StrokeStyle)>,
}

impl Default for PixmapCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapCompositor {
    /// Create a compositor with no buffer. The pad sets its size on build.
    pub fn new() -> Self {
        Self {
            width: 1,
            height: 1,
            buffer: None,
            backlog: Vec::new(),
        }
    }

    /// The committed buffer, if any stroke has been flattened since the last clear.
    pub fn buffer(&self) -> Option<&Pixmap> {
        self.buffer.as_ref()
    }

    /// Committed strokes still waiting for a surface.
    pub fn backlog(&self) -> &[(StrokePath, StrokeStyle)] {
        &self.backlog
    }

    /// Surface size in whole pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draw everything committed so far onto `target`.
    pub fn draw_committed(&self, target: &mut Pixmap) {
        if let Some(buffer) = &self.buffer {
            target.draw_pixmap(
                0,
                0,
                buffer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        for (path, stroke) in &self.backlog {
            draw_stroke_path(target, path, stroke);
        }
    }

    fn surface(&self) -> Option<Pixmap> {
        let surface = Pixmap::new(self.width, self.height);
        if surface.is_none() {
            log::error!(
                "Could not allocate a {}x{} signature surface",
                self.width,
                self.height
            );
        }
        surface
    }
}

impl Compositor for PixmapCompositor {
    type Image = Pixmap;

    fn commit(&mut self, path: &StrokePath, stroke: &StrokeStyle) {
        let Some(mut surface) = self.surface() else {
            log::warn!("Holding stroke until a surface can be allocated");
            self.backlog.push((path.clone(), *stroke));
            return;
        };

        // Pixmap::new starts fully transparent.
        self.draw_committed(&mut surface);
        draw_stroke_path(&mut surface, path, stroke);
        self.buffer = Some(surface);
        self.backlog.clear();
    }

    fn clear(&mut self) {
        self.buffer = None;
        self.backlog.clear();
    }

    fn has_buffer(&self) -> bool {
        self.buffer.is_some() || !self.backlog.is_empty()
    }

    fn resize(&mut self, bounds: Size) {
        self.width = (bounds.width.ceil() as u32).max(1);
        self.height = (bounds.height.ceil() as u32).max(1);
    }

    fn snapshot(&self) -> Option<Pixmap> {
        if self.backlog.is_empty() {
            if let Some(buffer) = &self.buffer {
                return Some(buffer.clone());
            }
        }
        let mut surface = self.surface()?;
        self.draw_committed(&mut surface);
        Some(surface)
    }
}
