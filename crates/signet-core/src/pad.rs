//! The signature pad: tracker, compositor and style state behind one API.

use crate::color::SerializableColor;
use crate::config::{SignatureConfig, validate_bounds};
use crate::decoration::Decorations;
use crate::dispatch::{BackgroundColorHandle, PendingChange, PendingQueue};
use crate::error::SignatureResult;
use crate::input::{TouchEvent, TouchPhase};
use crate::path::StrokePath;
use crate::style::{SignatureStyle, StrokeStyle, validate_stroke_width};
use crate::tracker::StrokeTracker;
use kurbo::{Point, Size};
use peniko::Color;

/// Backend that flattens finished strokes into a persistent bitmap.
///
/// Implementations own the raster buffer. Each committed path is drawn
/// exactly once over whatever the buffer already holds.
pub trait Compositor {
    /// Snapshot type returned to callers.
    type Image;

    /// Draw `path` over the buffer, creating a transparent buffer first if
    /// none exists.
    fn commit(&mut self, path: &StrokePath, stroke: &StrokeStyle);

    /// Dispose the buffer. Clearing an absent buffer is a no-op.
    fn clear(&mut self);

    /// Check if a buffer exists.
    fn has_buffer(&self) -> bool;

    /// Change the surface size used by later commits.
    fn resize(&mut self, bounds: Size);

    /// Copy of the buffer, or a transparent image of the current size.
    /// `None` only if no surface of that size can be allocated.
    fn snapshot(&self) -> Option<Self::Image>;
}

type ChangeListener = Box<dyn FnMut()>;

/// Builder for [`SignaturePad`].
pub struct SignaturePadBuilder {
    bounds: Size,
    style: SignatureStyle,
    listeners: Vec<ChangeListener>,
}

impl SignaturePadBuilder {
    /// Start building a pad of the given size.
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            style: SignatureStyle::default(),
            listeners: Vec::new(),
        }
    }

    /// Set the initial style.
    pub fn style(mut self, style: SignatureStyle) -> Self {
        self.style = style;
        self
    }

    /// Register a "signature changed" observer.
    pub fn on_change(mut self, listener: impl FnMut() + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Validate the setup and build the pad around `compositor`.
    pub fn build<C: Compositor>(self, mut compositor: C) -> SignatureResult<SignaturePad<C>> {
        validate_bounds(self.bounds)?;
        self.style.validate()?;
        compositor.resize(self.bounds);

        Ok(SignaturePad {
            tracker: StrokeTracker::new(),
            compositor,
            decorations: Decorations::new(&self.style, self.bounds),
            style: self.style,
            bounds: self.bounds,
            listeners: self.listeners,
            pending: PendingQueue::new(),
            needs_redraw: true,
        })
    }
}

/// A single-touch signature capture surface.
///
/// All methods run on the owning thread. Use
/// [`SignaturePad::background_handle`] to change the background from
/// elsewhere.
pub struct SignaturePad<C: Compositor> {
    tracker: StrokeTracker,
    compositor: C,
    style: SignatureStyle,
    decorations: Decorations,
    bounds: Size,
    listeners: Vec<ChangeListener>,
    pending: PendingQueue,
    needs_redraw: bool,
}

impl<C: Compositor> SignaturePad<C> {
    /// Build a pad with default style.
    pub fn new(bounds: Size, compositor: C) -> SignatureResult<Self> {
        SignaturePadBuilder::new(bounds).build(compositor)
    }

    /// Build a pad from a loaded config.
    pub fn from_config(config: &SignatureConfig, compositor: C) -> SignatureResult<Self> {
        SignaturePadBuilder::new(config.bounds())
            .style(config.style.clone())
            .build(compositor)
    }

    /// Register another "signature changed" observer.
    pub fn add_change_listener(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // --- Touch handling ---

    /// Touch down.
    pub fn begin(&mut self, point: Point) {
        self.tracker.begin(point);
    }

    /// Touch move. Notifies observers before the point is processed.
    pub fn move_to(&mut self, point: Point) {
        if self.tracker.is_tracking() {
            self.notify_changed();
        }
        if self.tracker.move_to(point).is_some() {
            self.needs_redraw = true;
        }
    }

    /// Touch up. Finalizes the stroke and commits it to the buffer.
    pub fn end(&mut self, point: Point) {
        let width = self.style.stroke_width as f64;
        if let Some(path) = self.tracker.end(point, width) {
            self.commit(&path);
        }
    }

    /// Touch cancelled. Handled exactly like [`SignaturePad::end`].
    pub fn cancel(&mut self, point: Point) {
        let width = self.style.stroke_width as f64;
        if let Some(path) = self.tracker.cancel(point, width) {
            self.commit(&path);
        }
    }

    /// Dispatch a touch event to the matching handler.
    pub fn handle_touch(&mut self, event: TouchEvent) {
        match event.phase {
            TouchPhase::Began => self.begin(event.position),
            TouchPhase::Moved => self.move_to(event.position),
            TouchPhase::Ended => self.end(event.position),
            TouchPhase::Cancelled => self.cancel(event.position),
        }
    }

    fn commit(&mut self, path: &StrokePath) {
        self.compositor.commit(path, &self.style.stroke_style());
        self.needs_redraw = true;
        log::debug!("Committed stroke with {} segments", path.segments().len());
    }

    fn notify_changed(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }

    // --- Signature ---

    /// Dispose the raster buffer and drop the in-progress geometry.
    ///
    /// A stroke that is still being drawn keeps tracking; only what it has
    /// emitted so far is discarded.
    pub fn clear_signature(&mut self) {
        self.compositor.clear();
        self.tracker.discard_path();
        self.needs_redraw = true;
        log::debug!("Signature cleared");
    }

    /// True iff nothing has been committed and no stroke has moved past its anchor.
    pub fn is_signature_empty(&self) -> bool {
        !self.compositor.has_buffer() && self.tracker.control_point() == 0
    }

    /// The committed signature. Strokes still in progress are not included.
    pub fn signature_image(&self) -> Option<C::Image> {
        self.compositor.snapshot()
    }

    /// Geometry of the stroke being drawn.
    pub fn in_progress(&self) -> &StrokePath {
        self.tracker.path()
    }

    pub fn tracker(&self) -> &StrokeTracker {
        &self.tracker
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    // --- Style ---

    pub fn style(&self) -> &SignatureStyle {
        &self.style
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    /// Set the stroke width in pixels. The in-progress stroke picks it up
    /// on the next frame.
    pub fn set_stroke_width(&mut self, width: u32) -> SignatureResult<()> {
        validate_stroke_width(width)?;
        self.style.stroke_width = width;
        self.needs_redraw = true;
        Ok(())
    }

    /// Set the color for strokes committed from now on.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color.into();
        self.needs_redraw = true;
    }

    /// Set the background from the owning thread.
    pub fn set_background_color(&mut self, color: Color) {
        self.apply_background(color.into());
    }

    fn apply_background(&mut self, color: SerializableColor) {
        self.style.background_color = color;
        self.decorations.apply_background(color);
        self.needs_redraw = true;
    }

    /// Show or hide the drop shadow.
    pub fn set_shadow_visible(&mut self, visible: bool) {
        self.style.shadow_enabled = visible;
        self.decorations.apply_shadow(&self.style);
        self.needs_redraw = true;
    }

    pub fn set_shadow_color(&mut self, color: Color) {
        self.style.shadow_color = color.into();
        self.decorations.apply_shadow(&self.style);
        if self.style.shadow_enabled {
            self.needs_redraw = true;
        }
    }

    /// Set the color of the prompt and caption labels.
    pub fn set_text_color(&mut self, color: Color) {
        let color = color.into();
        self.style.text_color = color;
        self.decorations.apply_text_color(color);
        self.needs_redraw = true;
    }

    /// Replace the whole style, re-deriving every decoration.
    pub fn set_style(&mut self, style: SignatureStyle) -> SignatureResult<()> {
        style.validate()?;
        self.decorations = Decorations::new(&style, self.bounds);
        self.style = style;
        self.needs_redraw = true;
        Ok(())
    }

    /// Handle for posting background changes from other threads.
    pub fn background_handle(&self) -> BackgroundColorHandle {
        self.pending.handle()
    }

    /// Apply changes posted through [`BackgroundColorHandle`]. Returns how
    /// many were applied.
    pub fn process_pending(&mut self) -> usize {
        let changes = self.pending.drain();
        for change in &changes {
            match *change {
                PendingChange::BackgroundColor(color) => self.apply_background(color),
            }
        }
        changes.len()
    }

    // --- Layout ---

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Resize the pad. The existing buffer is kept and clipped by later commits.
    pub fn set_bounds(&mut self, bounds: Size) -> SignatureResult<()> {
        validate_bounds(bounds)?;
        self.bounds = bounds;
        self.compositor.resize(bounds);
        self.decorations.apply_layout(bounds);
        self.needs_redraw = true;
        log::debug!("Signature pad resized to {}x{}", bounds.width, bounds.height);
        Ok(())
    }

    /// Return and reset the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignatureError;
    use crate::path::Segment;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records commits instead of rasterizing.
    #[derive(Default)]
    struct RecordingCompositor {
        commits: Vec<(Vec<Segment>, StrokeStyle)>,
        has_buffer: bool,
        size: Size,
    }

    impl Compositor for RecordingCompositor {
        type Image = usize;

        fn commit(&mut self, path: &StrokePath, stroke: &StrokeStyle) {
            self.commits.push((path.segments().to_vec(), *stroke));
            self.has_buffer = true;
        }

        fn clear(&mut self) {
            self.commits.clear();
            self.has_buffer = false;
        }

        fn has_buffer(&self) -> bool {
            self.has_buffer
        }

        fn resize(&mut self, bounds: Size) {
            self.size = bounds;
        }

        fn snapshot(&self) -> Option<usize> {
            Some(self.commits.len())
        }
    }

    fn pad() -> SignaturePad<RecordingCompositor> {
        SignaturePad::new(Size::new(200.0, 100.0), RecordingCompositor::default()).unwrap()
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_new_pad_is_empty() {
        let pad = pad();
        assert!(pad.is_signature_empty());
        assert_eq!(pad.compositor().size, Size::new(200.0, 100.0));
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let result = SignaturePad::new(Size::new(0.0, 10.0), RecordingCompositor::default());
        assert!(matches!(result, Err(SignatureError::EmptyBounds { .. })));
    }

    #[test]
    fn test_oversized_bounds_rejected() {
        let result = SignaturePad::new(Size::new(10000.0, 20.0), RecordingCompositor::default());
        assert!(matches!(result, Err(SignatureError::BoundsTooLarge { .. })));

        let mut pad = pad();
        assert!(pad.set_bounds(Size::new(20.0, 1.0e6)).is_err());
        assert_eq!(pad.bounds(), Size::new(200.0, 100.0));
    }

    #[test]
    fn test_tap_commits_dot() {
        let mut pad = pad();
        pad.set_stroke_width(4).unwrap();
        pad.begin(p(10.0, 10.0));
        assert!(pad.is_signature_empty());
        pad.end(p(10.0, 10.0));

        let (segments, stroke) = &pad.compositor().commits[0];
        assert_eq!(
            segments,
            &vec![Segment::Dot {
                center: p(10.0, 10.0),
                radius: 2.0
            }]
        );
        assert!((stroke.width - 4.0).abs() < f64::EPSILON);
        assert!(!pad.is_signature_empty());
    }

    #[test]
    fn test_in_flight_stroke_not_empty() {
        let mut pad = pad();
        pad.begin(p(0.0, 0.0));
        pad.move_to(p(1.0, 1.0));
        assert!(!pad.is_signature_empty());
        assert!(pad.compositor().commits.is_empty());
    }

    #[test]
    fn test_change_notified_on_every_move() {
        let count = Rc::new(Cell::new(0));
        let observed = count.clone();
        let mut pad = SignaturePadBuilder::new(Size::new(50.0, 50.0))
            .on_change(move || observed.set(observed.get() + 1))
            .build(RecordingCompositor::default())
            .unwrap();

        pad.begin(p(0.0, 0.0));
        for i in 1..=5 {
            pad.move_to(p(i as f64, 0.0));
        }
        pad.end(p(5.0, 0.0));
        assert_eq!(count.get(), 5);

        // Moves with no active stroke are not signature changes.
        pad.move_to(p(9.0, 9.0));
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn test_multiple_listeners() {
        let count = Rc::new(Cell::new(0));
        let mut pad = pad();
        for _ in 0..3 {
            let observed = count.clone();
            pad.add_change_listener(move || observed.set(observed.get() + 1));
        }
        pad.begin(p(0.0, 0.0));
        pad.move_to(p(1.0, 0.0));
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_live_segment_requests_redraw() {
        let mut pad = pad();
        pad.take_redraw_request();
        pad.begin(p(0.0, 0.0));
        pad.move_to(p(5.0, 5.0));
        pad.move_to(p(10.0, 0.0));
        assert!(!pad.take_redraw_request());
        pad.move_to(p(15.0, 5.0));
        assert!(pad.take_redraw_request());
        assert_eq!(pad.in_progress().segments().len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut pad = pad();
        pad.begin(p(0.0, 0.0));
        pad.move_to(p(10.0, 0.0));
        pad.end(p(10.0, 0.0));

        pad.clear_signature();
        assert!(pad.is_signature_empty());
        let once = (pad.signature_image(), pad.tracker().control_point());
        pad.clear_signature();
        let twice = (pad.signature_image(), pad.tracker().control_point());
        assert_eq!(once, twice);
        assert!(pad.is_signature_empty());
    }

    #[test]
    fn test_cancel_commits_like_end() {
        let mut pad = pad();
        pad.handle_touch(TouchEvent::began(0.0, 0.0));
        pad.handle_touch(TouchEvent::moved(10.0, 0.0));
        pad.handle_touch(TouchEvent::cancelled(10.0, 0.0));

        assert_eq!(pad.signature_image(), Some(1));
        assert!(matches!(pad.compositor().commits[0].0[0], Segment::Line { .. }));
    }

    #[test]
    fn test_clear_mid_stroke_keeps_tracking() {
        let mut pad = pad();
        pad.begin(p(0.0, 0.0));
        for point in [p(5.0, 5.0), p(10.0, 0.0), p(15.0, 5.0)] {
            pad.move_to(point);
        }
        pad.clear_signature();

        assert!(pad.in_progress().is_empty());
        assert!(!pad.is_signature_empty());

        pad.end(p(15.0, 5.0));
        assert!(!pad.is_signature_empty());
        let commits = &pad.compositor().commits;
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].0,
            vec![Segment::Line {
                from: p(10.0, 5.0),
                to: p(15.0, 5.0)
            }]
        );
    }

    #[test]
    fn test_cancel_matches_end_at_every_cursor() {
        let strokes: [&[Point]; 2] = [&[], &[p(5.0, 5.0), p(10.0, 0.0)]];
        for moves in strokes {
            let mut ended = pad();
            let mut cancelled = pad();
            for target in [&mut ended, &mut cancelled] {
                target.begin(p(0.0, 0.0));
                for &point in moves {
                    target.move_to(point);
                }
            }
            ended.end(p(10.0, 0.0));
            cancelled.cancel(p(10.0, 0.0));

            assert_eq!(ended.compositor().commits, cancelled.compositor().commits);
            assert!(!cancelled.tracker().is_tracking());
        }

        let mut tapped = pad();
        tapped.begin(p(3.0, 3.0));
        tapped.cancel(p(3.0, 3.0));
        assert!(matches!(tapped.compositor().commits[0].0[0], Segment::Dot { .. }));

        let mut curved = pad();
        curved.begin(p(0.0, 0.0));
        curved.move_to(p(5.0, 5.0));
        curved.move_to(p(10.0, 0.0));
        curved.cancel(p(10.0, 0.0));
        assert!(curved.compositor().commits[0].0[0].is_curve());
    }

    #[test]
    fn test_stroke_color_applies_to_next_commit() {
        let mut pad = pad();
        let red = Color::from_rgba8(255, 0, 0, 255);
        pad.set_stroke_color(red);
        pad.begin(p(1.0, 1.0));
        pad.end(p(1.0, 1.0));
        assert_eq!(
            SerializableColor::from(pad.compositor().commits[0].1.color),
            SerializableColor::new(255, 0, 0, 255)
        );
    }

    #[test]
    fn test_invalid_stroke_width_keeps_previous() {
        let mut pad = pad();
        assert!(pad.set_stroke_width(0).is_err());
        assert_eq!(pad.style().stroke_width, 2);
    }

    #[test]
    fn test_background_from_other_thread() {
        let mut pad = pad();
        let handle = pad.background_handle();
        std::thread::spawn(move || handle.set(Color::BLACK).unwrap())
            .join()
            .unwrap();

        // Nothing changes until the owning thread drains the queue.
        assert_eq!(pad.style().background_color, SerializableColor::white());
        pad.take_redraw_request();

        assert_eq!(pad.process_pending(), 1);
        assert_eq!(pad.style().background_color, SerializableColor::black());
        assert_eq!(
            SerializableColor::from(pad.decorations().background),
            SerializableColor::black()
        );
        assert!(pad.take_redraw_request());
    }

    #[test]
    fn test_shadow_toggle() {
        let mut pad = pad();
        pad.set_shadow_color(Color::from_rgba8(0, 255, 0, 255));
        assert!(pad.decorations().shadow.is_none());
        pad.set_shadow_visible(true);
        let shadow = pad.decorations().shadow.unwrap();
        assert_eq!(
            SerializableColor::from(shadow.color),
            SerializableColor::new(0, 255, 0, 255)
        );
    }

    #[test]
    fn test_set_bounds_relayouts() {
        let mut pad = pad();
        pad.set_bounds(Size::new(400.0, 400.0)).unwrap();
        assert_eq!(pad.compositor().size, Size::new(400.0, 400.0));
        assert!((pad.decorations().line.baseline.p0.y - 300.0).abs() < f64::EPSILON);
        assert!(pad.set_bounds(Size::ZERO).is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = SignatureConfig::default();
        config.style.stroke_width = 10;
        let pad = SignaturePad::from_config(&config, RecordingCompositor::default()).unwrap();
        assert_eq!(pad.style().stroke_width, 10);
        assert_eq!(pad.bounds(), config.bounds());
    }
}
